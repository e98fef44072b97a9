//! `ghga-metadata` application.

use super::types::{GhgaMetadataCli, GhgaMetadataCommand, ReportFormat};
use crate::config::ServiceConfig;
use crate::generator::{
    Generator, JsonSchemaGenerator, JsonSchemaOptions, PydanticGenerator, PydanticTemplate,
};
use crate::loader::load_schema;
use crate::validator::{JsonSchemaValidationPlugin, ValidationPlugin, load_record};
use anyhow::{Context, Result, bail};
use clap::Parser;
use linkml_core::prelude::ValidationReport;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Main CLI application
pub struct GhgaMetadataApp {
    cli: GhgaMetadataCli,
}

impl GhgaMetadataApp {
    /// Create the application from command line arguments
    #[must_use]
    pub fn from_args() -> Self {
        Self::new(GhgaMetadataCli::parse())
    }

    /// Create the application from parsed arguments
    #[must_use]
    pub fn new(cli: GhgaMetadataCli) -> Self {
        Self { cli }
    }

    /// Run the command, writing its output to stdout
    ///
    /// # Errors
    ///
    /// Returns error if the command fails or any validated record is invalid.
    pub async fn run(self) -> Result<()> {
        self.init_logging();

        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        match self.execute(&mut out).await {
            Ok(()) => Ok(()),
            Err(err) => {
                error!("Command failed: {err:#}");
                Err(err)
            }
        }
    }

    /// Configure tracing subscriber based on CLI flags; `RUST_LOG` wins
    fn init_logging(&self) {
        let default_level = if self.cli.quiet {
            "error"
        } else if self.cli.verbose {
            "debug"
        } else {
            "warn"
        };
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

        // Generated code goes to stdout, so logs go to stderr
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
    }

    /// Execute the command, writing its output to `out`
    ///
    /// # Errors
    ///
    /// Returns error if the command fails or any validated record is invalid.
    pub async fn execute<W: Write>(&self, out: &mut W) -> Result<()> {
        match &self.cli.command {
            GhgaMetadataCommand::GenPydantic {
                schema,
                template_file,
            } => self.gen_pydantic(schema, template_file.as_deref(), out).await,
            GhgaMetadataCommand::GenJsonSchema {
                schema,
                top_class,
                inline,
                closed,
                include_range_class_descendants,
            } => {
                let options = JsonSchemaOptions {
                    top_class: top_class.clone(),
                    inline: *inline,
                    not_closed: !*closed,
                    include_range_class_descendants: *include_range_class_descendants,
                };
                self.gen_json_schema(schema, options, out).await
            }
            GhgaMetadataCommand::Validate {
                schema,
                target_class,
                format,
                data,
            } => {
                self.validate(schema, target_class.as_deref(), *format, data, out)
                    .await
            }
            GhgaMetadataCommand::ShowConfig { prefix } => self.show_config(prefix, out),
        }
    }

    async fn gen_pydantic<W: Write>(
        &self,
        schema_path: &Path,
        template_file: Option<&Path>,
        out: &mut W,
    ) -> Result<()> {
        let schema = load_schema(schema_path).await?;

        let mut generator = PydanticGenerator::new();
        if let Some(path) = template_file {
            let template = PydanticTemplate::from_file(path)
                .await
                .with_context(|| format!("Failed to load template {}", path.display()))?;
            generator = generator.with_template(template);
        }

        let code = generator.generate(&schema)?;
        out.write_all(code.as_bytes())?;
        Ok(())
    }

    async fn gen_json_schema<W: Write>(
        &self,
        schema_path: &Path,
        options: JsonSchemaOptions,
        out: &mut W,
    ) -> Result<()> {
        let schema = load_schema(schema_path).await?;
        let generator = JsonSchemaGenerator::with_options(options);
        let output = generator.generate(&schema)?;
        writeln!(out, "{output}")?;
        Ok(())
    }

    async fn validate<W: Write>(
        &self,
        schema_path: &Path,
        target_class: Option<&str>,
        format: ReportFormat,
        data: &[PathBuf],
        out: &mut W,
    ) -> Result<()> {
        let plugin = JsonSchemaValidationPlugin::from_path(schema_path, None).await?;

        let mut invalid = 0;
        for path in data {
            let record = load_record(path).await?;
            let report = plugin.process(&record, target_class)?;
            if !report.valid {
                invalid += 1;
            }
            write_report(out, path, &report, format)?;
        }

        info!(records = data.len(), invalid, "Validation finished");
        if invalid > 0 {
            bail!("{invalid} of {} record(s) failed validation", data.len());
        }
        Ok(())
    }

    fn show_config<W: Write>(&self, prefix: &str, out: &mut W) -> Result<()> {
        let config = ServiceConfig::load(prefix)?;
        out.write_all(serde_yaml::to_string(&config)?.as_bytes())?;
        Ok(())
    }
}

fn write_report<W: Write>(
    out: &mut W,
    path: &Path,
    report: &ValidationReport,
    format: ReportFormat,
) -> Result<()> {
    match format {
        ReportFormat::Json => {
            let value = serde_json::json!({
                "file": path.display().to_string(),
                "report": report,
            });
            writeln!(out, "{}", serde_json::to_string(&value)?)?;
        }
        ReportFormat::Pretty => {
            if report.valid {
                writeln!(out, "{}: valid", path.display())?;
            } else {
                writeln!(
                    out,
                    "{}: invalid ({} error(s))",
                    path.display(),
                    report.errors.len()
                )?;
                for message in report.messages() {
                    writeln!(out, "  {message}")?;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_gen_json_schema_flags() {
        let cli = GhgaMetadataCli::parse_from([
            "ghga-metadata",
            "gen-json-schema",
            "schema.yaml",
            "-t",
            "Submission",
            "--closed",
        ]);
        match cli.command {
            GhgaMetadataCommand::GenJsonSchema {
                top_class,
                closed,
                inline,
                ..
            } => {
                assert_eq!(top_class.as_deref(), Some("Submission"));
                assert!(closed);
                assert!(!inline);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_validate_requires_data() {
        let result =
            GhgaMetadataCli::try_parse_from(["ghga-metadata", "validate", "--schema", "s.yaml"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_pretty_report_lists_errors() {
        let report = ValidationReport::from_errors(vec![
            linkml_core::prelude::ValidationError::new("'alias' is a required property")
                .with_path("/samples/0"),
        ]);
        let mut out = Vec::new();
        write_report(&mut out, Path::new("record.json"), &report, ReportFormat::Pretty)
            .expect("write to buffer");
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.starts_with("record.json: invalid (1 error(s))"));
        assert!(text.contains("at /samples/0"));
    }
}
