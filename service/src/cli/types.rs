//! CLI type definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::DEFAULT_PREFIX;

/// GHGA metadata schema tools
#[derive(Parser, Debug)]
#[command(name = "ghga-metadata", author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct GhgaMetadataCli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode - only errors are logged
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: GhgaMetadataCommand,
}

/// Report formats for the `validate` command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// One line per error
    #[default]
    Pretty,
    /// Reports as JSON
    Json,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum GhgaMetadataCommand {
    /// Generate Pydantic models
    GenPydantic {
        /// Schema file path
        schema: PathBuf,
        /// Jinja template replacing the default one
        #[arg(long)]
        template_file: Option<PathBuf>,
    },

    /// Generate a JSON Schema
    GenJsonSchema {
        /// Schema file path
        schema: PathBuf,
        /// Class whose slots become the top-level properties
        #[arg(short = 't', long)]
        top_class: Option<String>,
        /// Embed every class range
        #[arg(short = 'i', long)]
        inline: bool,
        /// Disallow additional top-level properties
        #[arg(long)]
        closed: bool,
        /// Accept any non-abstract descendant of a range class
        #[arg(long)]
        include_range_class_descendants: bool,
    },

    /// Validate metadata records
    Validate {
        /// Schema file path
        #[arg(short, long)]
        schema: PathBuf,
        /// Class each record is validated as
        #[arg(short = 'C', long)]
        target_class: Option<String>,
        /// Report format
        #[arg(short, long, value_enum, default_value_t = ReportFormat::Pretty)]
        format: ReportFormat,
        /// Record file(s) to validate
        #[arg(required = true)]
        data: Vec<PathBuf>,
    },

    /// Print the effective microservice configuration
    ShowConfig {
        /// Environment variable and config file prefix
        #[arg(long, default_value = DEFAULT_PREFIX)]
        prefix: String,
    },
}
