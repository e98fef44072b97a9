//! Command-line interface of the `ghga-metadata` binary

mod app;
mod types;

pub use app::GhgaMetadataApp;
pub use types::{GhgaMetadataCli, GhgaMetadataCommand, ReportFormat};

/// Main entry point for the CLI
///
/// # Errors
/// Returns error if CLI execution fails.
pub async fn run() -> anyhow::Result<()> {
    GhgaMetadataApp::from_args().run().await
}
