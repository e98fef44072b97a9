//! GHGA metadata command-line tool

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    ghga_metadata_utils::cli::run().await
}
