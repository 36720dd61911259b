// SPDX-License-Identifier: GPL-3.0-only
mod compressor;
mod config;
mod downloader;
mod error;
mod extractor;
mod fetcher;
mod logging;
mod manifest;
mod utils;

#[cfg(test)]
mod test_helpers;

use tracing::{error, info};

use config::Config;
use fetcher::Fetcher;
use logging::setup_logging;
use manifest::Manifest;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::load()?;

    // Initialize logging
    setup_logging(&config.log_level)?;

    info!("Starting election-fetch v{}", env!("CARGO_PKG_VERSION"));

    let fetcher = Fetcher::new(&config)?;
    let manifest = Manifest::june_2018();
    info!(
        base_dir = %config.base_dir.display(),
        directories = ?manifest.directories(),
        "Fetching {} resources",
        manifest.resources.len()
    );

    match fetcher.run(&manifest).await {
        Ok(report) => {
            for artifact in &report.artifacts {
                info!(path = %artifact.display(), "Artifact ready");
            }
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Fetch aborted");
            Err(e.into())
        }
    }
}
