// SPDX-License-Identifier: GPL-3.0-only
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::compressor::GzipCompressor;
use crate::config::Config;
use crate::downloader::{Downloader, HttpDownloader};
use crate::error::{FetchError, Result};
use crate::extractor::{Extractor, ZipExtractor};
use crate::manifest::{Manifest, PostStep};

/// Files left on disk by a completed run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FetchReport {
    pub directories: Vec<PathBuf>,
    pub artifacts: Vec<PathBuf>,
}

pub struct Fetcher {
    base_dir: PathBuf,
    downloader: Box<dyn Downloader>,
    extractor: Box<dyn Extractor>,
    compressor: GzipCompressor,
}

impl Fetcher {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            base_dir: config.base_dir.clone(),
            downloader: Box::new(HttpDownloader::new(config)?),
            extractor: Box::new(ZipExtractor::new(
                config.max_extraction_size_bytes,
                config.max_extraction_file_count,
            )),
            compressor: GzipCompressor::new(),
        })
    }

    /// Create `path` and any missing parents; an existing directory is not an error
    pub async fn ensure_directory(&self, path: &Path) -> Result<()> {
        tokio::fs::create_dir_all(path)
            .await
            .map_err(|e| FetchError::fs(path, e))?;
        debug!(path = %path.display(), "Directory ready");
        Ok(())
    }

    pub async fn download(&self, url: &str, dest_dir: &Path) -> Result<PathBuf> {
        self.downloader.download(url, dest_dir).await
    }

    /// Unzip `archive` next to itself, keeping the archive
    pub async fn unpack(&self, archive: &Path) -> Result<Vec<PathBuf>> {
        let dest = archive.parent().unwrap_or_else(|| Path::new("."));
        self.extractor.extract(archive, dest).await
    }

    pub async fn compress(&self, path: &Path) -> Result<PathBuf> {
        self.compressor.compress(path).await
    }

    /// Fetch every resource in order, stopping at the first failure
    pub async fn run(&self, manifest: &Manifest) -> Result<FetchReport> {
        let mut report = FetchReport::default();

        for resource in &manifest.resources {
            let dir = self.base_dir.join(&resource.dest_dir);
            if !report.directories.contains(&dir) {
                self.ensure_directory(&dir).await?;
                report.directories.push(dir.clone());
            }

            let downloaded = self.download(&resource.url, &dir).await?;

            match resource.post {
                PostStep::Keep => report.artifacts.push(downloaded),
                PostStep::Unpack => {
                    let unpacked = self.unpack(&downloaded).await?;
                    report.artifacts.push(downloaded);
                    report.artifacts.extend(unpacked);
                }
                PostStep::Compress => {
                    let compressed = self.compress(&downloaded).await?;
                    report.artifacts.push(compressed);
                }
            }
        }

        info!(
            directories = report.directories.len(),
            artifacts = report.artifacts.len(),
            "Fetch completed"
        );
        Ok(report)
    }
}
