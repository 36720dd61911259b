// SPDX-License-Identifier: GPL-3.0-only
use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::error::Result;

#[async_trait]
pub trait Downloader: Send + Sync {
    /// Fetch `url` into `dest_dir`, naming the file after the URL's final path segment
    async fn download(&self, url: &str, dest_dir: &Path) -> Result<PathBuf>;
}
