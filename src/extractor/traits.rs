// SPDX-License-Identifier: GPL-3.0-only
use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::error::Result;

#[async_trait]
pub trait Extractor: Send + Sync {
    /// Unpack an archive into `dest`, returning the files written
    async fn extract(&self, archive_path: &Path, dest: &Path) -> Result<Vec<PathBuf>>;
}
