// SPDX-License-Identifier: GPL-3.0-only
use async_trait::async_trait;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use zip::ZipArchive;
use zip::result::ZipError;

use crate::error::{FetchError, Result};
use crate::extractor::traits::Extractor;

pub struct ZipExtractor {
    max_total_size: u64,
    max_file_count: usize,
}

impl ZipExtractor {
    pub fn new(max_total_size: u64, max_file_count: usize) -> Self {
        Self {
            max_total_size,
            max_file_count,
        }
    }
}

fn zip_error(archive_path: &Path, err: ZipError) -> FetchError {
    match err {
        ZipError::Io(source) => FetchError::fs(archive_path, source),
        other => FetchError::archive(archive_path, other),
    }
}

fn extract_blocking(
    archive_path: &Path,
    dest: &Path,
    max_total_size: u64,
    max_file_count: usize,
) -> Result<Vec<PathBuf>> {
    let file = File::open(archive_path).map_err(|e| FetchError::fs(archive_path, e))?;
    let mut archive =
        ZipArchive::new(BufReader::new(file)).map_err(|e| zip_error(archive_path, e))?;

    if archive.len() > max_file_count {
        return Err(FetchError::archive(
            archive_path,
            format!("{} entries exceed limit of {}", archive.len(), max_file_count),
        ));
    }

    // Declared sizes are checked up front; the copy below is bounded as well
    let declared: u64 = (0..archive.len())
        .filter_map(|i| archive.by_index_raw(i).ok().map(|f| f.size()))
        .sum();
    if declared > max_total_size {
        return Err(FetchError::TooLarge {
            what: format!("Archive {}", archive_path.display()),
            limit: max_total_size,
        });
    }

    let mut written = Vec::new();
    let mut total: u64 = 0;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(|e| zip_error(archive_path, e))?;
        let outpath = match entry.enclosed_name() {
            Some(path) => dest.join(path),
            None => {
                warn!(entry = %entry.name(), "Skipping archive entry with unsafe path");
                continue;
            }
        };

        if entry.is_dir() {
            std::fs::create_dir_all(&outpath).map_err(|e| FetchError::fs(&outpath, e))?;
            continue;
        }

        if let Some(parent) = outpath.parent() {
            std::fs::create_dir_all(parent).map_err(|e| FetchError::fs(parent, e))?;
        }

        let mut outfile = File::create(&outpath).map_err(|e| FetchError::fs(&outpath, e))?;
        let remaining = max_total_size.saturating_sub(total);
        let mut reader = (&mut entry).take(remaining.saturating_add(1));
        let mut buffer = [0u8; 8192];
        let mut copied: u64 = 0;

        // Entry read errors (bad deflate data, CRC mismatch) mean a corrupt archive
        loop {
            let count = reader
                .read(&mut buffer)
                .map_err(|e| FetchError::archive(archive_path, e))?;
            if count == 0 {
                break;
            }
            outfile
                .write_all(&buffer[..count])
                .map_err(|e| FetchError::fs(&outpath, e))?;
            copied += count as u64;
        }

        total += copied;
        if total > max_total_size {
            return Err(FetchError::TooLarge {
                what: format!("Archive {}", archive_path.display()),
                limit: max_total_size,
            });
        }

        written.push(outpath);
    }

    Ok(written)
}

#[async_trait]
impl Extractor for ZipExtractor {
    async fn extract(&self, archive_path: &Path, dest: &Path) -> Result<Vec<PathBuf>> {
        info!(archive = %archive_path.display(), dest = %dest.display(), "Extracting ZIP archive");

        let archive_path_owned = archive_path.to_path_buf();
        let dest_owned = dest.to_path_buf();
        let max_total_size = self.max_total_size;
        let max_file_count = self.max_file_count;

        let written = tokio::task::spawn_blocking(move || {
            extract_blocking(&archive_path_owned, &dest_owned, max_total_size, max_file_count)
        })
        .await??;

        info!(
            archive = %archive_path.display(),
            dest = %dest.display(),
            files = written.len(),
            "ZIP extraction completed"
        );
        Ok(written)
    }
}
