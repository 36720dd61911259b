// SPDX-License-Identifier: GPL-3.0-only
use flate2::Compression;
use flate2::write::GzEncoder;
use std::ffi::OsString;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::{FetchError, Result};

const GZIP_SUFFIX: &str = "gz";

/// In-place gzip compression of downloaded artifacts
pub struct GzipCompressor {
    level: Compression,
}

impl GzipCompressor {
    pub fn new() -> Self {
        Self {
            level: Compression::default(),
        }
    }

    /// Replace `path` with `path.gz`, returning the compressed path
    pub async fn compress(&self, path: &Path) -> Result<PathBuf> {
        info!(path = %path.display(), "Compressing file");

        let source = path.to_path_buf();
        let level = self.level;
        let output = tokio::task::spawn_blocking(move || compress_blocking(&source, level)).await??;

        info!(path = %output.display(), "Compression completed");
        Ok(output)
    }

    /// Replace `path.gz` with `path`, returning the decompressed path
    #[cfg(test)]
    pub async fn decompress(&self, path: &Path) -> Result<PathBuf> {
        info!(path = %path.display(), "Decompressing file");

        let source = path.to_path_buf();
        let output = tokio::task::spawn_blocking(move || decompress_blocking(&source)).await??;

        info!(path = %output.display(), "Decompression completed");
        Ok(output)
    }
}

impl Default for GzipCompressor {
    fn default() -> Self {
        Self::new()
    }
}

/// `ballots.txt` -> `ballots.txt.gz`
pub fn compressed_path(path: &Path) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(".");
    name.push(GZIP_SUFFIX);
    PathBuf::from(name)
}

fn compress_blocking(source: &Path, level: Compression) -> Result<PathBuf> {
    // Open first so a missing source never creates an output file
    let input = File::open(source).map_err(|e| FetchError::fs(source, e))?;
    let output = compressed_path(source);

    let result = (|| -> std::io::Result<()> {
        let file = File::create(&output)?;
        let mut encoder = GzEncoder::new(BufWriter::new(file), level);
        std::io::copy(&mut BufReader::new(input), &mut encoder)?;
        encoder.finish()?.flush()?;
        Ok(())
    })();

    if let Err(e) = result {
        discard_partial(&output);
        return Err(FetchError::fs(&output, e));
    }

    std::fs::remove_file(source).map_err(|e| FetchError::fs(source, e))?;
    Ok(output)
}

#[cfg(test)]
fn decompress_blocking(source: &Path) -> Result<PathBuf> {
    if source.extension().and_then(|e| e.to_str()) != Some(GZIP_SUFFIX) {
        return Err(FetchError::archive(source, "expected a .gz file"));
    }
    let output = source.with_extension("");
    let input = File::open(source).map_err(|e| FetchError::fs(source, e))?;

    let mut out = match File::create(&output) {
        Ok(file) => BufWriter::new(file),
        Err(e) => return Err(FetchError::fs(&output, e)),
    };
    let mut decoder = flate2::read::GzDecoder::new(BufReader::new(input));

    let copied = std::io::copy(&mut decoder, &mut out).and_then(|_| out.flush());
    if let Err(e) = copied {
        drop(out);
        discard_partial(&output);
        return Err(match e.kind() {
            std::io::ErrorKind::InvalidInput
            | std::io::ErrorKind::InvalidData
            | std::io::ErrorKind::UnexpectedEof => FetchError::archive(source, e),
            _ => FetchError::fs(&output, e),
        });
    }

    std::fs::remove_file(source).map_err(|e| FetchError::fs(source, e))?;
    Ok(output)
}

fn discard_partial(path: &Path) {
    if let Err(e) = std::fs::remove_file(path) {
        if e.kind() != std::io::ErrorKind::NotFound {
            warn!(error = %e, path = %path.display(), "Failed to remove partial output");
        }
    }
}
