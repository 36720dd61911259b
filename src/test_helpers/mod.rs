// SPDX-License-Identifier: GPL-3.0-only
use std::io::{Cursor, Write};
use std::path::Path;

use crate::config::Config;

/// Create a test configuration rooted at a temporary directory
pub fn create_test_config(base_dir: &Path) -> Config {
    Config {
        base_dir: base_dir.to_path_buf(),
        log_level: "error".to_string(), // Reduce log noise in tests
        max_download_size_bytes: 10 * 1024 * 1024, // 10MB
        max_extraction_size_bytes: 10 * 1024 * 1024, // 10MB
        max_extraction_file_count: 100,
        ..Config::default()
    }
}

/// Create a temporary directory for tests
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::TempDir::new().expect("Failed to create temp directory")
}

/// Build an in-memory ZIP archive from (name, contents) pairs
pub fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, contents) in entries {
        writer
            .start_file(*name, zip::write::FileOptions::default())
            .expect("Failed to start zip entry");
        writer.write_all(contents).expect("Failed to write zip entry");
    }
    writer.finish().expect("Failed to finish zip archive").into_inner()
}
