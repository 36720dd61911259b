// SPDX-License-Identifier: GPL-3.0-only
use std::path::Path;

/// Sanitize a filename extracted from a URL
///
/// Removes path separators and other unsafe characters, ensuring only
/// a valid filename component remains.
pub fn sanitize_filename(filename: &str) -> String {
    // Extract just the filename component (remove any path parts)
    let filename_only = Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(filename);

    let sanitized: String = filename_only
        .chars()
        .filter(|c| {
            // Allow alphanumeric, dash, underscore, dot, and spaces
            c.is_alphanumeric() || *c == '-' || *c == '_' || *c == '.' || *c == ' '
        })
        .collect();

    sanitized.trim().to_string()
}
