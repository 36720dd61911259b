// SPDX-License-Identifier: GPL-3.0-only
use url::Url;

use crate::error::{FetchError, Result};
use crate::utils::path_sanitizer::sanitize_filename;

/// Maximum allowed URL length
const MAX_URL_LENGTH: usize = 2048;

/// Validate a download URL
///
/// Checks:
/// - Only allows http/https schemes
/// - Requires a host
/// - Validates URL length
pub fn validate_url(url_str: &str) -> Result<Url> {
    let invalid = |reason: String| FetchError::InvalidUrl {
        url: url_str.to_string(),
        reason,
    };

    if url_str.len() > MAX_URL_LENGTH {
        return Err(invalid(format!(
            "URL exceeds maximum length of {} characters",
            MAX_URL_LENGTH
        )));
    }

    let url = Url::parse(url_str).map_err(|e| invalid(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(invalid(format!(
                "Invalid URL scheme: {} (only http and https are allowed)",
                scheme
            )));
        }
    }

    if url.host_str().is_none() {
        return Err(invalid("URL must have a host".to_string()));
    }

    Ok(url)
}

/// Local file name for a download: the URL's final path segment
pub fn file_name_from_url(url: &Url) -> Result<String> {
    let segment = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or("");

    let decoded = urlencoding::decode(segment).map_err(|e| FetchError::InvalidUrl {
        url: url.to_string(),
        reason: format!("final path segment is not valid UTF-8: {}", e),
    })?;

    let name = sanitize_filename(&decoded);
    if name.is_empty() || name == "." || name == ".." {
        return Err(FetchError::InvalidUrl {
            url: url.to_string(),
            reason: "URL has no final path segment to name the file after".to_string(),
        });
    }

    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url_valid_https() {
        assert!(validate_url("https://sfelections.org/results/file.txt").is_ok());
    }

    #[test]
    fn test_validate_url_valid_http_localhost() {
        assert!(validate_url("http://127.0.0.1:1234/file.zip").is_ok());
    }

    #[test]
    fn test_validate_url_invalid_scheme() {
        assert!(matches!(
            validate_url("file:///etc/passwd"),
            Err(FetchError::InvalidUrl { .. })
        ));
        assert!(validate_url("ftp://example.com/file.zip").is_err());
    }

    #[test]
    fn test_validate_url_too_long() {
        let long_url = format!("https://example.com/{}", "a".repeat(MAX_URL_LENGTH));
        assert!(validate_url(&long_url).is_err());
    }

    #[test]
    fn test_validate_url_invalid_format() {
        assert!(validate_url("not-a-url").is_err());
        assert!(validate_url("").is_err());
    }

    #[test]
    fn test_file_name_from_url() {
        let url = validate_url(
            "https://sfelections.org/results/20180605/data/20180627/20180627_masterlookup.txt",
        )
        .unwrap();
        assert_eq!(file_name_from_url(&url).unwrap(), "20180627_masterlookup.txt");
    }

    #[test]
    fn test_file_name_ignores_query() {
        let url = validate_url("https://example.com/maps/2017lines.zip?download=1").unwrap();
        assert_eq!(file_name_from_url(&url).unwrap(), "2017lines.zip");
    }

    #[test]
    fn test_file_name_is_percent_decoded() {
        let url = validate_url("https://example.com/data/a%20b.txt").unwrap();
        assert_eq!(file_name_from_url(&url).unwrap(), "a b.txt");

        let url = validate_url("https://example.com/data/precinct%2Dlines.zip").unwrap();
        assert_eq!(file_name_from_url(&url).unwrap(), "precinct-lines.zip");
    }

    #[test]
    fn test_file_name_encoded_separator_stays_one_component() {
        let url = validate_url("https://example.com/data/..%2Fsecret.txt").unwrap();
        assert_eq!(file_name_from_url(&url).unwrap(), "secret.txt");
    }

    #[test]
    fn test_file_name_requires_segment() {
        let url = validate_url("https://example.com/").unwrap();
        assert!(matches!(
            file_name_from_url(&url),
            Err(FetchError::InvalidUrl { .. })
        ));

        let url = validate_url("https://example.com/data/").unwrap();
        assert!(file_name_from_url(&url).is_err());
    }
}
