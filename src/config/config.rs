// SPDX-License-Identifier: GPL-3.0-only
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Optional configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "election-fetch.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root directory the precinct and results trees are created under
    pub base_dir: PathBuf,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,

    /// User-Agent sent with every request
    pub user_agent: String,

    /// Whole-request timeout; the HTTP client default applies when unset
    pub request_timeout_secs: Option<u64>,

    /// Upper bound on a single downloaded body
    pub max_download_size_bytes: u64,

    /// Upper bound on the total uncompressed size of an unpacked archive
    pub max_extraction_size_bytes: u64,

    /// Upper bound on the number of entries in an unpacked archive
    pub max_extraction_file_count: usize,
}

impl Config {
    /// Load `election-fetch.toml` from the working directory, or defaults when absent
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(Path::new(CONFIG_FILE_NAME))
    }

    /// Load configuration from a TOML file, falling back to defaults when it does not exist
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            log_level: String::from("info"),
            user_agent: format!("election-fetch/{}", env!("CARGO_PKG_VERSION")),
            request_timeout_secs: None,
            max_download_size_bytes: 2 * 1024 * 1024 * 1024, // 2GB
            max_extraction_size_bytes: 4 * 1024 * 1024 * 1024, // 4GB
            max_extraction_file_count: 10000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.base_dir, PathBuf::from("."));
        assert_eq!(config.log_level, "info");
        assert!(config.user_agent.starts_with("election-fetch/"));
        assert_eq!(config.request_timeout_secs, None);
        assert_eq!(config.max_extraction_file_count, 10000);
    }

    #[test]
    fn test_load_missing_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load_from(&temp_dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(config.base_dir, PathBuf::from("."));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_load_from_toml() {
        let temp_file = NamedTempFile::new().unwrap();
        let config_content = r#"
base_dir = "/srv/elections"
log_level = "debug"
user_agent = "custom-agent/1.0"
request_timeout_secs = 600
max_download_size_bytes = 1024
max_extraction_size_bytes = 2048
max_extraction_file_count = 5
"#;
        fs::write(temp_file.path(), config_content).unwrap();

        let config = Config::load_from(temp_file.path()).unwrap();
        assert_eq!(config.base_dir, PathBuf::from("/srv/elections"));
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.user_agent, "custom-agent/1.0");
        assert_eq!(config.request_timeout_secs, Some(600));
        assert_eq!(config.max_download_size_bytes, 1024);
        assert_eq!(config.max_extraction_size_bytes, 2048);
        assert_eq!(config.max_extraction_file_count, 5);
    }

    #[test]
    fn test_load_partial_toml_keeps_defaults() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(temp_file.path(), "log_level = \"warn\"\n").unwrap();

        let config = Config::load_from(temp_file.path()).unwrap();
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.base_dir, PathBuf::from("."));
        assert_eq!(config.max_extraction_file_count, 10000);
    }

    #[test]
    fn test_load_malformed_toml() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(temp_file.path(), "base_dir = [not toml").unwrap();

        let result = Config::load_from(temp_file.path());
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Failed to parse config file"));
    }
}
