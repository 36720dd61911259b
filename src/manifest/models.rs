// SPDX-License-Identifier: GPL-3.0-only
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Shapefile set of the 2017 precinct boundaries
pub const PRECINCT_LINES_URL: &str =
    "https://sfelections.sfgov.org/sites/default/files/Documents/Maps/2017lines.zip";

/// Reference table mapping ballot-image codes to contest and candidate names
pub const MASTER_LOOKUP_URL: &str =
    "https://sfelections.org/results/20180605/data/20180627/20180627_masterlookup.txt";

/// Per-ballot records of marked choices
pub const BALLOT_IMAGE_URL: &str =
    "https://sfelections.org/results/20180605/data/20180627/20180627_ballotimage.txt";

/// What happens to an artifact once it has been downloaded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStep {
    /// Leave the file as downloaded
    #[default]
    Keep,
    /// Unzip into the destination directory, keeping the archive
    Unpack,
    /// Replace the file with its gzip form
    Compress,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Remote location fetched with a plain GET
    pub url: String,

    /// Destination directory, relative to the configured base directory
    pub dest_dir: PathBuf,

    #[serde(default)]
    pub post: PostStep,
}

impl Resource {
    pub fn new(url: impl Into<String>, dest_dir: impl Into<PathBuf>, post: PostStep) -> Self {
        Self {
            url: url.into(),
            dest_dir: dest_dir.into(),
            post,
        }
    }
}

/// Ordered list of resources fetched in a single run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub resources: Vec<Resource>,
}

impl Manifest {
    /// Precinct boundaries plus the June 5, 2018 results published on 2018-06-27
    pub fn june_2018() -> Self {
        let precincts = PathBuf::from("precincts");
        let results = PathBuf::from("results").join("2018-06");

        Self {
            resources: vec![
                Resource::new(PRECINCT_LINES_URL, precincts, PostStep::Unpack),
                Resource::new(MASTER_LOOKUP_URL, results.clone(), PostStep::Keep),
                Resource::new(BALLOT_IMAGE_URL, results, PostStep::Compress),
            ],
        }
    }

    /// Target directories in order of first use
    pub fn directories(&self) -> Vec<PathBuf> {
        let mut dirs: Vec<PathBuf> = Vec::new();
        for resource in &self.resources {
            if !dirs.contains(&resource.dest_dir) {
                dirs.push(resource.dest_dir.clone());
            }
        }
        dirs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_june_2018_layout() {
        let manifest = Manifest::june_2018();
        assert_eq!(manifest.resources.len(), 3);

        assert_eq!(manifest.resources[0].dest_dir, PathBuf::from("precincts"));
        assert_eq!(manifest.resources[0].post, PostStep::Unpack);
        assert!(manifest.resources[0].url.ends_with("/2017lines.zip"));

        assert_eq!(manifest.resources[1].dest_dir, PathBuf::from("results/2018-06"));
        assert_eq!(manifest.resources[1].post, PostStep::Keep);
        assert!(manifest.resources[1].url.ends_with("/20180627_masterlookup.txt"));

        assert_eq!(manifest.resources[2].dest_dir, PathBuf::from("results/2018-06"));
        assert_eq!(manifest.resources[2].post, PostStep::Compress);
        assert!(manifest.resources[2].url.ends_with("/20180627_ballotimage.txt"));
    }

    #[test]
    fn test_directories_in_first_use_order() {
        let dirs = Manifest::june_2018().directories();
        assert_eq!(
            dirs,
            vec![PathBuf::from("precincts"), PathBuf::from("results/2018-06")]
        );
    }

    #[test]
    fn test_manifest_from_toml() {
        let manifest: Manifest = toml::from_str(
            r#"
[[resources]]
url = "http://example.com/a.zip"
dest_dir = "a"
post = "unpack"

[[resources]]
url = "http://example.com/b.txt"
dest_dir = "b"
"#,
        )
        .unwrap();

        assert_eq!(manifest.resources.len(), 2);
        assert_eq!(manifest.resources[0].post, PostStep::Unpack);
        assert_eq!(manifest.resources[1].post, PostStep::Keep);
    }
}
