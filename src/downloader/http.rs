// SPDX-License-Identifier: GPL-3.0-only
use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::downloader::{client::HttpClient, traits::Downloader};
use crate::error::Result;
use crate::utils::{file_name_from_url, validate_url};

pub struct HttpDownloader {
    client: HttpClient,
}

impl HttpDownloader {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: HttpClient::new(config)?,
        })
    }
}

#[async_trait]
impl Downloader for HttpDownloader {
    async fn download(&self, url: &str, dest_dir: &Path) -> Result<PathBuf> {
        let url = validate_url(url)?;
        let filename = file_name_from_url(&url)?;
        let output_path = dest_dir.join(filename);

        self.client.download_once(&url, &output_path).await?;

        Ok(output_path)
    }
}
