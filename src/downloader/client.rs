// SPDX-License-Identifier: GPL-3.0-only
use futures_util::StreamExt;
use reqwest::Client;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};
use url::Url;
use uuid::Uuid;

use crate::config::Config;
use crate::error::{FetchError, Result};

pub struct HttpClient {
    client: Client,
    max_download_size: u64,
}

impl HttpClient {
    pub fn new(config: &Config) -> Result<Self> {
        // Proxy variables are environment too; the run consults none
        let mut builder = Client::builder()
            .user_agent(config.user_agent.clone())
            .no_proxy();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(|source| FetchError::Network {
            url: String::new(),
            source,
        })?;

        Ok(Self {
            client,
            max_download_size: config.max_download_size_bytes,
        })
    }

    /// Stream `url` into `output_path`, returning the number of bytes written.
    ///
    /// The body lands in a sibling `.part` file that is renamed into place once
    /// complete, so a failed download never leaves `output_path` behind.
    pub async fn download_once(&self, url: &Url, output_path: &Path) -> Result<u64> {
        info!(url = %url, path = %output_path.display(), "Starting download");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| FetchError::Network {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                url: url.to_string(),
                status,
            });
        }

        if let Some(len) = response.content_length() {
            if len > self.max_download_size {
                return Err(FetchError::TooLarge {
                    what: format!("Download {}", url),
                    limit: self.max_download_size,
                });
            }
        }

        let part_path = part_path_for(output_path);
        let written = match self.stream_to(url, response, &part_path).await {
            Ok(written) => written,
            Err(e) => {
                if let Err(cleanup) = tokio::fs::remove_file(&part_path).await {
                    if cleanup.kind() != std::io::ErrorKind::NotFound {
                        warn!(error = %cleanup, path = %part_path.display(), "Failed to clean up partial download");
                    }
                }
                return Err(e);
            }
        };

        if let Err(source) = tokio::fs::rename(&part_path, output_path).await {
            let _ = tokio::fs::remove_file(&part_path).await;
            return Err(FetchError::fs(output_path, source));
        }

        info!(url = %url, path = %output_path.display(), bytes = written, "Download completed");
        Ok(written)
    }

    async fn stream_to(
        &self,
        url: &Url,
        response: reqwest::Response,
        part_path: &Path,
    ) -> Result<u64> {
        let mut file = tokio::fs::File::create(part_path)
            .await
            .map_err(|e| FetchError::fs(part_path, e))?;

        let mut stream = response.bytes_stream();
        let mut written: u64 = 0;

        while let Some(item) = stream.next().await {
            let chunk = item.map_err(|source| FetchError::Network {
                url: url.to_string(),
                source,
            })?;

            written += chunk.len() as u64;
            if written > self.max_download_size {
                return Err(FetchError::TooLarge {
                    what: format!("Download {}", url),
                    limit: self.max_download_size,
                });
            }

            file.write_all(&chunk)
                .await
                .map_err(|e| FetchError::fs(part_path, e))?;
        }

        file.flush().await.map_err(|e| FetchError::fs(part_path, e))?;
        debug!(path = %part_path.display(), bytes = written, "Body written");
        Ok(written)
    }
}

/// Hidden, uniquely named sibling of `output_path` used while the body streams in
fn part_path_for(output_path: &Path) -> PathBuf {
    let file_name = output_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("download");
    output_path.with_file_name(format!(".{}.{}.part", file_name, Uuid::new_v4()))
}
