use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::core::downloader::Downloader;
use crate::core::error::{LauncherError, LauncherResult};

/// The two HTTP operations the fetcher needs.
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET `url` and return the body as text. Non-success statuses are errors.
    async fn get_text(&self, url: &str, timeout: Duration) -> LauncherResult<String>;

    /// GET `url` and store the body at `dest`, creating parent directories.
    async fn download(&self, url: &str, dest: &Path) -> LauncherResult<u64>;
}

/// `reqwest`-backed transport used outside of tests.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    downloader: Downloader,
}

impl HttpTransport {
    pub fn new(client: Client, download_timeout: Option<Duration>) -> Self {
        let downloader = Downloader::new(client.clone()).with_timeout(download_timeout);
        Self { client, downloader }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_text(&self, url: &str, timeout: Duration) -> LauncherResult<String> {
        let resp = self.client.get(url).timeout(timeout).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(LauncherError::DownloadFailed {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(resp.text().await?)
    }

    async fn download(&self, url: &str, dest: &Path) -> LauncherResult<u64> {
        self.downloader.download_file(url, dest).await
    }
}
