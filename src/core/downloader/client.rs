use std::path::{Path, PathBuf};
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::Client;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::core::error::{LauncherError, LauncherResult};

/// Streaming file downloader sharing one HTTP client.
#[derive(Clone)]
pub struct Downloader {
    client: Client,
    /// Applied to the whole transfer when set.
    timeout: Option<Duration>,
}

impl Downloader {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Download `url` to `dest`, replacing any existing file.
    ///
    /// Creates parent directories as needed. The body is streamed into a
    /// `.part` sibling and renamed onto `dest` only after the last chunk is
    /// flushed, so a failed transfer never leaves a truncated `dest` behind.
    /// Returns the number of bytes written.
    pub async fn download_file(&self, url: &str, dest: &Path) -> LauncherResult<u64> {
        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| LauncherError::Io {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }

        let mut request = self.client.get(url);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LauncherError::DownloadFailed {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let part = part_path(dest);
        let written = match write_stream(response, &part).await {
            Ok(n) => n,
            Err(e) => {
                let _ = tokio::fs::remove_file(&part).await;
                return Err(e);
            }
        };

        tokio::fs::rename(&part, dest)
            .await
            .map_err(|e| LauncherError::Io {
                path: dest.to_path_buf(),
                source: e,
            })?;

        debug!("Downloaded: {} -> {:?} ({} bytes)", url, dest, written);
        Ok(written)
    }
}

async fn write_stream(response: reqwest::Response, part: &Path) -> LauncherResult<u64> {
    let io_err = |e| LauncherError::Io {
        path: part.to_path_buf(),
        source: e,
    };

    // Scoped so the handle is closed before the rename (Windows refuses otherwise)
    let mut file = tokio::fs::File::create(part).await.map_err(io_err)?;
    let mut written = 0u64;
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await.map_err(io_err)?;
        written += chunk.len() as u64;
    }
    file.flush().await.map_err(io_err)?;
    drop(file);

    Ok(written)
}

fn part_path(dest: &Path) -> PathBuf {
    let mut name = dest
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".part");
    dest.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::part_path;
    use std::path::{Path, PathBuf};

    #[test]
    fn part_file_sits_next_to_destination() {
        let part = part_path(Path::new("/tmp/mods/sodium-0.5.3.jar"));
        assert_eq!(part, PathBuf::from("/tmp/mods/sodium-0.5.3.jar.part"));
    }
}
