//! Streamed file transfer with cleanup on failure

use crate::config::HttpConfig;
use crate::error::{Error, Result, TrackError};
use futures::StreamExt;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// Build the HTTP client used for transfers
pub fn build_client(http: &HttpConfig) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder().timeout(http.timeout);
    if let Some(user_agent) = &http.user_agent {
        builder = builder.user_agent(user_agent.clone());
    }
    builder.build().map_err(|e| Error::Config {
        message: format!("failed to create HTTP client: {}", e),
        key: Some("http".to_string()),
    })
}

/// Stream `url` into `destination`, returning the number of bytes written
///
/// The destination is created before the request is sent. On any transport,
/// status, or write error the partially written file is removed (removal
/// errors are ignored) and the original error is returned. The file is also
/// removed when the returned future is dropped before completion. No retry,
/// no resume.
pub async fn transfer(client: &reqwest::Client, url: &str, destination: &Path) -> Result<u64> {
    tracing::debug!(url = %url, destination = %destination.display(), "starting file transfer");

    let partial = PartialFile::new(destination);
    match stream_to_file(client, url, destination).await {
        Ok(written) => {
            partial.keep();
            tracing::info!(
                url = %url,
                destination = %destination.display(),
                bytes = written,
                "file transfer complete"
            );
            Ok(written)
        }
        Err(e) => {
            tracing::warn!(url = %url, error = %e, "file transfer failed, removing partial file");
            Err(e)
        }
    }
}

/// Removes the destination on drop unless [`PartialFile::keep`] was called
struct PartialFile {
    path: Option<PathBuf>,
}

impl PartialFile {
    fn new(path: &Path) -> Self {
        Self {
            path: Some(path.to_path_buf()),
        }
    }

    fn keep(mut self) {
        self.path = None;
    }
}

impl Drop for PartialFile {
    fn drop(&mut self) {
        if let Some(path) = self.path.take() {
            // Drop cannot await; a single unlink is fine to do synchronously
            if std::fs::remove_file(&path).is_ok() {
                tracing::debug!(path = %path.display(), "removed partial file");
            }
        }
    }
}

async fn stream_to_file(client: &reqwest::Client, url: &str, destination: &Path) -> Result<u64> {
    let mut file = tokio::fs::File::create(destination).await?;

    let response = client.get(url).send().await?;
    if !response.status().is_success() {
        return Err(TrackError::HttpStatus {
            url: url.to_string(),
            status: response.status().as_u16(),
        }
        .into());
    }

    let mut written = 0u64;
    let mut body = response.bytes_stream();
    while let Some(chunk) = body.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.flush().await?;
    Ok(written)
}
