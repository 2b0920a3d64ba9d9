//! Detail page handling: metadata extraction and file download

mod metadata;
mod resolver;

pub use metadata::extract_metadata;
pub use resolver::resolve_download_url;

use crate::config::WaitConfig;
use crate::document::DocumentPage;
use crate::error::{Result, TrackError};
use crate::transfer::transfer;
use std::path::{Path, PathBuf};

/// Resolve the current detail page's file URL and stream it to `destination`
///
/// A popup link without `href` surfaces here as
/// [`TrackError::MissingDownloadUrl`].
pub async fn download_track_file<P: DocumentPage>(
    page: &P,
    client: &reqwest::Client,
    page_url: &str,
    waits: &WaitConfig,
    destination: &Path,
) -> Result<PathBuf> {
    let resolved = resolve_download_url(page, page_url, waits).await?;
    let url = resolved.into_url().ok_or_else(|| TrackError::MissingDownloadUrl {
        url: page_url.to_string(),
    })?;
    transfer(client, &url, destination).await?;
    Ok(destination.to_path_buf())
}
