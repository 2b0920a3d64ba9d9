//! Track metadata extraction from a rendered detail page

use crate::config::WaitConfig;
use crate::document::DocumentPage;
use crate::error::DocumentError;
use crate::selectors;
use crate::types::TrackInfo;
use futures::future::try_join_all;
use thiserror::Error;

/// Reasons metadata extraction is abandoned; never leave this module
#[derive(Debug, Error)]
enum MetadataError {
    #[error("track title element is missing")]
    MissingTitle,
    #[error("track artist element is missing")]
    MissingArtist,
    #[error("tag {index} has no text")]
    UnreadableTag { index: usize },
    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// Title, artist and tags of the current detail page
///
/// Never fails: if the wrappers do not appear, a title or artist element is
/// missing, or a tag cannot be read, the problem is logged and the empty
/// sentinel is returned. A track whose metadata degrades this way can still
/// download normally.
pub async fn extract_metadata<P: DocumentPage>(page: &P, waits: &WaitConfig) -> TrackInfo {
    match read_metadata(page, waits).await {
        Ok(info) => info,
        Err(e) => {
            tracing::warn!(error = %e, "error while getting track information");
            TrackInfo::empty()
        }
    }
}

async fn read_metadata<P: DocumentPage>(
    page: &P,
    waits: &WaitConfig,
) -> Result<TrackInfo, MetadataError> {
    let (title_wrapper, tag_wrapper) = futures::try_join!(
        page.wait_for_element(selectors::TITLE_WRAPPER, waits.element),
        page.wait_for_element(selectors::TAG_WRAPPER, waits.element),
    )?;

    let (title, artist, tags) = futures::try_join!(
        page.query_one(selectors::TITLE, Some(&title_wrapper)),
        page.query_one(selectors::ARTIST, Some(&title_wrapper)),
        page.query_all(selectors::TAG, Some(&tag_wrapper)),
    )?;
    let title = title.ok_or(MetadataError::MissingTitle)?;
    let artist = artist.ok_or(MetadataError::MissingArtist)?;

    let (title, artist_name, tag_texts) = futures::try_join!(
        page.read_text(&title),
        page.read_text(&artist),
        try_join_all(tags.iter().map(|tag| page.read_text(tag))),
    )?;

    let tags = tag_texts
        .into_iter()
        .enumerate()
        .map(|(index, text)| {
            text.map(|t| t.trim().to_string())
                .ok_or(MetadataError::UnreadableTag { index })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TrackInfo {
        title: title.unwrap_or_default().trim().to_string(),
        artist_name: artist_name.unwrap_or_default().trim().to_string(),
        tags,
    })
}
