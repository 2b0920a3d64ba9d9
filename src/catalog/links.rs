//! Track link extraction from a rendered listing page

use crate::document::DocumentPage;
use crate::error::{CrawlError, Result};
use crate::selectors;
use futures::future::join_all;

/// Detail-page links of every track entry on the current page, in document order
///
/// Entries without a readable link are dropped before the checks below.
///
/// # Errors
///
/// - [`CrawlError::EmptyResultSet`] if no link could be read
/// - [`CrawlError::CountMismatch`] if some entries yielded no link, which means
///   the page was only partially rendered
pub async fn extract_links<P: DocumentPage>(page: &P, page_url: &str) -> Result<Vec<String>> {
    tracing::debug!(url = %page_url, "getting track entries");
    let entries = page.query_all(selectors::TRACK_ENTRY, None).await?;
    tracing::info!(url = %page_url, entries = entries.len(), "found track entries");

    let reads = entries.iter().map(|entry| entry_link(page, entry));
    let links: Vec<String> = join_all(reads)
        .await
        .into_iter()
        .collect::<Result<Vec<_>>>()?
        .into_iter()
        .flatten()
        .collect();

    if links.is_empty() {
        return Err(CrawlError::EmptyResultSet {
            url: page_url.to_string(),
        }
        .into());
    }
    if links.len() != entries.len() {
        return Err(CrawlError::CountMismatch {
            url: page_url.to_string(),
            entries: entries.len(),
            links: links.len(),
        }
        .into());
    }
    Ok(links)
}

async fn entry_link<P: DocumentPage>(page: &P, entry: &P::Element) -> Result<Option<String>> {
    let Some(link) = page
        .query_one(selectors::TRACK_ENTRY_LINK, Some(entry))
        .await?
    else {
        return Ok(None);
    };
    Ok(page.read_attribute(&link, selectors::HREF_ATTRIBUTE).await?)
}
