//! Paginated catalog traversal
//!
//! Listing pages live at `{base}/page/{n}`. The last numbered pagination link
//! on page 1 carries the page count; pages are then visited strictly in
//! increasing order, each one getting a consent probe before its links are
//! read. Link order within and across pages is preserved.

mod links;


pub use links::extract_links;

use crate::config::SessionConfig;
use crate::consent::{ConsentState, dismiss_if_present};
use crate::document::DocumentPage;
use crate::error::{CrawlError, Result};
use crate::selectors;

/// Links of every listing page, in page-then-entry order
///
/// # Errors
///
/// Any [`CrawlError`] aborts the whole crawl, as does a navigation failure.
pub async fn discover_all_links<P: DocumentPage>(
    page: &P,
    config: &SessionConfig,
    consent: &mut ConsentState,
) -> Result<Vec<String>> {
    let first_url = config.page_url(1);
    visit(page, config, consent, &first_url).await?;

    let page_count = read_page_count(page, config, &first_url).await?;
    tracing::debug!(base_url = %config.base_url, page_count, "read page count");

    let mut links = extract_links(page, &first_url).await?;
    for page_number in 2..=page_count {
        let url = config.page_url(page_number);
        tracing::debug!(page = page_number, url = %url, "visiting listing page");
        visit(page, config, consent, &url).await?;
        links.extend(extract_links(page, &url).await?);
    }

    tracing::info!(
        base_url = %config.base_url,
        page_count,
        links = links.len(),
        "discovered track links"
    );
    Ok(links)
}

/// Links of listing page `page_number` only
pub async fn discover_links_on_page<P: DocumentPage>(
    page: &P,
    config: &SessionConfig,
    consent: &mut ConsentState,
    page_number: u32,
) -> Result<Vec<String>> {
    let url = config.page_url(page_number);
    visit(page, config, consent, &url).await?;
    extract_links(page, &url).await
}

async fn visit<P: DocumentPage>(
    page: &P,
    config: &SessionConfig,
    consent: &mut ConsentState,
    url: &str,
) -> Result<()> {
    page.navigate(url).await?;
    let outcome = dismiss_if_present(page, consent, config.waits.consent).await;
    tracing::debug!(url = %url, ?outcome, "consent probe");
    Ok(())
}

/// Page count read from the last pagination link of the current page
///
/// A missing control is fatal unless `allow_single_page` is set, in which case
/// the catalog is treated as one page.
pub async fn read_page_count<P: DocumentPage>(
    page: &P,
    config: &SessionConfig,
    page_url: &str,
) -> Result<u32> {
    let control = match page
        .wait_for_element(selectors::LAST_PAGINATION_LINK, config.waits.element)
        .await
    {
        Ok(control) => control,
        Err(e) if e.is_timeout() => {
            if config.allow_single_page {
                tracing::warn!(url = %page_url, "no pagination control, treating catalog as a single page");
                return Ok(1);
            }
            return Err(CrawlError::MissingPaginationControl {
                url: page_url.to_string(),
            }
            .into());
        }
        Err(e) => return Err(e.into()),
    };

    let text = page.read_text(&control).await?.unwrap_or_default();
    parse_page_count(&text).ok_or_else(|| {
        CrawlError::InvalidPageCount {
            url: page_url.to_string(),
            text,
        }
        .into()
    })
}

/// Leading decimal integer of `text`, ignoring surrounding whitespace
pub fn parse_page_count(text: &str) -> Option<u32> {
    let trimmed = text.trim();
    let digits = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .map_or(trimmed, |end| &trimmed[..end]);
    digits.parse().ok()
}
