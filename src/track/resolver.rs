//! Download URL resolution for a detail page
//!
//! ```text
//! START --button found--> CHECK_DIRECT_ATTRIBUTE --data-url set--> RESOLVED (Direct)
//!                                   |
//!                                   +--no data-url--> AWAIT_POPUP --popup link--> RESOLVED (Popup)
//! ```
//!
//! Exactly one of the two paths produces the URL. The popup link's `href` is
//! passed on as read, even when absent.

use crate::config::WaitConfig;
use crate::document::DocumentPage;
use crate::error::{Error, Result, TrackError};
use crate::selectors;
use crate::types::ResolvedDownloadUrl;

enum State<E> {
    Start,
    CheckDirectAttribute(E),
    AwaitPopup(E),
    Resolved(ResolvedDownloadUrl),
}

/// Resolve the file URL of the current detail page
///
/// # Errors
///
/// - [`TrackError::DownloadButtonNotFound`] if the button never appears
/// - any adapter error while reading, clicking, or waiting for the popup
///
/// Errors are logged here and returned; they are fatal for this track only.
pub async fn resolve_download_url<P: DocumentPage>(
    page: &P,
    page_url: &str,
    waits: &WaitConfig,
) -> Result<ResolvedDownloadUrl> {
    let result = run(page, page_url, waits).await;
    if let Err(e) = &result {
        tracing::error!(url = %page_url, error = %e, "error while resolving the download link");
    }
    result
}

async fn run<P: DocumentPage>(
    page: &P,
    page_url: &str,
    waits: &WaitConfig,
) -> Result<ResolvedDownloadUrl> {
    let mut state = State::Start;
    loop {
        state = match state {
            State::Start => {
                tracing::debug!(selector = selectors::DOWNLOAD_BUTTON, "waiting for download button");
                let button = page
                    .wait_for_element(selectors::DOWNLOAD_BUTTON, waits.element)
                    .await
                    .map_err(|e| {
                        if e.is_timeout() {
                            Error::from(TrackError::DownloadButtonNotFound {
                                url: page_url.to_string(),
                                timeout: waits.element,
                            })
                        } else {
                            Error::from(e)
                        }
                    })?;
                State::CheckDirectAttribute(button)
            }
            State::CheckDirectAttribute(button) => {
                match page
                    .read_attribute(&button, selectors::DIRECT_LINK_ATTRIBUTE)
                    .await?
                {
                    Some(url) => State::Resolved(ResolvedDownloadUrl::Direct(url)),
                    None => {
                        tracing::info!(
                            url = %page_url,
                            "download button has no direct link, clicking it for the popup"
                        );
                        State::AwaitPopup(button)
                    }
                }
            }
            State::AwaitPopup(button) => {
                page.click(&button).await?;
                tracing::debug!("clicked download button");
                let link = page
                    .wait_for_element(selectors::POPUP_DOWNLOAD_LINK, waits.element)
                    .await?;
                tracing::debug!("popup download link appeared");
                let href = page.read_attribute(&link, selectors::HREF_ATTRIBUTE).await?;
                State::Resolved(ResolvedDownloadUrl::Popup(href))
            }
            State::Resolved(resolved) => return Ok(resolved),
        };
    }
}
