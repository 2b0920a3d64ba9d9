//! One rendering session and the workflow state that belongs to it

use crate::catalog::{discover_all_links, discover_links_on_page};
use crate::config::SessionConfig;
use crate::consent::{ConsentState, dismiss_if_present};
use crate::document::{DocumentPage, RenderingEngine, RenderingSession};
use crate::error::{DocumentResult, Result, TrackError};
use crate::track::{download_track_file, extract_metadata};
use crate::types::Track;
use crate::utils::track_file_path;
use std::sync::Arc;

/// A rendering session, its page, and the session's consent state
///
/// The session exclusively owns the page's navigation state. Release it with
/// [`Session::close`]; [`Session::download_track`] releases it itself. A
/// session dropped without either (e.g. a cancelled future) closes its page
/// and rendering session on a spawned task.
pub struct Session<S: RenderingSession> {
    config: SessionConfig,
    consent: ConsentState,
    client: reqwest::Client,
    session: Arc<S>,
    page: Arc<S::Page>,
    released: bool,
}

impl<S: RenderingSession> std::fmt::Debug for Session<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("consent", &self.consent)
            .finish_non_exhaustive()
    }
}

impl<S: RenderingSession> Session<S> {
    /// Launch a rendering session and open its page
    ///
    /// If the page cannot be opened the freshly launched session is closed
    /// before the error is returned.
    pub async fn open<E>(
        engine: &E,
        config: SessionConfig,
        consent: ConsentState,
        client: reqwest::Client,
    ) -> Result<Self>
    where
        E: RenderingEngine<Session = S>,
    {
        let session = engine.launch(config.headless).await?;
        let page = match session.new_page().await {
            Ok(page) => page,
            Err(e) => {
                session.close().await.ok();
                return Err(e.into());
            }
        };

        tracing::debug!(
            base_url = %config.base_url,
            headless = config.headless,
            scratch_dir = %config.scratch_dir.display(),
            "rendering session opened"
        );
        Ok(Self {
            config,
            consent,
            client,
            session: Arc::new(session),
            page: Arc::new(page),
            released: false,
        })
    }

    /// The resolved configuration of this session
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Whether the consent dialog has been dismissed in this session
    pub fn consent_bypassed(&self) -> bool {
        self.consent.is_bypassed()
    }

    /// Discover track links: every page when `page_number` is `None`, else that page only
    pub async fn crawl(&mut self, page_number: Option<u32>) -> Result<Vec<String>> {
        let page = self.page.as_ref();
        match page_number {
            None => discover_all_links(page, &self.config, &mut self.consent).await,
            Some(n) => discover_links_on_page(page, &self.config, &mut self.consent, n).await,
        }
    }

    /// Download the track on detail page `url`, then release the session
    ///
    /// The session is closed whether or not the download succeeded.
    pub async fn download_track(mut self, url: &str) -> Result<Track> {
        let result = self.fetch_track(url).await;
        if let Err(e) = self.close().await {
            tracing::warn!(error = %e, "failed to release rendering session");
        }
        result
    }

    async fn fetch_track(&mut self, url: &str) -> Result<Track> {
        tracing::debug!(url = %url, "downloading track");
        self.page.navigate(url).await?;
        dismiss_if_present(self.page.as_ref(), &mut self.consent, self.config.waits.consent).await;
        tracing::debug!(url = %url, "navigated to detail page");

        let destination = track_file_path(&self.config.scratch_dir)?;
        let (info, file) = futures::join!(
            extract_metadata(self.page.as_ref(), &self.config.waits),
            download_track_file(
                self.page.as_ref(),
                &self.client,
                url,
                &self.config.waits,
                &destination,
            ),
        );
        let path = file?;

        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Err(TrackError::MissingFile { path }.into());
        }

        tracing::info!(
            url = %url,
            title = %info.title,
            artist = %info.artist_name,
            path = %path.display(),
            "track downloaded"
        );
        Ok(Track {
            info,
            url: url.to_string(),
            downloaded_file_path: path,
        })
    }

    /// Close the page and the rendering session
    ///
    /// Both are attempted; the first failure is returned.
    pub async fn close(mut self) -> Result<()> {
        let result = release(&*self.session, &*self.page).await;
        self.released = true;
        tracing::debug!(base_url = %self.config.base_url, "rendering session closed");
        Ok(result?)
    }
}

impl<S: RenderingSession> Drop for Session<S> {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        let session = Arc::clone(&self.session);
        let page = Arc::clone(&self.page);
        let base_url = self.config.base_url.clone();

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                tracing::debug!(base_url = %base_url, "releasing dropped rendering session");
                handle.spawn(async move {
                    if let Err(e) = release(&*session, &*page).await {
                        tracing::warn!(
                            base_url = %base_url,
                            error = %e,
                            "failed to release dropped rendering session"
                        );
                    }
                });
            }
            Err(_) => {
                tracing::warn!(
                    base_url = %base_url,
                    "rendering session dropped outside a runtime, not released"
                );
            }
        }
    }
}

/// Close the page, then the session; both are attempted and the first failure wins
async fn release<S: RenderingSession>(session: &S, page: &S::Page) -> DocumentResult<()> {
    let page = page.close().await;
    let session = session.close().await;
    page.and(session)
}
