//! Session orchestration: link discovery and track downloads
//!
//! - [`Downloader::get_track_links`] - crawl a catalog, handing back the open session
//! - [`Downloader::download_track`] - download one detail page's track
//! - [`Downloader::download_catalog`] - both, for a whole catalog
//!
//! Every workflow owns one rendering session from launch to release. Sessions
//! are released on every error path before the error is returned.

mod session;


pub use session::Session;

use crate::config::{Config, DownloaderOptions, SessionConfig, create_scratch_dir};
use crate::consent::ConsentState;
use crate::document::{RenderingEngine, RenderingSession};
use crate::error::Result;
use crate::transfer::build_client;
use crate::types::{Track, TrackOutcome};

/// Links discovered by [`Downloader::get_track_links`] and the session that found them
///
/// The caller either keeps using the session or releases it with
/// [`Session::close`].
#[derive(Debug)]
pub struct TrackLinks<S: RenderingSession> {
    /// The still-open session, positioned on the last visited listing page
    pub session: Session<S>,
    /// Detail page URLs in page-then-entry order
    pub links: Vec<String>,
}

/// Catalog crawler and track downloader over a rendering engine
pub struct Downloader<E: RenderingEngine> {
    engine: E,
    config: Config,
    client: reqwest::Client,
}

impl<E: RenderingEngine> Downloader<E> {
    /// Create a downloader driving `engine`
    pub fn new(engine: E, config: Config) -> Result<Self> {
        let client = build_client(&config.http)?;
        Ok(Self {
            engine,
            config,
            client,
        })
    }

    /// The downloader-wide configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The rendering engine
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Resolve `options` and open a session with them
    pub async fn open_session(&self, options: &DownloaderOptions) -> Result<Session<E::Session>> {
        let config = SessionConfig::resolve(&self.config, options).await?;
        let consent = ConsentState::new(options.consent_already_bypassed.unwrap_or(false));
        Session::open(&self.engine, config, consent, self.client.clone()).await
    }

    /// Discover track links of the catalog named by `options`
    ///
    /// Crawls every page when `page_number` is `None`, otherwise only that page.
    /// On success the session stays open and is returned with the links; on
    /// failure it is closed before the error is returned.
    pub async fn get_track_links(
        &self,
        options: &DownloaderOptions,
        page_number: Option<u32>,
    ) -> Result<TrackLinks<E::Session>> {
        let mut session = self.open_session(options).await?;
        match session.crawl(page_number).await {
            Ok(links) => Ok(TrackLinks { session, links }),
            Err(e) => {
                tracing::error!(error = %e, "link discovery failed");
                if let Err(close_err) = session.close().await {
                    tracing::warn!(error = %close_err, "failed to release rendering session");
                }
                Err(e)
            }
        }
    }

    /// Download the track whose detail page is the base URL of `options`
    ///
    /// Metadata extraction and the file download run concurrently. The
    /// session is released before returning, on success or failure.
    pub async fn download_track(&self, options: &DownloaderOptions) -> Result<Track> {
        let session = self.open_session(options).await?;
        let url = session.config().base_url.clone();
        session.download_track(&url).await
    }

    /// Discover every track of a catalog and download each one
    ///
    /// Links are collected with one session, which is released before the
    /// downloads start. Each track then gets its own session; all files go to
    /// one scratch directory. A crawl error aborts the call, while a track
    /// error is recorded in that track's outcome and the batch continues.
    pub async fn download_catalog(&self, options: &DownloaderOptions) -> Result<Vec<TrackOutcome>> {
        let scratch_dir = match &options.scratch_dir {
            Some(dir) => dir.clone(),
            None => create_scratch_dir(&std::env::temp_dir()).await?,
        };
        let listing_options = DownloaderOptions {
            scratch_dir: Some(scratch_dir.clone()),
            ..options.clone()
        };

        let TrackLinks { session, links } = self.get_track_links(&listing_options, None).await?;
        if let Err(e) = session.close().await {
            tracing::warn!(error = %e, "failed to release rendering session");
        }
        tracing::info!(links = links.len(), "number of track links");

        let mut outcomes = Vec::with_capacity(links.len());
        for url in links {
            tracing::debug!(url = %url, "current track link");
            let track_options = DownloaderOptions {
                category: None,
                base_url: Some(url.clone()),
                headless: options.headless,
                consent_already_bypassed: options.consent_already_bypassed,
                scratch_dir: Some(scratch_dir.clone()),
            };
            let result = self.download_track(&track_options).await;
            if let Err(e) = &result {
                tracing::error!(url = %url, error = %e, "track download failed");
            }
            outcomes.push(TrackOutcome { url, result });
        }

        let failed = outcomes.iter().filter(|o| !o.is_success()).count();
        tracing::info!(
            tracks = outcomes.len(),
            failed,
            scratch_dir = %scratch_dir.display(),
            "catalog download finished"
        );
        Ok(outcomes)
    }
}
