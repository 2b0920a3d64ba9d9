//! # chosic-dl
//!
//! Catalog crawler and track downloader for a paginated free-music site.
//!
//! The crate walks a category's listing pages, collects the detail page URL
//! of every track, and for each track reads its metadata and streams its audio
//! file into a scratch directory. Pages are driven through the
//! [`document`] capability traits, so any rendering engine can be plugged in.
//!
//! ## Quick Start
//!
//! Bring a [`RenderingEngine`](document::RenderingEngine) implementation for
//! your headless browser. The bundled [`StaticEngine`](document::StaticEngine)
//! only serves fixture pages and is meant for tests and offline replay.
//!
//! ```no_run
//! use chosic_dl::document::RenderingEngine;
//! use chosic_dl::{Config, Downloader, DownloaderOptions};
//!
//! async fn download_lofi<E: RenderingEngine>(engine: E) -> chosic_dl::Result<()> {
//!     let downloader = Downloader::new(engine, Config::default())?;
//!
//!     let outcomes = downloader
//!         .download_catalog(&DownloaderOptions::category("lofi"))
//!         .await?;
//!     for outcome in outcomes {
//!         match outcome.result {
//!             Ok(track) => println!(
//!                 "{} - {}: {}",
//!                 track.info.artist_name,
//!                 track.info.title,
//!                 track.downloaded_file_path.display()
//!             ),
//!             Err(e) => eprintln!("{}: {}", outcome.url, e),
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Listing page crawling and link extraction
pub mod catalog;
/// Configuration types
pub mod config;
/// Consent dialog dismissal
pub mod consent;
pub mod document;
/// Session orchestration
pub mod downloader;
/// Error types
pub mod error;
/// Location expressions for the site's page structure
pub mod selectors;
/// Detail page metadata and download link handling
pub mod track;
/// HTTP file transfer
pub mod transfer;
/// Core types
pub mod types;
/// Utility functions
pub mod utils;

#[cfg(test)]
pub(crate) mod test_helpers;

// Re-export commonly used types
pub use config::{Config, DownloaderOptions, HttpConfig, SessionConfig, WaitConfig};
pub use consent::ConsentState;
pub use downloader::{Downloader, Session, TrackLinks};
pub use error::{CrawlError, DocumentError, Error, Result, TrackError};
pub use types::{ConsentOutcome, ResolvedDownloadUrl, Track, TrackInfo, TrackOutcome};
