//! Error types for chosic-dl
//!
//! Errors are grouped by how far they reach:
//! - [`CrawlError`] - the listing page did not have the expected structure; the
//!   whole link-discovery call is aborted
//! - [`TrackError`] - a single track could not be resolved or transferred; other
//!   tracks in a batch are unaffected
//! - [`DocumentError`] - failures reported by the rendering engine adapter
//!
//! Tolerated degradations (missing consent dialog, missing metadata elements)
//! never surface as errors; they are logged and converted to sentinel values.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for chosic-dl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Result type alias for rendering engine adapter operations
pub type DocumentResult<T> = std::result::Result<T, DocumentError>;

/// Main error type for chosic-dl
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "base_url")
        key: Option<String>,
    },

    /// Catalog listing structure did not match expectations
    #[error("crawl error: {0}")]
    Crawl(#[from] CrawlError),

    /// Track resolution or transfer failed
    #[error("track error: {0}")]
    Track(#[from] TrackError),

    /// Rendering engine adapter failure
    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    /// Network error during file transfer
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Listing-page errors that abort a crawl
#[derive(Debug, Error)]
pub enum CrawlError {
    /// The last pagination control was not found on the first listing page
    #[error("pagination control not found on {url}")]
    MissingPaginationControl {
        /// The listing page URL
        url: String,
    },

    /// The last pagination control's text is not a page number
    #[error("pagination control text {text:?} on {url} is not a page number")]
    InvalidPageCount {
        /// The listing page URL
        url: String,
        /// The text read from the control
        text: String,
    },

    /// No track links were found on a listing page
    #[error("no track links found on {url}")]
    EmptyResultSet {
        /// The listing page URL
        url: String,
    },

    /// Some track entries did not yield a link
    #[error("found {links} track links for {entries} track entries on {url}")]
    CountMismatch {
        /// The listing page URL
        url: String,
        /// Number of track entries on the page
        entries: usize,
        /// Number of links that could be read
        links: usize,
    },
}

/// Per-track errors that abort one track's download
#[derive(Debug, Error)]
pub enum TrackError {
    /// The download button never appeared on the detail page
    #[error("download button not found on {url} after {timeout:?}")]
    DownloadButtonNotFound {
        /// The detail page URL
        url: String,
        /// How long the button was waited for
        timeout: Duration,
    },

    /// The popup download link carried no `href`
    #[error("no download URL could be resolved on {url}")]
    MissingDownloadUrl {
        /// The detail page URL
        url: String,
    },

    /// The file server answered with a non-success status
    #[error("HTTP {status} fetching {url}")]
    HttpStatus {
        /// The file URL
        url: String,
        /// The HTTP status code
        status: u16,
    },

    /// The transfer reported success but the file is not on disk
    #[error("downloaded file missing at {path}")]
    MissingFile {
        /// The expected file path
        path: PathBuf,
    },
}

/// Errors reported by a rendering engine adapter
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    /// A wait-for-element call ran out of time
    #[error("timed out after {timeout:?} waiting for {selector}")]
    ElementWaitTimeout {
        /// The selector that was waited for
        selector: String,
        /// The wait bound
        timeout: Duration,
    },

    /// Navigation failed
    #[error("navigation to {url} failed: {reason}")]
    Navigation {
        /// The target URL
        url: String,
        /// Why the navigation failed
        reason: String,
    },

    /// The element handle no longer belongs to the current document
    #[error("element is detached from the document")]
    Detached,

    /// The page or session was already closed
    #[error("rendering session is closed")]
    Closed,

    /// Any other engine failure
    #[error("rendering engine error: {0}")]
    Engine(String),
}

impl DocumentError {
    /// Returns true if this is a wait-for-element timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, DocumentError::ElementWaitTimeout { .. })
    }
}

impl Error {
    /// Returns true for listing structure errors ([`CrawlError`])
    ///
    /// Classification is by error type, not by the call that raised it.
    /// Rendering engine errors ([`Error::Document`]) belong to neither class:
    /// they abort whichever workflow they occur in.
    pub fn is_crawl_fatal(&self) -> bool {
        matches!(self, Error::Crawl(_))
    }

    /// Returns true for errors resolving or transferring a single track
    ///
    /// See [`Error::is_crawl_fatal`] for how engine errors are classified.
    pub fn is_track_fatal(&self) -> bool {
        matches!(self, Error::Track(_) | Error::Network(_) | Error::Io(_))
    }

    /// Machine-readable error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Config { .. } => "config_error",
            Error::Crawl(e) => match e {
                CrawlError::MissingPaginationControl { .. } => "missing_pagination_control",
                CrawlError::InvalidPageCount { .. } => "invalid_page_count",
                CrawlError::EmptyResultSet { .. } => "empty_result_set",
                CrawlError::CountMismatch { .. } => "count_mismatch",
            },
            Error::Track(e) => match e {
                TrackError::DownloadButtonNotFound { .. } => "download_button_not_found",
                TrackError::MissingDownloadUrl { .. } => "missing_download_url",
                TrackError::HttpStatus { .. } => "http_status",
                TrackError::MissingFile { .. } => "missing_file",
            },
            Error::Document(e) => match e {
                DocumentError::ElementWaitTimeout { .. } => "element_wait_timeout",
                DocumentError::Navigation { .. } => "navigation_failed",
                DocumentError::Detached => "element_detached",
                DocumentError::Closed => "session_closed",
                DocumentError::Engine(_) => "engine_error",
            },
            Error::Network(_) => "network_error",
            Error::Io(_) => "io_error",
        }
    }
}
