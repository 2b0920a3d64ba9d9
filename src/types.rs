//! Core types for chosic-dl

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Metadata read from a track detail page
///
/// The all-empty value is the sentinel returned when extraction is abandoned.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackInfo {
    /// Track title
    pub title: String,
    /// Artist display name
    pub artist_name: String,
    /// Tags in document order
    pub tags: Vec<String>,
}

impl TrackInfo {
    /// The sentinel returned when metadata could not be read
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true for the sentinel value
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.artist_name.is_empty() && self.tags.is_empty()
    }
}

/// A downloaded track
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Metadata (possibly the empty sentinel)
    pub info: TrackInfo,
    /// Detail page the track was resolved from
    pub url: String,
    /// Where the audio file was written
    pub downloaded_file_path: PathBuf,
}

/// The file URL for a detail page and the path that produced it
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolvedDownloadUrl {
    /// Read from the download button's direct-link attribute
    Direct(String),
    /// Read from the popup link after clicking the button; `None` if it had no `href`
    Popup(Option<String>),
}

impl ResolvedDownloadUrl {
    /// The resolved URL, if any
    pub fn url(&self) -> Option<&str> {
        match self {
            ResolvedDownloadUrl::Direct(url) => Some(url),
            ResolvedDownloadUrl::Popup(url) => url.as_deref(),
        }
    }

    /// Consume into the resolved URL, if any
    pub fn into_url(self) -> Option<String> {
        match self {
            ResolvedDownloadUrl::Direct(url) => Some(url),
            ResolvedDownloadUrl::Popup(url) => url,
        }
    }
}

/// Result of one consent dismissal attempt
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConsentOutcome {
    /// The dialog was found and its accept control clicked
    Dismissed,
    /// No dialog appeared within the probe wait
    NotPresent,
    /// The dialog was already dismissed earlier in this session
    AlreadyBypassed,
}

/// Outcome of one track in a batch run
#[derive(Debug)]
pub struct TrackOutcome {
    /// Detail page URL
    pub url: String,
    /// The downloaded track or the track-fatal error
    pub result: crate::Result<Track>,
}

impl TrackOutcome {
    /// Returns true if the track was downloaded
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}
