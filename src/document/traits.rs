//! Traits for the rendering engine adapter

use crate::error::DocumentResult;
use async_trait::async_trait;
use std::time::Duration;

/// Launches rendering sessions
///
/// One session is launched per workflow (link discovery or one track download)
/// and closed when the workflow ends, on success or failure.
#[async_trait]
pub trait RenderingEngine: Send + Sync {
    /// The session type produced by this engine
    type Session: RenderingSession;

    /// Launch a new rendering session
    async fn launch(&self, headless: bool) -> DocumentResult<Self::Session>;
}

/// A running rendering session (one browser process)
///
/// Sessions and pages are `'static` so an abandoned session can still be
/// closed from a spawned task.
#[async_trait]
pub trait RenderingSession: Send + Sync + 'static {
    /// The page type produced by this session
    type Page: DocumentPage;

    /// Open a new page
    async fn new_page(&self) -> DocumentResult<Self::Page>;

    /// Close the session and every page it opened
    async fn close(&self) -> DocumentResult<()>;
}

/// One rendered page
///
/// Element handles are only valid until the next navigation. Queries with a
/// `scope` are evaluated relative to that element; without one they run
/// against the whole document.
#[async_trait]
pub trait DocumentPage: Send + Sync + 'static {
    /// Handle to an element of the current document
    type Element: Clone + Send + Sync;

    /// Navigate to `url` and wait for the document to load
    async fn navigate(&self, url: &str) -> DocumentResult<()>;

    /// Wait until an element matching `selector` is attached, up to `timeout`
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::ElementWaitTimeout`](crate::error::DocumentError::ElementWaitTimeout)
    /// if no element appears in time.
    async fn wait_for_element(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> DocumentResult<Self::Element>;

    /// First element matching `selector`, if any
    async fn query_one(
        &self,
        selector: &str,
        scope: Option<&Self::Element>,
    ) -> DocumentResult<Option<Self::Element>>;

    /// All elements matching `selector`, in document order
    async fn query_all(
        &self,
        selector: &str,
        scope: Option<&Self::Element>,
    ) -> DocumentResult<Vec<Self::Element>>;

    /// Value of attribute `name`, or `None` if the element does not carry it
    async fn read_attribute(
        &self,
        element: &Self::Element,
        name: &str,
    ) -> DocumentResult<Option<String>>;

    /// Text content of the element, or `None` if it has none
    async fn read_text(&self, element: &Self::Element) -> DocumentResult<Option<String>>;

    /// Click the element
    async fn click(&self, element: &Self::Element) -> DocumentResult<()>;

    /// Close the page
    async fn close(&self) -> DocumentResult<()>;
}
