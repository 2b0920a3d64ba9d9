//! In-memory rendering engine over a static site fixture
//!
//! A [`StaticSite`] maps URLs to [`SiteDocument`]s; a document maps selectors to
//! elements. Nested selectors are resolved through each element's children, so
//! a fixture states the result of every query it needs to answer rather than
//! evaluating XPath.
//!
//! Waits never sleep: an element that is not present is reported as a
//! timeout right away.

use super::traits::{DocumentPage, RenderingEngine, RenderingSession};
use crate::error::{DocumentError, DocumentResult};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// What clicking an element does to the page
#[derive(Clone, Debug, Default)]
pub enum ClickAction {
    /// Nothing observable
    #[default]
    None,
    /// Attach `elements` under `selector` until the next navigation (popups, overlays)
    Reveal {
        /// Selector the revealed elements answer to
        selector: String,
        /// The revealed elements
        elements: Vec<SiteElement>,
    },
    /// Hide every element under `selector` for the rest of the session (dialogs)
    Dismiss {
        /// Selector of the dismissed elements
        selector: String,
    },
}

/// One element of a fixture document
#[derive(Clone, Debug, Default)]
pub struct SiteElement {
    text: Option<String>,
    attributes: HashMap<String, String>,
    children: HashMap<String, Vec<SiteElement>>,
    on_click: ClickAction,
}

impl SiteElement {
    /// An element without text, attributes, or children
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text content
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set an attribute
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Add a child answering to `selector` when queried with this element as scope
    pub fn child(mut self, selector: impl Into<String>, element: SiteElement) -> Self {
        self.children
            .entry(selector.into())
            .or_default()
            .push(element);
        self
    }

    /// Set the click behavior
    pub fn on_click(mut self, action: ClickAction) -> Self {
        self.on_click = action;
        self
    }
}

/// Elements of one URL, keyed by selector in document order
#[derive(Clone, Debug, Default)]
pub struct SiteDocument {
    elements: HashMap<String, Vec<SiteElement>>,
}

impl SiteDocument {
    /// An empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element answering to `selector`
    pub fn with(mut self, selector: impl Into<String>, element: SiteElement) -> Self {
        self.elements
            .entry(selector.into())
            .or_default()
            .push(element);
        self
    }
}

/// URL to document map
#[derive(Clone, Debug, Default)]
pub struct StaticSite {
    documents: HashMap<String, SiteDocument>,
}

impl StaticSite {
    /// A site without pages
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the document served at `url`
    pub fn page(mut self, url: impl Into<String>, document: SiteDocument) -> Self {
        self.insert(url, document);
        self
    }

    /// Add or replace the document served at `url`
    pub fn insert(&mut self, url: impl Into<String>, document: SiteDocument) {
        self.documents.insert(url.into(), document);
    }
}

#[derive(Debug, Default)]
struct Activity {
    launches: Vec<bool>,
    open_sessions: usize,
    open_pages: usize,
    navigations: Vec<String>,
    clicks: Vec<String>,
}

/// In-memory [`RenderingEngine`]
///
/// Clones share the same activity log, so a test can keep one clone for
/// assertions while the downloader owns another.
#[derive(Clone, Debug)]
pub struct StaticEngine {
    site: Arc<StaticSite>,
    activity: Arc<Mutex<Activity>>,
}

impl StaticEngine {
    /// Serve `site`
    pub fn new(site: StaticSite) -> Self {
        Self {
            site: Arc::new(site),
            activity: Arc::default(),
        }
    }

    /// Number of sessions launched so far
    pub fn launches(&self) -> usize {
        lock(&self.activity).launches.len()
    }

    /// Headless flag of the most recent launch
    pub fn last_headless(&self) -> Option<bool> {
        lock(&self.activity).launches.last().copied()
    }

    /// Sessions launched and not yet closed
    pub fn open_sessions(&self) -> usize {
        lock(&self.activity).open_sessions
    }

    /// Pages opened and not yet closed
    pub fn open_pages(&self) -> usize {
        lock(&self.activity).open_pages
    }

    /// Every navigation target, in order, across all sessions
    pub fn navigations(&self) -> Vec<String> {
        lock(&self.activity).navigations.clone()
    }

    /// Selector of every clicked element, in order, across all sessions
    pub fn clicks(&self) -> Vec<String> {
        lock(&self.activity).clicks.clone()
    }

    /// Number of clicks on elements found through `selector`
    pub fn click_count(&self, selector: &str) -> usize {
        lock(&self.activity)
            .clicks
            .iter()
            .filter(|s| s.as_str() == selector)
            .count()
    }
}

#[async_trait]
impl RenderingEngine for StaticEngine {
    type Session = StaticSession;

    async fn launch(&self, headless: bool) -> DocumentResult<StaticSession> {
        {
            let mut activity = lock(&self.activity);
            activity.launches.push(headless);
            activity.open_sessions += 1;
        }
        Ok(StaticSession {
            site: Arc::clone(&self.site),
            activity: Arc::clone(&self.activity),
            dismissed: Arc::default(),
            pages: Mutex::new(Vec::new()),
            closed: AtomicBool::new(false),
        })
    }
}

/// In-memory [`RenderingSession`]
///
/// Dismissed dialogs stay dismissed on every page of the session, like a
/// consent cookie would.
#[derive(Debug)]
pub struct StaticSession {
    site: Arc<StaticSite>,
    activity: Arc<Mutex<Activity>>,
    dismissed: Arc<Mutex<HashSet<String>>>,
    pages: Mutex<Vec<Arc<AtomicBool>>>,
    closed: AtomicBool,
}

#[async_trait]
impl RenderingSession for StaticSession {
    type Page = StaticPage;

    async fn new_page(&self) -> DocumentResult<StaticPage> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(DocumentError::Closed);
        }
        let closed = Arc::new(AtomicBool::new(false));
        lock(&self.pages).push(Arc::clone(&closed));
        lock(&self.activity).open_pages += 1;

        Ok(StaticPage {
            site: Arc::clone(&self.site),
            activity: Arc::clone(&self.activity),
            dismissed: Arc::clone(&self.dismissed),
            closed,
            state: Mutex::new(PageState::default()),
        })
    }

    async fn close(&self) -> DocumentResult<()> {
        if self.closed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        let still_open = lock(&self.pages)
            .iter()
            .filter(|flag| !flag.swap(true, Ordering::SeqCst))
            .count();

        let mut activity = lock(&self.activity);
        activity.open_pages -= still_open;
        activity.open_sessions -= 1;
        Ok(())
    }
}

#[derive(Debug, Default)]
struct PageState {
    document: Option<SiteDocument>,
    revealed: HashMap<String, Vec<SiteElement>>,
    generation: u64,
}

/// Handle to an element of a [`StaticPage`]
#[derive(Clone, Debug)]
pub struct StaticElement {
    element: Arc<SiteElement>,
    selector: String,
    generation: u64,
}

impl StaticElement {
    /// The selector this element was found through
    pub fn selector(&self) -> &str {
        &self.selector
    }
}

/// In-memory [`DocumentPage`]
#[derive(Debug)]
pub struct StaticPage {
    site: Arc<StaticSite>,
    activity: Arc<Mutex<Activity>>,
    dismissed: Arc<Mutex<HashSet<String>>>,
    closed: Arc<AtomicBool>,
    state: Mutex<PageState>,
}

impl StaticPage {
    fn ensure_open(&self) -> DocumentResult<()> {
        if self.closed.load(Ordering::SeqCst) {
            Err(DocumentError::Closed)
        } else {
            Ok(())
        }
    }

    fn ensure_attached(&self, element: &StaticElement) -> DocumentResult<()> {
        self.ensure_open()?;
        if lock(&self.state).generation != element.generation {
            return Err(DocumentError::Detached);
        }
        Ok(())
    }

    fn find(
        &self,
        selector: &str,
        scope: Option<&StaticElement>,
    ) -> DocumentResult<Vec<StaticElement>> {
        self.ensure_open()?;
        let state = lock(&self.state);
        let generation = state.generation;
        let handles = |elements: &[SiteElement]| -> Vec<StaticElement> {
            elements
                .iter()
                .map(|element| StaticElement {
                    element: Arc::new(element.clone()),
                    selector: selector.to_string(),
                    generation,
                })
                .collect()
        };

        if let Some(scope) = scope {
            if scope.generation != generation {
                return Err(DocumentError::Detached);
            }
            return Ok(scope
                .element
                .children
                .get(selector)
                .map(|children| handles(children.as_slice()))
                .unwrap_or_default());
        }

        if lock(&self.dismissed).contains(selector) {
            return Ok(Vec::new());
        }

        let mut found = Vec::new();
        if let Some(elements) = state
            .document
            .as_ref()
            .and_then(|document| document.elements.get(selector))
        {
            found.extend(handles(elements.as_slice()));
        }
        if let Some(elements) = state.revealed.get(selector) {
            found.extend(handles(elements.as_slice()));
        }
        Ok(found)
    }
}

#[async_trait]
impl DocumentPage for StaticPage {
    type Element = StaticElement;

    async fn navigate(&self, url: &str) -> DocumentResult<()> {
        self.ensure_open()?;
        lock(&self.activity).navigations.push(url.to_string());

        let document = self
            .site
            .documents
            .get(url)
            .cloned()
            .ok_or_else(|| DocumentError::Navigation {
                url: url.to_string(),
                reason: "no document at this URL".to_string(),
            })?;

        let mut state = lock(&self.state);
        state.document = Some(document);
        state.revealed.clear();
        state.generation += 1;
        Ok(())
    }

    async fn wait_for_element(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> DocumentResult<StaticElement> {
        self.find(selector, None)?
            .into_iter()
            .next()
            .ok_or_else(|| DocumentError::ElementWaitTimeout {
                selector: selector.to_string(),
                timeout,
            })
    }

    async fn query_one(
        &self,
        selector: &str,
        scope: Option<&StaticElement>,
    ) -> DocumentResult<Option<StaticElement>> {
        Ok(self.find(selector, scope)?.into_iter().next())
    }

    async fn query_all(
        &self,
        selector: &str,
        scope: Option<&StaticElement>,
    ) -> DocumentResult<Vec<StaticElement>> {
        self.find(selector, scope)
    }

    async fn read_attribute(
        &self,
        element: &StaticElement,
        name: &str,
    ) -> DocumentResult<Option<String>> {
        self.ensure_attached(element)?;
        Ok(element.element.attributes.get(name).cloned())
    }

    async fn read_text(&self, element: &StaticElement) -> DocumentResult<Option<String>> {
        self.ensure_attached(element)?;
        Ok(element.element.text.clone())
    }

    async fn click(&self, element: &StaticElement) -> DocumentResult<()> {
        self.ensure_attached(element)?;
        lock(&self.activity).clicks.push(element.selector.clone());

        match &element.element.on_click {
            ClickAction::None => {}
            ClickAction::Reveal { selector, elements } => {
                lock(&self.state)
                    .revealed
                    .entry(selector.clone())
                    .or_default()
                    .extend(elements.iter().cloned());
            }
            ClickAction::Dismiss { selector } => {
                lock(&self.dismissed).insert(selector.clone());
            }
        }
        Ok(())
    }

    async fn close(&self) -> DocumentResult<()> {
        if !self.closed.swap(true, Ordering::SeqCst) {
            lock(&self.activity).open_pages -= 1;
        }
        Ok(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
