//! Rendering engine capability interface
//!
//! The crawler and extractors never talk to a browser directly. They drive a
//! rendered document through three traits:
//!
//! - [`RenderingEngine`]: launches a rendering session (a browser process)
//! - [`RenderingSession`]: opens pages and is closed when the workflow ends
//! - [`DocumentPage`]: navigate, wait for elements, query, read, click
//!
//! Selectors are XPath location expressions (see [`crate::selectors`]).
//!
//! [`StaticEngine`] is a deterministic in-memory implementation over a
//! declarative [`StaticSite`] fixture. It is used by the test suite and for
//! offline replay of captured pages.
//!
//! ## Usage
//!
//! ```
//! use chosic_dl::document::{DocumentPage, RenderingEngine, RenderingSession};
//! use chosic_dl::document::{SiteDocument, SiteElement, StaticEngine, StaticSite};
//! use std::time::Duration;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let site = StaticSite::new().page(
//!     "https://example.com/",
//!     SiteDocument::new().with("//h1", SiteElement::new().text("Hello")),
//! );
//! let engine = StaticEngine::new(site);
//!
//! let session = engine.launch(true).await?;
//! let page = session.new_page().await?;
//! page.navigate("https://example.com/").await?;
//! let heading = page.wait_for_element("//h1", Duration::from_secs(1)).await?;
//! assert_eq!(page.read_text(&heading).await?.as_deref(), Some("Hello"));
//!
//! page.close().await?;
//! session.close().await?;
//! # Ok(())
//! # }
//! ```

mod memory;
mod traits;

pub use memory::{ClickAction, SiteDocument, SiteElement, StaticElement, StaticEngine, StaticPage, StaticSession, StaticSite};
pub use traits::{DocumentPage, RenderingEngine, RenderingSession};
