//! Shared fixtures for building fake catalog sites in unit tests.

use crate::config::{SessionConfig, WaitConfig};
use crate::document::{ClickAction, SiteDocument, SiteElement, StaticSite};
use crate::selectors;
use std::path::Path;
use std::time::Duration;

pub(crate) const BASE_URL: &str = "https://www.chosic.com/free-music/lofi";
pub(crate) const DETAIL_URL: &str = "https://www.chosic.com/download-audio/45401/";

/// Session config with short waits against `base_url`
pub(crate) fn session_config(base_url: &str, scratch_dir: &Path) -> SessionConfig {
    SessionConfig {
        base_url: base_url.to_string(),
        headless: true,
        scratch_dir: scratch_dir.to_path_buf(),
        waits: WaitConfig {
            element: Duration::from_millis(50),
            consent: Duration::from_millis(10),
        },
        allow_single_page: false,
    }
}

pub(crate) fn consent_button() -> SiteElement {
    SiteElement::new().on_click(ClickAction::Dismiss {
        selector: selectors::CONSENT_ACCEPT.to_string(),
    })
}

pub(crate) fn track_entry(href: &str) -> SiteElement {
    SiteElement::new().child(
        selectors::TRACK_ENTRY_LINK,
        SiteElement::new().attr(selectors::HREF_ATTRIBUTE, href),
    )
}

/// A listing page with one entry per link, optional pagination and consent dialog
pub(crate) fn listing_page(links: &[String], page_count: Option<u32>, consent: bool) -> SiteDocument {
    let mut document = links.iter().fold(SiteDocument::new(), |doc, link| {
        doc.with(selectors::TRACK_ENTRY, track_entry(link))
    });
    if let Some(count) = page_count {
        document = document.with(
            selectors::LAST_PAGINATION_LINK,
            SiteElement::new().text(count.to_string()),
        );
    }
    if consent {
        document = document.with(selectors::CONSENT_ACCEPT, consent_button());
    }
    document
}

/// Links for a catalog with `links_per_page[i]` entries on page `i + 1`
pub(crate) fn catalog_links(links_per_page: &[usize]) -> Vec<Vec<String>> {
    links_per_page
        .iter()
        .enumerate()
        .map(|(page, count)| {
            (0..*count)
                .map(|entry| format!("https://www.chosic.com/download-audio/{}{:02}/", page + 1, entry))
                .collect()
        })
        .collect()
}

/// A catalog under `base_url`; every page shows the consent dialog and pagination
pub(crate) fn catalog_site(base_url: &str, pages: &[Vec<String>]) -> StaticSite {
    let count = pages.len() as u32;
    pages
        .iter()
        .enumerate()
        .fold(StaticSite::new(), |site, (index, links)| {
            site.page(
                crate::config::page_url(base_url, index as u32 + 1),
                listing_page(links, Some(count), true),
            )
        })
}

/// How a fixture detail page exposes its file URL
#[derive(Clone, Debug)]
pub(crate) enum DownloadFixture {
    /// Button carries `data-url`
    Direct(String),
    /// Button reveals a popup link with this `href` (or none)
    Popup(Option<String>),
    /// No download button at all
    Missing,
}

/// Contents of a fixture detail page
#[derive(Clone, Debug)]
pub(crate) struct DetailFixture {
    pub(crate) title: Option<String>,
    pub(crate) artist: Option<String>,
    pub(crate) tags: Vec<Option<String>>,
    pub(crate) download: DownloadFixture,
    pub(crate) consent: bool,
}

impl DetailFixture {
    pub(crate) fn new(download: DownloadFixture) -> Self {
        Self {
            title: Some("  Purple Dream\n".to_string()),
            artist: Some("Ghostrifter Official".to_string()),
            tags: vec![Some("Lofi".to_string()), Some("Chill".to_string())],
            download,
            consent: true,
        }
    }

    pub(crate) fn document(&self) -> SiteDocument {
        let mut title_wrapper = SiteElement::new();
        if let Some(title) = &self.title {
            title_wrapper = title_wrapper.child(selectors::TITLE, SiteElement::new().text(title));
        }
        if let Some(artist) = &self.artist {
            title_wrapper = title_wrapper.child(selectors::ARTIST, SiteElement::new().text(artist));
        }

        let tag_wrapper = self.tags.iter().fold(SiteElement::new(), |wrapper, tag| {
            let element = match tag {
                Some(text) => SiteElement::new().text(text),
                None => SiteElement::new(),
            };
            wrapper.child(selectors::TAG, element)
        });

        let mut document = SiteDocument::new()
            .with(selectors::TITLE_WRAPPER, title_wrapper)
            .with(selectors::TAG_WRAPPER, tag_wrapper);

        match &self.download {
            DownloadFixture::Direct(url) => {
                document = document.with(
                    selectors::DOWNLOAD_BUTTON,
                    SiteElement::new().attr(selectors::DIRECT_LINK_ATTRIBUTE, url),
                );
            }
            DownloadFixture::Popup(href) => {
                let mut link = SiteElement::new();
                if let Some(href) = href {
                    link = link.attr(selectors::HREF_ATTRIBUTE, href);
                }
                document = document.with(
                    selectors::DOWNLOAD_BUTTON,
                    SiteElement::new().on_click(ClickAction::Reveal {
                        selector: selectors::POPUP_DOWNLOAD_LINK.to_string(),
                        elements: vec![link],
                    }),
                );
            }
            DownloadFixture::Missing => {}
        }

        if self.consent {
            document = document.with(selectors::CONSENT_ACCEPT, consent_button());
        }
        document
    }
}
