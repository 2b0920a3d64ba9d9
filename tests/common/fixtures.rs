//! Fixture pages modeled on the catalog site's structure

use chosic_dl::config::{DEFAULT_CATALOG_ROOT, page_url};
use chosic_dl::document::{ClickAction, SiteDocument, SiteElement, StaticSite};
use chosic_dl::selectors;

/// Audio bytes served for every fixture track
pub const AUDIO_BYTES: &[u8] = b"ID3\x04\x00\x00fixture audio frames";

/// A fixture track as it appears on its detail page
#[derive(Clone, Debug)]
pub struct TrackFixture {
    pub detail_url: String,
    pub title: String,
    pub artist: String,
    pub tags: Vec<String>,
    /// Served file URL; `None` leaves the page without a download button
    pub file_url: Option<String>,
    /// Expose the file URL through the popup instead of `data-url`
    pub via_popup: bool,
}

impl TrackFixture {
    pub fn new(id: u32, title: &str, artist: &str, file_url: Option<String>) -> Self {
        Self {
            detail_url: format!("https://www.chosic.com/download-audio/{}/", id),
            title: title.to_string(),
            artist: artist.to_string(),
            tags: vec!["Lofi".to_string(), "Chill".to_string()],
            file_url,
            via_popup: false,
        }
    }

    /// Detail page document, consent dialog included
    pub fn document(&self) -> SiteDocument {
        let title_wrapper = SiteElement::new()
            .child(selectors::TITLE, SiteElement::new().text(format!(" {}\n", self.title)))
            .child(selectors::ARTIST, SiteElement::new().text(&self.artist));
        let tag_wrapper = self.tags.iter().fold(SiteElement::new(), |wrapper, tag| {
            wrapper.child(selectors::TAG, SiteElement::new().text(tag))
        });

        let mut document = SiteDocument::new()
            .with(selectors::TITLE_WRAPPER, title_wrapper)
            .with(selectors::TAG_WRAPPER, tag_wrapper)
            .with(selectors::CONSENT_ACCEPT, consent_button());

        if let Some(url) = &self.file_url {
            let button = if self.via_popup {
                SiteElement::new().on_click(ClickAction::Reveal {
                    selector: selectors::POPUP_DOWNLOAD_LINK.to_string(),
                    elements: vec![SiteElement::new().attr(selectors::HREF_ATTRIBUTE, url)],
                })
            } else {
                SiteElement::new().attr(selectors::DIRECT_LINK_ATTRIBUTE, url)
            };
            document = document.with(selectors::DOWNLOAD_BUTTON, button);
        }
        document
    }
}

pub fn consent_button() -> SiteElement {
    SiteElement::new().on_click(ClickAction::Dismiss {
        selector: selectors::CONSENT_ACCEPT.to_string(),
    })
}

/// Base URL of a category of the default catalog
pub fn category_url(category: &str) -> String {
    format!("{}/{}", DEFAULT_CATALOG_ROOT, category)
}

/// A site for `category` with the given tracks on each listing page
///
/// Every listing page carries the consent dialog and pagination control.
pub fn catalog_site(category: &str, pages: &[Vec<TrackFixture>]) -> StaticSite {
    let base = category_url(category);
    let page_count = pages.len();
    let mut site = StaticSite::new();

    for (index, tracks) in pages.iter().enumerate() {
        let listing = tracks
            .iter()
            .fold(SiteDocument::new(), |doc, track| {
                doc.with(
                    selectors::TRACK_ENTRY,
                    SiteElement::new().child(
                        selectors::TRACK_ENTRY_LINK,
                        SiteElement::new().attr(selectors::HREF_ATTRIBUTE, &track.detail_url),
                    ),
                )
            })
            .with(
                selectors::LAST_PAGINATION_LINK,
                SiteElement::new().text(page_count.to_string()),
            )
            .with(selectors::CONSENT_ACCEPT, consent_button());
        site.insert(page_url(&base, index as u32 + 1), listing);

        for track in tracks {
            site.insert(track.detail_url.clone(), track.document());
        }
    }
    site
}
