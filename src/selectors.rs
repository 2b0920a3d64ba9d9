//! XPath location expressions for the catalog site's DOM roles
//!
//! Nested selectors (title, artist, tag, entry link) are evaluated with the
//! wrapper or entry element as scope.

/// Affirmative button of the cookie/consent dialog
pub const CONSENT_ACCEPT: &str =
    r#"//div[contains(@role,"dialog")]//button[contains(@mode, "primary")]"#;

/// One track entry on a listing page
pub const TRACK_ENTRY: &str = r#"//div[contains(@class, "track-info")]"#;

/// Detail-page link inside a track entry
pub const TRACK_ENTRY_LINK: &str =
    r#"//div[contains(@class,"download-tags-div")]/a[contains(@class, "download-button")]"#;

/// Numbered pagination links
pub const PAGINATION_LINKS: &str =
    "//div[contains(@class,'nav-links')]//a[@class=  'page-numbers']";

/// Last numbered pagination link; its text is the page count
pub const LAST_PAGINATION_LINK: &str =
    "//div[contains(@class,'nav-links')]//a[@class=  'page-numbers'][last()]";

/// Main track block on a detail page
pub const MAIN_TRACK: &str = "//div[contains(@class, 'main-track')]";

/// Title wrapper holding title and artist
pub const TITLE_WRAPPER: &str =
    "//div[contains(@class, 'main-track')]/div[contains(@class, 'track-title-wrap')]";

/// Title inside the title wrapper
pub const TITLE: &str = r#"//div[contains(@class,"trackF-title-inside")]"#;

/// Artist link inside the title wrapper
pub const ARTIST: &str = r#"//div[@class="artist-track"]/a[contains(@class,"artist-name")]"#;

/// Tag cloud wrapper
pub const TAG_WRAPPER: &str = "//div[contains(@class,'tagcloud-names')]";

/// One tag inside the tag cloud wrapper
pub const TAG: &str = "//a[contains(@class,'tag-cloud-link-names')]";

/// Download button on a detail page
pub const DOWNLOAD_BUTTON: &str = r#"//div[contains(@class, 'main-track')]/div[contains(@class,'track-download-wrap')]/button[contains(@class,"download")]"#;

/// Popup link shown after clicking a download button without a direct link
pub const POPUP_DOWNLOAD_LINK: &str = r#"//a[contains(@class,"download2")]"#;

/// Attribute on the download button holding the file URL
pub const DIRECT_LINK_ATTRIBUTE: &str = "data-url";

/// Attribute holding link targets
pub const HREF_ATTRIBUTE: &str = "href";
