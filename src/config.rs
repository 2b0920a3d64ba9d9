//! Configuration types for chosic-dl
//!
//! Two layers:
//! - [`Config`] - downloader-wide settings (waits, HTTP client, crawl policy)
//! - [`DownloaderOptions`] - per-call input, every field optional
//!
//! [`SessionConfig::resolve`] fills the options with defaults and produces the
//! immutable value a session runs with. Caller input is never modified.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Catalog root used when no base URL is supplied
pub const DEFAULT_CATALOG_ROOT: &str = "https://www.chosic.com/free-music";

/// Name prefix of scratch directories created under the system temp root
pub const SCRATCH_DIR_PREFIX: &str = "chosic-downloads";

/// Bounds for wait-for-element calls
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitConfig {
    /// Wait bound for structural elements: wrappers, download button, popup link (default: 30s)
    #[serde(default = "default_element_wait", with = "duration_serde")]
    pub element: Duration,

    /// Wait bound for the consent dialog presence probe (default: 5s)
    #[serde(default = "default_consent_wait", with = "duration_serde")]
    pub consent: Duration,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            element: default_element_wait(),
            consent: default_consent_wait(),
        }
    }
}

/// HTTP client settings for file transfers
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Whole-request timeout for one file transfer (default: 300s)
    #[serde(default = "default_http_timeout", with = "duration_serde")]
    pub timeout: Duration,

    /// User-Agent header sent with transfers (reqwest default if None)
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: default_http_timeout(),
            user_agent: None,
        }
    }
}

/// Main configuration for [`Downloader`](crate::Downloader)
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Wait bounds
    #[serde(default)]
    pub waits: WaitConfig,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Treat a listing without pagination control as a single page (default: false)
    ///
    /// When false, a missing control aborts the crawl with
    /// [`CrawlError::MissingPaginationControl`](crate::error::CrawlError::MissingPaginationControl).
    #[serde(default)]
    pub allow_single_page: bool,
}

/// Per-call options; unset fields take their defaults in [`SessionConfig::resolve`]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloaderOptions {
    /// Category segment appended to the base URL (e.g. "lofi")
    #[serde(default)]
    pub category: Option<String>,

    /// Listing root or track detail page URL (default: [`DEFAULT_CATALOG_ROOT`])
    #[serde(default)]
    pub base_url: Option<String>,

    /// Run the rendering engine headless (default: true)
    #[serde(default)]
    pub headless: Option<bool>,

    /// Skip consent dialog probing from the start (default: false)
    #[serde(default)]
    pub consent_already_bypassed: Option<bool>,

    /// Directory downloaded files are written to (default: fresh temp directory)
    #[serde(default)]
    pub scratch_dir: Option<PathBuf>,
}

impl DownloaderOptions {
    /// Options for a category of the default catalog
    pub fn category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            ..Default::default()
        }
    }

    /// Options pointing at an explicit URL (listing root or detail page)
    pub fn url(url: impl Into<String>) -> Self {
        Self {
            base_url: Some(url.into()),
            ..Default::default()
        }
    }
}

/// Resolved, immutable session configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// Listing root or detail page URL
    pub base_url: String,
    /// Whether the rendering engine runs headless
    pub headless: bool,
    /// Directory downloaded files are written to
    pub scratch_dir: PathBuf,
    /// Wait bounds
    pub waits: WaitConfig,
    /// Single-page tolerance for catalogs without pagination
    pub allow_single_page: bool,
}

impl SessionConfig {
    /// Resolve options against defaults
    ///
    /// Creates the scratch directory when the options do not name one. The
    /// initial consent flag is not part of the config; see
    /// [`ConsentState`](crate::consent::ConsentState).
    pub async fn resolve(config: &Config, options: &DownloaderOptions) -> Result<Self> {
        let base_url = resolve_base_url(options.base_url.as_deref(), options.category.as_deref())?;

        let scratch_dir = match &options.scratch_dir {
            Some(dir) => dir.clone(),
            None => create_scratch_dir(&std::env::temp_dir()).await?,
        };

        Ok(Self {
            base_url,
            headless: options.headless.unwrap_or(true),
            scratch_dir,
            waits: config.waits.clone(),
            allow_single_page: config.allow_single_page,
        })
    }

    /// URL of listing page `page_number` under this session's base URL
    pub fn page_url(&self, page_number: u32) -> String {
        page_url(&self.base_url, page_number)
    }
}

/// Canonical listing URL: `{base}/page/{n}`
pub fn page_url(base_url: &str, page_number: u32) -> String {
    format!("{}/page/{}", base_url.trim_end_matches('/'), page_number)
}

/// Base URL from an optional explicit URL and an optional category segment
///
/// The URL must parse as an absolute http(s) URL. The category is appended as
/// a single path segment.
pub fn resolve_base_url(base_url: Option<&str>, category: Option<&str>) -> Result<String> {
    let root = base_url.unwrap_or(DEFAULT_CATALOG_ROOT);

    let parsed = url::Url::parse(root).map_err(|e| Error::Config {
        message: format!("invalid base URL '{}': {}", root, e),
        key: Some("base_url".to_string()),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::Config {
            message: format!("base URL '{}' must use http or https", root),
            key: Some("base_url".to_string()),
        });
    }

    match category.map(|c| c.trim_matches('/')) {
        Some(category) if !category.is_empty() => {
            if category.contains('/') {
                return Err(Error::Config {
                    message: format!("category '{}' must be a single path segment", category),
                    key: Some("category".to_string()),
                });
            }
            Ok(format!("{}/{}", root.trim_end_matches('/'), category))
        }
        _ => Ok(root.to_string()),
    }
}

/// Create a uniquely named scratch directory under `parent`
///
/// The name is the fixed prefix plus the current millisecond timestamp; a
/// numeric suffix is added when two sessions start within the same millisecond.
pub async fn create_scratch_dir(parent: &Path) -> Result<PathBuf> {
    let stamp = chrono::Utc::now().timestamp_millis();
    let base = format!("{}-{}", SCRATCH_DIR_PREFIX, stamp);

    for attempt in 0..MAX_SCRATCH_ATTEMPTS {
        let name = if attempt == 0 {
            base.clone()
        } else {
            format!("{}-{}", base, attempt)
        };
        let path = parent.join(name);
        match tokio::fs::create_dir(&path).await {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "created scratch directory");
                return Ok(path);
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(Error::Io(e)),
        }
    }

    Err(Error::Io(std::io::Error::new(
        std::io::ErrorKind::AlreadyExists,
        format!(
            "could not create a unique scratch directory under {}",
            parent.display()
        ),
    )))
}

const MAX_SCRATCH_ATTEMPTS: u32 = 1000;

fn default_element_wait() -> Duration {
    Duration::from_secs(30)
}

fn default_consent_wait() -> Duration {
    Duration::from_secs(5)
}

fn default_http_timeout() -> Duration {
    Duration::from_secs(300)
}

// Duration serialization helper (whole seconds)
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
