//! Test configuration helpers for building downloaders over fixture sites

use chosic_dl::document::{StaticEngine, StaticSite};
use chosic_dl::{Config, Downloader, DownloaderOptions, WaitConfig};
use std::time::Duration;
use tempfile::TempDir;

/// Downloader config with waits short enough for fixture pages
pub fn fast_config() -> Config {
    Config {
        waits: WaitConfig {
            element: Duration::from_millis(100),
            consent: Duration::from_millis(20),
        },
        ..Default::default()
    }
}

/// A downloader over `site` plus a handle to inspect engine activity
///
/// Returns the scratch directory too; keep it alive for the test duration.
pub fn create_test_downloader(
    site: StaticSite,
) -> (Downloader<StaticEngine>, StaticEngine, TempDir) {
    let engine = StaticEngine::new(site);
    let downloader =
        Downloader::new(engine.clone(), fast_config()).expect("Failed to create downloader");
    let scratch = TempDir::new().expect("Failed to create scratch directory");
    (downloader, engine, scratch)
}

/// Options for `category` of the default catalog, writing into `scratch`
pub fn category_options(category: &str, scratch: &TempDir) -> DownloaderOptions {
    DownloaderOptions {
        scratch_dir: Some(scratch.path().to_path_buf()),
        ..DownloaderOptions::category(category)
    }
}

/// Options for an explicit URL, writing into `scratch`
pub fn url_options(url: &str, scratch: &TempDir) -> DownloaderOptions {
    DownloaderOptions {
        scratch_dir: Some(scratch.path().to_path_buf()),
        ..DownloaderOptions::url(url)
    }
}
