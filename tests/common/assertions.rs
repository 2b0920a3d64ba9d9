//! Custom test assertions for integration tests

use chosic_dl::Track;
use chosic_dl::document::StaticEngine;
use std::path::Path;

/// Assert every rendering session and page has been released
pub fn assert_all_released(engine: &StaticEngine) {
    assert_eq!(
        engine.open_sessions(),
        0,
        "{} rendering session(s) still open",
        engine.open_sessions()
    );
    assert_eq!(
        engine.open_pages(),
        0,
        "{} page(s) still open",
        engine.open_pages()
    );
}

/// Assert a track has metadata and its file exists inside `scratch`
pub fn assert_track_downloaded(track: &Track, scratch: &Path, expected: &[u8]) {
    assert!(!track.info.title.is_empty(), "track title is empty");
    assert!(!track.info.artist_name.is_empty(), "track artist is empty");
    assert!(
        track.downloaded_file_path.starts_with(scratch),
        "file {} outside scratch dir {}",
        track.downloaded_file_path.display(),
        scratch.display()
    );
    let content = std::fs::read(&track.downloaded_file_path).unwrap_or_else(|e| {
        panic!(
            "downloaded file {} unreadable: {}",
            track.downloaded_file_path.display(),
            e
        )
    });
    assert_eq!(content, expected, "downloaded file content mismatch");
}

/// Number of files in `dir`
pub fn file_count(dir: &Path) -> usize {
    std::fs::read_dir(dir)
        .map(|entries| entries.count())
        .unwrap_or(0)
}
