//! Utility functions for file naming

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Maximum number of rename attempts when resolving file name collisions
const MAX_RENAME_ATTEMPTS: u32 = 9999;

/// Extension of downloaded track files
pub const TRACK_FILE_EXTENSION: &str = "mp3";

/// Path for a new track file in `dir`, named after the current millisecond timestamp
///
/// # Examples
///
/// ```
/// use chosic_dl::utils::track_file_path;
///
/// let dir = std::env::temp_dir();
/// let path = track_file_path(&dir).unwrap();
/// assert_eq!(path.extension().unwrap(), "mp3");
/// ```
pub fn track_file_path(dir: &Path) -> Result<PathBuf> {
    let stamp = chrono::Utc::now().timestamp_millis();
    get_unique_path(&dir.join(format!("{}.{}", stamp, TRACK_FILE_EXTENSION)))
}

/// Get a path that does not exist yet, adding ` (1)`, ` (2)`, ... before the
/// extension when `path` is taken
///
/// # Examples
///
/// ```
/// use chosic_dl::utils::get_unique_path;
/// use std::path::Path;
///
/// let path = Path::new("/tmp/does-not-exist-1700000000000.mp3");
/// assert_eq!(get_unique_path(path).unwrap(), path);
/// ```
pub fn get_unique_path(path: &Path) -> Result<PathBuf> {
    if !path.exists() {
        return Ok(path.to_path_buf());
    }

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| invalid_path(path, "cannot extract file stem"))?;
    let extension = path.extension().and_then(|e| e.to_str());
    let parent = path
        .parent()
        .ok_or_else(|| invalid_path(path, "cannot extract parent directory"))?;

    for i in 1..=MAX_RENAME_ATTEMPTS {
        let new_name = match extension {
            Some(ext) => format!("{} ({}).{}", stem, i, ext),
            None => format!("{} ({})", stem, i),
        };
        let new_path = parent.join(new_name);
        if !new_path.exists() {
            return Ok(new_path);
        }
    }

    Err(invalid_path(
        path,
        "could not find unique filename after 9999 attempts",
    ))
}

fn invalid_path(path: &Path, reason: &str) -> Error {
    Error::Io(std::io::Error::new(
        std::io::ErrorKind::AlreadyExists,
        format!("{}: {}", path.display(), reason),
    ))
}
