//! On-disk layout: `{output}/{yyyy-MM-dd}/{file name from img_src}`.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::dates::iso_date;
use crate::error::AppError;

/// Create the output root. Failure here ends the run.
pub fn ensure_output_dir(path: &Path) -> Result<(), AppError> {
    if path.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(path).map_err(|e| {
        AppError::new(
            1,
            format!("Failed to create output directory '{}': {e}", path.display()),
        )
    })?;
    tracing::info!(path = %path.display(), "created output directory");
    Ok(())
}

/// Create (if needed) and return the folder for one date.
pub fn ensure_date_dir(root: &Path, date: NaiveDate) -> std::io::Result<PathBuf> {
    let dir = root.join(iso_date(date));
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Last path segment of `url`, ignoring any query string or fragment.
///
/// Returns `None` when the URL ends in `/` or has no path.
pub fn file_name_from_url(url: &str) -> Option<&str> {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    let path = &url[..end];
    let name = path.rsplit('/').next()?;
    if name.is_empty() || !path.contains('/') {
        None
    } else {
        Some(name)
    }
}

/// File name for a photo, falling back to its id when the URL has none.
pub fn photo_file_name(img_src: &str, id: u64) -> String {
    file_name_from_url(img_src)
        .map(str::to_string)
        .unwrap_or_else(|| format!("photo-{id}.jpg"))
}

/// Write `bytes` to `dir/name`, replacing any existing file.
pub fn write_payload(dir: &Path, name: &str, bytes: &[u8]) -> std::io::Result<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, bytes)?;
    Ok(path)
}
