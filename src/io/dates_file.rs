//! Newline-delimited date list.

use std::fs;
use std::path::Path;

/// Read non-blank, trimmed lines from `path`.
///
/// An unreadable file is logged and treated as empty; the caller decides whether
/// an empty list is fatal.
pub fn read_date_tokens(path: &Path) -> Vec<String> {
    match fs::read_to_string(path) {
        Ok(text) => tokens_from_str(&text),
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "failed to read dates file");
            Vec::new()
        }
    }
}

pub fn tokens_from_str(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
