//! Folder path normalization for Dropbox API calls.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{DropboxError, Result};

/// Dropbox web UI folder URLs.
static HOME_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://(?:www\.)?dropbox\.com/home(/[^?#]*)?(?:[?#].*)?$")
        .expect("Invalid home URL regex")
});

/// `id:` and `ns:` path forms, passed to the API as-is.
static ID_PATH_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:id:[a-zA-Z0-9_-]+|ns:[0-9]+)(?:/.*)?$").expect("Invalid id path regex")
});

static URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.-]*://").expect("Invalid URL regex"));

/// Turn user input into a path accepted by `files/list_folder`.
///
/// Accepts:
/// - empty input or `/` for the account root (returned as `""`)
/// - `https://www.dropbox.com/home/<path>`, percent-decoded
/// - `id:<id>` and `ns:<namespace>` forms
/// - a plain path, with or without a leading slash
///
/// # Examples
///
/// ```
/// use dropbox_links::path::normalize_folder_path;
///
/// assert_eq!(normalize_folder_path("").unwrap(), "");
/// assert_eq!(normalize_folder_path("Photos/2024/").unwrap(), "/Photos/2024");
/// assert_eq!(
///     normalize_folder_path("https://www.dropbox.com/home/Work").unwrap(),
///     "/Work"
/// );
/// ```
pub fn normalize_folder_path(input: &str) -> Result<String> {
    let trimmed = input.trim();

    if trimmed.chars().any(|c| c.is_control() || c == '\\') {
        return Err(DropboxError::InvalidPath(input.to_string()));
    }

    if let Some(captures) = HOME_URL_REGEX.captures(trimmed) {
        let path = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
        let decoded = urlencoding::decode(path)
            .map_err(|_| DropboxError::InvalidPath(input.to_string()))?;
        if decoded.chars().any(|c| c.is_control() || c == '\\') {
            return Err(DropboxError::InvalidPath(input.to_string()));
        }
        return Ok(clean_slashes(&decoded));
    }

    if URL_REGEX.is_match(trimmed) {
        return Err(DropboxError::InvalidPath(input.to_string()));
    }

    if ID_PATH_REGEX.is_match(trimmed) {
        return Ok(trimmed.trim_end_matches('/').to_string());
    }

    Ok(clean_slashes(trimmed))
}

/// Single leading slash, no trailing slash, no empty segments.
fn clean_slashes(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() {
        String::new()
    } else {
        format!("/{}", segments.join("/"))
    }
}
