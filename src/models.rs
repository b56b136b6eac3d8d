//! Data models for Dropbox API requests and responses.

use serde::{Deserialize, Serialize};

/// Display value written in place of a link when creation failed.
pub const LINK_CREATION_FAILED: &str = "Link creation failed";

/// A file entry from a folder listing.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteFile {
    pub name: String,
    /// Lowercased full path, used as the identifier in API calls.
    #[serde(default)]
    pub path_lower: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
}

impl RemoteFile {
    /// Path to pass to the sharing endpoints.
    ///
    /// Falls back to the `id:` form for entries listed without a path.
    pub fn api_path(&self) -> &str {
        self.path_lower
            .as_deref()
            .or(self.id.as_deref())
            .unwrap_or_default()
    }
}

/// One entry of a folder listing, discriminated by its `.tag`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = ".tag", rename_all = "lowercase")]
pub enum Metadata {
    File(RemoteFile),
    /// Folders, deleted markers and any tag added later.
    #[serde(other)]
    Other,
}

impl Metadata {
    pub fn into_file(self) -> Option<RemoteFile> {
        match self {
            Metadata::File(file) => Some(file),
            _ => None,
        }
    }
}

/// Response from `files/list_folder` and `files/list_folder/continue`.
#[derive(Debug, Deserialize)]
pub struct ListFolderResponse {
    #[serde(default)]
    pub entries: Vec<Metadata>,
    pub cursor: String,
    #[serde(default)]
    pub has_more: bool,
}

impl ListFolderResponse {
    /// Files on this page, in listing order.
    pub fn files(self) -> impl Iterator<Item = RemoteFile> {
        self.entries.into_iter().filter_map(Metadata::into_file)
    }
}

/// Shared link metadata returned by the sharing endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct SharedLinkMetadata {
    pub url: String,
}

/// Response from `sharing/list_shared_links`.
#[derive(Debug, Deserialize)]
pub struct ListSharedLinksResponse {
    #[serde(default)]
    pub links: Vec<SharedLinkMetadata>,
}

#[derive(Debug, Serialize)]
pub struct ListFolderArg<'a> {
    pub path: &'a str,
    pub recursive: bool,
}

#[derive(Debug, Serialize)]
pub struct ListFolderContinueArg<'a> {
    pub cursor: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ListSharedLinksArg<'a> {
    pub path: &'a str,
    pub direct_only: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestedVisibility {
    Public,
}

#[derive(Debug, Serialize)]
pub struct SharedLinkSettings {
    pub requested_visibility: RequestedVisibility,
}

#[derive(Debug, Serialize)]
pub struct CreateSharedLinkArg<'a> {
    pub path: &'a str,
    pub settings: SharedLinkSettings,
}

/// Dropbox API error body.
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub error_summary: String,
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

impl ApiErrorResponse {
    /// Union tag of the error, e.g. `shared_link_already_exists`.
    pub fn tag(&self) -> Option<&str> {
        self.error.as_ref()?.get(".tag")?.as_str()
    }

    /// URL of the existing link carried by a `shared_link_already_exists` error.
    pub fn existing_link_url(&self) -> Option<String> {
        self.error
            .as_ref()?
            .pointer("/shared_link_already_exists/metadata/url")?
            .as_str()
            .map(str::to_string)
    }
}

/// One row of the exported table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRecord {
    pub filename: String,
    /// `None` when no link could be obtained.
    pub shared_link: Option<String>,
}

impl LinkRecord {
    pub fn new(filename: impl Into<String>, shared_link: Option<String>) -> Self {
        Self {
            filename: filename.into(),
            shared_link,
        }
    }

    pub fn is_success(&self) -> bool {
        self.shared_link.is_some()
    }

    /// The link, or [`LINK_CREATION_FAILED`].
    pub fn shared_link_display(&self) -> &str {
        self.shared_link.as_deref().unwrap_or(LINK_CREATION_FAILED)
    }
}
