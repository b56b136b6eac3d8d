//! File enumeration and shared link resolution.

use tracing::{debug, info, warn};

use crate::client::DropboxClient;
use crate::error::{DropboxError, Result};
use crate::models::{LinkRecord, RemoteFile, RequestedVisibility};

/// Collects a shared link for every file under a Dropbox folder.
///
/// All requests are issued one after another. Endpoint errors are recovered
/// where they happen; authentication, rate limiting, server outages and
/// transport failures are returned to the caller.
pub struct ShareLinkExtractor {
    client: DropboxClient,
}

impl ShareLinkExtractor {
    pub fn new(client: DropboxClient) -> Self {
        Self { client }
    }

    /// List every file (not folder) under `path`, following pagination.
    ///
    /// An endpoint error on any page yields an empty list, so an empty
    /// result means "nothing to process" rather than "no files exist".
    ///
    /// # Arguments
    /// * `path` - Folder path, `""` for the account root
    /// * `recursive` - Include all nested folders
    pub async fn list_files(&self, path: &str, recursive: bool) -> Result<Vec<RemoteFile>> {
        match self.collect_files(path, recursive).await {
            Ok(files) => Ok(files),
            Err(e) if e.is_api_error() => {
                warn!(path, error = %e, "Listing failed, treating folder as empty");
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    async fn collect_files(&self, path: &str, recursive: bool) -> Result<Vec<RemoteFile>> {
        let mut page = self.client.list_folder(path, recursive).await?;
        let mut files = Vec::new();
        let mut pages = 1usize;

        loop {
            let has_more = page.has_more;
            let cursor = std::mem::take(&mut page.cursor);
            files.extend(page.files());

            if !has_more {
                break;
            }

            page = self.client.list_folder_continue(&cursor).await?;
            pages += 1;
        }

        debug!(path, pages, files = files.len(), "Listing complete");
        Ok(files)
    }

    /// Return an existing shared link for `file_path`, or create a public one.
    ///
    /// Returns `Ok(None)` when no link exists and creation was rejected.
    /// The lookup always runs before the create, so repeated calls on the
    /// same path do not create additional links.
    pub async fn resolve_link(&self, file_path: &str) -> Result<Option<String>> {
        match self.client.list_shared_links(file_path).await {
            Ok(response) => {
                if let Some(link) = response.links.into_iter().next() {
                    debug!(file_path, "Using existing shared link");
                    return Ok(Some(link.url));
                }
            }
            Err(e) if e.is_api_error() => {
                debug!(file_path, error = %e, "Shared link lookup failed");
            }
            Err(e) => return Err(e),
        }

        match self
            .client
            .create_shared_link_with_settings(file_path, RequestedVisibility::Public)
            .await
        {
            Ok(link) => {
                debug!(file_path, "Created shared link");
                Ok(Some(link.url))
            }
            Err(DropboxError::SharedLinkAlreadyExists(Some(url))) => {
                debug!(file_path, "Shared link already existed");
                Ok(Some(url))
            }
            Err(e) if e.is_api_error() => {
                warn!(file_path, error = %e, "Shared link creation failed");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Resolve a link for every file under `folder_path` and its subfolders,
    /// in listing order.
    pub async fn extract_all_share_links(&self, folder_path: &str) -> Result<Vec<LinkRecord>> {
        self.extract_share_links(folder_path, true).await
    }

    /// Like [`extract_all_share_links`](Self::extract_all_share_links), with
    /// control over whether subfolders are included.
    pub async fn extract_share_links(
        &self,
        folder_path: &str,
        recursive: bool,
    ) -> Result<Vec<LinkRecord>> {
        info!(folder_path, recursive, "Retrieving file list");
        let files = self.list_files(folder_path, recursive).await?;

        if files.is_empty() {
            return Ok(Vec::new());
        }

        let total = files.len();
        let mut records = Vec::with_capacity(total);

        for (idx, file) in files.into_iter().enumerate() {
            debug!("[{}/{}] {} ({})", idx + 1, total, file.name, file.api_path());
            let shared_link = self.resolve_link(file.api_path()).await?;
            records.push(LinkRecord::new(file.name, shared_link));
        }

        info!(files = total, "Shared link extraction complete");
        Ok(records)
    }
}
