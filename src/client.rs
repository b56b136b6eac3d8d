//! Dropbox API client for listing files and managing shared links.

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::trace;

use crate::auth::AccessToken;
use crate::error::{DropboxError, Result};
use crate::models::{
    ApiErrorResponse, CreateSharedLinkArg, ListFolderArg, ListFolderContinueArg,
    ListFolderResponse, ListSharedLinksArg, ListSharedLinksResponse, RequestedVisibility,
    SharedLinkMetadata, SharedLinkSettings,
};

/// Base URL for Dropbox API v2 RPC endpoints.
pub const DROPBOX_API_BASE: &str = "https://api.dropboxapi.com/2";

/// Client for the Dropbox HTTP API.
pub struct DropboxClient {
    token: AccessToken,
    base_url: String,
    http: Client,
}

impl DropboxClient {
    /// Create a client against the public Dropbox API.
    pub fn new(token: AccessToken) -> Self {
        Self::with_base_url(token, DROPBOX_API_BASE)
    }

    /// Create a client against another endpoint (a mock server, a proxy).
    pub fn with_base_url(token: AccessToken, base_url: impl Into<String>) -> Self {
        Self {
            token,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// First page of a folder listing.
    ///
    /// # Arguments
    /// * `path` - Folder path, `""` for the account root
    /// * `recursive` - Include the contents of all subfolders
    pub async fn list_folder(&self, path: &str, recursive: bool) -> Result<ListFolderResponse> {
        self.rpc("files/list_folder", &ListFolderArg { path, recursive })
            .await
    }

    /// Next page of a listing started by [`list_folder`](Self::list_folder).
    pub async fn list_folder_continue(&self, cursor: &str) -> Result<ListFolderResponse> {
        self.rpc("files/list_folder/continue", &ListFolderContinueArg { cursor })
            .await
    }

    /// Shared links that point directly at `path` (not at a parent folder).
    pub async fn list_shared_links(&self, path: &str) -> Result<ListSharedLinksResponse> {
        self.rpc(
            "sharing/list_shared_links",
            &ListSharedLinksArg {
                path,
                direct_only: true,
            },
        )
        .await
    }

    /// Create a shared link for `path`.
    ///
    /// A `shared_link_already_exists` rejection is returned as
    /// [`DropboxError::SharedLinkAlreadyExists`], carrying the existing URL
    /// when Dropbox includes it.
    pub async fn create_shared_link_with_settings(
        &self,
        path: &str,
        visibility: RequestedVisibility,
    ) -> Result<SharedLinkMetadata> {
        let arg = CreateSharedLinkArg {
            path,
            settings: SharedLinkSettings {
                requested_visibility: visibility,
            },
        };

        let response = self.post("sharing/create_shared_link_with_settings", &arg).await?;
        let status = response.status();

        if status == StatusCode::CONFLICT {
            let error_body = response.text().await.unwrap_or_default();
            if let Ok(api_error) = serde_json::from_str::<ApiErrorResponse>(&error_body) {
                if api_error.tag() == Some("shared_link_already_exists") {
                    return Err(DropboxError::SharedLinkAlreadyExists(
                        api_error.existing_link_url(),
                    ));
                }
                return Err(DropboxError::ApiError {
                    status: status.as_u16(),
                    message: api_error.error_summary,
                });
            }
            return Err(DropboxError::ApiError {
                status: status.as_u16(),
                message: error_body,
            });
        }

        let response = check_response(response).await?;
        Ok(response.json().await?)
    }

    async fn rpc<A, T>(&self, endpoint: &str, arg: &A) -> Result<T>
    where
        A: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.post(endpoint, arg).await?;
        let response = check_response(response).await?;
        Ok(response.json().await?)
    }

    async fn post<A: Serialize + ?Sized>(&self, endpoint: &str, arg: &A) -> Result<Response> {
        trace!(endpoint, "POST");
        let response = self
            .http
            .post(format!("{}/{}", self.base_url, endpoint))
            .bearer_auth(self.token.secret())
            .json(arg)
            .send()
            .await?;
        Ok(response)
    }
}

/// Map a non-success response to the matching error.
async fn check_response(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let error_body = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ApiErrorResponse>(&error_body) {
        Ok(api_error) => api_error.error_summary,
        Err(_) => error_body,
    };

    if status == StatusCode::UNAUTHORIZED {
        return Err(DropboxError::AuthenticationError(message));
    }

    if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
        return Err(DropboxError::ServiceError {
            status: status.as_u16(),
            message,
        });
    }

    Err(DropboxError::ApiError {
        status: status.as_u16(),
        message,
    })
}
