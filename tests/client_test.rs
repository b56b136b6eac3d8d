//! Tests for DropboxClient with mocked HTTP responses.

use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;
use dropbox_links::error::DropboxError;
use dropbox_links::models::RequestedVisibility;
use dropbox_links::{AccessToken, DropboxClient};

fn client_for(server: &ServerGuard) -> DropboxClient {
    let token = AccessToken::new("test-token").unwrap();
    DropboxClient::with_base_url(token, server.url())
}

mod list_folder {
    use super::*;

    #[tokio::test]
    async fn sends_path_recursive_and_bearer_token() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/files/list_folder")
            .match_header("authorization", "Bearer test-token")
            .match_body(Matcher::PartialJson(json!({"path": "/docs", "recursive": true})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "entries": [
                        {".tag": "file", "name": "a.txt", "path_lower": "/docs/a.txt", "size": 3}
                    ],
                    "cursor": "c1",
                    "has_more": false
                })
                .to_string(),
            )
            .create_async()
            .await;

        let page = client_for(&server).list_folder("/docs", true).await.unwrap();

        mock.assert_async().await;
        assert_eq!(page.cursor, "c1");
        assert!(!page.has_more);
        assert_eq!(page.entries.len(), 1);
    }

    #[tokio::test]
    async fn continue_sends_cursor() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/files/list_folder/continue")
            .match_body(Matcher::PartialJson(json!({"cursor": "c1"})))
            .with_status(200)
            .with_body(json!({"entries": [], "cursor": "c2", "has_more": false}).to_string())
            .create_async()
            .await;

        let page = client_for(&server).list_folder_continue("c1").await.unwrap();

        mock.assert_async().await;
        assert_eq!(page.cursor, "c2");
    }
}

mod shared_links {
    use super::*;

    #[tokio::test]
    async fn list_requests_direct_links_only() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/sharing/list_shared_links")
            .match_body(Matcher::PartialJson(json!({"path": "/a.txt", "direct_only": true})))
            .with_status(200)
            .with_body(
                json!({
                    "links": [{".tag": "file", "url": "https://dbx/a", "name": "a.txt"}],
                    "has_more": false
                })
                .to_string(),
            )
            .create_async()
            .await;

        let response = client_for(&server).list_shared_links("/a.txt").await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.links.len(), 1);
        assert_eq!(response.links[0].url, "https://dbx/a");
    }

    #[tokio::test]
    async fn create_requests_public_visibility() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/sharing/create_shared_link_with_settings")
            .match_body(Matcher::PartialJson(json!({
                "path": "/a.txt",
                "settings": {"requested_visibility": "public"}
            })))
            .with_status(200)
            .with_body(json!({".tag": "file", "url": "https://dbx/new", "name": "a.txt"}).to_string())
            .create_async()
            .await;

        let link = client_for(&server)
            .create_shared_link_with_settings("/a.txt", RequestedVisibility::Public)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(link.url, "https://dbx/new");
    }

    #[tokio::test]
    async fn create_reports_existing_link() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/sharing/create_shared_link_with_settings")
            .with_status(409)
            .with_body(
                json!({
                    "error_summary": "shared_link_already_exists/metadata/..",
                    "error": {
                        ".tag": "shared_link_already_exists",
                        "shared_link_already_exists": {
                            ".tag": "metadata",
                            "metadata": {".tag": "file", "url": "https://dbx/old"}
                        }
                    }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let err = client_for(&server)
            .create_shared_link_with_settings("/a.txt", RequestedVisibility::Public)
            .await
            .unwrap_err();

        match err {
            DropboxError::SharedLinkAlreadyExists(url) => {
                assert_eq!(url.as_deref(), Some("https://dbx/old"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}

mod error_handling {
    use super::*;

    #[tokio::test]
    async fn unauthorized_is_authentication_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/files/list_folder")
            .with_status(401)
            .with_body(
                json!({
                    "error_summary": "invalid_access_token/..",
                    "error": {".tag": "invalid_access_token"}
                })
                .to_string(),
            )
            .create_async()
            .await;

        let err = client_for(&server).list_folder("", true).await.unwrap_err();

        assert!(err.is_auth_error());
        assert!(format!("{err}").contains("invalid_access_token"));
    }

    #[tokio::test]
    async fn conflict_uses_error_summary() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/files/list_folder")
            .with_status(409)
            .with_body(
                json!({
                    "error_summary": "path/not_found/..",
                    "error": {".tag": "path", "path": {".tag": "not_found"}}
                })
                .to_string(),
            )
            .create_async()
            .await;

        let err = client_for(&server).list_folder("/missing", true).await.unwrap_err();

        match err {
            DropboxError::ApiError { status, message } => {
                assert_eq!(status, 409);
                assert_eq!(message, "path/not_found/..");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn server_error_is_not_recoverable() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/files/list_folder")
            .with_status(503)
            .with_body("Service Unavailable")
            .create_async()
            .await;

        let err = client_for(&server).list_folder("", true).await.unwrap_err();

        assert!(!err.is_api_error());
        assert!(matches!(err, DropboxError::ServiceError { status: 503, .. }));
    }

    #[tokio::test]
    async fn rate_limit_is_not_recoverable() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/sharing/create_shared_link_with_settings")
            .with_status(429)
            .with_body(json!({"error_summary": "too_many_requests/.."}).to_string())
            .create_async()
            .await;

        let err = client_for(&server)
            .create_shared_link_with_settings("/a.txt", RequestedVisibility::Public)
            .await
            .unwrap_err();

        match err {
            DropboxError::ServiceError { status, message } => {
                assert_eq!(status, 429);
                assert_eq!(message, "too_many_requests/..");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn plain_text_error_body_is_kept() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/sharing/list_shared_links")
            .with_status(400)
            .with_body("Error in call to API function: bad path")
            .create_async()
            .await;

        let err = client_for(&server).list_shared_links("oops").await.unwrap_err();

        assert!(err.is_api_error());
        assert!(format!("{err}").contains("bad path"));
    }

    #[test]
    fn test_error_display() {
        let err = DropboxError::ApiError {
            status: 409,
            message: "path/not_found/".to_string(),
        };

        let display = format!("{}", err);
        assert!(display.contains("409"));
        assert!(display.contains("path/not_found/"));
    }
}
