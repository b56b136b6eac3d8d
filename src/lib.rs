//! dropbox_links - Export shared links for every file in a Dropbox folder.
//!
//! This library provides functionality to:
//! - List all files under a Dropbox folder, following pagination
//! - Reuse an existing shared link for each file, or create a public one
//! - Write the results to a CSV file
//!
//! # Example
//!
//! ```no_run
//! use dropbox_links::{save_to_csv, AccessToken, DropboxClient, ShareLinkExtractor};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let token = AccessToken::new(std::env::var("DROPBOX_ACCESS_TOKEN")?)?;
//!     let extractor = ShareLinkExtractor::new(DropboxClient::new(token));
//!
//!     let records = extractor.extract_all_share_links("/Photos").await?;
//!     save_to_csv(&records, "links.csv")?;
//!
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod error;
pub mod export;
pub mod extractor;
pub mod logging;
pub mod models;
pub mod path;

// Re-exports for convenience
pub use auth::AccessToken;
pub use client::DropboxClient;
pub use error::{DropboxError, Result};
pub use export::{export_records, save_to_csv, write_csv, ExportReport, Summary};
pub use extractor::ShareLinkExtractor;
pub use models::{LinkRecord, RemoteFile};
pub use path::normalize_folder_path;
