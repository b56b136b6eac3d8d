//! dropbox_links CLI - Export shared links for Dropbox files to CSV.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use dropbox_links::auth::{prompt_line, TOKEN_ENV_VAR};
use dropbox_links::client::DROPBOX_API_BASE;
use dropbox_links::export::{export_records, DEFAULT_OUTPUT_FILE};
use dropbox_links::logging::{init_logging, LogLevel};
use dropbox_links::{
    normalize_folder_path, AccessToken, DropboxClient, DropboxError, ShareLinkExtractor,
};

/// Export a shared link for every file in a Dropbox folder to CSV.
///
/// Existing shared links are reused; files without one get a new public link.
#[derive(Parser)]
#[command(name = "dropbox_links")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Dropbox access token. Prompted for with echo when not set; prefer
    /// DROPBOX_ACCESS_TOKEN, which keeps it off the screen and process list.
    #[arg(long, env = TOKEN_ENV_VAR, hide_env_values = true)]
    token: Option<String>,

    /// Folder to search; empty for the account root (prompted for when not set).
    #[arg(long, env = "DROPBOX_FOLDER_PATH")]
    path: Option<String>,

    /// Output CSV file.
    #[arg(long, short = 'o', default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// Only list files directly inside the folder.
    #[arg(long)]
    no_recursive: bool,

    /// Dropbox API base URL.
    #[arg(long, env = "DROPBOX_API_URL", default_value = DROPBOX_API_BASE, hide = true)]
    api_url: String,

    /// Log level for diagnostics on stderr.
    #[arg(long, env = "DROPBOX_LINKS_LOG", value_enum, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<DropboxError>() {
                Some(err) if err.is_auth_error() => {
                    eprintln!("Authentication error: Access token is invalid");
                }
                _ => eprintln!("Unexpected error occurred: {:#}", e),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let token = AccessToken::resolve(cli.token)?;

    let raw_path = match cli.path {
        Some(path) => path,
        None => prompt_line("Enter folder path to search (press Enter for root folder): ")?,
    };
    let folder_path = normalize_folder_path(&raw_path)
        .with_context(|| format!("Invalid folder path: {}", raw_path))?;

    let client = DropboxClient::with_base_url(token, cli.api_url);
    let extractor = ShareLinkExtractor::new(client);

    let records = extractor
        .extract_share_links(&folder_path, !cli.no_recursive)
        .await?;

    if records.is_empty() {
        println!("No files found to process.");
        return Ok(());
    }

    let report = export_records(&records, &cli.output);
    println!("{}", report.summary.report(&cli.output));

    Ok(())
}
