//! oomnitzactl: query an Oomnitza tenant's asset inventory.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::{filter::ParseError, EnvFilter};

use oomnitzactl::api::{ApiClient, ApiResponse, ListParams, DEFAULT_PAGE_LIMIT};
use oomnitzactl::credentials;

#[derive(Parser)]
#[command(name = "oomnitzactl")]
#[command(about = "Query assets within an Oomnitza organization")]
struct Cli {
    /// Organization name, as in `{org}.oomnitza.com`.
    #[arg(long, env = "OOMNITZA_ORG")]
    org: String,

    /// API key. If omitted, the key stored in the system keyring is used.
    #[arg(long, env = "OOMNITZA_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Override the API root (e.g. `http://localhost:8080/api/v3`).
    #[arg(long, env = "OOMNITZA_BASE_URL")]
    base_url: Option<String>,

    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List a single page of assets.
    ListAssets {
        /// Comma-separated fields to include.
        #[arg(long, default_value = "")]
        fields: String,

        /// Starting index.
        #[arg(long, default_value_t = 0)]
        skip: u64,

        /// Amount of assets per page.
        #[arg(long, default_value_t = DEFAULT_PAGE_LIMIT)]
        limit: u64,

        /// Field to sort by.
        #[arg(long, default_value = "")]
        sort_by: String,
    },

    /// Retrieve a single asset.
    GetAsset {
        /// Asset ID (`equipment_id`).
        id: String,
    },

    /// Remove the API key stored for this organization.
    ForgetKey,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout only ever holds JSON.
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let (filter, invalid_rust_log) = log_filter(cli.verbose, rust_log.as_deref());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    if let Some(err) = invalid_rust_log {
        warn!("ignoring invalid {}: {err}", EnvFilter::DEFAULT_ENV);
    }

    let Cli {
        org,
        api_key,
        base_url,
        command,
        ..
    } = cli;

    match command {
        Commands::ListAssets {
            fields,
            skip,
            limit,
            sort_by,
        } => {
            let client = create_client(&org, api_key, base_url)?;
            let params = ListParams {
                fields,
                skip,
                limit,
                sort_by,
            };
            let response = client
                .list_assets(&params)
                .await
                .context("Failed to list assets")?;
            print_response(&response)
        }
        Commands::GetAsset { id } => {
            let client = create_client(&org, api_key, base_url)?;
            let response = client
                .get_asset(&id)
                .await
                .with_context(|| format!("Failed to retrieve asset {id}"))?;
            print_response(&response)
        }
        Commands::ForgetKey => {
            credentials::forget_api_key(&org).context("Failed to remove stored API key")?;
            info!(org = %org, "removed stored API key");
            Ok(())
        }
    }
}

/// `RUST_LOG` takes precedence over `--verbose` when it parses.
/// If it doesn't, the parse error is handed back so it can be reported.
fn log_filter(verbose: bool, rust_log: Option<&str>) -> (EnvFilter, Option<ParseError>) {
    let fallback = || EnvFilter::new(if verbose { "debug" } else { "info" });
    match rust_log.map(EnvFilter::try_new) {
        Some(Ok(filter)) => (filter, None),
        Some(Err(err)) => (fallback(), Some(err)),
        None => (fallback(), None),
    }
}

fn create_client(
    org: &str,
    api_key: Option<String>,
    base_url: Option<String>,
) -> Result<ApiClient> {
    let api_key =
        credentials::resolve_api_key(org, api_key).context("Failed to obtain an API key")?;
    match base_url {
        Some(base_url) => ApiClient::with_base_url(base_url, api_key),
        None => ApiClient::new(org, api_key),
    }
    .context("Failed to create API client")
}

fn print_response(response: &ApiResponse) -> Result<()> {
    info!(status = %response.status, url = %response.url, "request complete");
    let body =
        serde_json::to_string_pretty(&response.body).context("Failed to format response body")?;
    println!("{body}");
    Ok(())
}
