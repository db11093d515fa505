/// palette-import - import an externally-managed cluster into Spectro Cloud Palette
///
/// Resolves a cluster by name (reusing a live registration or importing a new
/// one) and prints the import manifest to stdout.
mod config;
mod palette;
#[cfg(test)]
mod testing;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use std::io::Write;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{CloudType, ConnectionConfig, DEFAULT_API_ENDPOINT};
use crate::palette::{ClusterManager, PaletteClient};

#[derive(Parser)]
#[command(name = "palette-import", version)]
#[command(about = "Import a cluster into Spectro Cloud Palette and print its import manifest", long_about = None)]
struct Cli {
    /// Name of the cluster to import
    cluster_name: String,

    /// API endpoint location
    #[arg(short, long, env = "PALETTE_API_ENDPOINT", default_value = DEFAULT_API_ENDPOINT)]
    api_endpoint: String,

    /// Project UID - find in your Palette profile screen
    #[arg(short = 'u', long, env = "PALETTE_PROJECT_UID", hide_env_values = true)]
    project_uid: String,

    /// API key - find in your Palette profile screen
    #[arg(short = 'k', long, env = "PALETTE_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Cloud type of the cluster; selects the import API path
    #[arg(short = 't', long, value_enum)]
    cloud_type: CloudType,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECONDS")]
    timeout: Option<u64>,

    /// Verbosity (-v, -vv, etc)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn connection(&self) -> ConnectionConfig {
        ConnectionConfig {
            api_endpoint: self.api_endpoint.clone(),
            project_uid: self.project_uid.clone(),
            api_key: self.api_key.clone(),
            timeout: self.timeout.map(Duration::from_secs),
        }
    }

    fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries only the manifest
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("palette_import={}", cli.log_level()).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let manifest = run(&cli).await;
    let result = print_manifest(&mut std::io::stdout().lock(), manifest);

    if let Err(e) = &result {
        error!("Error: {:#}", e);
    }
    let code = exit_code(&result);
    if code != 0 {
        std::process::exit(code);
    }
}

/// Write the manifest followed by a newline; a failed run writes nothing
fn print_manifest<W: Write>(out: &mut W, manifest: Result<String>) -> Result<()> {
    let manifest = manifest?;
    writeln!(out, "{}", manifest).context("Failed to write manifest")?;
    out.flush().context("Failed to write manifest")
}

fn exit_code(result: &Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(_) => 1,
    }
}

/// Resolve the cluster and return its import manifest
async fn run(cli: &Cli) -> Result<String> {
    config::validate_cluster_name(&cli.cluster_name)?;

    let connection = cli.connection();
    connection.validate()?;

    info!("Using Palette API at {}", connection.base_url());
    let client = PaletteClient::new(&connection)?;

    let cluster_manager = ClusterManager::new(client.clone());
    let cluster_uid = cluster_manager
        .ensure_cluster(&cli.cluster_name, cli.cloud_type)
        .await?;

    info!("Getting the import manifest for cluster with UID {}", cluster_uid);
    client
        .get_import_manifest(&cluster_uid)
        .await
        .context("Failed to get import manifest")
}
