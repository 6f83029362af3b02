mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use storelens_client::{ClientSettings, InsightsClient};
use storelens_core::AppConfig;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "storelens")]
#[command(about = "Store insights command line interface")]
struct Cli {
    /// Override the analysis service base URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Analyze a storefront and print its insights as JSON
    AnalyzeStore {
        /// Storefront URL, e.g. https://shop.example.com
        url: String,
        /// Write the JSON to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Find and compare competitors of a store
    AnalyzeCompetitors {
        /// Target store URL
        url: String,
        /// Write the JSON to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Request a data export
    Export {
        /// Export format understood by the service (json, csv, xlsx, pdf)
        format: String,
        /// Comma-separated data types to include (defaults to all)
        #[arg(long, value_delimiter = ',')]
        data_types: Vec<String>,
        /// Download the exported file into this directory
        #[arg(long)]
        download: Option<PathBuf>,
    },
    /// Download a file by its server path
    Download {
        /// Server-relative path or absolute URL
        path: String,
        /// Destination file
        #[arg(long, short)]
        output: PathBuf,
    },
    /// Check that the analysis service is up
    Health,
}

/// Builds client settings from config, letting `--base-url` win.
fn client_settings(config: &AppConfig, base_url_override: Option<String>) -> ClientSettings {
    let mut settings = ClientSettings::from_app_config(config);
    if let Some(base_url) = base_url_override {
        settings.base_url = base_url;
    }
    settings
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = storelens_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let settings = client_settings(&config, cli.base_url);
    tracing::debug!(?settings, "starting storelens");
    let client = InsightsClient::new(&settings)?;

    match cli.command {
        Commands::AnalyzeStore { url, output } => {
            commands::run_analyze_store(&client, &url, output.as_deref()).await?;
        }
        Commands::AnalyzeCompetitors { url, output } => {
            commands::run_analyze_competitors(&client, &url, output.as_deref()).await?;
        }
        Commands::Export {
            format,
            data_types,
            download,
        } => {
            commands::run_export(&client, &format, &data_types, download.as_deref()).await?;
        }
        Commands::Download { path, output } => {
            commands::run_download(&client, &path, &output).await?;
        }
        Commands::Health => commands::run_health(&client).await?,
    }

    Ok(())
}
