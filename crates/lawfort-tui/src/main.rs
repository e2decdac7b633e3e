//! Terminal client for the LawFort cyber-law assistant.

use anyhow::Context;
use clap::Parser;
use lawfort_config::{LawfortConfig, LayeredConfigOptions};
use lawfort_tui::LawfortClient;
use log::{debug, info};
use std::path::PathBuf;

/// Command-line options for the TUI client.
#[derive(Parser, Debug)]
#[command(name = "lawfort", version, about = "LawFort cyber-law assistant")]
struct Cli {
    /// Optional path to a lawfort.json5 config file applied over the layered config
    #[arg(long)]
    config: Option<PathBuf>,
    /// Backend base URL override
    #[arg(long)]
    api_base: Option<String>,
    /// Where the signed-in session is persisted
    #[arg(long)]
    session_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = env_logger::builder()
        .format_timestamp_millis()
        .parse_default_env()
        .try_init();

    let cli = Cli::parse();
    info!(
        "starting TUI (config_set={}, api_base_set={}, session_file_set={})",
        cli.config.is_some(),
        cli.api_base.is_some(),
        cli.session_file.is_some()
    );

    let cwd = std::env::current_dir().context("failed to resolve current working directory")?;
    let mut options = LayeredConfigOptions::new(&cwd);
    if let Some(path) = cli.config.as_ref() {
        info!("adding runtime config layer: {}", path.display());
        options = options.with_runtime_path(path);
    }
    if let Some(api_base) = cli.api_base {
        options.api_base_override = Some(api_base);
    }
    let layered =
        LawfortConfig::load_layered_with_options(options).context("failed to load config")?;
    debug!("layered config loaded (layers={})", layered.layers.len());
    let config = layered.config;

    let session_path = cli
        .session_file
        .unwrap_or_else(|| config.session.resolved_path());
    let client =
        LawfortClient::connect(&config, session_path).context("failed to initialize client")?;

    lawfort_tui::run(client).await
}
