use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use prometheus::{Encoder, TextEncoder};
use tokio::fs;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use devdock_cli::config::CliConfig;
use devdock_cli::demo;

/// DevDock - in-process developer-tools panel host
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Enable debug mode
    #[arg(short, long)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Drive one panel through its full lifecycle
    Lifecycle {
        /// Inspected target URL
        #[arg(long)]
        target: Option<String>,
    },
    /// Run the ping/pong/bye handshake against a panel document
    Handshake {
        /// Inspected target URL
        #[arg(long)]
        target: Option<String>,
    },
    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    init_logging(&cli.log_level, cli.debug)?;

    info!(
        "Starting devdock v{} (build {}, commit {})",
        env!("CARGO_PKG_VERSION"),
        env!("BUILD_DATE"),
        env!("GIT_HASH")
    );

    // Load configuration
    let config = load_config(cli.config.as_ref()).await?;

    // Execute command
    let result = match cli.command {
        Commands::Lifecycle { target } => cmd_lifecycle(target, &config, cli.debug).await,
        Commands::Handshake { target } => cmd_handshake(target, &config, cli.debug).await,
        Commands::Config => cmd_config(&config),
    };

    match result {
        Ok(()) => {
            info!("Command completed successfully");
            Ok(())
        }
        Err(err) => {
            error!("Command failed: {:#}", err);
            Err(err)
        }
    }
}

fn init_logging(level: &str, debug: bool) -> Result<()> {
    let level = if debug {
        tracing::Level::DEBUG
    } else {
        level.parse().context("Invalid log level")?
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level.to_string())),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    Ok(())
}

async fn load_config(config_path: Option<&PathBuf>) -> Result<CliConfig> {
    let config_path = match config_path {
        Some(path) => path.clone(),
        None => {
            let mut path = dirs::config_dir().context("Failed to get config directory")?;
            path.push("devdock");
            path.push("config.yaml");
            path
        }
    };

    if config_path.exists() {
        let content = fs::read_to_string(&config_path)
            .await
            .context("Failed to read config file")?;

        let config: CliConfig =
            serde_yaml::from_str(&content).context("Failed to parse config file")?;

        info!("Loaded configuration from: {}", config_path.display());
        Ok(config)
    } else {
        warn!(
            "Config file not found, using defaults: {}",
            config_path.display()
        );
        Ok(CliConfig::default())
    }
}

async fn cmd_lifecycle(target: Option<String>, config: &CliConfig, debug: bool) -> Result<()> {
    let mut host = config.host.clone();
    if let Some(target) = target {
        host.target_url = target;
    }

    let report = demo::run_lifecycle(&host).await?;
    println!("panel {}", report.panel_id);
    let states: Vec<String> = report.states.iter().map(|s| s.to_string()).collect();
    println!("states: {}", states.join(", "));
    println!("chrome nodes rendered: {}", report.chrome_nodes);

    if debug {
        dump_metrics()?;
    }
    Ok(())
}

async fn cmd_handshake(target: Option<String>, config: &CliConfig, debug: bool) -> Result<()> {
    let mut host = config.host.clone();
    if let Some(target) = target {
        host.target_url = target;
    }

    let report = demo::run_handshake(&host).await?;
    println!("panel doc sent: {}", report.messages.join(", "));

    if debug {
        dump_metrics()?;
    }
    Ok(())
}

fn cmd_config(config: &CliConfig) -> Result<()> {
    let rendered = serde_yaml::to_string(config).context("Failed to render configuration")?;
    print!("{}", rendered);
    Ok(())
}

fn dump_metrics() -> Result<()> {
    let registry = prometheus::Registry::new();
    devdock_toolbox::metrics::register_metrics(&registry);

    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder
        .encode(&registry.gather(), &mut buffer)
        .context("Failed to encode metrics")?;
    print!("{}", String::from_utf8(buffer).context("Metrics were not utf8")?);
    Ok(())
}
