mod config;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};

use rconbridge_commands::HelpTable;
use rconbridge_config::BridgeConfig;
use rconbridge_core::{SessionConfig, SessionHandle};
use rconbridge_gateway::AppState;
use rconbridge_rcon::RconClient;

use config::Overrides;

#[derive(Parser)]
#[command(name = "rconbridge")]
#[command(about = "rconbridge: structured HTTP API over a game server console")]
#[command(version)]
struct Cli {
    /// Config file (default: $RCONBRIDGE_CONFIG_DIR or ~/.rconbridge/rconbridge.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect to the console and serve the HTTP API
    Serve {
        /// Address the HTTP API binds to, as host:port
        #[arg(short, long)]
        bind: Option<String>,
        #[arg(long)]
        rcon_host: Option<String>,
        #[arg(long)]
        rcon_port: Option<u16>,
        #[arg(long)]
        rcon_password: Option<String>,
        /// TSV file of command descriptions
        #[arg(long)]
        help_table: Option<PathBuf>,
    },
    /// Run one console command and print the raw reply
    Exec {
        #[arg(required = true, trailing_var_arg = true)]
        command: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let path = cli
        .config
        .unwrap_or_else(|| rconbridge_config::config_file_path(&rconbridge_config::config_dir()));

    match cli.command {
        Commands::Serve {
            bind,
            rcon_host,
            rcon_port,
            rcon_password,
            help_table,
        } => {
            let overrides = Overrides {
                bind,
                rcon_host,
                rcon_port,
                rcon_password,
                help_table,
            };
            let config = load_config(&path, overrides).await?;
            serve(config).await?;
        }
        Commands::Exec { command } => {
            let config = load_config(&path, Overrides::default()).await?;
            let mut client = connect(&config).await?;
            let reply = client.exec(&command.join(" ")).await?;
            println!("{reply}");
        }
    }

    Ok(())
}

/// Read the file, apply flag overrides, then validate the result.
async fn load_config(path: &Path, overrides: Overrides) -> Result<BridgeConfig> {
    let raw = rconbridge_config::load_raw_config(path).await?;
    let file_config = rconbridge_config::resolve(raw, &std::env::vars().collect())?;
    let config = overrides.apply(file_config);

    rconbridge_logging::init_logger(config.log_dir().as_deref(), config.log_level());
    rconbridge_config::check(&config)?;
    let effective = serde_json::to_string(&rconbridge_config::redact(&config))?;
    info!(path = %path.display(), config = %effective, "Configuration loaded");
    Ok(config)
}

async fn connect(config: &BridgeConfig) -> Result<RconClient> {
    let mut client = RconClient::connect(config.rcon_host(), config.rcon_port()).await?;
    client
        .authenticate(config.rcon_password())
        .await
        .context("RCON login failed")?;
    Ok(client)
}

async fn serve(config: BridgeConfig) -> Result<()> {
    info!(
        rcon = %format!("{}:{}", config.rcon_host(), config.rcon_port()),
        bind = %config.bind(),
        "Starting rconbridge"
    );

    let client = connect(&config).await?;
    let session = SessionHandle::spawn(
        client,
        SessionConfig {
            request_timeout: config.request_timeout(),
            queue_depth: config.queue_depth(),
        },
    );

    let help = HelpTable::load(&config.help_table_path()).await?;
    info!(entries = help.len(), "Help table loaded");

    let state = Arc::new(AppState::new(session, help));
    rconbridge_gateway::start_server(config.bind(), state, shutdown_signal()).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
