mod admin;
mod config;
mod identity;
mod tui;

use anyhow::{anyhow, bail};
use chrono::Local;
use clap::{Parser, Subcommand};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use admin::export::EXPORT_SUCCESS_MESSAGE;
use admin::{build_export, classify, fetch_contacts, write_export, AdminGate, HttpConnector, StoreConnector};
use config::ConfigStore;
use identity::{DeviceFlowProvider, IdentityProvider, SessionFile};

#[derive(Parser)]
#[command(name = "habitpro-admin")]
#[command(about = "Admin console for Habit Tracker Pro")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the Terminal User Interface (default)
    Tui,
    /// Export customer contacts to CSV using the saved identity session
    Export {
        /// Admin password
        #[arg(long)]
        password: String,
        /// Output directory; defaults to the configured export directory
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

/// Log to a file so the terminal UI is not disturbed
fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "habitpro_admin=debug,habitpro_types=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let store = ConfigStore::new().map_err(|e| anyhow!("Failed to open config directory: {}", e))?;
    let config = store
        .ensure_config()
        .map_err(|e| anyhow!("Failed to load {}: {}", store.config_dir().display(), e))?;
    init_logging(&store.log_path())?;
    info!("Starting habitpro-admin v{}", env!("CARGO_PKG_VERSION"));

    let provider: Arc<dyn IdentityProvider> = Arc::new(DeviceFlowProvider::new(
        &config.identity,
        SessionFile::new(store.session_path()),
    )?);
    let connector: Arc<dyn StoreConnector> =
        Arc::new(HttpConnector::new(&config.store.url, config.store.timeout()));
    let export_dir = config.export_dir.clone().unwrap_or_else(|| PathBuf::from("."));

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => tui::run_tui(tui::App::new(provider, connector, export_dir)).await,
        Commands::Export { password, out } => {
            let dir = out.unwrap_or(export_dir);
            export_once(provider.as_ref(), connector.as_ref(), &password, &dir).await
        }
    }
}

/// Non-interactive export through the same gate as the TUI
async fn export_once(
    provider: &dyn IdentityProvider,
    connector: &dyn StoreConnector,
    password: &str,
    dir: &Path,
) -> anyhow::Result<()> {
    let mut gate = AdminGate::new(provider.identity().is_some());
    gate.submit_password(password)?;

    let Some(identity) = provider.identity() else {
        bail!("No saved identity. Run `habitpro-admin tui` and login first");
    };
    if !gate.take_fetch() {
        bail!("Admin gate did not open");
    }

    let contacts = connector.connect(&identity)?;
    let records = fetch_contacts(contacts)
        .await
        .map_err(|e| anyhow!(classify(&e).message()))?;

    let export = build_export(Some(records.as_slice()), &Local, Local::now().date_naive())?;
    let path = write_export(&export, dir)?;
    println!("{} {}", EXPORT_SUCCESS_MESSAGE, path.display());
    Ok(())
}
