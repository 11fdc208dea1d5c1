use habitpro::{config::AppConfig, web};
use habitpro_types::{ContactStore, HttpContactStore};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Pick up a local .env before anything reads the environment
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "habitpro=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Habit Tracker Pro site v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::init()?;
    info!("Configuration loaded");

    // Keep serving the page without a store; checkouts report the backend as unreachable
    let store: Option<Arc<dyn ContactStore>> =
        match HttpContactStore::new(&config.store.url, config.store.timeout()) {
            Ok(client) => {
                info!("Contact store: {}", config.store.url);
                Some(Arc::new(client))
            }
            Err(e) => {
                error!("Failed to create contact store client: {}", e);
                None
            }
        };
    info!(
        "Payments go to {} ({})",
        config.payment.upi_id,
        config.payment.display_amount()
    );

    let state = web::AppState::new(store, config.payment.clone());
    let app = web::create_router(state, &config.web.static_dir);

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Web server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Web server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
