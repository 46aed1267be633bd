//! Kiosk Ledger - Backend Server
//!
//! Cost, inventory, fee and break-even bookkeeping for a dessert kiosk.

use std::{net::SocketAddr, sync::Arc};

use kiosk_ledger_backend::{create_app, init_tracing, store, AppState, Config, LedgerService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    init_tracing(&config);

    tracing::info!("Starting Kiosk Ledger Server");
    tracing::info!("Environment: {}", config.environment);

    // Migrations only run automatically in development
    let store = store::select_store(&config.storage, config.is_development()).await?;

    let ledger = LedgerService::load(store, config.policy.clone()).await;

    let state = AppState {
        ledger,
        config: Arc::new(config.clone()),
    };

    let app = create_app(state);

    let host: std::net::IpAddr = config.server.host.parse()?;
    let addr = SocketAddr::from((host, config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
