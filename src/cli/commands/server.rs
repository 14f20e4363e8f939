use anyhow::{anyhow, Context};
use tokio::net::TcpListener;
use tracing::info;

use crate::app::{app, AppState};
use crate::auth::JwtAuth;
use crate::config::{AppConfig, StoreBackend};
use crate::database::{self, ContactStore, DatabaseManager};

/// Open the store, serve until a shutdown signal, then close the store
pub async fn serve(config: &AppConfig) -> anyhow::Result<()> {
    config.validate().map_err(|e| anyhow!(e))?;
    info!("Starting Contact Keeper API in {:?} mode", config.environment);

    let store = database::open_store(&config.database)
        .await
        .context("failed to open contact store")?;
    let auth = JwtAuth::from_config(&config.security)?;
    let state = AppState::new(store.clone(), auth);

    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    info!("Contact Keeper API listening on http://{}", bind_addr);

    axum::serve(listener, app(state, config))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    store.close().await;
    info!("Server stopped");
    Ok(())
}

/// Apply the contacts schema without starting the server
pub async fn migrate(config: &AppConfig) -> anyhow::Result<()> {
    if config.database.backend != StoreBackend::Postgres {
        info!("Memory store selected; nothing to migrate");
        return Ok(());
    }
    let pool = DatabaseManager::connect(&config.database).await?;
    DatabaseManager::migrate(&pool).await?;
    DatabaseManager::close(&pool).await;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}
