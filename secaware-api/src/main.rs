//! # SecAware API Server
//!
//! Serves security-awareness training modules, scores their assessments,
//! and tracks per-user progress and feedback.
//!
//! ## Usage
//!
//! ```bash
//! # In-memory storage
//! cargo run -p secaware-api
//!
//! # PostgreSQL storage
//! DATABASE_URL=postgresql://localhost/secaware cargo run -p secaware-api
//! ```

use secaware_api::{
    app::{build_router, AppState},
    config::{Config, StorageBackend},
};
use secaware_shared::{
    catalog::Catalog,
    db::{
        migrations::run_migrations,
        pool::{close_pool, create_pool},
    },
    store::{MemoryStore, PgStore, Store},
};
use sqlx::PgPool;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "secaware_api=debug,secaware_shared=info,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "SecAware API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;
    let catalog = Catalog::builtin()?;
    let (store, pool) = open_store(&config).await?;

    let bind_address = config.bind_address();
    let app = build_router(AppState::new(store, catalog, config));

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(pool) = pool {
        close_pool(pool).await;
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Builds the configured store; returns the pool too so it can be closed
async fn open_store(config: &Config) -> anyhow::Result<(Arc<dyn Store>, Option<PgPool>)> {
    match (config.storage.backend, &config.storage.database) {
        (StorageBackend::Postgres, Some(database)) => {
            let pool = create_pool(database.pool_config()).await?;
            if config.storage.run_migrations {
                run_migrations(&pool).await?;
            }
            let store: Arc<dyn Store> = Arc::new(PgStore::new(pool.clone()));
            Ok((store, Some(pool)))
        }
        (StorageBackend::Postgres, None) => {
            anyhow::bail!("postgres backend selected without database configuration")
        }
        (StorageBackend::Memory, _) => {
            tracing::warn!("Using in-memory storage; users, progress and feedback are lost on restart");
            let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
            Ok((store, None))
        }
    }
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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

    tracing::info!("Shutdown signal received");
}
