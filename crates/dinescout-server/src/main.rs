mod api;
mod middleware;

use std::sync::Arc;

use dinescout_core::StoreBackend;
use dinescout_db::{MemoryRestaurantStore, PgRestaurantStore, RestaurantStore};
use dinescout_vision::{ClarifaiClient, ImageClassifier};
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, ApiSettings, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = dinescout_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(env = %config.env, store = %config.store_backend, "starting dinescout-server");

    let store: Arc<dyn RestaurantStore> = match config.store_backend {
        StoreBackend::Postgres => {
            let pool = dinescout_db::connect_pool_from_config(&config).await?;
            let applied = dinescout_db::run_migrations(&pool).await?;
            tracing::info!(applied, "database migrations up to date");
            Arc::new(PgRestaurantStore::new(pool))
        }
        StoreBackend::Memory => {
            tracing::warn!("using in-memory restaurant store; data is not persisted");
            Arc::new(MemoryRestaurantStore::new())
        }
    };

    let classifier: Option<Arc<dyn ImageClassifier>> = match ClarifaiClient::from_app_config(&config)? {
        Some(client) => Some(Arc::new(client)),
        None => {
            tracing::warn!("CLARIFAI_PAT not set; image search will answer 503");
            None
        }
    };

    let app = build_app(AppState {
        store,
        classifier,
        settings: ApiSettings::from_app_config(&config),
    });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
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
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
