use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::http::HeaderValue;
use common::storage::ObjectStore;
use common::storage::cloudinary::CloudinaryObjectStore;
use common::storage::filesystem::FilesystemObjectStore;
use common::{StorageAppConfig, StorageBackend};
use intelligence::DocumentIntelligence;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use server::config::{AppConfig, CorsConfig};
use server::database::init_db;
use server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let db = init_db(&config.database)
        .await
        .context("Failed to connect to database")?;
    info!("Database connected and schema synced");

    let objects = build_object_store(&config.storage)
        .await
        .context("Failed to initialise object storage")?;
    info!(backend = objects.backend_name(), folder = objects.folder(), "Object storage ready");

    let intelligence = DocumentIntelligence::from_config(&config.llm)
        .context("Failed to initialise document intelligence")?;
    if config.llm.api_key.is_none() {
        tracing::warn!("No LLM API key configured; summarize and QA endpoints will fail");
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let cors = cors_layer(&config.server.cors)?;

    let state = AppState {
        db,
        config,
        objects,
        intelligence: Arc::new(intelligence),
    };

    let app = server::build_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server running at http://{}", addr);
    info!("Swagger UI at http://{}/swagger-ui", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn build_object_store(config: &StorageAppConfig) -> anyhow::Result<Arc<dyn ObjectStore>> {
    let store: Arc<dyn ObjectStore> = match config.backend {
        StorageBackend::Cloudinary => Arc::new(CloudinaryObjectStore::from_config(
            &config.cloudinary,
            config.folder.clone(),
            config.max_object_size,
        )?),
        StorageBackend::Filesystem => Arc::new(
            FilesystemObjectStore::new(
                config.filesystem.base_path.clone(),
                config.folder.clone(),
                config.max_object_size,
            )
            .await?,
        ),
    };
    Ok(store)
}

fn cors_layer(config: &CorsConfig) -> anyhow::Result<CorsLayer> {
    let origins = if config.allow_origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        let parsed = config
            .allow_origins
            .iter()
            .map(|o| HeaderValue::from_str(o).with_context(|| format!("Invalid CORS origin {o}")))
            .collect::<anyhow::Result<Vec<_>>>()?;
        AllowOrigin::list(parsed)
    };

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(config.max_age)))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {e}");
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
