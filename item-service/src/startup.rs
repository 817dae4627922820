use crate::config::{ItemConfig, StoreBackend};
use crate::handlers;
use crate::models::ServiceAccountKey;
use crate::services::{DocumentStore, InMemoryStore, MongoStore};
use axum::{middleware::from_fn, routing::get, Router};
use service_core::error::AppError;
use service_core::middleware::{
    metrics::metrics_middleware, security_headers::security_headers_middleware,
    tracing::request_id_middleware,
};
use std::future::{Future, IntoFuture};
use std::pin::Pin;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: ItemConfig,
    pub store: Arc<dyn DocumentStore>,
}

type Server = Pin<Box<dyn Future<Output = std::io::Result<()>> + Send>>;

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    /// Opens the configured store and binds the listener.
    pub async fn build(config: ItemConfig) -> Result<Self, AppError> {
        let store = connect_store(&config).await?;
        Self::build_with_store(config, store).await
    }

    /// Binds the listener around an already constructed store.
    pub async fn build_with_store(
        config: ItemConfig,
        store: Arc<dyn DocumentStore>,
    ) -> Result<Self, AppError> {
        let state = AppState {
            config: config.clone(),
            store,
        };

        let app = build_router(state);

        let addr = format!("{}:{}", config.common.host, config.common.port);
        let listener = TcpListener::bind(&addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());

        Ok(Self {
            port,
            server: Box::pin(server.into_future()),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::read_root))
        .route("/items/:item_id", get(handlers::read_item))
        .route("/users/:user_id", get(handlers::read_user))
        .route("/shows", get(handlers::list_shows))
        .route("/shows/:title", get(handlers::read_shows_by_title))
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics))
        .layer(from_fn(security_headers_middleware))
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Constructs the store selected by `config.store.backend`.
pub async fn connect_store(config: &ItemConfig) -> Result<Arc<dyn DocumentStore>, AppError> {
    match config.store.backend {
        StoreBackend::Mongo => {
            let key = ServiceAccountKey::load(&config.credentials.key_path).await?;
            let store = MongoStore::connect(&key).await?;
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            let store = match &config.store.seed_path {
                Some(path) => InMemoryStore::from_seed_file(path).await?,
                None => InMemoryStore::new(),
            };
            tracing::warn!("Using in-memory document store; data is not persisted");
            Ok(Arc::new(store))
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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
