#![allow(dead_code)]

use async_trait::async_trait;
use item_service::config::{CredentialsConfig, ItemConfig, StoreBackend, StoreConfig};
use item_service::models::DocumentFields;
use item_service::services::{DocumentStore, InMemoryStore};
use item_service::startup::Application;
use serde_json::{json, Value};
use service_core::config::Config as CoreConfig;
use service_core::error::AppError;
use std::sync::Arc;

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub client: reqwest::Client,
}

pub fn fields(value: Value) -> DocumentFields {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {}", other),
    }
}

pub fn test_config(strict_not_found: bool) -> ItemConfig {
    ItemConfig {
        common: CoreConfig {
            host: "127.0.0.1".to_string(),
            port: 0, // Random port for testing
            log_level: "info".to_string(),
        },
        credentials: CredentialsConfig {
            key_path: "./serviceAccountKey.json".to_string(),
        },
        store: StoreConfig {
            backend: StoreBackend::Memory,
            seed_path: None,
        },
        strict_not_found,
        otlp_endpoint: None,
    }
}

/// Store contents shared by the HTTP tests.
pub fn seeded_store() -> InMemoryStore {
    let store = InMemoryStore::new();
    store.insert("items", "42", fields(json!({ "name": "Widget" })));
    store.insert(
        "items",
        "7",
        fields(json!({ "name": "Gizmo", "price": 9.5, "tags": ["blue", "small"] })),
    );
    store.insert("items", "-3", fields(json!({ "name": "Negative" })));
    store.insert(
        "users",
        "u-1",
        fields(json!({ "id": "u-1", "name": "Ada", "watched": [], "watchlist": ["s-1"] })),
    );
    store.insert(
        "shows",
        "s-2",
        fields(json!({ "id": "s-2", "type": "TV", "title": "Dark" })),
    );
    store.insert(
        "shows",
        "s-1",
        fields(json!({ "id": "s-1", "type": "MOVIE", "title": "Dune" })),
    );
    store
}

/// A store whose backend is unreachable.
pub struct UnreachableStore;

#[async_trait]
impl DocumentStore for UnreachableStore {
    async fn get(&self, _collection: &str, _key: &str) -> Result<Option<DocumentFields>, AppError> {
        Err(AppError::DatabaseError(anyhow::anyhow!("connection refused")))
    }

    async fn find_by_field(
        &self,
        _collection: &str,
        _field: &str,
        _value: &str,
    ) -> Result<Vec<DocumentFields>, AppError> {
        Err(AppError::DatabaseError(anyhow::anyhow!("connection refused")))
    }

    async fn list(&self, _collection: &str) -> Result<Vec<DocumentFields>, AppError> {
        Err(AppError::DatabaseError(anyhow::anyhow!("connection refused")))
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Err(AppError::ServiceUnavailable)
    }
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(Arc::new(seeded_store()), false).await
    }

    pub async fn spawn_strict() -> Self {
        Self::spawn_with(Arc::new(seeded_store()), true).await
    }

    pub async fn spawn_with(store: Arc<dyn DocumentStore>, strict_not_found: bool) -> Self {
        let app = Application::build_with_store(test_config(strict_not_found), store)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        TestApp {
            address,
            port,
            client: reqwest::Client::new(),
        }
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request")
    }
}
