use crate::models::DocumentFields;
use crate::services::store::DocumentStore;
use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use service_core::error::AppError;
use std::collections::BTreeMap;
use std::path::Path;

/// Collection name to its documents, keyed and ordered by document key.
type Seed = BTreeMap<String, BTreeMap<String, DocumentFields>>;

/// Process-local store for tests and local development.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    collections: DashMap<String, BTreeMap<String, DocumentFields>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a JSON fixture of the form `{"collection": {"key": {fields}}}`.
    pub async fn from_seed_file(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!(
                "Failed to read store seed at {}: {}",
                path.display(),
                e
            ))
        })?;
        let seed: Seed = serde_json::from_str(&raw).map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!(
                "Malformed store seed at {}: {}",
                path.display(),
                e
            ))
        })?;

        let store = Self::new();
        for (collection, documents) in seed {
            let count = documents.len();
            store.collections.insert(collection.clone(), documents);
            tracing::info!(collection = %collection, count, "Seeded in-memory collection");
        }
        Ok(store)
    }

    pub fn insert(&self, collection: &str, key: impl Into<String>, fields: DocumentFields) {
        self.collections
            .entry(collection.to_string())
            .or_default()
            .insert(key.into(), fields);
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn get(&self, collection: &str, key: &str) -> Result<Option<DocumentFields>, AppError> {
        Ok(self
            .collections
            .get(collection)
            .and_then(|documents| documents.get(key).cloned()))
    }

    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<DocumentFields>, AppError> {
        let Some(documents) = self.collections.get(collection) else {
            return Ok(Vec::new());
        };

        Ok(documents
            .values()
            .filter(|fields| matches!(fields.get(field), Some(Value::String(s)) if s == value))
            .cloned()
            .collect())
    }

    async fn list(&self, collection: &str) -> Result<Vec<DocumentFields>, AppError> {
        Ok(self
            .collections
            .get(collection)
            .map(|documents| documents.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> DocumentFields {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {}", other),
        }
    }

    fn store() -> InMemoryStore {
        let store = InMemoryStore::new();
        store.insert("items", "42", fields(json!({ "name": "Widget" })));
        store.insert("shows", "b", fields(json!({ "title": "Dune", "type": "MOVIE" })));
        store.insert("shows", "a", fields(json!({ "title": "Dark", "type": "TV" })));
        store.insert("shows", "c", fields(json!({ "title": "Dune", "type": "TV" })));
        store
    }

    #[tokio::test]
    async fn get_returns_stored_fields() {
        let found = store().get("items", "42").await.unwrap();
        assert_eq!(found, Some(fields(json!({ "name": "Widget" }))));
    }

    #[tokio::test]
    async fn get_misses_unknown_key_and_collection() {
        let store = store();
        assert_eq!(store.get("items", "99").await.unwrap(), None);
        assert_eq!(store.get("gadgets", "42").await.unwrap(), None);
    }

    #[tokio::test]
    async fn collections_do_not_share_keys() {
        let store = store();
        store.insert("users", "42", fields(json!({ "name": "Ada" })));

        let item = store.get("items", "42").await.unwrap().unwrap();
        assert_eq!(item["name"], "Widget");
    }

    #[tokio::test]
    async fn insert_replaces_existing_document() {
        let store = store();
        store.insert("items", "42", fields(json!({ "name": "Gadget" })));

        let item = store.get("items", "42").await.unwrap().unwrap();
        assert_eq!(item, fields(json!({ "name": "Gadget" })));
    }

    #[tokio::test]
    async fn find_by_field_matches_exact_strings_in_key_order() {
        let found = store().find_by_field("shows", "title", "Dune").await.unwrap();

        let types: Vec<_> = found.iter().map(|f| f["type"].clone()).collect();
        assert_eq!(types, vec![json!("MOVIE"), json!("TV")]);
    }

    #[tokio::test]
    async fn find_by_field_ignores_non_string_values() {
        let store = store();
        store.insert("shows", "d", fields(json!({ "title": 1984 })));

        let found = store.find_by_field("shows", "title", "1984").await.unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn list_is_ordered_by_key() {
        let listed = store().list("shows").await.unwrap();

        let titles: Vec<_> = listed.iter().map(|f| f["title"].clone()).collect();
        assert_eq!(titles, vec![json!("Dark"), json!("Dune"), json!("Dune")]);
        assert!(store().list("nothing").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn bundled_fixture_seeds_all_collections() {
        let store = InMemoryStore::from_seed_file("fixtures/seed.json")
            .await
            .unwrap();

        let item = store.get("items", "42").await.unwrap().unwrap();
        assert_eq!(item, fields(json!({ "name": "Widget" })));
        assert!(store.get("users", "u-1").await.unwrap().is_some());

        let dune = store.find_by_field("shows", "title", "Dune").await.unwrap();
        assert_eq!(dune.len(), 1);
        assert_eq!(dune[0]["id"], "s-1");
    }

    #[tokio::test]
    async fn missing_seed_file_is_a_config_error() {
        let result = InMemoryStore::from_seed_file("fixtures/missing.json").await;
        assert!(matches!(result, Err(AppError::ConfigError(_))));
    }

    #[tokio::test]
    async fn seed_with_non_object_document_is_rejected() {
        let path = format!("target/test-bad-seed-{}.json", std::process::id());
        tokio::fs::create_dir_all("target").await.unwrap();
        tokio::fs::write(&path, json!({ "items": { "42": "Widget" } }).to_string())
            .await
            .unwrap();

        let result = InMemoryStore::from_seed_file(&path).await;
        let _ = tokio::fs::remove_file(&path).await;

        assert!(matches!(result, Err(AppError::ConfigError(_))));
    }
}
