use crate::models::DocumentFields;
use async_trait::async_trait;
use service_core::error::AppError;

/// Read access to a keyed document database.
///
/// Handlers only see this trait, so the backing database is chosen once at
/// startup and tests can substitute their own implementation.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch the document stored under `key`, without its key field.
    async fn get(&self, collection: &str, key: &str) -> Result<Option<DocumentFields>, AppError>;

    /// Every document whose top-level `field` equals the string `value`.
    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<DocumentFields>, AppError>;

    /// Every document in the collection, ordered by key.
    async fn list(&self, collection: &str) -> Result<Vec<DocumentFields>, AppError>;

    async fn health_check(&self) -> Result<(), AppError>;
}
