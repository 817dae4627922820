use crate::models::{DocumentFields, ServiceAccountKey};
use crate::services::store::DocumentStore;
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::{
    bson::{doc, Bson, Document},
    options::{ClientOptions, Credential, FindOptions},
    Client as MongoClient, Collection, Database,
};
use secrecy::ExposeSecret;
use serde_json::Value;
use service_core::error::AppError;

const KEY_FIELD: &str = "_id";

#[derive(Clone)]
pub struct MongoStore {
    client: MongoClient,
    db: Database,
}

impl MongoStore {
    pub async fn connect(key: &ServiceAccountKey) -> Result<Self, AppError> {
        tracing::info!(project_id = %key.project_id, "Connecting to document store");

        let mut client_options = ClientOptions::parse(key.database_uri.expose_secret())
            .await
            .map_err(|e| {
                tracing::error!("Failed to parse document store URI: {}", e);
                AppError::from(e)
            })?;
        client_options.app_name = Some("item-service".to_string());

        if client_options.credential.is_none() {
            client_options.credential = credential_for(key);
        }

        let client = MongoClient::with_options(client_options).map_err(|e| {
            tracing::error!("Failed to create document store client: {}", e);
            AppError::from(e)
        })?;
        let db = client.database(&key.project_id);
        tracing::info!(database = %key.project_id, "Document store client ready");

        Ok(Self { client, db })
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    fn collection(&self, name: &str) -> Collection<Document> {
        self.db.collection(name)
    }
}

/// Connection credential taken from the key file. A key without a private
/// key connects unauthenticated.
fn credential_for(key: &ServiceAccountKey) -> Option<Credential> {
    let private_key = key.private_key.expose_secret();
    if private_key.is_empty() {
        return None;
    }

    let mut credential = Credential::default();
    credential.username = Some(key.client_email.clone());
    credential.password = Some(private_key.clone());
    Some(credential)
}

/// Converts a stored document into its public fields. The key lives in the
/// document id, not in the fields.
fn into_fields(mut document: Document) -> DocumentFields {
    document.remove(KEY_FIELD);
    match Bson::Document(document).into_relaxed_extjson() {
        Value::Object(fields) => fields,
        _ => DocumentFields::new(),
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn get(&self, collection: &str, key: &str) -> Result<Option<DocumentFields>, AppError> {
        let document = self
            .collection(collection)
            .find_one(doc! { "_id": key }, None)
            .await
            .map_err(|e| {
                tracing::error!(collection, key, "Document lookup failed: {}", e);
                AppError::from(e)
            })?;

        Ok(document.map(into_fields))
    }

    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<DocumentFields>, AppError> {
        let mut filter = Document::new();
        filter.insert(field, value);

        let find_options = FindOptions::builder().sort(doc! { "_id": 1 }).build();
        let cursor = self
            .collection(collection)
            .find(filter, find_options)
            .await
            .map_err(AppError::from)?;

        let documents: Vec<Document> = cursor.try_collect().await.map_err(AppError::from)?;
        Ok(documents.into_iter().map(into_fields).collect())
    }

    async fn list(&self, collection: &str) -> Result<Vec<DocumentFields>, AppError> {
        let find_options = FindOptions::builder().sort(doc! { "_id": 1 }).build();
        let cursor = self
            .collection(collection)
            .find(None, find_options)
            .await
            .map_err(AppError::from)?;

        let documents: Vec<Document> = cursor.try_collect().await.map_err(AppError::from)?;
        Ok(documents.into_iter().map(into_fields).collect())
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("Document store health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }
}
