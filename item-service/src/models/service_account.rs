use secrecy::Secret;
use serde::Deserialize;
use service_core::error::AppError;
use std::path::Path;
use validator::Validate;

pub const SERVICE_ACCOUNT_TYPE: &str = "service_account";

/// Credential file read once at startup.
///
/// `project_id` names the database and `database_uri` is the connection
/// string. `client_email` and `private_key` authenticate the connection when
/// the URI carries no credentials of its own.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ServiceAccountKey {
    #[serde(rename = "type", default = "default_key_type")]
    pub key_type: String,
    #[validate(length(min = 1, message = "project_id must not be empty"))]
    pub project_id: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    pub private_key: Secret<String>,
    #[validate(email(message = "client_email must be an email address"))]
    pub client_email: String,
    pub database_uri: Secret<String>,
}

fn default_key_type() -> String {
    SERVICE_ACCOUNT_TYPE.to_string()
}

impl ServiceAccountKey {
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        tracing::info!(path = %path.display(), "Loading service account key");

        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!(
                "Failed to read service account key at {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, AppError> {
        let key: ServiceAccountKey = serde_json::from_str(raw).map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!("Malformed service account key: {}", e))
        })?;

        if key.key_type != SERVICE_ACCOUNT_TYPE {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "Unsupported credential type: {}",
                key.key_type
            )));
        }

        key.validate()?;
        Ok(key)
    }
}
