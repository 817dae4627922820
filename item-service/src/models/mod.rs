pub mod service_account;

pub use service_account::ServiceAccountKey;

/// A schema-less document as stored: field name to JSON value.
pub type DocumentFields = serde_json::Map<String, serde_json::Value>;
