use crate::handlers::record_lookup;
use crate::startup::AppState;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use service_core::error::AppError;

pub const ITEMS_COLLECTION: &str = "items";
pub const ITEM_NOT_FOUND: &str = "Item not found";

/// Looks up an item by its integer id, stored under the decimal string key.
///
/// A missing item answers `{"error": "Item not found"}` with 200, or with
/// 404 when `strict_not_found` is configured.
pub async fn read_item(
    State(state): State<AppState>,
    Path(item_id): Path<i64>,
) -> Result<Response, AppError> {
    let key = item_id.to_string();

    match state.store.get(ITEMS_COLLECTION, &key).await? {
        Some(fields) => {
            record_lookup(ITEMS_COLLECTION, true);
            Ok(Json(fields).into_response())
        }
        None => {
            record_lookup(ITEMS_COLLECTION, false);
            tracing::debug!(item_id, "Item not found");

            if state.config.strict_not_found {
                return Err(AppError::NotFound(anyhow::anyhow!(ITEM_NOT_FOUND)));
            }
            Ok(Json(json!({ "error": ITEM_NOT_FOUND })).into_response())
        }
    }
}
