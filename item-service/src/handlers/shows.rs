use crate::handlers::record_lookup;
use crate::startup::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;

pub const SHOWS_COLLECTION: &str = "shows";

pub async fn list_shows(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let shows = state.store.list(SHOWS_COLLECTION).await.map_err(|e| {
        tracing::error!("Error getting shows: {}", e);
        e
    })?;
    record_lookup(SHOWS_COLLECTION, !shows.is_empty());

    Ok(Json(shows))
}

/// Every show whose `title` matches exactly; an empty match is a 404.
pub async fn read_shows_by_title(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let shows = state
        .store
        .find_by_field(SHOWS_COLLECTION, "title", &title)
        .await?;
    record_lookup(SHOWS_COLLECTION, !shows.is_empty());

    if shows.is_empty() {
        return Err(AppError::NotFound(anyhow::anyhow!("Show not found")));
    }

    Ok(Json(shows))
}
