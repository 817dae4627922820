use crate::handlers::record_lookup;
use crate::startup::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;

pub const USERS_COLLECTION: &str = "users";

pub async fn read_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = state.store.get(USERS_COLLECTION, &user_id).await?;
    record_lookup(USERS_COLLECTION, user.is_some());

    let user = user.ok_or_else(|| AppError::NotFound(anyhow::anyhow!("User not found")))?;

    Ok(Json(user))
}
