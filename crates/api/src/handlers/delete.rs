use super::models::AppState;
use super::uploads::{validate_bucket, validate_object_path};
use crate::errors::ApiError;
use crate::models::{DeleteRequest, MessageResponse};
use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
    Extension,
};
use media_auth::AuthUser;

pub async fn delete_file(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<DeleteRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::InvalidBody(e.body_text()))?;

    let path = request
        .path
        .filter(|p| !p.trim().is_empty())
        .ok_or(ApiError::NoPathProvided)?;
    let bucket = request
        .bucket
        .filter(|b| !b.trim().is_empty())
        .unwrap_or_else(|| state.default_bucket.to_string());

    validate_bucket(&bucket)?;
    validate_object_path(&path)?;

    tracing::info!("User {} deleting {}/{}", user.id, bucket, path);

    state
        .storage
        .remove(&bucket, &path)
        .await
        .map_err(ApiError::DeleteFailed)?;

    Ok(Json(MessageResponse {
        message: "File deleted successfully".to_string(),
    }))
}
