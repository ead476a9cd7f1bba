use super::form::{read_upload_form, FilePart, UploadForm};
use super::validator::{validate_bucket, validate_object_path};
use crate::errors::ApiError;
use crate::handlers::models::AppState;
use crate::models::{MultipleUploadResponse, SingleUploadResponse, UploadedFile};
use axum::{
    extract::{Multipart, State},
    response::Json,
};
use media_utils::unique_object_path;

pub async fn upload_single(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<SingleUploadResponse>, ApiError> {
    let form = read_upload_form(&mut multipart, "file", 1, &state.policy).await?;
    if form.files.is_empty() {
        return Err(ApiError::NoFileProvided);
    }
    let (bucket, folder) = target(&form, &state)?;

    let part = form.files.into_iter().next().ok_or(ApiError::NoFileProvided)?;
    let file = store(&state, &bucket, &folder, part).await?;

    Ok(Json(SingleUploadResponse { file }))
}

pub async fn upload_multiple(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<MultipleUploadResponse>, ApiError> {
    let form = read_upload_form(&mut multipart, "files", state.policy.max_files, &state.policy).await?;
    if form.files.is_empty() {
        return Err(ApiError::NoFileProvided);
    }
    let (bucket, folder) = target(&form, &state)?;

    let mut files = Vec::with_capacity(form.files.len());
    for part in form.files {
        files.push(store(&state, &bucket, &folder, part).await?);
    }

    Ok(Json(MultipleUploadResponse { files }))
}

/// Bucket and folder for the upload, defaults applied.
fn target(form: &UploadForm, state: &AppState) -> Result<(String, String), ApiError> {
    let bucket = match form.bucket.as_deref() {
        Some(bucket) if !bucket.is_empty() => bucket.to_string(),
        _ => state.default_bucket.to_string(),
    };
    let folder = form.folder.clone().unwrap_or_default();

    validate_bucket(&bucket)?;
    validate_object_path(&folder)?;

    Ok((bucket, folder))
}

async fn store(
    state: &AppState,
    bucket: &str,
    folder: &str,
    part: FilePart,
) -> Result<UploadedFile, ApiError> {
    let path = unique_object_path(folder, &part.file_name, chrono::Utc::now());
    let size = part.data.len();

    let stored = state
        .storage
        .put(bucket, &path, part.data, &part.mimetype)
        .await
        .map_err(ApiError::UploadFailed)?;

    tracing::info!(
        "Uploaded '{}' to {}/{} ({} bytes) via {}",
        part.file_name,
        stored.bucket,
        stored.path,
        size,
        stored.strategy
    );

    Ok(UploadedFile {
        path: stored.path,
        url: stored.url,
        size,
        mimetype: part.mimetype,
    })
}
