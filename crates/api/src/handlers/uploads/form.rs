use super::super::models::UploadPolicy;
use crate::errors::ApiError;
use axum::extract::multipart::{Field, Multipart, MultipartError};
use axum::http::StatusCode;
use bytes::{Bytes, BytesMut};

/// A file part that passed the upload policy.
#[derive(Debug)]
pub struct FilePart {
    pub file_name: String,
    pub mimetype: String,
    pub data: Bytes,
}

#[derive(Debug, Default)]
pub struct UploadForm {
    pub files: Vec<FilePart>,
    pub bucket: Option<String>,
    pub folder: Option<String>,
}

/// Reads the whole multipart body. File parts come from `file_field`,
/// `bucket` and `folder` are text fields; anything else is skipped.
pub async fn read_upload_form(
    multipart: &mut Multipart,
    file_field: &str,
    max_files: usize,
    policy: &UploadPolicy,
) -> Result<UploadForm, ApiError> {
    let mut form = UploadForm::default();
    let mut seen_field = false;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            // An empty body carries no parts at all; treat it as a form without a file
            Err(e) if !seen_field && e.status() != StatusCode::PAYLOAD_TOO_LARGE => {
                tracing::debug!("Multipart body has no parts: {}", e.body_text());
                break;
            }
            Err(e) => return Err(multipart_error(e, policy)),
        };
        seen_field = true;

        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "bucket" => form.bucket = Some(read_text(field, policy).await?),
            "folder" => form.folder = Some(read_text(field, policy).await?),
            _ if name == file_field => {
                if form.files.len() >= max_files {
                    return Err(ApiError::TooManyFiles { max: max_files });
                }
                form.files.push(read_file(field, policy).await?);
            }
            _ => tracing::debug!("Skipping unexpected multipart field '{}'", name),
        }
    }

    Ok(form)
}

async fn read_text(field: Field<'_>, policy: &UploadPolicy) -> Result<String, ApiError> {
    let value = field.text().await.map_err(|e| multipart_error(e, policy))?;
    Ok(value.trim().to_string())
}

async fn read_file(mut field: Field<'_>, policy: &UploadPolicy) -> Result<FilePart, ApiError> {
    let file_name = field.file_name().unwrap_or_default().to_string();
    let mimetype = match field.content_type() {
        Some(declared) if !declared.is_empty() => declared.to_string(),
        _ => mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .to_string(),
    };

    if !policy.allows(&mimetype) {
        tracing::warn!("Rejected upload '{}' with type {}", file_name, mimetype);
        return Err(ApiError::InvalidFileType(mimetype));
    }

    let mut data = BytesMut::new();
    while let Some(chunk) = field.chunk().await.map_err(|e| multipart_error(e, policy))? {
        if (data.len() + chunk.len()) as u64 > policy.max_file_size_bytes {
            return Err(ApiError::FileTooLarge {
                max_mb: policy.max_file_size_mb(),
            });
        }
        data.extend_from_slice(&chunk);
    }

    Ok(FilePart {
        file_name,
        mimetype,
        data: data.freeze(),
    })
}

fn multipart_error(error: MultipartError, policy: &UploadPolicy) -> ApiError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::FileTooLarge {
            max_mb: policy.max_file_size_mb(),
        }
    } else {
        ApiError::InvalidMultipart(error.body_text())
    }
}
