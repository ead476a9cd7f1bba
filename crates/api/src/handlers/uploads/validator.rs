use crate::errors::ApiError;

/// Validates an object path or folder supplied by a client.
pub fn validate_object_path(path: &str) -> Result<(), ApiError> {
    if path.contains('\0') {
        return Err(ApiError::InvalidPath("Path contains null byte".to_string()));
    }

    if path.contains('\\') {
        return Err(ApiError::InvalidPath("Backslashes are not allowed".to_string()));
    }

    // Windows drive letters (C:, D:, etc.)
    if path.len() >= 2 && path.chars().nth(1) == Some(':') {
        return Err(ApiError::InvalidPath("Drive letters are not allowed".to_string()));
    }

    if path.split('/').any(|segment| segment == ".." || segment == ".") {
        return Err(ApiError::InvalidPath(
            "Path contains '.' or '..' segments".to_string(),
        ));
    }

    Ok(())
}

/// Bucket names are a single segment.
pub fn validate_bucket(bucket: &str) -> Result<(), ApiError> {
    if bucket.contains('/') {
        return Err(ApiError::InvalidPath("Bucket name cannot contain '/'".to_string()));
    }
    validate_object_path(bucket)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_nested_folders() {
        assert!(validate_object_path("site/logo").is_ok());
        assert!(validate_object_path("/blog/og/999.jpg").is_ok());
        assert!(validate_object_path("notes..v2.pdf").is_ok());
        assert!(validate_object_path("").is_ok());
    }

    #[test]
    fn test_rejects_traversal() {
        assert!(validate_object_path("../secrets").is_err());
        assert!(validate_object_path("site/../../x").is_err());
        assert!(validate_object_path("site/./x").is_err());
        assert!(validate_object_path("a\0b").is_err());
        assert!(validate_object_path("C:/windows").is_err());
        assert!(validate_object_path("site\\logo").is_err());
    }

    #[test]
    fn test_bucket_is_single_segment() {
        assert!(validate_bucket("uploads").is_ok());
        assert!(validate_bucket("media storage").is_ok());
        assert!(validate_bucket("uploads/other").is_err());
    }
}
