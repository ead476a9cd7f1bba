use crate::handlers::{delete_file, health, upload_multiple, upload_single, AppState};
use crate::middleware::require_auth;
use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{delete, get, post},
    Router,
};

/// Upload routes are open; deleting requires a verified bearer token.
pub fn routes(state: AppState) -> Router {
    let protected = Router::new()
        .route("/uploads", delete(delete_file))
        .route_layer(from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/uploads/single", post(upload_single))
        .route("/uploads/multiple", post(upload_multiple))
        .route("/health", get(health))
        .merge(protected)
        // Size limits come from the upload policy and the server-wide body limit
        .layer(DefaultBodyLimit::disable())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header::AUTHORIZATION, header::CONTENT_TYPE, Request, StatusCode},
        response::Response,
    };
    use http_body_util::BodyExt;
    use media_auth::StaticTokenVerifier;
    use media_config::UploadSettings;
    use media_storage::{
        BucketAliases, Operation, StorageAdapter, StorageError, StorageRequest, StorageStrategy,
    };
    use serde_json::Value;
    use std::sync::{Arc, Mutex};
    use tower::ServiceExt;

    const BOUNDARY: &str = "media-test-boundary";
    const TOKEN: &str = "secret-token";

    #[derive(Debug, Clone)]
    struct Recorded {
        operation: Operation,
        bucket: String,
        path: String,
        size: usize,
    }

    struct RecordingStrategy {
        fail: bool,
        calls: Mutex<Vec<Recorded>>,
    }

    #[async_trait::async_trait]
    impl StorageStrategy for RecordingStrategy {
        fn name(&self) -> &'static str {
            "recording"
        }

        fn supports(&self, _operation: Operation) -> bool {
            true
        }

        async fn attempt(&self, request: &StorageRequest) -> Result<(), StorageError> {
            let size = match request {
                StorageRequest::Put(write) => write.body.len(),
                StorageRequest::Remove(_) => 0,
            };
            self.calls.lock().unwrap().push(Recorded {
                operation: request.operation(),
                bucket: request.bucket().to_string(),
                path: request.path().to_string(),
                size,
            });

            if self.fail {
                Err(StorageError::UnexpectedStatus {
                    strategy: "recording",
                    status: 503,
                    body: "backend unavailable".to_string(),
                })
            } else {
                Ok(())
            }
        }
    }

    struct Harness {
        app: Router,
        strategy: Arc<RecordingStrategy>,
    }

    impl Harness {
        fn new(fail: bool) -> Self {
            let strategy = Arc::new(RecordingStrategy {
                fail,
                calls: Mutex::new(Vec::new()),
            });
            let recording: Arc<dyn StorageStrategy> = strategy.clone();
            let chain = vec![recording];
            let aliases = BucketAliases::new(
                [("uploads".to_string(), "site-media".to_string())]
                    .into_iter()
                    .collect(),
            );
            let adapter = StorageAdapter::new(chain, aliases, "https://proj.example.co/");

            let uploads = UploadSettings {
                max_file_size_mb: 1,
                max_files: 2,
                allowed_types: vec!["image/png".to_string(), "application/pdf".to_string()],
            };

            let state = AppState::new(
                Arc::new(adapter),
                Arc::new(StaticTokenVerifier::new(vec![TOKEN.to_string()])),
                &uploads,
                "uploads".to_string(),
            );

            Self {
                app: routes(state),
                strategy,
            }
        }

        fn calls(&self) -> Vec<Recorded> {
            self.strategy.calls.lock().unwrap().clone()
        }

        async fn send(&self, request: Request<Body>) -> Response {
            self.app.clone().oneshot(request).await.unwrap()
        }
    }

    enum Part<'a> {
        Text(&'a str, &'a str),
        File(&'a str, &'a str, &'a str, Vec<u8>),
    }

    fn multipart_request(uri: &str, parts: Vec<Part<'_>>) -> Request<Body> {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
            match part {
                Part::Text(name, value) => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n", name, value)
                            .as_bytes(),
                    );
                }
                Part::File(name, file_name, content_type, data) => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                            name, file_name, content_type
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(&data);
                    body.extend_from_slice(b"\r\n");
                }
            }
        }
        body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

        Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, format!("multipart/form-data; boundary={}", BOUNDARY))
            .body(Body::from(body))
            .unwrap()
    }

    fn delete_request(token: Option<&str>, json: &str) -> Request<Body> {
        let mut builder = Request::builder()
            .method("DELETE")
            .uri("/uploads")
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(Body::from(json.to_string())).unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_upload_single_success() {
        let harness = Harness::new(false);

        let response = harness
            .send(multipart_request(
                "/uploads/single",
                vec![
                    Part::Text("folder", "site/logo"),
                    Part::File("file", "logo.png", "image/png", vec![7u8; 37]),
                ],
            ))
            .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        let file = &body["file"];

        let path = file["path"].as_str().unwrap();
        assert!(path.starts_with("site/logo/"));
        assert!(path.ends_with(".png"));
        assert_eq!(
            file["url"].as_str().unwrap(),
            format!("https://proj.example.co/storage/v1/object/public/site-media/{}", path)
        );
        assert_eq!(file["size"], 37);
        assert_eq!(file["mimetype"], "image/png");

        let calls = harness.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].operation, Operation::Put);
        assert_eq!(calls[0].bucket, "site-media");
        assert_eq!(calls[0].path, path);
        assert_eq!(calls[0].size, 37);
    }

    #[tokio::test]
    async fn test_upload_single_without_file() {
        let harness = Harness::new(false);

        let response = harness
            .send(multipart_request(
                "/uploads/single",
                vec![Part::Text("bucket", "uploads")],
            ))
            .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["code"], "NO_FILE_PROVIDED");
        assert!(harness.calls().is_empty());
    }

    #[tokio::test]
    async fn test_upload_with_empty_body() {
        let harness = Harness::new(false);

        for uri in ["/uploads/single", "/uploads/multiple"] {
            let request = Request::builder()
                .method("POST")
                .uri(uri)
                .header(CONTENT_TYPE, format!("multipart/form-data; boundary={}", BOUNDARY))
                .body(Body::empty())
                .unwrap();

            let response = harness.send(request).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(json_body(response).await["error"]["code"], "NO_FILE_PROVIDED");
        }
        assert!(harness.calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_file_reported_before_bad_folder() {
        let harness = Harness::new(false);

        let response = harness
            .send(multipart_request(
                "/uploads/single",
                vec![Part::Text("folder", "../private")],
            ))
            .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["code"], "NO_FILE_PROVIDED");
        assert!(harness.calls().is_empty());
    }

    #[tokio::test]
    async fn test_upload_rejects_disallowed_type() {
        let harness = Harness::new(false);

        let response = harness
            .send(multipart_request(
                "/uploads/single",
                vec![Part::File("file", "notes.txt", "text/plain", b"hello".to_vec())],
            ))
            .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["code"], "INVALID_FILE_TYPE");
        assert!(harness.calls().is_empty());
    }

    #[tokio::test]
    async fn test_upload_rejects_oversized_file() {
        let harness = Harness::new(false);

        let response = harness
            .send(multipart_request(
                "/uploads/single",
                vec![Part::File("file", "big.pdf", "application/pdf", vec![0u8; 1024 * 1024 + 1])],
            ))
            .await;

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(json_body(response).await["error"]["code"], "FILE_TOO_LARGE");
        assert!(harness.calls().is_empty());
    }

    #[tokio::test]
    async fn test_upload_rejects_folder_traversal() {
        let harness = Harness::new(false);

        let response = harness
            .send(multipart_request(
                "/uploads/single",
                vec![
                    Part::Text("folder", "../private"),
                    Part::File("file", "logo.png", "image/png", vec![1u8; 4]),
                ],
            ))
            .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["code"], "INVALID_PATH");
        assert!(harness.calls().is_empty());
    }

    #[tokio::test]
    async fn test_upload_storage_failure_maps_to_500() {
        let harness = Harness::new(true);

        let response = harness
            .send(multipart_request(
                "/uploads/single",
                vec![Part::File("file", "logo.png", "image/png", vec![1u8; 4])],
            ))
            .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "UPLOAD_FAILED");
        let message = body["error"]["message"].as_str().unwrap();
        assert!(message.starts_with("Storage upload failed."));
        assert!(message.contains("backend unavailable"));
    }

    #[tokio::test]
    async fn test_upload_multiple() {
        let harness = Harness::new(false);

        let response = harness
            .send(multipart_request(
                "/uploads/multiple",
                vec![
                    Part::Text("bucket", "gallery"),
                    Part::File("files", "a.png", "image/png", vec![1u8; 3]),
                    Part::File("files", "b.pdf", "application/pdf", vec![2u8; 5]),
                ],
            ))
            .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        let files = body["files"].as_array().unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0]["size"], 3);
        assert_eq!(files[1]["mimetype"], "application/pdf");

        let calls = harness.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls.iter().all(|c| c.bucket == "gallery"));
    }

    #[tokio::test]
    async fn test_upload_multiple_limits() {
        let harness = Harness::new(false);

        let response = harness
            .send(multipart_request(
                "/uploads/multiple",
                vec![
                    Part::File("files", "a.png", "image/png", vec![1u8; 3]),
                    Part::File("files", "b.png", "image/png", vec![1u8; 3]),
                    Part::File("files", "c.png", "image/png", vec![1u8; 3]),
                ],
            ))
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["code"], "TOO_MANY_FILES");

        let response = harness
            .send(multipart_request("/uploads/multiple", vec![Part::Text("folder", "x")]))
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["code"], "NO_FILE_PROVIDED");

        assert!(harness.calls().is_empty());
    }

    #[tokio::test]
    async fn test_delete_requires_token() {
        let harness = Harness::new(false);

        let response = harness
            .send(delete_request(None, r#"{"path":"blog/og/999.jpg"}"#))
            .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(response).await["error"]["code"], "MISSING_TOKEN");

        let response = harness
            .send(delete_request(Some("forged"), r#"{"path":"blog/og/999.jpg"}"#))
            .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(response).await["error"]["code"], "UNAUTHORIZED");

        assert!(harness.calls().is_empty());
    }

    #[tokio::test]
    async fn test_delete_without_path() {
        let harness = Harness::new(false);

        let response = harness
            .send(delete_request(Some(TOKEN), r#"{"bucket":"uploads"}"#))
            .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["code"], "NO_PATH_PROVIDED");
        assert!(harness.calls().is_empty());
    }

    #[tokio::test]
    async fn test_delete_success_uses_default_bucket() {
        let harness = Harness::new(false);

        let response = harness
            .send(delete_request(Some(TOKEN), r#"{"path":"blog/og/999.jpg"}"#))
            .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["message"], "File deleted successfully");

        let calls = harness.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].operation, Operation::Remove);
        assert_eq!(calls[0].bucket, "site-media");
        assert_eq!(calls[0].path, "blog/og/999.jpg");
    }

    #[tokio::test]
    async fn test_delete_failure_maps_to_500() {
        let harness = Harness::new(true);

        let response = harness
            .send(delete_request(Some(TOKEN), r#"{"bucket":"gallery","path":"a.png"}"#))
            .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "DELETE_FAILED");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .starts_with("File deletion failed."));
    }

    #[tokio::test]
    async fn test_health() {
        let harness = Harness::new(false);

        let response = harness
            .send(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert!(body["timestamp"].as_str().is_some());
    }
}
