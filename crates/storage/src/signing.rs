//! AWS Signature Version 4 for S3-compatible endpoints.
//!
//! Two forms are supported: header signing (an `authorization` header plus
//! the date and payload-hash headers) and query-string presigning. Both are
//! pure functions of their inputs; the caller captures the signing instant
//! once and passes it in.

use chrono::{DateTime, Utc};
use media_utils::{hmac_sha256, hmac_sha256_hex, sha256_hex, uri_encode};
use reqwest::Url;
use std::collections::BTreeMap;
use std::fmt;

pub const ALGORITHM: &str = "AWS4-HMAC-SHA256";
pub const UNSIGNED_PAYLOAD: &str = "UNSIGNED-PAYLOAD";

const SERVICE: &str = "s3";
const SIGNED_HEADERS: &str = "host;x-amz-content-sha256;x-amz-date";

pub const AUTHORIZATION: &str = "authorization";
pub const X_AMZ_DATE: &str = "x-amz-date";
pub const X_AMZ_CONTENT_SHA256: &str = "x-amz-content-sha256";
pub const CONTENT_TYPE: &str = "content-type";

/// Header name -> value, ordered by name.
pub type SignedHeaders = BTreeMap<&'static str, String>;

#[derive(Clone)]
pub struct SigningCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub region: String,
}

impl SigningCredentials {
    pub fn new(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            region: region.into(),
        }
    }
}

impl fmt::Debug for SigningCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("region", &self.region)
            .finish()
    }
}

/// The call being signed.
#[derive(Debug, Clone, Copy)]
pub struct SignRequest<'a> {
    pub method: &'a str,
    pub url: &'a Url,
    pub body: Option<&'a [u8]>,
    pub content_type: Option<&'a str>,
}

/// Produces the headers that authenticate `request` at instant `at`.
///
/// `content-type` is passed through when given but is not part of the signed
/// header set.
pub fn sign_request(
    request: &SignRequest<'_>,
    at: DateTime<Utc>,
    credentials: &SigningCredentials,
) -> SignedHeaders {
    let amz_date = amz_date(at);
    let scope = credential_scope(at, &credentials.region);
    let payload_hash = sha256_hex(request.body.unwrap_or_default());

    let canonical_headers = format!(
        "host:{}\n{}:{}\n{}:{}\n",
        host_header(request.url),
        X_AMZ_CONTENT_SHA256,
        payload_hash,
        X_AMZ_DATE,
        amz_date
    );
    let canonical_request = canonical_request(
        request.method,
        request.url,
        &canonical_query(request.url, &[]),
        &canonical_headers,
        SIGNED_HEADERS,
        &payload_hash,
    );
    let signature = signature(&canonical_request, &amz_date, &scope, at, credentials);

    let mut headers = SignedHeaders::new();
    headers.insert(
        AUTHORIZATION,
        format!(
            "{} Credential={}/{}, SignedHeaders={}, Signature={}",
            ALGORITHM, credentials.access_key_id, scope, SIGNED_HEADERS, signature
        ),
    );
    headers.insert(X_AMZ_DATE, amz_date);
    headers.insert(X_AMZ_CONTENT_SHA256, payload_hash);
    if let Some(content_type) = request.content_type {
        headers.insert(CONTENT_TYPE, content_type.to_string());
    }
    headers
}

/// Returns `url` with SigV4 query parameters attached, valid for
/// `expires_secs` seconds from `at`. Only `host` is signed and the payload is
/// left unsigned, so any body may be sent with the request.
pub fn presign(
    method: &str,
    url: &Url,
    at: DateTime<Utc>,
    expires_secs: u64,
    credentials: &SigningCredentials,
) -> Url {
    let amz_date = amz_date(at);
    let scope = credential_scope(at, &credentials.region);
    let credential = format!("{}/{}", credentials.access_key_id, scope);
    let expires = expires_secs.to_string();

    let auth_params = [
        ("X-Amz-Algorithm", ALGORITHM),
        ("X-Amz-Credential", credential.as_str()),
        ("X-Amz-Date", amz_date.as_str()),
        ("X-Amz-Expires", expires.as_str()),
        ("X-Amz-SignedHeaders", "host"),
    ];
    let query = canonical_query(url, &auth_params);
    let canonical_headers = format!("host:{}\n", host_header(url));
    let canonical_request = canonical_request(
        method,
        url,
        &query,
        &canonical_headers,
        "host",
        UNSIGNED_PAYLOAD,
    );
    let signature = signature(&canonical_request, &amz_date, &scope, at, credentials);

    let mut presigned = url.clone();
    presigned.set_query(Some(&format!("{}&X-Amz-Signature={}", query, signature)));
    presigned
}

/// Derives the SigV4 signing key for one day, region and service.
pub fn derive_signing_key(secret: &str, date_stamp: &str, region: &str, service: &str) -> [u8; 32] {
    let k_date = hmac_sha256(format!("AWS4{}", secret).as_bytes(), date_stamp.as_bytes());
    let k_region = hmac_sha256(&k_date, region.as_bytes());
    let k_service = hmac_sha256(&k_region, service.as_bytes());
    hmac_sha256(&k_service, b"aws4_request")
}

fn signature(
    canonical_request: &str,
    amz_date: &str,
    scope: &str,
    at: DateTime<Utc>,
    credentials: &SigningCredentials,
) -> String {
    let string_to_sign = format!(
        "{}\n{}\n{}\n{}",
        ALGORITHM,
        amz_date,
        scope,
        sha256_hex(canonical_request.as_bytes())
    );
    let key = derive_signing_key(
        &credentials.secret_access_key,
        &date_stamp(at),
        &credentials.region,
        SERVICE,
    );
    hmac_sha256_hex(&key, string_to_sign.as_bytes())
}

fn canonical_request(
    method: &str,
    url: &Url,
    query: &str,
    canonical_headers: &str,
    signed_headers: &str,
    payload_hash: &str,
) -> String {
    let path = match url.path() {
        "" => "/",
        path => path,
    };
    format!(
        "{}\n{}\n{}\n{}\n{}\n{}",
        method, path, query, canonical_headers, signed_headers, payload_hash
    )
}

/// Existing query pairs plus `extra`, encoded and sorted by key then value.
fn canonical_query(url: &Url, extra: &[(&str, &str)]) -> String {
    let mut pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (uri_encode(&k, false), uri_encode(&v, false)))
        .chain(
            extra
                .iter()
                .map(|(k, v)| (uri_encode(k, false), uri_encode(v, false))),
        )
        .collect();
    pairs.sort();
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&")
}

/// `host[:port]`, with the port only when it differs from the scheme default.
fn host_header(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    }
}

fn amz_date(at: DateTime<Utc>) -> String {
    at.format("%Y%m%dT%H%M%SZ").to_string()
}

fn date_stamp(at: DateTime<Utc>) -> String {
    at.format("%Y%m%d").to_string()
}

fn credential_scope(at: DateTime<Utc>, region: &str) -> String {
    format!("{}/{}/{}/aws4_request", date_stamp(at), region, SERVICE)
}
