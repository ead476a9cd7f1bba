use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Percent-encodes a string the way S3 canonical requests expect: unreserved
/// characters pass through, everything else becomes `%XX` (upper case hex).
/// `/` is kept when `keep_slash` is set so object keys stay readable.
pub fn uri_encode(input: &str, keep_slash: bool) -> String {
    let mut encoded = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char)
            }
            b'/' if keep_slash => encoded.push('/'),
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}

/// Extension of an uploaded file name, if it has a usable one.
pub fn file_extension(file_name: &str) -> Option<&str> {
    let (_, ext) = file_name.rsplit_once('.')?;
    if ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext)
}

/// Builds `{folder}/{timestamp}-{random}.{ext}` for a new object.
///
/// The folder prefix is dropped when empty. The name is only a collision
/// avoidance heuristic; nothing checks that the key is free.
pub fn unique_object_path(folder: &str, original_name: &str, now: DateTime<Utc>) -> String {
    let random = Uuid::new_v4().simple().to_string();
    let stem = format!("{}-{}", now.timestamp_millis(), &random[..12]);

    let name = match file_extension(original_name) {
        Some(ext) => format!("{}.{}", stem, ext),
        None => stem,
    };

    let folder = folder.trim_matches('/');
    if folder.is_empty() {
        name
    } else {
        format!("{}/{}", folder, name)
    }
}
