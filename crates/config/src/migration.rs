use super::errors::ConfigError;
use std::path::Path;
use std::sync::Arc;
use toml_edit::{Array, DocumentMut, Item, Table, Value};

/// Migrates config file to latest format if needed
pub async fn migrate_config_if_needed<P: AsRef<Path>>(
    path: P,
    events: Option<&Arc<media_events::EventBus>>,
) -> Result<(), ConfigError> {
    let content = tokio::fs::read_to_string(path.as_ref()).await?;
    let mut doc = content.parse::<DocumentMut>()?;

    let added_fields = migrate_document(&mut doc)?;

    // Only write if we added fields
    if !added_fields.is_empty() {
        tokio::fs::write(path.as_ref(), doc.to_string()).await?;
        tracing::info!(
            "Migrated {}: added {}",
            path.as_ref().display(),
            added_fields.join(", ")
        );

        if let Some(event_bus) = events {
            event_bus.emit(media_events::AppEvent::ConfigMigrated {
                added_fields: added_fields.clone(),
            });
        }
    }

    Ok(())
}

/// Adds every section and key the current version expects. Returns the
/// dotted names of what was added.
pub(crate) fn migrate_document(doc: &mut DocumentMut) -> Result<Vec<String>, ConfigError> {
    let mut added_fields = Vec::new();

    migrate_server_section(doc, &mut added_fields)?;
    migrate_uploads_section(doc, &mut added_fields)?;
    migrate_storage_section(doc, &mut added_fields)?;
    migrate_auth_section(doc, &mut added_fields)?;

    Ok(added_fields)
}

fn migrate_server_section(
    doc: &mut DocumentMut,
    added_fields: &mut Vec<String>,
) -> Result<(), ConfigError> {
    let server = ensure_table(doc.as_table_mut(), "server", "server", added_fields)?;

    ensure_field(server, "server", "host", Value::from("0.0.0.0"), added_fields);
    ensure_field(server, "server", "port", Value::from(3001), added_fields);
    ensure_field(server, "server", "tcp_nodelay", Value::from(true), added_fields);
    ensure_field(server, "server", "timeout_secs", Value::from(120), added_fields);
    ensure_field(
        server,
        "server",
        "max_concurrent_requests",
        Value::from(1000),
        added_fields,
    );
    ensure_field(server, "server", "max_body_size_mb", Value::from(210), added_fields);
    ensure_field(
        server,
        "server",
        "enable_compression",
        Value::from(true),
        added_fields,
    );

    if !server.contains_key("allowed_origins") {
        let mut arr = Array::new();
        arr.push("*");
        server["allowed_origins"] = Item::Value(Value::Array(arr));
        added_fields.push("server.allowed_origins".to_string());
    }

    Ok(())
}

fn migrate_uploads_section(
    doc: &mut DocumentMut,
    added_fields: &mut Vec<String>,
) -> Result<(), ConfigError> {
    let uploads = ensure_table(doc.as_table_mut(), "uploads", "uploads", added_fields)?;

    ensure_field(uploads, "uploads", "max_file_size_mb", Value::from(200), added_fields);
    ensure_field(uploads, "uploads", "max_files", Value::from(10), added_fields);

    if !uploads.contains_key("allowed_types") {
        let arr: Array = super::defaults::allowed_types().iter().map(String::as_str).collect();
        uploads["allowed_types"] = Item::Value(Value::Array(arr));
        added_fields.push("uploads.allowed_types".to_string());
    }

    Ok(())
}

fn migrate_storage_section(
    doc: &mut DocumentMut,
    added_fields: &mut Vec<String>,
) -> Result<(), ConfigError> {
    let storage = ensure_table(doc.as_table_mut(), "storage", "storage", added_fields)?;

    ensure_field(storage, "storage", "public_origin", Value::from(""), added_fields);
    ensure_field(storage, "storage", "default_bucket", Value::from("uploads"), added_fields);
    ensure_field(
        storage,
        "storage",
        "request_timeout_secs",
        Value::from(30),
        added_fields,
    );

    let s3 = ensure_table(storage, "s3", "storage.s3", added_fields)?;
    ensure_field(s3, "storage.s3", "endpoint_url", Value::from(""), added_fields);
    ensure_field(s3, "storage.s3", "region", Value::from("ap-southeast-1"), added_fields);
    ensure_field(s3, "storage.s3", "access_key_id", Value::from(""), added_fields);
    ensure_field(s3, "storage.s3", "secret_access_key", Value::from(""), added_fields);

    let managed = ensure_table(storage, "managed", "storage.managed", added_fields)?;
    ensure_field(
        managed,
        "storage.managed",
        "client",
        Value::from("storage-api"),
        added_fields,
    );
    ensure_field(managed, "storage.managed", "api_url", Value::from(""), added_fields);
    ensure_field(managed, "storage.managed", "service_key", Value::from(""), added_fields);

    Ok(())
}

fn migrate_auth_section(
    doc: &mut DocumentMut,
    added_fields: &mut Vec<String>,
) -> Result<(), ConfigError> {
    let auth = ensure_table(doc.as_table_mut(), "auth", "auth", added_fields)?;

    ensure_field(auth, "auth", "provider", Value::from("disabled"), added_fields);
    ensure_field(auth, "auth", "url", Value::from(""), added_fields);
    ensure_field(auth, "auth", "api_key", Value::from(""), added_fields);

    if !auth.contains_key("tokens") {
        auth["tokens"] = Item::Value(Value::Array(Array::new()));
        added_fields.push("auth.tokens".to_string());
    }

    Ok(())
}

fn ensure_table<'a>(
    parent: &'a mut Table,
    key: &str,
    name: &str,
    added_fields: &mut Vec<String>,
) -> Result<&'a mut Table, ConfigError> {
    if !parent.contains_key(key) {
        let mut table = Table::new();
        table.set_implicit(true);
        parent.insert(key, Item::Table(table));
        added_fields.push(name.to_string());
    }

    parent[key]
        .as_table_mut()
        .ok_or_else(|| ConfigError::InvalidConfig(format!("Invalid [{}] section in config", name)))
}

fn ensure_field(
    table: &mut Table,
    section: &str,
    key: &str,
    default_value: Value,
    added_fields: &mut Vec<String>,
) {
    if !table.contains_key(key) {
        table[key] = Item::Value(default_value);
        added_fields.push(format!("{}.{}", section, key));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::DEFAULT_CONFIG_TEMPLATE;
    use crate::Config;

    #[test]
    fn test_template_needs_no_migration() {
        let mut doc = DEFAULT_CONFIG_TEMPLATE.parse::<DocumentMut>().unwrap();
        let added = migrate_document(&mut doc).unwrap();
        assert!(added.is_empty(), "unexpected additions: {:?}", added);
    }

    #[test]
    fn test_old_config_gains_missing_sections() {
        let mut doc = r#"
[server]
host = "127.0.0.1"
port = 9000

[storage]
public_origin = "https://proj.example.co"
"#
        .parse::<DocumentMut>()
        .unwrap();

        let added = migrate_document(&mut doc).unwrap();

        assert!(added.contains(&"uploads".to_string()));
        assert!(added.contains(&"storage.s3".to_string()));
        assert!(added.contains(&"auth.provider".to_string()));
        assert!(!added.contains(&"server.port".to_string()));
        assert!(!added.contains(&"storage.public_origin".to_string()));

        let config: Config = toml::from_str(&doc.to_string()).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.storage.public_origin, "https://proj.example.co");
        assert_eq!(config.uploads.allowed_types.len(), 7);
    }

    #[tokio::test]
    async fn test_migration_rewrites_file_once() {
        let path = std::env::temp_dir().join(format!("media-config-{}.toml", std::process::id()));
        tokio::fs::write(&path, "[server]\nhost = \"127.0.0.1\"\nport = 9000\n")
            .await
            .unwrap();

        migrate_config_if_needed(&path, None).await.unwrap();
        let migrated = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(migrated.contains("max_files = 10"));
        assert!(migrated.contains("port = 9000"));

        migrate_config_if_needed(&path, None).await.unwrap();
        assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), migrated);

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[test]
    fn test_non_table_section_is_rejected() {
        let mut doc = "storage = 5\n[server]\nhost = \"h\"\nport = 1\n"
            .parse::<DocumentMut>()
            .unwrap();

        assert!(matches!(
            migrate_document(&mut doc),
            Err(ConfigError::InvalidConfig(_))
        ));
    }
}
