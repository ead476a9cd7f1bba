use media_config::Config;
use media_events::{AppEvent, EventBus};
use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

pub async fn load(config_path: &str, events: &Arc<EventBus>) -> Result<Config> {
    let abs_config_path = std::env::current_dir()?
        .join(config_path)
        .display()
        .to_string();

    events.emit(AppEvent::ConfigLoading {
        path: abs_config_path.clone(),
    });

    let config_exists = Path::new(config_path).exists();
    let config = Config::from_file_with_events(config_path, Some(events)).await?;

    if !config_exists {
        events.emit(AppEvent::ConfigCreated {
            path: abs_config_path,
        });
    }

    events.emit(AppEvent::ConfigLoaded {
        signing_keys: config.storage.has_signing_keys(),
        managed_client: config.storage.has_managed_client(),
    });

    Ok(config)
}
