mod bootstrap;

use media_api::AppState;
use media_auth::TokenVerifier;
use media_config::{AuthSettings, StorageSettings};
use media_events::{AppEvent, EventBus};
use media_storage::{Operation, StorageAdapter};
use crate::bootstrap::{config, logging, router, server};
use anyhow::Result;
use std::io::IsTerminal;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    logging::initialize();

    let events = EventBus::new(!std::io::stdout().is_terminal());
    events.emit(AppEvent::Starting);

    let config_path = std::env::var("MEDIA_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    let config = config::load(&config_path, &events).await?;

    let storage = initialize_storage(&config.storage, &events).await?;
    let verifier = initialize_auth(&config.auth, &events)?;

    let app_state = AppState::new(
        storage,
        verifier,
        &config.uploads,
        config.storage.default_bucket.clone(),
    );
    let app = router::build(&config, app_state);
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let listener = server::bind(&addr).await?;

    events.emit(AppEvent::Ready { addr });

    axum::serve(listener, app.into_make_service())
        .tcp_nodelay(config.server.tcp_nodelay)
        .with_graceful_shutdown(server::shutdown_signal())
        .await?;

    events.emit(AppEvent::Shutdown);
    Ok(())
}

async fn initialize_storage(
    settings: &StorageSettings,
    events: &Arc<EventBus>,
) -> Result<Arc<StorageAdapter>> {
    let adapter = media_storage::build_adapter(settings).await.map_err(|e| {
        events.emit(AppEvent::Error {
            context: "Storage initialization".to_string(),
            error: e.to_string(),
        });
        e
    })?;

    let upload_chain = adapter.chain(Operation::Put);
    let delete_chain = adapter.chain(Operation::Remove);

    if upload_chain.is_empty() && delete_chain.is_empty() {
        events.emit(AppEvent::StorageNotConfigured);
    } else {
        events.emit(AppEvent::StorageReady {
            upload_chain: upload_chain.iter().map(|s| s.to_string()).collect(),
            delete_chain: delete_chain.iter().map(|s| s.to_string()).collect(),
        });
    }

    Ok(Arc::new(adapter))
}

fn initialize_auth(settings: &AuthSettings, events: &Arc<EventBus>) -> Result<Arc<dyn TokenVerifier>> {
    let verifier = media_auth::build_verifier(settings).map_err(|e| {
        events.emit(AppEvent::Error {
            context: "Auth initialization".to_string(),
            error: e.to_string(),
        });
        e
    })?;

    events.emit(AppEvent::AuthMode {
        provider: verifier.name().to_string(),
    });

    Ok(verifier)
}
