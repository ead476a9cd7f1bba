use super::models::{AppEvent, EventBus};
use std::sync::Arc;
use colored::Colorize;

impl EventBus {
    pub fn new(silent_mode: bool) -> Arc<Self> {
        Arc::new(Self { silent_mode })
    }

    pub fn emit(&self, event: AppEvent) {
        match event {
            // Application lifecycle
            AppEvent::Starting => {
                if self.silent_mode {
                    return;
                }
                println!("\n{}", "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".bright_black());
                println!("  {}", "Media Server - Uploads & Storage".white().bold());
                println!("  {} {}", "Version".dimmed(), env!("CARGO_PKG_VERSION").cyan());
                println!("{}\n", "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".bright_black());
            }
            AppEvent::Ready { addr } => {
                if self.silent_mode {
                    tracing::info!("Listening on {}", addr);
                    return;
                }
                println!("{}", "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".green());
                println!("  {} {}", "Server".white(), addr.cyan());
                println!("{}\n", "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".green());
            }
            AppEvent::Shutdown => {
                if !self.silent_mode {
                    println!("\n{}", "Server shutting down".red());
                }
            }

            // Configuration
            AppEvent::ConfigLoading { path } => {
                if !self.silent_mode {
                    println!("  {} {}", "Loading config".dimmed(), path.cyan());
                }
            }
            AppEvent::ConfigLoaded { signing_keys, managed_client } => {
                if self.silent_mode {
                    return;
                }
                let mark = |on: bool| if on { "✓".green() } else { "✗".red() };
                println!("  {} S3 signing keys", mark(signing_keys));
                println!("  {} Managed storage client", mark(managed_client));
            }
            AppEvent::ConfigCreated { path } => {
                tracing::warn!("Configuration file not found");
                tracing::info!("Created default configuration at: {}", path);
            }
            AppEvent::ConfigMigrated { added_fields } => {
                if !added_fields.is_empty() && !self.silent_mode {
                    println!("  {} Config updated: added {}",
                        "↻".blue(),
                        added_fields.join(", ").dimmed()
                    );
                }
            }

            // Storage
            AppEvent::StorageReady { upload_chain, delete_chain } => {
                tracing::info!(
                    upload = %upload_chain.join(" -> "),
                    delete = %delete_chain.join(" -> "),
                    "Storage strategies ready"
                );
                if !self.silent_mode {
                    println!("  {} Upload  {}", "→".dimmed(), upload_chain.join(" → ").cyan());
                    println!("  {} Delete  {}", "→".dimmed(), delete_chain.join(" → ").cyan());
                }
            }
            AppEvent::StorageNotConfigured => {
                tracing::warn!("No storage strategy has credentials; uploads and deletes will fail");
                if !self.silent_mode {
                    println!("  {} No storage credentials configured", "⚠".yellow());
                }
            }

            // Auth
            AppEvent::AuthMode { provider } => {
                if !self.silent_mode {
                    println!("  {} Auth {}", "✓".green(), provider.cyan());
                }
            }

            // Errors
            AppEvent::Error { context, error } => {
                tracing::error!("{}: {}", context, error);
            }
        }
    }
}
