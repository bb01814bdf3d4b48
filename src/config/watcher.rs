//! Configuration file watcher for hot reload of default schemes.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::auth::SchemeRegistry;
use crate::config::loader::load_config;
use crate::config::schema::AuthConfig;

/// A watcher that monitors the configuration file for changes.
pub struct ConfigWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<AuthConfig>,
}

impl ConfigWatcher {
    /// Create a new ConfigWatcher.
    ///
    /// Returns the watcher and a receiver for validated configurations.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<AuthConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        (
            Self {
                path: path.to_path_buf(),
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching. The returned watcher must be kept alive.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.update_tx;
        let path = self.path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if event.kind.is_modify() || event.kind.is_create() => {
                    match load_config(&path) {
                        Ok(config) => {
                            tracing::info!(path = ?path, "Config file changed, reloaded");
                            if tx.send(config).is_err() {
                                tracing::debug!("Config receiver dropped; ignoring change");
                            }
                        }
                        Err(e) => {
                            tracing::error!(error = %e, "Failed to reload config; keeping current defaults");
                        }
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::error!(error = ?e, "Watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Config watcher started");
        Ok(watcher)
    }
}

/// Apply every received config's defaults to the registry until the
/// sending side closes.
pub async fn apply_updates(
    registry: Arc<SchemeRegistry>,
    mut updates: mpsc::UnboundedReceiver<AuthConfig>,
) {
    while let Some(config) = updates.recv().await {
        registry.update_defaults(config.defaults);
    }
    tracing::debug!("Config update channel closed");
}
