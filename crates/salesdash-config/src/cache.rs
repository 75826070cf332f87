//! Lock-free configuration cache swapped on hot reload.

use crate::{schema::Config, ConfigError, ConfigLoader};
use arc_swap::ArcSwap;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Holds the live configuration; readers never block a reload.
#[derive(Debug)]
pub struct ConfigCache {
    config: ArcSwap<Config>,
}

impl ConfigCache {
    /// Creates a new configuration cache with the given initial configuration.
    pub fn new(config: Config) -> Self {
        Self {
            config: ArcSwap::from_pointee(config),
        }
    }

    /// Gets the current configuration.
    pub fn get(&self) -> Arc<Config> {
        self.config.load_full()
    }

    /// Replaces the configuration, returning the previous one.
    pub fn update(&self, config: Config) -> Arc<Config> {
        self.config.swap(Arc::new(config))
    }

    /// Re-reads `path` and swaps the result in.
    ///
    /// An invalid file leaves the current configuration in place.
    pub fn reload_from(&self, path: &Path) -> Result<Arc<Config>, ConfigError> {
        match ConfigLoader::load_config(path) {
            Ok(config) => {
                let changed = *self.get() != config;
                self.update(config);
                info!(path = %path.display(), changed, "Configuration reloaded");
                Ok(self.get())
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Keeping previous configuration");
                Err(e)
            }
        }
    }
}

impl Default for ConfigCache {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
