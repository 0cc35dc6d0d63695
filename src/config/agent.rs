//! Shared access to the current configuration snapshot.

use super::{Config, load_config};
use crate::error::Result;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::info;

/// Holds the current [`Config`] and swaps it atomically on reload.
///
/// Readers clone the `Arc` and keep using that snapshot for as long as
/// they need it, so a reload never changes a query that is in flight.
#[derive(Debug)]
pub struct ConfigAgent {
    current: RwLock<Arc<Config>>,
}

impl ConfigAgent {
    /// Create an agent serving `config`
    pub fn new(config: Config) -> Self {
        Self {
            current: RwLock::new(Arc::new(config)),
        }
    }

    /// The current snapshot
    pub fn current(&self) -> Arc<Config> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Replace the snapshot, returning the previous one
    pub fn replace(&self, config: Config) -> Arc<Config> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, Arc::new(config))
    }

    /// Load `path` as the next generation and swap it in.
    ///
    /// On error the current snapshot stays in place.
    pub fn reload(&self, path: &Path) -> Result<Arc<Config>> {
        let generation = self.current().generation + 1;
        let config = load_config(path, generation)?;
        self.replace(config);
        info!(path = %path.display(), generation, "reloaded keeper config");
        Ok(self.current())
    }
}

impl Default for ConfigAgent {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
