pub mod disk;
pub mod memory;

use crate::core::config::AppConfig;
use crate::core::store::PitchStore;
use anyhow::{Context, Result};
use disk::DiskPitchStore;
use memory::MemoryPitchStore;
use std::sync::Arc;
use tracing::warn;

/// Opens the on-disk store under the configured data path. Commands that
/// write the pitch must use this so a broken data directory is an error.
pub fn open_disk_store(config: &AppConfig) -> Result<Arc<dyn PitchStore>> {
    let path = config.default_data_path()?.join("store");
    let store = DiskPitchStore::open(&path)
        .with_context(|| format!("Failed to open pitch store at {}", path.display()))?;
    Ok(Arc::new(store))
}

/// Like `open_disk_store`, but falls back to an empty in-memory store.
/// Only for commands that read the pitch.
pub fn open_store(config: &AppConfig) -> Arc<dyn PitchStore> {
    match open_disk_store(config) {
        Ok(store) => store,
        Err(e) => {
            warn!(error = %e, "Falling back to in-memory pitch store");
            Arc::new(MemoryPitchStore::new())
        }
    }
}
