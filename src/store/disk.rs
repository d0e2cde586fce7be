use crate::core::pitch::PitchData;
use crate::core::store::PitchStore;
use anyhow::{Context, Result};
use async_trait::async_trait;
use fjall::{Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use std::path::Path;
use tracing::debug;

const PARTITION: &str = "pitch";
const PITCH_KEY: &str = "pitch_data";

/// Pitch store backed by a fjall keyspace. The whole pitch is one JSON value
/// under a single key.
pub struct DiskPitchStore {
    keyspace: Keyspace,
    partition: PartitionHandle,
}

impl DiskPitchStore {
    pub fn open(path: &Path) -> Result<Self> {
        std::fs::create_dir_all(path)
            .with_context(|| format!("Failed to create data directory: {}", path.display()))?;

        let keyspace = fjall::Config::new(path)
            .open()
            .with_context(|| format!("Failed to open store at {}", path.display()))?;
        let partition = keyspace
            .open_partition(PARTITION, PartitionCreateOptions::default())
            .context("Failed to open pitch partition")?;
        debug!(path = %path.display(), "Opened pitch store");

        Ok(Self {
            keyspace,
            partition,
        })
    }
}

#[async_trait]
impl PitchStore for DiskPitchStore {
    async fn load(&self) -> Result<PitchData> {
        let Some(value) = self
            .partition
            .get(PITCH_KEY)
            .context("Failed to read stored pitch")?
        else {
            debug!("No stored pitch");
            return Ok(PitchData::new());
        };

        let pitch: PitchData =
            serde_json::from_slice(&value).context("Failed to decode stored pitch")?;
        debug!(sections = pitch.len(), "Loaded pitch from disk");
        Ok(pitch)
    }

    async fn save(&self, pitch: &PitchData) -> Result<()> {
        let bytes = serde_json::to_vec(pitch).context("Failed to encode pitch")?;
        self.partition
            .insert(PITCH_KEY, bytes)
            .context("Failed to write pitch")?;
        self.keyspace
            .persist(PersistMode::SyncAll)
            .context("Failed to flush pitch to disk")?;
        debug!(sections = pitch.len(), "Saved pitch to disk");
        Ok(())
    }
}
