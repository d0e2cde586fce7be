use crate::core::pitch::{PitchData, PitchSection};
use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

/// Persistence for the current pitch, held as a single blob.
#[async_trait]
pub trait PitchStore: Send + Sync {
    /// Returns an empty pitch when nothing has been saved yet.
    async fn load(&self) -> Result<PitchData>;

    /// Replaces the stored pitch.
    async fn save(&self, pitch: &PitchData) -> Result<()>;

    async fn merge_section(&self, key: &str, section: PitchSection) -> Result<PitchData> {
        let mut pitch = self.load().await?;
        let replaced = pitch.insert(key, section).is_some();
        debug!(key, replaced, "Merging pitch section");
        self.save(&pitch).await?;
        Ok(pitch)
    }
}
