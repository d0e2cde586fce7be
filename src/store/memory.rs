use crate::core::pitch::PitchData;
use crate::core::store::PitchStore;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Pitch store that lives only as long as the process.
#[derive(Clone, Default)]
pub struct MemoryPitchStore {
    inner: Arc<Mutex<PitchData>>,
}

impl MemoryPitchStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PitchStore for MemoryPitchStore {
    async fn load(&self) -> Result<PitchData> {
        let pitch = self.inner.lock().await;
        debug!(sections = pitch.len(), "Loaded pitch from memory");
        Ok(pitch.clone())
    }

    async fn save(&self, pitch: &PitchData) -> Result<()> {
        let mut stored = self.inner.lock().await;
        debug!(sections = pitch.len(), "Saved pitch to memory");
        *stored = pitch.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pitch::PitchSection;

    #[tokio::test]
    async fn test_load_empty() {
        let store = MemoryPitchStore::new();
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_overwrites_wholesale() {
        let store = MemoryPitchStore::new();

        let first: PitchData = [("problem", PitchSection::new("a"))].into_iter().collect();
        store.save(&first).await.unwrap();

        let second: PitchData = [("solution", PitchSection::new("b"))].into_iter().collect();
        store.save(&second).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded, second);
        assert!(!loaded.contains_key("problem"));
    }

    #[tokio::test]
    async fn test_merge_section() {
        let store = MemoryPitchStore::new();
        let pitch: PitchData = [
            ("problem", PitchSection::new("a")),
            ("solution", PitchSection::new("b")),
        ]
        .into_iter()
        .collect();
        store.save(&pitch).await.unwrap();

        store
            .merge_section("problem", PitchSection::new("c"))
            .await
            .unwrap();
        let merged = store
            .merge_section("ask", PitchSection::new("d"))
            .await
            .unwrap();

        let keys: Vec<_> = merged.keys().collect();
        assert_eq!(keys, vec!["problem", "solution", "ask"]);
        assert_eq!(store.load().await.unwrap().get("problem").unwrap().text, "c");
    }
}
