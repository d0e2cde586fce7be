//! Rewrites one section of the stored pitch through the backend.

use crate::core::backend::{FundraisingBackend, ImproveRequest};
use crate::core::pitch::canonical_key;
use crate::core::resolver::{ResolvedSection, SectionResolver};
use crate::core::store::PitchStore;
use anyhow::{Context, Result};
use tracing::{info, warn};

/// Asks the backend to improve `section`, finds the improved text in its
/// answer and merges it into the store under the key it was found at.
pub async fn improve_section(
    backend: &dyn FundraisingBackend,
    store: &dyn PitchStore,
    resolver: &SectionResolver,
    section: &str,
    feedback: &str,
) -> Result<ResolvedSection> {
    let pitch = store.load().await.context("Failed to load stored pitch")?;
    if pitch.is_empty() {
        warn!("No stored pitch, the backend will improve the section without context");
    }

    let request = ImproveRequest {
        section: section.to_string(),
        feedback: feedback.to_string(),
        pitch,
    };
    let response = backend
        .improve_section(&request)
        .await
        .with_context(|| format!("Failed to improve section: {section}"))?;

    let resolved = resolver.resolve(section, &response)?;
    if resolved.key != canonical_key(section) {
        info!(
            requested = section,
            resolved = %resolved.key,
            confidence = %resolved.confidence,
            "Improved section stored under a different key"
        );
    }

    store
        .merge_section(&resolved.key, resolved.section.clone())
        .await
        .context("Failed to save improved section")?;
    Ok(resolved)
}
