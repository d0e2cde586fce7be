//! Locates a requested section inside a backend response.
//!
//! The backend does not always answer with the key it was asked about, so a
//! cascade of matchers is tried in order and the first hit wins. Each matcher
//! reports how much the caller should trust its answer.

use crate::core::pitch::{PitchData, PitchSection, canonical_key};
use serde::Serialize;
use std::fmt::Display;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum MatchConfidence {
    /// The canonical key is present in the response.
    Exact,
    /// A response key and the canonical key contain one another.
    Partial,
    /// Some populated section, unrelated by name.
    Fallback,
}

impl Display for MatchConfidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                MatchConfidence::Exact => "exact",
                MatchConfidence::Partial => "partial",
                MatchConfidence::Fallback => "fallback",
            }
        )
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Could not locate the requested section: {requested}")]
    NotFound { requested: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSection {
    pub key: String,
    pub section: PitchSection,
    pub confidence: MatchConfidence,
}

impl ResolvedSection {
    pub fn is_low_confidence(&self) -> bool {
        self.confidence != MatchConfidence::Exact
    }
}

/// One strategy in the resolution cascade.
pub trait SectionMatcher: Send + Sync {
    fn confidence(&self) -> MatchConfidence;

    /// Returns the matching response key, if any.
    fn find<'a>(&self, canonical: &str, response: &'a PitchData) -> Option<&'a str>;
}

pub struct ExactMatcher;

impl SectionMatcher for ExactMatcher {
    fn confidence(&self) -> MatchConfidence {
        MatchConfidence::Exact
    }

    fn find<'a>(&self, canonical: &str, response: &'a PitchData) -> Option<&'a str> {
        response.keys().find(|key| *key == canonical)
    }
}

pub struct SubstringMatcher;

impl SectionMatcher for SubstringMatcher {
    fn confidence(&self) -> MatchConfidence {
        MatchConfidence::Partial
    }

    fn find<'a>(&self, canonical: &str, response: &'a PitchData) -> Option<&'a str> {
        if canonical.is_empty() {
            return None;
        }
        response.keys().find(|key| {
            let key = key.to_lowercase();
            !key.is_empty() && (canonical.contains(&key) || key.contains(canonical))
        })
    }
}

pub struct PopulatedMatcher;

impl SectionMatcher for PopulatedMatcher {
    fn confidence(&self) -> MatchConfidence {
        MatchConfidence::Fallback
    }

    fn find<'a>(&self, _canonical: &str, response: &'a PitchData) -> Option<&'a str> {
        response
            .iter()
            .find(|(_, section)| section.is_populated())
            .map(|(key, _)| key)
    }
}

pub struct SectionResolver {
    matchers: Vec<Box<dyn SectionMatcher>>,
}

impl SectionResolver {
    pub fn new(matchers: Vec<Box<dyn SectionMatcher>>) -> Self {
        Self { matchers }
    }

    pub fn resolve(
        &self,
        requested: &str,
        response: &PitchData,
    ) -> Result<ResolvedSection, ResolveError> {
        let canonical = canonical_key(requested);

        for matcher in &self.matchers {
            let Some(key) = matcher.find(&canonical, response) else {
                continue;
            };
            let Some(section) = response.get(key) else {
                continue;
            };
            debug!(
                requested,
                resolved = key,
                confidence = %matcher.confidence(),
                "Resolved pitch section"
            );
            return Ok(ResolvedSection {
                key: key.to_string(),
                section: section.clone(),
                confidence: matcher.confidence(),
            });
        }

        debug!(requested, "No section matched");
        Err(ResolveError::NotFound {
            requested: requested.to_string(),
        })
    }
}

impl Default for SectionResolver {
    /// Exact, then substring, then any populated section.
    fn default() -> Self {
        Self::new(vec![
            Box::new(ExactMatcher),
            Box::new(SubstringMatcher),
            Box::new(PopulatedMatcher),
        ])
    }
}

/// Resolves with the default cascade.
pub fn resolve_section(
    requested: &str,
    response: &PitchData,
) -> Result<ResolvedSection, ResolveError> {
    SectionResolver::default().resolve(requested, response)
}
