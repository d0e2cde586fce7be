//! Core business logic abstractions

pub mod backend;
pub mod config;
pub mod export;
pub mod improve;
pub mod investor;
pub mod log;
pub mod pitch;
pub mod profile;
pub mod resolver;
pub mod store;
pub mod valuation;

// Re-export main types for cleaner imports
pub use backend::FundraisingBackend;
pub use pitch::{PitchData, PitchSection};
pub use resolver::{MatchConfidence, ResolveError, ResolvedSection, SectionResolver};
pub use store::PitchStore;
pub use valuation::{ValuationResult, estimate_valuation};
