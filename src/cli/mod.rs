pub mod investors;
pub mod pitch;
pub mod setup;
pub mod ui;
pub mod valuation;
