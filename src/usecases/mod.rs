//! Application use cases. Orchestrate domain logic via ports.

pub mod analysis_controller;

pub use analysis_controller::{AnalysisController, AnalysisState};
