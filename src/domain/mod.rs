//! Core domain layer. No external I/O dependencies.
//!
//! Entities and business rules live here. Dependencies flow inward.

pub mod comparison;
pub mod entities;
pub mod errors;

pub use comparison::{ComparisonMatrix, ComparisonRow};
pub use entities::{
    ActionPhase, AnalysisReport, AnalysisStatus, BrandList, BrandScore, ComparisonDimension,
    CompetitorProfile, MAX_BRANDS, MarketLandscape, PlatformMetric, Source,
};
pub use errors::{DomainError, GENERIC_FAILURE_MESSAGE};
