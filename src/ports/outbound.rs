//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{AnalysisReport, DomainError};
use std::path::PathBuf;

/// Generative-model gateway. One call per analysis, no retries.
#[async_trait::async_trait]
pub trait AiPort: Send + Sync {
    /// Produce a competitor report for `brands` (1..=5 trimmed, non-empty names).
    ///
    /// Suspends until the service answers or fails. The returned report is
    /// complete; on any failure nothing partial is returned.
    async fn analyze_competitors(&self, brands: &[String]) -> Result<AnalysisReport, DomainError>;

    /// Model identifier shown on the report cover.
    fn model_name(&self) -> &str;
}

/// Printable document writer for a completed report.
#[async_trait::async_trait]
pub trait ReportExportPort: Send + Sync {
    /// Write the document and return where it landed.
    async fn export(
        &self,
        brands: &[String],
        model: &str,
        report: &AnalysisReport,
    ) -> Result<PathBuf, DomainError>;
}
