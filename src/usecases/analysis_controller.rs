//! Application state controller. Owns the brand list and the analysis state,
//! and turns user actions into calls on the AI port.

use crate::domain::{AnalysisReport, AnalysisStatus, BrandList, DomainError};
use crate::ports::AiPort;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, warn};

/// Current analysis state. The report only exists in `Completed` and the
/// error message only in `Failed`, so the two can never be stale.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisState {
    Idle,
    Analyzing,
    Completed(AnalysisReport),
    Failed(String),
}

impl AnalysisState {
    pub fn status(&self) -> AnalysisStatus {
        match self {
            AnalysisState::Idle => AnalysisStatus::Idle,
            AnalysisState::Analyzing => AnalysisStatus::Analyzing,
            AnalysisState::Completed(_) => AnalysisStatus::Completed,
            AnalysisState::Failed(_) => AnalysisStatus::Error,
        }
    }
}

/// Single owner of UI state. The presentation layer reads it by reference
/// and mutates it only through these methods.
pub struct AnalysisController {
    ai: Arc<dyn AiPort>,
    brands: BrandList,
    state: AnalysisState,
    /// Submitted brand names of the current/last analysis.
    analyzed_brands: Vec<String>,
    status_tx: watch::Sender<AnalysisStatus>,
}

impl AnalysisController {
    pub fn new(ai: Arc<dyn AiPort>) -> Self {
        let (status_tx, _) = watch::channel(AnalysisStatus::Idle);
        Self {
            ai,
            brands: BrandList::new(),
            state: AnalysisState::Idle,
            analyzed_brands: Vec::new(),
            status_tx,
        }
    }

    /// Observe every status change, including `Analyzing` while the call is in flight.
    pub fn subscribe(&self) -> watch::Receiver<AnalysisStatus> {
        self.status_tx.subscribe()
    }

    pub fn brands(&self) -> &BrandList {
        &self.brands
    }

    pub fn state(&self) -> &AnalysisState {
        &self.state
    }

    pub fn status(&self) -> AnalysisStatus {
        self.state.status()
    }

    pub fn report(&self) -> Option<&AnalysisReport> {
        match &self.state {
            AnalysisState::Completed(report) => Some(report),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            AnalysisState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn analyzed_brands(&self) -> &[String] {
        &self.analyzed_brands
    }

    pub fn model_name(&self) -> &str {
        self.ai.model_name()
    }

    pub fn add_brand(&mut self) -> bool {
        self.brands.add_slot()
    }

    pub fn remove_brand(&mut self, index: usize) -> bool {
        self.brands.remove_slot(index)
    }

    pub fn update_brand(&mut self, index: usize, text: impl Into<String>) -> bool {
        self.brands.update_slot(index, text)
    }

    /// True when `submit` would start an analysis.
    pub fn can_submit(&self) -> bool {
        matches!(self.state, AnalysisState::Idle | AnalysisState::Failed(_))
            && self.brands.has_active()
    }

    /// Run one analysis for the non-blank brands.
    ///
    /// No-op (returns false) when every slot is blank or an analysis is
    /// running or completed. Otherwise passes through `Analyzing` and ends in
    /// `Completed` or `Failed`.
    pub async fn submit(&mut self) -> bool {
        if !self.can_submit() {
            return false;
        }

        let brands = self.brands.active();
        info!(brands = ?brands, "starting analysis");
        self.analyzed_brands = brands.clone();
        self.transition(AnalysisState::Analyzing);

        let next = match self.ai.analyze_competitors(&brands).await {
            Ok(report) => AnalysisState::Completed(report),
            Err(e) => {
                warn!(error = %e, "analysis failed");
                AnalysisState::Failed(e.user_message())
            }
        };
        self.transition(next);
        true
    }

    /// Back to the brand form from a finished or failed analysis. Brands are kept.
    pub fn restart(&mut self) -> bool {
        match self.state {
            AnalysisState::Completed(_) | AnalysisState::Failed(_) => {
                self.transition(AnalysisState::Idle);
                true
            }
            _ => false,
        }
    }

    fn transition(&mut self, next: AnalysisState) {
        let status = next.status();
        info!(from = %self.state.status(), to = %status, "status change");
        self.state = next;
        self.status_tx.send_replace(status);
    }
}
