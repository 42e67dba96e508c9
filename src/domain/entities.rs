//! Domain entities. Pure data structures for the core business.
//!
//! No HTTP/terminal types here. The report mirrors the JSON the model is asked
//! to produce (camelCase on the wire); every field is lenient so a sparse
//! answer still deserializes and renders with placeholders.

use serde::{Deserialize, Deserializer, Serialize};

/// Maximum number of brands compared in one report.
pub const MAX_BRANDS: usize = 5;

/// Treat an explicit JSON `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Brand names being edited before submission. Always holds 1..=MAX_BRANDS slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandList {
    slots: Vec<String>,
}

impl BrandList {
    /// A list with a single empty slot.
    pub fn new() -> Self {
        Self {
            slots: vec![String::new()],
        }
    }

    pub fn slots(&self) -> &[String] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.slots.len() >= MAX_BRANDS
    }

    /// Append an empty slot. Returns false (no-op) when already at `MAX_BRANDS`.
    pub fn add_slot(&mut self) -> bool {
        if self.is_full() {
            return false;
        }
        self.slots.push(String::new());
        true
    }

    /// Remove the slot at `index`. Returns false when it is the last slot or out of range.
    pub fn remove_slot(&mut self, index: usize) -> bool {
        if self.slots.len() <= 1 || index >= self.slots.len() {
            return false;
        }
        self.slots.remove(index);
        true
    }

    /// Replace the text of slot `index`. Returns false when out of range.
    pub fn update_slot(&mut self, index: usize, text: impl Into<String>) -> bool {
        match self.slots.get_mut(index) {
            Some(slot) => {
                *slot = text.into();
                true
            }
            None => false,
        }
    }

    /// Trimmed, non-blank names in slot order. This is what gets submitted.
    pub fn active(&self) -> Vec<String> {
        self.slots
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn has_active(&self) -> bool {
        self.slots.iter().any(|s| !s.trim().is_empty())
    }
}

impl Default for BrandList {
    fn default() -> Self {
        Self::new()
    }
}

/// UI status. Exactly one holds at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisStatus {
    Idle,
    Analyzing,
    Completed,
    Error,
}

impl std::fmt::Display for AnalysisStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AnalysisStatus::Idle => "idle",
            AnalysisStatus::Analyzing => "analyzing",
            AnalysisStatus::Completed => "completed",
            AnalysisStatus::Error => "error",
        };
        f.write_str(s)
    }
}

/// A completed competitor analysis. Built once from a single model response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisReport {
    #[serde(deserialize_with = "null_as_default")]
    pub executive_summary: String,
    #[serde(deserialize_with = "null_as_default")]
    pub market_landscape: MarketLandscape,
    #[serde(deserialize_with = "null_as_default")]
    pub competitors: Vec<CompetitorProfile>,
    #[serde(deserialize_with = "null_as_default")]
    pub strategic_comparison: Vec<ComparisonDimension>,
    #[serde(deserialize_with = "null_as_default")]
    pub marketing_insights: String,
    #[serde(deserialize_with = "null_as_default")]
    pub action_plan: Vec<ActionPhase>,
    /// Citations from search grounding. Filled client-side, never by the model.
    #[serde(deserialize_with = "null_as_default")]
    pub sources: Vec<Source>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarketLandscape {
    #[serde(deserialize_with = "null_as_default")]
    pub market_size: String,
    #[serde(deserialize_with = "null_as_default")]
    pub trends: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub competitive_landscape: String,
}

/// One brand's positioning, audience, platform metrics, strengths and weaknesses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompetitorProfile {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub positioning: String,
    pub target_audience: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub metrics: Vec<PlatformMetric>,
    #[serde(deserialize_with = "null_as_default")]
    pub strengths: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub weaknesses: Vec<String>,
}

/// Social platform snapshot (e.g. Weibo, Xiaohongshu, Douyin).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlatformMetric {
    #[serde(deserialize_with = "null_as_default")]
    pub platform: String,
    #[serde(deserialize_with = "null_as_default")]
    pub mention_count: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub sentiment_score: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub hot_topic: String,
}

/// A named axis on which every analyzed brand gets a score (nominally 0-100).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComparisonDimension {
    #[serde(deserialize_with = "null_as_default")]
    pub dimension: String,
    #[serde(deserialize_with = "null_as_default")]
    pub values: Vec<BrandScore>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandScore {
    #[serde(deserialize_with = "null_as_default")]
    pub brand: String,
    #[serde(deserialize_with = "null_as_default")]
    pub score: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionPhase {
    #[serde(deserialize_with = "null_as_default")]
    pub phase: String,
    #[serde(deserialize_with = "null_as_default")]
    pub steps: Vec<String>,
}

/// Web citation taken from the response's grounding metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub title: String,
    pub uri: String,
}
