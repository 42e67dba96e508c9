//! Mock AI adapter for running without API calls.
//!
//! Returns a deterministic report built from the requested brand names.

use crate::domain::{
    ActionPhase, AnalysisReport, BrandScore, ComparisonDimension, CompetitorProfile,
    DomainError, MarketLandscape, PlatformMetric, Source,
};
use crate::ports::AiPort;
use std::time::Duration;
use tracing::info;

const PLATFORMS: [&str; 3] = ["Weibo", "Xiaohongshu", "Douyin"];
const DIMENSIONS: [&str; 4] = [
    "Brand awareness",
    "Loyalty",
    "Product strength",
    "Marketing efficiency",
];

/// Mock AI adapter.
///
/// Produces one competitor profile per brand, in request order.
/// Simulates network latency with configurable delay.
pub struct MockAiAdapter {
    /// Simulated network delay in milliseconds.
    delay_ms: u64,
}

impl MockAiAdapter {
    /// Create a new mock adapter with default delay (800ms).
    pub fn new() -> Self {
        Self { delay_ms: 800 }
    }

    /// Create a mock adapter with custom delay.
    pub fn with_delay(delay_ms: u64) -> Self {
        Self { delay_ms }
    }

    fn profile(index: usize, brand: &str) -> CompetitorProfile {
        let base = 1000.0 * (index as f64 + 1.0);
        CompetitorProfile {
            name: brand.to_string(),
            positioning: format!("[MOCK] {} positioning statement", brand),
            target_audience: Some("[MOCK] Urban professionals aged 25-40".to_string()),
            metrics: PLATFORMS
                .iter()
                .enumerate()
                .map(|(p, platform)| PlatformMetric {
                    platform: platform.to_string(),
                    mention_count: base * (p as f64 + 1.0),
                    sentiment_score: 60.0 + (index * 5 + p * 3) as f64,
                    hot_topic: format!("[MOCK] {} on {}", brand, platform),
                })
                .collect(),
            strengths: vec![format!("[MOCK] {} community engagement", brand)],
            weaknesses: vec![format!("[MOCK] {} price perception", brand)],
        }
    }
}

impl Default for MockAiAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl AiPort for MockAiAdapter {
    async fn analyze_competitors(&self, brands: &[String]) -> Result<AnalysisReport, DomainError> {
        info!(brands = brands.len(), "[MOCK] Simulating competitor analysis");

        tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;

        let competitors: Vec<CompetitorProfile> = brands
            .iter()
            .enumerate()
            .map(|(i, b)| Self::profile(i, b))
            .collect();

        let strategic_comparison = DIMENSIONS
            .iter()
            .enumerate()
            .map(|(d, dimension)| ComparisonDimension {
                dimension: dimension.to_string(),
                values: brands
                    .iter()
                    .enumerate()
                    .map(|(i, b)| BrandScore {
                        brand: b.clone(),
                        score: (90 - ((i * 7 + d * 11) % 40)) as f64,
                    })
                    .collect(),
            })
            .collect();

        Ok(AnalysisReport {
            executive_summary: format!(
                "[MOCK] Simulated benchmark of {}. In a real run this holds the \
                 top-line conclusions drawn from grounded web data.",
                brands.join(", ")
            ),
            market_landscape: MarketLandscape {
                market_size: "[MOCK] Market size estimate".to_string(),
                trends: vec![
                    "[MOCK] Trend 1: Social commerce".to_string(),
                    "[MOCK] Trend 2: Community-led growth".to_string(),
                ],
                competitive_landscape: "[MOCK] Competitive landscape overview".to_string(),
            },
            competitors,
            strategic_comparison,
            marketing_insights: "[MOCK] Marketing insights summary".to_string(),
            action_plan: vec![
                ActionPhase {
                    phase: "[MOCK] Phase 1 (0-3 months)".to_string(),
                    steps: vec!["[MOCK] Audit channel mix".to_string()],
                },
                ActionPhase {
                    phase: "[MOCK] Phase 2 (3-12 months)".to_string(),
                    steps: vec!["[MOCK] Scale best-performing content".to_string()],
                },
            ],
            sources: vec![Source {
                title: "[MOCK] Example source".to_string(),
                uri: "https://example.com".to_string(),
            }],
        })
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}
