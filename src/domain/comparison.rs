//! Strategic comparison pivot. Turns per-dimension score lists into a
//! dimension x brand matrix for charts and tables.

use super::entities::AnalysisReport;

/// Scores pivoted by dimension (rows) and brand (columns).
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonMatrix {
    pub brands: Vec<String>,
    pub rows: Vec<ComparisonRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub dimension: String,
    /// One entry per `ComparisonMatrix::brands`; `None` when the model gave no score.
    pub scores: Vec<Option<f64>>,
}

impl ComparisonMatrix {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl AnalysisReport {
    /// Pivot `strategic_comparison` into a matrix.
    ///
    /// Column order follows the competitor profiles, then any brand that only
    /// shows up in the scores, in first-seen order. A brand scored twice on
    /// the same dimension keeps the last score.
    pub fn comparison_matrix(&self) -> ComparisonMatrix {
        let mut brands: Vec<String> = Vec::new();
        for name in self.competitors.iter().map(|c| c.name.as_str()) {
            if !name.is_empty() && !brands.iter().any(|b| b == name) {
                brands.push(name.to_string());
            }
        }
        for value in self.strategic_comparison.iter().flat_map(|d| &d.values) {
            if !value.brand.is_empty() && !brands.iter().any(|b| *b == value.brand) {
                brands.push(value.brand.clone());
            }
        }

        let rows = self
            .strategic_comparison
            .iter()
            .map(|dim| {
                let mut scores = vec![None; brands.len()];
                for value in &dim.values {
                    if let Some(col) = brands.iter().position(|b| *b == value.brand) {
                        scores[col] = Some(value.score);
                    }
                }
                ComparisonRow {
                    dimension: dim.dimension.clone(),
                    scores,
                }
            })
            .collect();

        ComparisonMatrix { brands, rows }
    }
}
