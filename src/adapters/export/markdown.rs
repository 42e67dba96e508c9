//! Markdown consulting document. The printable view of a completed report.
//!
//! Written atomically: temp file, sync, rename.

use crate::adapters::ui::chart::{bar, format_value};
use crate::adapters::ui::view::{
    NO_INSIGHTS, NO_ITEMS, NO_MARKET_DATA, NO_SUMMARY, NOT_SPECIFIED, or_placeholder,
};
use crate::domain::{AnalysisReport, DomainError};
use crate::ports::ReportExportPort;
use chrono::{DateTime, Local};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::info;

/// Sources listed in the document footer.
const MAX_FOOTER_SOURCES: usize = 5;

/// Score bar width in the comparison table.
const SCORE_BAR_WIDTH: usize = 10;

const DISCLAIMER: &str = "This report is generated by AI from public internet data and is for \
strategic reference only. Consult industry experts or verify through multiple channels before \
making major investment or business decisions.";

/// Escape characters that would break a Markdown table cell.
fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

/// Render the full document.
pub fn render_markdown(
    brands: &[String],
    model: &str,
    report: &AnalysisReport,
    generated_at: DateTime<Local>,
) -> String {
    let mut md = String::new();

    // Cover
    md.push_str("# Competitive Strategy Benchmark Report\n\n");
    md.push_str("*STRATEGIC INTELLIGENCE / CONFIDENTIAL*\n\n");
    let _ = writeln!(md, "**Brands:** {}  ", brands.join(", "));
    let _ = writeln!(md, "**Date:** {}  ", generated_at.format("%Y-%m-%d"));
    let _ = writeln!(md, "**Model:** {} + Search Grounding\n", model);
    md.push_str("---\n\n");

    md.push_str("## 01. Executive Summary\n\n");
    for quoted in or_placeholder(&report.executive_summary, NO_SUMMARY).lines() {
        let _ = writeln!(md, "> {}", quoted);
    }
    md.push('\n');

    md.push_str("## 02. Industry & Market Landscape\n\n");
    let market = &report.market_landscape;
    md.push_str("### Market size & positioning\n\n");
    let _ = writeln!(md, "{}\n", or_placeholder(&market.market_size, NO_MARKET_DATA));
    if !market.competitive_landscape.trim().is_empty() {
        let _ = writeln!(md, "{}\n", market.competitive_landscape);
    }
    md.push_str("### Key trends\n\n");
    push_list(&mut md, &market.trends);

    md.push_str("## 03. Competitor Deep Dive\n\n");
    if report.competitors.is_empty() {
        let _ = writeln!(md, "{}\n", NO_ITEMS);
    }
    for competitor in &report.competitors {
        let _ = writeln!(md, "### {}\n", competitor.name);
        let _ = writeln!(md, "**Positioning:** {}  ", competitor.positioning);
        let audience = competitor
            .target_audience
            .as_deref()
            .map(|a| or_placeholder(a, NOT_SPECIFIED))
            .unwrap_or(NOT_SPECIFIED);
        let _ = writeln!(md, "**Target audience:** {}\n", audience);

        if !competitor.metrics.is_empty() {
            let max = competitor
                .metrics
                .iter()
                .map(|m| m.mention_count)
                .fold(0.0, f64::max);
            md.push_str("| Platform | Mentions | | Sentiment | Hot topic |\n");
            md.push_str("|---|---:|---|---:|---|\n");
            for m in &competitor.metrics {
                let _ = writeln!(
                    md,
                    "| {} | {} | `{}` | {} | {} |",
                    cell(&m.platform),
                    format_value(m.mention_count),
                    bar(m.mention_count, max, SCORE_BAR_WIDTH),
                    format_value(m.sentiment_score),
                    cell(&m.hot_topic)
                );
            }
            md.push('\n');
        }

        md.push_str("**Strengths**\n\n");
        push_list(&mut md, &competitor.strengths);
        md.push_str("**Weaknesses**\n\n");
        push_list(&mut md, &competitor.weaknesses);
    }

    md.push_str("## 04. Strategic Comparison Matrix\n\n");
    let matrix = report.comparison_matrix();
    if matrix.is_empty() {
        let _ = writeln!(md, "{}\n", NO_ITEMS);
    } else {
        md.push_str("| Dimension |");
        for brand in &matrix.brands {
            let _ = write!(md, " {} |", cell(brand));
        }
        md.push_str("\n|---|");
        md.push_str(&"---|".repeat(matrix.brands.len()));
        md.push('\n');
        for row in &matrix.rows {
            let _ = write!(md, "| {} |", cell(&row.dimension));
            for score in &row.scores {
                match score {
                    Some(s) => {
                        let _ = write!(
                            md,
                            " {} `{}` |",
                            format_value(*s),
                            bar(*s, 100.0, SCORE_BAR_WIDTH)
                        );
                    }
                    None => md.push_str(" – |"),
                }
            }
            md.push('\n');
        }
        md.push('\n');
    }
    md.push_str("### Marketing insights\n\n");
    let _ = writeln!(
        md,
        "{}\n",
        or_placeholder(&report.marketing_insights, NO_INSIGHTS)
    );

    md.push_str("## 05. Strategy & Action Plan\n\n");
    if report.action_plan.is_empty() {
        let _ = writeln!(md, "{}\n", NO_ITEMS);
    }
    for phase in &report.action_plan {
        let _ = writeln!(md, "### {}\n", phase.phase);
        push_list(&mut md, &phase.steps);
    }

    md.push_str("---\n\n");
    md.push_str("#### Disclaimer\n\n");
    let _ = writeln!(md, "{}\n", DISCLAIMER);
    md.push_str("#### Sources\n\n");
    if report.sources.is_empty() {
        let _ = writeln!(md, "{}\n", NO_ITEMS);
    } else {
        for source in report.sources.iter().take(MAX_FOOTER_SOURCES) {
            let _ = writeln!(md, "- [{}]({})", source.title, source.uri);
        }
        md.push('\n');
    }

    md
}

fn push_list(md: &mut String, items: &[String]) {
    if items.is_empty() {
        let _ = writeln!(md, "{}\n", NO_ITEMS);
        return;
    }
    for item in items {
        let _ = writeln!(md, "- {}", item);
    }
    md.push('\n');
}

/// Write `contents` to `path` via a sibling temp file, sync, then rename.
/// The temp file is removed when any step fails.
async fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), DomainError> {
    let temp_path = path.with_extension("md.tmp");
    let result = async {
        let mut f = fs::File::create(&temp_path)
            .await
            .map_err(|e| DomainError::Export(format!("create temp file: {}", e)))?;
        f.write_all(contents)
            .await
            .map_err(|e| DomainError::Export(format!("write temp file: {}", e)))?;
        f.sync_all()
            .await
            .map_err(|e| DomainError::Export(format!("sync temp file: {}", e)))?;
        drop(f);
        fs::rename(&temp_path, path)
            .await
            .map_err(|e| DomainError::Export(format!("rename failed: {}", e)))
    }
    .await;

    if result.is_err() {
        let _ = fs::remove_file(&temp_path).await;
    }
    result
}

/// First free `competitor_report_<stamp>[_n].md` in `dir`.
async fn unique_report_path(dir: &Path, stamp: &str) -> Result<PathBuf, DomainError> {
    let mut candidate = dir.join(format!("competitor_report_{}.md", stamp));
    let mut n = 1;
    while fs::try_exists(&candidate)
        .await
        .map_err(|e| DomainError::Export(format!("check report path: {}", e)))?
    {
        candidate = dir.join(format!("competitor_report_{}_{}.md", stamp, n));
        n += 1;
    }
    Ok(candidate)
}

/// Writes Markdown documents into a reports directory.
pub struct MarkdownExporter {
    reports_dir: PathBuf,
}

impl MarkdownExporter {
    pub fn new(reports_dir: impl Into<PathBuf>) -> Self {
        Self {
            reports_dir: reports_dir.into(),
        }
    }
}

#[async_trait::async_trait]
impl ReportExportPort for MarkdownExporter {
    async fn export(
        &self,
        brands: &[String],
        model: &str,
        report: &AnalysisReport,
    ) -> Result<PathBuf, DomainError> {
        fs::create_dir_all(&self.reports_dir)
            .await
            .map_err(|e| DomainError::Export(format!("create reports dir: {}", e)))?;

        let now = Local::now();
        let stamp = now.format("%Y%m%d_%H%M%S_%3f").to_string();
        let path = unique_report_path(&self.reports_dir, &stamp).await?;
        let md = render_markdown(brands, model, report, now);

        write_atomic(&path, md.as_bytes()).await?;

        info!(path = %path.display(), "report exported");
        Ok(path)
    }
}
