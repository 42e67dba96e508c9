//! Screen rendering for the terminal. Exactly one screen per status.
//!
//! Writers are generic so tests can render into a `Vec<u8>`.

use super::chart::{bar_chart, pad_display};
use crate::domain::{AnalysisReport, AnalysisStatus, BrandList, MAX_BRANDS};
use crossterm::QueueableCommand;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use std::io::{self, Write};

pub const NO_SUMMARY: &str = "No executive summary available.";
pub const NO_MARKET_DATA: &str = "Market data is still being collected...";
pub const NO_INSIGHTS: &str = "No further marketing insights.";
pub const NOT_SPECIFIED: &str = "Not specified";
pub const NO_ITEMS: &str = "(none)";

const ACCENT: Color = Color::Rgb {
    r: 0x1e,
    g: 0x40,
    b: 0xaf,
};
const POSITIVE: Color = Color::Rgb {
    r: 0x04,
    g: 0x78,
    b: 0x57,
};
const NEGATIVE: Color = Color::Rgb {
    r: 0xb9,
    g: 0x1c,
    b: 0x1c,
};
const MUTED: Color = Color::DarkGrey;

/// Which screen the current status shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    BrandForm,
    Loading,
    ErrorPanel,
    Report,
}

impl Screen {
    pub fn for_status(status: AnalysisStatus) -> Self {
        match status {
            AnalysisStatus::Idle => Screen::BrandForm,
            AnalysisStatus::Analyzing => Screen::Loading,
            AnalysisStatus::Error => Screen::ErrorPanel,
            AnalysisStatus::Completed => Screen::Report,
        }
    }
}

/// `text`, or `placeholder` when blank.
pub fn or_placeholder<'a>(text: &'a str, placeholder: &'a str) -> &'a str {
    if text.trim().is_empty() {
        placeholder
    } else {
        text
    }
}

fn heading<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    out.queue(Print("\r\n"))?
        .queue(SetForegroundColor(ACCENT))?
        .queue(SetAttribute(Attribute::Bold))?
        .queue(Print(format!("━━ {}\r\n", title)))?
        .queue(SetAttribute(Attribute::Reset))?
        .queue(ResetColor)?;
    Ok(())
}

fn label<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    out.queue(SetForegroundColor(MUTED))?
        .queue(Print(format!("{}\r\n", text)))?
        .queue(ResetColor)?;
    Ok(())
}

fn line<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    out.queue(Print(format!("{}\r\n", text)))?;
    Ok(())
}

fn bullets<W: Write>(out: &mut W, items: &[String], marker: &str) -> io::Result<()> {
    if items.is_empty() {
        return line(out, &format!("  {}", NO_ITEMS));
    }
    for item in items {
        line(out, &format!("  {} {}", marker, item))?;
    }
    Ok(())
}

/// Brand input form: numbered slots and the slot counter.
pub fn render_brand_form<W: Write>(out: &mut W, brands: &BrandList) -> io::Result<()> {
    heading(out, "Multi-brand competitive benchmark")?;
    label(
        out,
        "Enter 1-5 brands for a consulting-grade strategic analysis.",
    )?;
    for (i, brand) in brands.slots().iter().enumerate() {
        let shown = if brand.trim().is_empty() {
            "<empty>"
        } else {
            brand.as_str()
        };
        line(out, &format!("  0{}  {}", i + 1, shown))?;
    }
    label(out, &format!("{}/{} brands", brands.len(), MAX_BRANDS))?;
    out.flush()
}

/// Error panel shown after a failed analysis.
pub fn render_error_panel<W: Write>(out: &mut W, message: &str) -> io::Result<()> {
    out.queue(Print("\r\n"))?
        .queue(SetForegroundColor(NEGATIVE))?
        .queue(SetAttribute(Attribute::Bold))?
        .queue(Print("Report generation failed\r\n"))?
        .queue(SetAttribute(Attribute::Reset))?
        .queue(ResetColor)?;
    line(out, message)?;
    out.flush()
}

/// Full report view: five numbered sections plus sources.
pub fn render_report<W: Write>(
    out: &mut W,
    report: &AnalysisReport,
    brands: &[String],
    model: &str,
) -> io::Result<()> {
    out.queue(SetAttribute(Attribute::Bold))?
        .queue(Print("\r\nCompetitive Strategy Benchmark Report\r\n"))?
        .queue(SetAttribute(Attribute::Reset))?;
    label(
        out,
        &format!(
            "STRATEGIC INTELLIGENCE / CONFIDENTIAL | Brands: {} | Model: {}",
            brands.join(", "),
            model
        ),
    )?;

    heading(out, "01. Executive Summary")?;
    line(out, or_placeholder(&report.executive_summary, NO_SUMMARY))?;

    heading(out, "02. Industry & Market Landscape")?;
    let market = &report.market_landscape;
    label(out, "Market size & positioning")?;
    line(out, or_placeholder(&market.market_size, NO_MARKET_DATA))?;
    if !market.competitive_landscape.trim().is_empty() {
        line(out, &market.competitive_landscape)?;
    }
    label(out, "Key trends")?;
    bullets(out, &market.trends, "•")?;

    heading(out, "03. Competitor Deep Dive")?;
    if report.competitors.is_empty() {
        line(out, NO_ITEMS)?;
    }
    for competitor in &report.competitors {
        out.queue(Print("\r\n"))?
            .queue(SetAttribute(Attribute::Bold))?
            .queue(Print(format!("[{}] ", competitor.name)))?
            .queue(SetAttribute(Attribute::Reset))?
            .queue(Print(format!("{}\r\n", competitor.positioning)))?;
        label(
            out,
            &format!(
                "Target audience: {}",
                competitor
                    .target_audience
                    .as_deref()
                    .map(|a| or_placeholder(a, NOT_SPECIFIED))
                    .unwrap_or(NOT_SPECIFIED)
            ),
        )?;
        if !competitor.metrics.is_empty() {
            label(out, "Mentions by platform")?;
            let rows: Vec<(String, f64)> = competitor
                .metrics
                .iter()
                .map(|m| (m.platform.clone(), m.mention_count))
                .collect();
            for chart_line in bar_chart(&rows, None) {
                line(out, &format!("  {}", chart_line))?;
            }
            for metric in &competitor.metrics {
                label(
                    out,
                    &format!(
                        "  {} sentiment {:.0} | hot topic: {}",
                        pad_display(&metric.platform, 12),
                        metric.sentiment_score,
                        or_placeholder(&metric.hot_topic, NO_ITEMS)
                    ),
                )?;
            }
        }
        out.queue(SetForegroundColor(POSITIVE))?;
        line(out, "Strengths")?;
        out.queue(ResetColor)?;
        bullets(out, &competitor.strengths, "+")?;
        out.queue(SetForegroundColor(NEGATIVE))?;
        line(out, "Weaknesses")?;
        out.queue(ResetColor)?;
        bullets(out, &competitor.weaknesses, "-")?;
    }

    heading(out, "04. Strategic Comparison Matrix")?;
    let matrix = report.comparison_matrix();
    if matrix.is_empty() {
        line(out, NO_ITEMS)?;
    }
    for row in &matrix.rows {
        label(out, &row.dimension)?;
        let scored: Vec<(String, f64)> = matrix
            .brands
            .iter()
            .zip(&row.scores)
            .filter_map(|(brand, score)| score.map(|s| (brand.clone(), s)))
            .collect();
        for chart_line in bar_chart(&scored, Some(100.0)) {
            line(out, &format!("  {}", chart_line))?;
        }
    }
    label(out, "Marketing insights")?;
    line(out, or_placeholder(&report.marketing_insights, NO_INSIGHTS))?;

    heading(out, "05. Strategy & Action Plan")?;
    if report.action_plan.is_empty() {
        line(out, NO_ITEMS)?;
    }
    for phase in &report.action_plan {
        out.queue(SetForegroundColor(ACCENT))?;
        line(out, &phase.phase)?;
        out.queue(ResetColor)?;
        bullets(out, &phase.steps, "•")?;
    }

    heading(out, "Sources")?;
    if report.sources.is_empty() {
        line(out, NO_ITEMS)?;
    }
    for source in &report.sources {
        line(out, &format!("  {} <{}>", source.title, source.uri))?;
    }

    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        BrandScore, ComparisonDimension, CompetitorProfile, PlatformMetric, Source,
    };

    fn render(report: &AnalysisReport) -> String {
        let mut buf = Vec::new();
        render_report(&mut buf, report, &["蔚来".to_string()], "mock").unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_screen_for_status() {
        assert_eq!(Screen::for_status(AnalysisStatus::Idle), Screen::BrandForm);
        assert_eq!(Screen::for_status(AnalysisStatus::Analyzing), Screen::Loading);
        assert_eq!(Screen::for_status(AnalysisStatus::Error), Screen::ErrorPanel);
        assert_eq!(Screen::for_status(AnalysisStatus::Completed), Screen::Report);
    }

    #[test]
    fn test_empty_report_renders_placeholders() {
        let text = render(&AnalysisReport::default());
        assert!(text.contains(NO_SUMMARY));
        assert!(text.contains(NO_MARKET_DATA));
        assert!(text.contains(NO_INSIGHTS));
        assert!(text.contains("05. Strategy & Action Plan"));
    }

    #[test]
    fn test_report_renders_all_sections() {
        let report = AnalysisReport {
            executive_summary: "领先".into(),
            competitors: vec![CompetitorProfile {
                name: "蔚来".into(),
                positioning: "高端".into(),
                target_audience: None,
                metrics: vec![PlatformMetric {
                    platform: "微博".into(),
                    mention_count: 1200.0,
                    sentiment_score: 70.0,
                    hot_topic: "换电".into(),
                }],
                strengths: vec!["服务".into()],
                weaknesses: vec![],
            }],
            strategic_comparison: vec![ComparisonDimension {
                dimension: "知名度".into(),
                values: vec![BrandScore {
                    brand: "蔚来".into(),
                    score: 80.0,
                }],
            }],
            sources: vec![Source {
                title: "36氪".into(),
                uri: "https://36kr.com".into(),
            }],
            ..Default::default()
        };
        let text = render(&report);
        assert!(text.contains("[蔚来] "));
        assert!(text.contains(&format!("Target audience: {}", NOT_SPECIFIED)));
        assert!(text.contains("1200"));
        assert!(text.contains("hot topic: 换电"));
        assert!(text.contains("+ 服务"));
        assert!(text.contains("知名度"));
        assert!(text.contains(" 80"));
        assert!(text.contains("36氪 <https://36kr.com>"));
    }

    #[test]
    fn test_metric_without_hot_topic_keeps_sentiment() {
        let report = AnalysisReport {
            competitors: vec![CompetitorProfile {
                name: "理想".into(),
                metrics: vec![PlatformMetric {
                    platform: "抖音".into(),
                    mention_count: 300.0,
                    sentiment_score: 64.0,
                    hot_topic: String::new(),
                }],
                ..Default::default()
            }],
            ..Default::default()
        };
        let text = render(&report);
        assert!(text.contains("sentiment 64"));
        assert!(text.contains(&format!("hot topic: {}", NO_ITEMS)));
    }

    #[test]
    fn test_brand_form_lists_slots() {
        let mut brands = BrandList::new();
        brands.update_slot(0, "蔚来");
        brands.add_slot();
        let mut buf = Vec::new();
        render_brand_form(&mut buf, &brands).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("01  蔚来"));
        assert!(text.contains("02  <empty>"));
        assert!(text.contains("2/5 brands"));
    }

    #[test]
    fn test_error_panel_shows_message() {
        let mut buf = Vec::new();
        render_error_panel(&mut buf, "AI service returned 403: denied").unwrap();
        assert!(String::from_utf8(buf).unwrap().contains("403: denied"));
    }
}
