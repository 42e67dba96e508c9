//! Text bar charts shared by the terminal view and the Markdown document.
//!
//! Labels are padded by display width so CJK brand names line up.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Bar length in cells for the largest value.
pub const BAR_WIDTH: usize = 24;

/// Widest label column before truncation.
const MAX_LABEL_WIDTH: usize = 16;

/// Partial blocks, index = eighths of a cell.
const EIGHTHS: [char; 8] = [' ', '▏', '▎', '▍', '▌', '▋', '▊', '▉'];

/// Bar for `value` on a `0..=max` scale, `width` cells long at `max`.
///
/// Non-positive or non-finite input yields an empty bar; values above `max` are capped.
pub fn bar(value: f64, max: f64, width: usize) -> String {
    if !value.is_finite() || !max.is_finite() || value <= 0.0 || max <= 0.0 || width == 0 {
        return String::new();
    }
    let ratio = (value / max).min(1.0);
    let eighths = (ratio * width as f64 * 8.0).round() as usize;
    let mut s = "█".repeat(eighths / 8);
    if eighths % 8 > 0 {
        s.push(EIGHTHS[eighths % 8]);
    }
    s
}

/// Pad `text` with trailing spaces to `width` display columns, truncating with `…`.
pub fn pad_display(text: &str, width: usize) -> String {
    let text_width = UnicodeWidthStr::width(text);
    if text_width <= width {
        return format!("{}{}", text, " ".repeat(width - text_width));
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    used += 1;
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

/// Compact number: integers without decimals, others with one.
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}

/// Labelled horizontal bars, one line per row.
///
/// Scaled to `max`, or to the largest value when `max` is `None`.
pub fn bar_chart(rows: &[(String, f64)], max: Option<f64>) -> Vec<String> {
    let scale = max.unwrap_or_else(|| rows.iter().map(|(_, v)| *v).fold(0.0, f64::max));
    let label_width = rows
        .iter()
        .map(|(label, _)| UnicodeWidthStr::width(label.as_str()))
        .max()
        .unwrap_or(0)
        .min(MAX_LABEL_WIDTH);

    rows.iter()
        .map(|(label, value)| {
            format!(
                "{}  {} {}",
                pad_display(label, label_width),
                pad_display(&bar(*value, scale, BAR_WIDTH), BAR_WIDTH),
                format_value(*value)
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_full_and_half() {
        assert_eq!(bar(100.0, 100.0, 4), "████");
        assert_eq!(bar(50.0, 100.0, 4), "██");
        assert_eq!(bar(12.5, 100.0, 1), "▏");
    }

    #[test]
    fn test_bar_degenerate_inputs() {
        assert_eq!(bar(0.0, 100.0, 10), "");
        assert_eq!(bar(-5.0, 100.0, 10), "");
        assert_eq!(bar(5.0, 0.0, 10), "");
        assert_eq!(bar(f64::NAN, 100.0, 10), "");
        assert_eq!(bar(500.0, 100.0, 3), "███");
    }

    #[test]
    fn test_pad_display_cjk() {
        assert_eq!(pad_display("蔚来", 6), "蔚来  ");
        assert_eq!(UnicodeWidthStr::width(pad_display("小红书热门话题", 8).as_str()), 8);
        assert!(pad_display("小红书热门话题", 8).contains('…'));
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(1200.0), "1200");
        assert_eq!(format_value(72.45), "72.5");
    }

    #[test]
    fn test_bar_chart_scales_to_largest() {
        let rows = vec![("微博".to_string(), 200.0), ("抖音".to_string(), 100.0)];
        let lines = bar_chart(&rows, None);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("微博  "));
        assert!(lines[0].contains(&"█".repeat(BAR_WIDTH)));
        assert!(lines[1].contains(&"█".repeat(BAR_WIDTH / 2)));
        assert!(lines[1].ends_with(" 100"));
    }
}
