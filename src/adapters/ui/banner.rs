//! Startup banner: figlet "COMPETE" shaded from deep blue to emerald.

use crossterm::QueueableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{self, Write, stdout};

const TITLE: &str = "COMPETE";
const DEEP_BLUE: (u8, u8, u8) = (0x1e, 0x40, 0xaf);
const EMERALD: (u8, u8, u8) = (0x04, 0x78, 0x57);

/// Colour for row `row` of `rows`, blending from deep blue to emerald.
fn gradient(row: usize, rows: usize) -> Color {
    let t = if rows <= 1 {
        1.0
    } else {
        row as f64 / (rows - 1) as f64
    };
    let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
    Color::Rgb {
        r: mix(DEEP_BLUE.0, EMERALD.0),
        g: mix(DEEP_BLUE.1, EMERALD.1),
        b: mix(DEEP_BLUE.2, EMERALD.2),
    }
}

/// Figlet rows for the title; the plain title when the font cannot render it.
fn banner_lines() -> Vec<String> {
    FIGfont::standard()
        .ok()
        .and_then(|font| font.convert(TITLE).map(|figure| figure.to_string()))
        .map(|art| {
            art.lines()
                .filter(|l| !l.trim().is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .filter(|rows| !rows.is_empty())
        .unwrap_or_else(|| vec![TITLE.to_string()])
}

fn render_banner<W: Write>(out: &mut W, rows: &[String]) -> io::Result<()> {
    for (i, row) in rows.iter().enumerate() {
        out.queue(SetForegroundColor(gradient(i, rows.len())))?
            .queue(Print(format!("{}\r\n", row)))?;
    }
    out.queue(SetForegroundColor(gradient(1, 1)))?
        .queue(Print(format!(
            "v{} Consulting Edition | Gemini + Search Grounding\r\n",
            env!("CARGO_PKG_VERSION")
        )))?
        .queue(ResetColor)?;
    out.flush()
}

/// Prints the welcome banner. Terminal write failures are ignored.
pub fn print_welcome() {
    let _ = render_banner(&mut stdout(), &banner_lines());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_endpoints() {
        let Color::Rgb { r, g, b } = gradient(0, 6) else {
            panic!("expected rgb");
        };
        assert_eq!((r, g, b), DEEP_BLUE);
        let Color::Rgb { r, g, b } = gradient(5, 6) else {
            panic!("expected rgb");
        };
        assert_eq!((r, g, b), EMERALD);
    }

    #[test]
    fn test_banner_lines_are_owned_rows() {
        let rows = banner_lines();
        assert!(rows.len() > 1);
        assert!(rows.iter().all(|r| !r.trim().is_empty()));
    }

    #[test]
    fn test_render_banner_includes_version() {
        let mut buf = Vec::new();
        render_banner(&mut buf, &["ROW".to_string()]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("ROW\r\n"));
        assert!(text.contains(env!("CARGO_PKG_VERSION")));
    }
}
