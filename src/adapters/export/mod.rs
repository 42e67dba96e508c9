//! Printable document export. Implements ReportExportPort.

pub mod markdown;

pub use markdown::{MarkdownExporter, render_markdown};
