//! Paginated PDF report rendering
//!
//! Rendering happens in two steps. [`ReportRenderer`] lays the report out
//! into pages of positioned draw operations, then [`pdf::write_pdf`] turns
//! that layout into a PDF document.

pub mod cursor;
pub mod layout;
pub mod metrics;
pub mod pdf;
pub mod text;

pub use cursor::DocumentCursor;
pub use layout::{DrawOp, ImageSource, Page, ReportLayout, ReportModel, ReportRenderer};
pub use metrics::FontStyle;

use tracing::info;

use crate::config::ReportConfig;
use crate::error::Result;

/// Render a complete report to PDF bytes
///
/// # Arguments
///
/// * `model` - Title, panel images and interpretation text
/// * `config` - Page geometry, header and captions
///
/// # Errors
///
/// Returns `ReportError::InvalidParameter` for an invalid configuration and
/// `ReportError::PdfError` if serialization fails. Unreadable panel images
/// and logos do not fail the report.
pub fn render_report(model: &ReportModel, config: &ReportConfig) -> Result<Vec<u8>> {
    config.validate()?;
    let layout = ReportRenderer::new(config).render(model);
    let bytes = pdf::write_pdf(&layout)?;
    info!(pages = layout.pages.len(), bytes = bytes.len(), "report rendered");
    Ok(bytes)
}
