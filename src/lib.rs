//! # Seismic Report
//!
//! A Rust crate for turning seismic facies segmentation results into
//! reviewable artifacts.
//!
//! This library provides:
//! - Colorization of per-pixel facies class masks with a fixed palette
//! - Alpha-blended overlays of the colorized mask on the original seismic line
//! - Helpers for the segmentation backend's JSON contract
//! - A paginated A4 PDF report with a repeated institutional header
//!
//! ## Example
//!
//! ```rust,no_run
//! use seismic_report::{process_response, ReportConfig};
//!
//! let original = std::fs::read("linea_01.png")?;
//! let body = r#"{"mask": "...", "texto_analisis": "Reflectores continuos."}"#;
//! let outcome = process_response(&original, "Línea sísmica: linea_01.png", body, &ReportConfig::default())?;
//! std::fs::write("informe.pdf", &outcome.report_pdf)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use image::RgbImage;
use tracing::{debug, warn};

pub mod backend;
pub mod config;
pub mod constants;
pub mod error;
pub mod image_loader;
pub mod mask;
pub mod report;

pub use backend::{BackendResponse, UploadPayload};
pub use config::{OverlayOptions, PanelArrangement, ReportConfig};
pub use error::{ReportError, Result};
pub use mask::{colorize, overlay, overlay_with, ClassMask};
pub use report::{render_report, ImageSource, ReportModel};

/// Artifacts produced for one analyzed seismic line
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOutcome {
    /// Locally rendered PDF report
    pub report_pdf: Vec<u8>,
    /// Overlay as a standalone PNG; `None` when no usable mask was returned
    pub overlay_png: Option<Vec<u8>>,
    /// Interpretation text shown in the report
    pub interpretation: String,
    /// PDF generated by the backend itself, passed through untouched
    pub backend_pdf: Option<Vec<u8>>,
}

/// Run the post-segmentation pipeline on one backend response
///
/// # Arguments
///
/// * `original` - Encoded bytes of the uploaded seismic line
/// * `title` - Report title, shown above the panels
/// * `response_body` - JSON body returned by the segmentation backend
/// * `config` - Report layout and overlay options
///
/// # Returns
///
/// An `AnalysisOutcome` holding the report PDF, the overlay PNG when the
/// backend returned a decodable mask, and the interpretation text.
///
/// # Errors
///
/// Returns `ReportError` if:
/// - The original image cannot be decoded (`ReportError::OriginalImageError`)
/// - The response body is not a JSON object
/// - The configuration is invalid or the PDF cannot be written
///
/// A missing or undecodable mask only drops the overlay; a missing
/// interpretation falls back to a fixed default text.
pub fn process_response(
    original: &[u8],
    title: &str,
    response_body: &str,
    config: &ReportConfig,
) -> Result<AnalysisOutcome> {
    let original = image_loader::decode_rgb(original).map_err(ReportError::original_image)?;
    let response = BackendResponse::from_json(response_body)?;
    debug!(width = original.width(), height = original.height(), "original decoded");

    let overlay_image = match build_overlay(&original, &response, &config.overlay) {
        Ok(image) => image,
        Err(e) => {
            warn!(error = %e, "mask unusable, report will have no overlay");
            None
        }
    };
    let overlay_png = overlay_image
        .as_ref()
        .map(image_loader::encode_png)
        .transpose()?;

    let interpretation = response.interpretation_or_default();
    let backend_pdf = response.decode_pdf().unwrap_or_else(|e| {
        warn!(error = %e, "backend pdf unusable, ignoring");
        None
    });

    let model = ReportModel {
        title: title.to_string(),
        original: ImageSource::Decoded(original),
        overlay: overlay_image.map(ImageSource::Decoded),
        interpretation: interpretation.clone(),
    };
    let report_pdf = render_report(&model, config)?;

    Ok(AnalysisOutcome {
        report_pdf,
        overlay_png,
        interpretation,
        backend_pdf,
    })
}

fn build_overlay(
    original: &RgbImage,
    response: &BackendResponse,
    options: &OverlayOptions,
) -> Result<Option<RgbImage>> {
    let Some(bytes) = response.decode_mask()? else {
        debug!("response carries no mask");
        return Ok(None);
    };
    let mask = ClassMask::decode(&bytes)?;
    debug!(width = mask.width(), height = mask.height(), "mask decoded");
    let colorized = colorize(&mask);
    Ok(Some(overlay_with(original, &colorized, options)))
}
