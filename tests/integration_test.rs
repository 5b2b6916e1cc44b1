//! Integration tests for the response-to-report pipeline
//!
//! These tests drive the public API end to end:
//! - Mask colorization and overlay compositing
//! - Backend field fallbacks and data-URI payloads
//! - Pagination of long interpretation texts
//! - Degraded output when the mask is unusable

use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine as _;
use image::{Luma, Rgb, RgbImage};
use lopdf::Document;
use ndarray::array;
use seismic_report::constants::backend::DEFAULT_INTERPRETATION;
use seismic_report::image_loader::{decode_rgb, encode_png};
use seismic_report::{
    colorize, overlay, process_response, render_report, BackendResponse, ClassMask, ImageSource,
    ReportConfig, ReportError, ReportModel, UploadPayload,
};

fn config_without_logos() -> ReportConfig {
    let mut config = ReportConfig::default();
    config.header.left_logo = None;
    config.header.right_logo = None;
    config
}

fn gray_png(width: u32, height: u32, value: u8) -> Vec<u8> {
    let mask = image::GrayImage::from_pixel(width, height, Luma([value]));
    let mut out = Vec::new();
    mask.write_to(&mut std::io::Cursor::new(&mut out), image::ImageFormat::Png)
        .unwrap();
    out
}

fn page_count(pdf: &[u8]) -> usize {
    Document::load_mem(pdf).unwrap().get_pages().len()
}

// ============================================================================
// Colorize and Overlay
// ============================================================================

#[test]
fn test_two_by_two_scenario() {
    let mask = ClassMask::from_array2(array![[0, 1], [2, 0]]);
    let colorized = colorize(&mask);
    assert_eq!(colorized.get_pixel(0, 0), &Rgb([0, 0, 0]));
    assert_eq!(colorized.get_pixel(1, 0), &Rgb([165, 42, 42]));
    assert_eq!(colorized.get_pixel(0, 1), &Rgb([0, 0, 255]));
    assert_eq!(colorized.get_pixel(1, 1), &Rgb([0, 0, 0]));

    let original = RgbImage::from_pixel(2, 2, Rgb([100, 100, 100]));
    let blended = overlay(&original, &colorized, 0.5);
    assert_eq!(blended.get_pixel(0, 0), &Rgb([100, 100, 100]));
    assert_eq!(blended.get_pixel(1, 0), &Rgb([133, 71, 71]));
    assert_eq!(blended.get_pixel(0, 1), &Rgb([50, 50, 178]));
    assert_eq!(blended.get_pixel(1, 1), &Rgb([100, 100, 100]));
}

#[test]
fn test_unknown_classes_render_black() {
    let mask = ClassMask::from_array2(array![[15, -1], [999, 14]]);
    let colorized = colorize(&mask);
    assert_eq!(colorized.get_pixel(0, 0), &Rgb([0, 0, 0]));
    assert_eq!(colorized.get_pixel(1, 0), &Rgb([0, 0, 0]));
    assert_eq!(colorized.get_pixel(0, 1), &Rgb([0, 0, 0]));
    assert_ne!(colorized.get_pixel(1, 1), &Rgb([0, 0, 0]));
}

// ============================================================================
// Backend Response Pipeline
// ============================================================================

#[test]
fn test_truncated_mask_payload_yields_default_report() {
    let original = encode_png(&RgbImage::from_pixel(16, 8, Rgb([80, 80, 80]))).unwrap();
    let body = r#"{"mask": "data:image/png;base64,AAAA"}"#;

    let outcome = process_response(&original, "Línea 7", body, &config_without_logos()).unwrap();

    assert_eq!(outcome.interpretation, DEFAULT_INTERPRETATION);
    assert!(outcome.overlay_png.is_none());
    assert!(outcome.report_pdf.starts_with(b"%PDF"));
    assert_eq!(page_count(&outcome.report_pdf), 1);
}

#[test]
fn test_mismatched_mask_is_resampled_to_original() {
    let original = encode_png(&RgbImage::from_pixel(40, 20, Rgb([100, 100, 100]))).unwrap();
    let mask = gray_png(10, 5, 1);
    let body = serde_json::json!({
        "image": format!("data:image/png;base64,{}", B64.encode(&mask)),
        "technical_report": "Unidad 1 en toda la sección.",
    })
    .to_string();

    let outcome = process_response(&original, "Línea 3", &body, &config_without_logos()).unwrap();

    let overlay = decode_rgb(&outcome.overlay_png.unwrap()).unwrap();
    assert_eq!(overlay.dimensions(), (40, 20));
    assert_eq!(overlay.get_pixel(39, 19), &Rgb([133, 71, 71]));
    assert_eq!(outcome.interpretation, "Unidad 1 en toda la sección.");
}

#[test]
fn test_backend_pdf_passthrough() {
    let original = encode_png(&RgbImage::from_pixel(4, 4, Rgb([1, 2, 3]))).unwrap();
    let body = serde_json::json!({
        "pdf": B64.encode(b"%PDF-1.4 backend"),
        "summary": { "text": "Resumen anidado" },
    })
    .to_string();

    let outcome = process_response(&original, "x", &body, &config_without_logos()).unwrap();
    assert_eq!(outcome.backend_pdf.as_deref(), Some(&b"%PDF-1.4 backend"[..]));
    assert_eq!(outcome.interpretation, "Resumen anidado");
}

#[test]
fn test_non_object_response_rejected() {
    let original = encode_png(&RgbImage::from_pixel(4, 4, Rgb([1, 2, 3]))).unwrap();
    let err = process_response(&original, "x", "[1, 2]", &config_without_logos()).unwrap_err();
    assert!(matches!(err, ReportError::BackendResponseError { .. }));
}

#[test]
fn test_upload_payload_round_trips_image() {
    let png = gray_png(3, 3, 7);
    let payload = UploadPayload::from_bytes(&png, "linea.png");
    let json: serde_json::Value = serde_json::from_str(&payload.to_json().unwrap()).unwrap();
    assert_eq!(json["filename"], "linea.png");
    assert_eq!(json["mode"], "standard");

    // what the backend would echo back as a mask decodes to the same bytes
    let response = BackendResponse::from_value(serde_json::json!({ "mask": json["image"] })).unwrap();
    assert_eq!(response.decode_mask().unwrap(), Some(png));
}

// ============================================================================
// Report Rendering
// ============================================================================

#[test]
fn test_long_interpretation_spans_pages() {
    let paragraph = "La sección muestra reflectores **subparalelos** de amplitud media \
                     con terminaciones en onlap sobre la discordancia basal.";
    let text: Vec<String> = (1..=40)
        .map(|i| format!("## Unidad {}\n{}\n", i, paragraph))
        .collect();
    let model = ReportModel {
        title: "Línea sísmica: larga.png".into(),
        original: ImageSource::Decoded(RgbImage::from_pixel(300, 100, Rgb([90, 90, 90]))),
        overlay: Some(ImageSource::Decoded(RgbImage::from_pixel(300, 100, Rgb([0, 128, 0])))),
        interpretation: text.join("\n"),
    };

    let pdf = render_report(&model, &config_without_logos()).unwrap();
    assert!(page_count(&pdf) >= 3);
}

#[test]
fn test_missing_panel_file_still_renders() {
    let model = ReportModel {
        title: "Sin imagen".into(),
        original: ImageSource::File("tests/assets/missing.png".into()),
        overlay: None,
        interpretation: "Texto".into(),
    };
    let pdf = render_report(&model, &config_without_logos()).unwrap();
    assert_eq!(page_count(&pdf), 1);
}

#[test]
fn test_missing_default_logos_do_not_fail() {
    // default config points at assets/ which the test run may not have
    let model = ReportModel {
        title: "Logos".into(),
        original: ImageSource::Decoded(RgbImage::from_pixel(10, 10, Rgb([5, 5, 5]))),
        overlay: None,
        interpretation: String::new(),
    };
    let pdf = render_report(&model, &ReportConfig::default()).unwrap();
    assert!(pdf.starts_with(b"%PDF"));
}
