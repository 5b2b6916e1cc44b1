//! Fixed tables and default values for mask rendering and report layout
//!
//! This module contains the facies palette, the overlay blending defaults,
//! the page geometry used by the report renderer, and the backend field
//! fallback lists.

/// Facies class palette
///
/// Class 0 is reserved for "no detection" and maps to black. The table is
/// indexed directly by class ID.
pub mod facies {
    /// Number of class IDs with a display color
    pub const CLASS_COUNT: usize = 15;

    /// RGB color for each class ID 0..14
    pub const PALETTE: [[u8; 3]; CLASS_COUNT] = [
        [0, 0, 0],       // 0 background
        [165, 42, 42],   // 1 brown
        [0, 0, 255],     // 2 blue
        [0, 255, 0],     // 3 green
        [255, 255, 0],   // 4 yellow
        [255, 0, 0],     // 5 red
        [255, 165, 0],   // 6 orange
        [128, 0, 128],   // 7 purple
        [0, 255, 255],   // 8 cyan
        [255, 0, 255],   // 9 magenta
        [128, 128, 0],   // 10 olive
        [0, 128, 128],   // 11 teal
        [255, 192, 203], // 12 pink
        [128, 128, 128], // 13 gray
        [255, 255, 255], // 14 white
    ];

    /// Color written for IDs with no palette entry
    pub const UNMAPPED: [u8; 3] = [0, 0, 0];
}

/// Overlay blending defaults
pub mod overlay {
    /// Default blend weight toward the colorized mask
    pub const DEFAULT_ALPHA: f32 = 0.5;

    /// Mean channel value (0-255) at or below which a mask pixel counts as background
    pub const BACKGROUND_THRESHOLD: f32 = 5.0;
}

/// Page geometry in PDF points (1/72 inch)
pub mod page {
    /// A4 portrait width
    pub const A4_WIDTH: f32 = 595.28;

    /// A4 portrait height
    pub const A4_HEIGHT: f32 = 841.89;

    /// Inset from every page edge
    pub const EDGE_MARGIN: f32 = 50.0;

    /// Lowest y a content unit may reach before a page break
    pub const BOTTOM_MARGIN: f32 = 70.0;

    /// Baseline of the continuation / closing footer caption
    pub const FOOTER_Y: f32 = 30.0;

    /// Logo box edge length
    pub const LOGO_SIZE: f32 = 60.0;

    /// Height of one image panel box
    pub const PANEL_HEIGHT: f32 = 230.0;

    /// Horizontal gap between side-by-side panels
    pub const PANEL_GAP: f32 = 16.0;
}

/// Text sizes and leading in points
pub mod typography {
    pub const TITLE_SIZE: f32 = 14.0;
    pub const SUBTITLE_SIZE: f32 = 11.0;
    pub const SECTION_SIZE: f32 = 13.0;
    pub const BODY_SIZE: f32 = 10.0;
    pub const BODY_LEADING: f32 = 14.0;
    pub const HEADING_SIZE: f32 = 11.5;
    pub const HEADING_LEADING: f32 = 20.0;
    pub const CAPTION_SIZE: f32 = 8.0;
    pub const PARAGRAPH_GAP: f32 = 6.0;
}

/// Ordered field names tried when reading the orchestrator response
pub mod backend {
    /// Base64 class-mask image
    pub const MASK_FIELDS: &[&str] = &["imagen_procesada", "mask", "image"];

    /// Interpretation text, flat fields
    pub const TEXT_FIELDS: &[&str] = &["texto_analisis", "technical_report", "text", "descripcion"];

    /// Interpretation text, nested `summary.text` tried after the flat fields
    pub const NESTED_TEXT_PATH: &[&str] = &["summary", "text"];

    /// Backend-generated PDF report
    pub const PDF_FIELDS: &[&str] = &["pdf"];

    /// Text used when the response carries no interpretation
    pub const DEFAULT_INTERPRETATION: &str =
        "No se recibió una interpretación técnica del servidor.";

    /// Processing mode sent with every upload
    pub const UPLOAD_MODE: &str = "standard";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_reserved_entries() {
        assert_eq!(facies::PALETTE[0], [0, 0, 0]);
        assert_eq!(facies::PALETTE[1], [165, 42, 42]);
        assert_eq!(facies::PALETTE[2], [0, 0, 255]);
    }

    #[test]
    fn test_non_background_classes_clear_threshold() {
        // Every real class must be treated as "inside" by the overlay
        for rgb in &facies::PALETTE[1..] {
            let mean = rgb.iter().map(|&c| c as f32).sum::<f32>() / 3.0;
            assert!(mean > overlay::BACKGROUND_THRESHOLD);
        }
    }

    #[test]
    fn test_page_margins() {
        assert!(page::BOTTOM_MARGIN > page::EDGE_MARGIN);
        assert!(page::FOOTER_Y < page::BOTTOM_MARGIN);
        assert!(page::A4_HEIGHT > page::A4_WIDTH);
    }
}
