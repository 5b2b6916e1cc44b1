//! Configuration structures for overlay compositing and report rendering.
//!
//! All layout and blending parameters are grouped here so a report can be
//! reproduced from a single JSON file.
//!
//! ```no_run
//! use seismic_report::ReportConfig;
//! use std::path::Path;
//!
//! // Load from file
//! let config = ReportConfig::from_json_file(Path::new("report.json"))?;
//!
//! // Or use defaults
//! let config = ReportConfig::default();
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Configuration Sections
//!
//! - [`PageConfig`]: page size and margins
//! - [`HeaderConfig`]: logos, title lines, rule color
//! - [`PanelConfig`]: image panel arrangement and captions
//! - [`TextConfig`]: interpretation section labels and footer captions
//! - [`OverlayOptions`]: mask blending parameters

use palette::Srgb;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

use crate::constants::{overlay, page};
use crate::error::{ReportError, Result};

/// Complete configuration for one report build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Page geometry
    pub page: PageConfig,

    /// Header redrawn on every page
    pub header: HeaderConfig,

    /// Image panel layout
    pub panels: PanelConfig,

    /// Text section labels
    pub text: TextConfig,

    /// Mask blending parameters
    #[serde(default)]
    pub overlay: OverlayOptions,
}

/// Page size and margins in PDF points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageConfig {
    pub width: f32,
    pub height: f32,

    /// Inset from every page edge
    pub margin: f32,

    /// Content may not extend below this y; crossing it triggers a page break
    pub bottom_margin: f32,

    /// Baseline of the footer captions
    pub footer_y: f32,
}

/// Institutional header drawn at the top of every page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderConfig {
    /// Logo drawn in the top-left corner (skipped if missing)
    pub left_logo: Option<PathBuf>,

    /// Logo drawn in the top-right corner (skipped if missing)
    pub right_logo: Option<PathBuf>,

    /// Centered title lines, first one bold
    pub title_lines: [String; 3],

    /// Horizontal rule color as hex ("#RRGGBB")
    pub rule_color: String,
}

/// How the two image panels share the page width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PanelArrangement {
    /// Original and overlay next to each other
    SideBySide,
    /// Original above overlay, each at full content width
    Stacked,
}

/// Image panel layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelConfig {
    pub arrangement: PanelArrangement,

    /// Height of each panel's image box
    pub height: f32,

    /// Gap between panels
    pub gap: f32,

    /// Caption above the original image
    pub original_caption: String,

    /// Caption above the overlay image
    pub overlay_caption: String,

    /// Label drawn in place of an image that cannot be loaded
    pub placeholder: String,
}

/// Text section labels and footer captions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextConfig {
    /// Heading above the interpretation text
    pub section_title: String,

    /// Caption drawn at the bottom of a page that continues on the next one
    pub continuation_footer: String,

    /// Caption drawn at the bottom of the last page
    pub closing_footer: String,
}

/// Overlay blending parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlayOptions {
    /// Weight toward the colorized mask (0.0 = original, 1.0 = mask)
    pub alpha: f32,

    /// Mean channel value at or below which a mask pixel is background
    pub threshold: f32,
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self {
            alpha: overlay::DEFAULT_ALPHA,
            threshold: overlay::BACKGROUND_THRESHOLD,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            page: PageConfig {
                width: page::A4_WIDTH,
                height: page::A4_HEIGHT,
                margin: page::EDGE_MARGIN,
                bottom_margin: page::BOTTOM_MARGIN,
                footer_y: page::FOOTER_Y,
            },
            header: HeaderConfig {
                left_logo: Some(PathBuf::from("assets/geologia.jpg")),
                right_logo: Some(PathBuf::from("assets/uce.jpg")),
                title_lines: [
                    "Universidad Central del Ecuador".to_string(),
                    "Facultad de Ingeniería en Geología – Carrera de Geología".to_string(),
                    "GeoSismicIA – Informe de Interpretación Sísmica".to_string(),
                ],
                rule_color: "#0B3C5D".to_string(),
            },
            panels: PanelConfig {
                arrangement: PanelArrangement::SideBySide,
                height: page::PANEL_HEIGHT,
                gap: page::PANEL_GAP,
                original_caption: "Línea sísmica original".to_string(),
                overlay_caption: "Interpretación de sismofacies".to_string(),
                placeholder: "[Imagen no disponible]".to_string(),
            },
            text: TextConfig {
                section_title: "Informe técnico preliminar".to_string(),
                continuation_footer: "Continúa en la siguiente página...".to_string(),
                closing_footer: "Documento generado automáticamente por GeoSismicIA – uso académico."
                    .to_string(),
            },
            overlay: OverlayOptions::default(),
        }
    }
}

impl PageConfig {
    /// Usable width between the left and right margins
    pub fn content_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }
}

impl HeaderConfig {
    /// Parse the rule color, falling back to black on malformed hex
    pub fn rule_rgb(&self) -> Srgb<u8> {
        Srgb::from_str(&self.rule_color).unwrap_or_else(|_| Srgb::new(0, 0, 0))
    }
}

impl ReportConfig {
    /// Check that the geometry leaves room for content
    pub fn validate(&self) -> Result<()> {
        let page = &self.page;
        if !(page.margin >= 0.0 && page.width > 2.0 * page.margin) {
            return Err(ReportError::InvalidParameter {
                parameter: "page.margin".into(),
                value: page.margin.to_string(),
            });
        }
        if !(page.bottom_margin > page.footer_y && page.bottom_margin < page.height - page.margin) {
            return Err(ReportError::InvalidParameter {
                parameter: "page.bottom_margin".into(),
                value: page.bottom_margin.to_string(),
            });
        }
        if !(self.panels.height > 0.0) {
            return Err(ReportError::InvalidParameter {
                parameter: "panels.height".into(),
                value: self.panels.height.to_string(),
            });
        }
        if !self.overlay.alpha.is_finite() {
            return Err(ReportError::InvalidParameter {
                parameter: "overlay.alpha".into(),
                value: self.overlay.alpha.to_string(),
            });
        }
        Ok(())
    }

    /// Load configuration from JSON file
    pub fn from_json_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ReportError::ConfigError {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|e| ReportError::ConfigError {
            message: format!("cannot parse {}: {}", path.display(), e),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to JSON file
    pub fn to_json_file(&self, path: &std::path::Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| ReportError::ConfigError {
            message: format!("cannot serialize configuration: {}", e),
        })?;
        std::fs::write(path, json).map_err(|e| ReportError::ConfigError {
            message: format!("cannot write {}: {}", path.display(), e),
        })?;
        Ok(())
    }
}
