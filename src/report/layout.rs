//! Page layout for the interpretation report
//!
//! The renderer walks a fixed template: header, image panels, the
//! interpretation text, and a closing footer. Every page opens with the
//! same header. Before each atomic unit (one text line, one panel row) the
//! renderer calls [`ReportRenderer::ensure_space`], which is the only place
//! a page break can happen.
//!
//! Layout produces a [`ReportLayout`] of positioned draw operations; the
//! [`pdf`](super::pdf) module serializes it.

use std::path::{Path, PathBuf};

use image::RgbImage;
use tracing::{debug, warn};

use super::cursor::DocumentCursor;
use super::metrics::{text_width, FontStyle};
use super::text::{line_runs, parse_blocks, styled_words, wrap_words, Block, Word};
use crate::config::{PanelArrangement, ReportConfig};
use crate::constants::{page, typography};
use crate::error::{ReportError, Result};
use crate::image_loader;

/// Vertical space taken by a panel caption
const CAPTION_BAND: f32 = 16.0;

/// Space left under a panel row
const PANEL_SPACING: f32 = 18.0;

/// Leading of the report title and section title
const SECTION_LEADING: f32 = 22.0;

/// Where a panel's image comes from
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// Image file on disk
    File(PathBuf),
    /// Encoded image bytes (PNG, JPEG, ...)
    Encoded(Vec<u8>),
    /// Already decoded image
    Decoded(RgbImage),
}

impl ImageSource {
    /// Load and decode the image
    ///
    /// # Errors
    ///
    /// Fails if the file is missing, the bytes cannot be decoded, or the
    /// image has no pixels.
    pub fn resolve(&self) -> Result<RgbImage> {
        let image = match self {
            ImageSource::File(path) => image_loader::load_image(path)?,
            ImageSource::Encoded(bytes) => image_loader::decode_rgb(bytes)?,
            ImageSource::Decoded(image) => image.clone(),
        };
        if image.width() == 0 || image.height() == 0 {
            return Err(ReportError::InvalidParameter {
                parameter: "image.dimensions".into(),
                value: format!("{}x{}", image.width(), image.height()),
            });
        }
        Ok(image)
    }
}

/// Everything one report shows
#[derive(Debug, Clone)]
pub struct ReportModel {
    /// Line drawn above the panels on the first page; also the document title
    pub title: String,
    /// Uploaded seismic line
    pub original: ImageSource,
    /// Colorized interpretation overlay, if the backend returned a mask
    pub overlay: Option<ImageSource>,
    /// Interpretation text with markdown-lite markup
    pub interpretation: String,
}

/// One positioned drawing primitive, coordinates in points from the
/// bottom-left page corner
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Text run; `y` is the baseline
    Text {
        x: f32,
        y: f32,
        size: f32,
        style: FontStyle,
        text: String,
    },
    /// Horizontal rule
    Rule {
        x1: f32,
        x2: f32,
        y: f32,
        width: f32,
        color: [f32; 3],
    },
    /// Thin outline, used for placeholder panels
    Outline {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    /// Image from [`ReportLayout::images`]; (`x`, `y`) is the bottom-left corner
    Image {
        image: usize,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
}

/// One finished page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub header: Vec<DrawOp>,
    pub body: Vec<DrawOp>,
}

impl Page {
    /// Header operations followed by body operations
    pub fn ops(&self) -> impl Iterator<Item = &DrawOp> {
        self.header.iter().chain(self.body.iter())
    }
}

/// Fully laid out report, ready for serialization
#[derive(Debug, Clone)]
pub struct ReportLayout {
    pub width: f32,
    pub height: f32,
    pub title: String,
    /// Images referenced by [`DrawOp::Image`]
    pub images: Vec<RgbImage>,
    pub pages: Vec<Page>,
}

/// Scale an image into a box, preserving aspect ratio, centered
///
/// Returns `(x, y, width, height)` of the placed image.
pub fn fit_in_box(
    image_width: u32,
    image_height: u32,
    box_x: f32,
    box_y: f32,
    box_width: f32,
    box_height: f32,
) -> (f32, f32, f32, f32) {
    let scale = (box_width / image_width as f32).min(box_height / image_height as f32);
    let width = image_width as f32 * scale;
    let height = image_height as f32 * scale;
    (
        box_x + (box_width - width) / 2.0,
        box_y + (box_height - height) / 2.0,
        width,
        height,
    )
}

/// Builds the page list for one report
pub struct ReportRenderer<'a> {
    config: &'a ReportConfig,
    images: Vec<RgbImage>,
    /// Header operations, identical on every page
    header: Vec<DrawOp>,
    /// First y below the header
    content_top: f32,
    pages: Vec<Page>,
    current: Page,
}

impl<'a> ReportRenderer<'a> {
    /// Create a renderer and prepare the header
    ///
    /// Logos are loaded once here; a missing or unreadable logo is skipped.
    pub fn new(config: &'a ReportConfig) -> Self {
        let mut renderer = Self {
            config,
            images: Vec::new(),
            header: Vec::new(),
            content_top: 0.0,
            pages: Vec::new(),
            current: Page::default(),
        };
        renderer.build_header();
        renderer
    }

    /// Lay out the whole report
    pub fn render(mut self, model: &ReportModel) -> ReportLayout {
        let mut cursor = self.begin_page();

        if !model.title.trim().is_empty() {
            let words = styled_words(&model.title, FontStyle::Bold);
            cursor = self.draw_words(cursor, &words, typography::SECTION_SIZE, SECTION_LEADING);
        }
        cursor = self.draw_panels(cursor, model);
        self.draw_interpretation(cursor, &model.interpretation);

        let closing = self.config.text.closing_footer.clone();
        self.draw_footer(&closing);
        self.finish_page();

        debug!(pages = self.pages.len(), images = self.images.len(), "report layout complete");
        ReportLayout {
            width: self.config.page.width,
            height: self.config.page.height,
            title: model.title.clone(),
            images: self.images,
            pages: self.pages,
        }
    }

    /// Break the page if a unit of `needed` height does not fit
    ///
    /// Draws the continuation footer, closes the current page and opens a
    /// new one with the header. A unit taller than an empty page is drawn
    /// where it is instead of breaking forever.
    pub fn ensure_space(&mut self, cursor: DocumentCursor, needed: f32) -> DocumentCursor {
        if cursor.fits(needed) || self.current.body.is_empty() {
            return cursor;
        }
        let continuation = self.config.text.continuation_footer.clone();
        self.draw_footer(&continuation);
        self.finish_page();
        let next = self.begin_page();
        debug!(page = next.page, needed, "page break");
        next
    }

    // HEADER

    fn build_header(&mut self) {
        let config = self.config;
        let page_config = &config.page;
        let header_config = &config.header;
        let top = page_config.height - page_config.margin;

        let logo_slots = [
            (header_config.left_logo.clone(), page_config.margin),
            (
                header_config.right_logo.clone(),
                page_config.width - page_config.margin - page::LOGO_SIZE,
            ),
        ];
        for (path, x) in logo_slots {
            let Some(logo) = path.as_deref().and_then(load_logo) else {
                continue;
            };
            let (lx, ly, lw, lh) = fit_in_box(
                logo.width(),
                logo.height(),
                x,
                top - page::LOGO_SIZE,
                page::LOGO_SIZE,
                page::LOGO_SIZE,
            );
            let image = self.push_image(logo);
            self.header.push(DrawOp::Image {
                image,
                x: lx,
                y: ly,
                width: lw,
                height: lh,
            });
        }

        let styles = [
            (typography::TITLE_SIZE, FontStyle::Bold),
            (typography::SUBTITLE_SIZE, FontStyle::Regular),
            (typography::SUBTITLE_SIZE, FontStyle::Bold),
        ];
        let mut baseline = top - typography::TITLE_SIZE;
        for (line, (size, style)) in header_config.title_lines.iter().zip(styles) {
            let width = text_width(line, style, size);
            self.header.push(DrawOp::Text {
                x: (page_config.width - width) / 2.0,
                y: baseline,
                size,
                style,
                text: line.clone(),
            });
            baseline -= 18.0;
        }

        let rule_y = top - page::LOGO_SIZE - 8.0;
        let (r, g, b) = header_config.rule_rgb().into_format::<f32>().into_components();
        self.header.push(DrawOp::Rule {
            x1: page_config.margin,
            x2: page_config.width - page_config.margin,
            y: rule_y,
            width: 1.5,
            color: [r, g, b],
        });
        self.content_top = rule_y - 18.0;
    }

    fn begin_page(&mut self) -> DocumentCursor {
        self.current = Page {
            header: self.header.clone(),
            body: Vec::new(),
        };
        DocumentCursor::new(self.pages.len(), self.content_top, self.config.page.bottom_margin)
    }

    fn finish_page(&mut self) {
        let page = std::mem::take(&mut self.current);
        self.pages.push(page);
    }

    fn push_image(&mut self, image: RgbImage) -> usize {
        self.images.push(image);
        self.images.len() - 1
    }

    // CONTENT

    fn draw_panels(&mut self, mut cursor: DocumentCursor, model: &ReportModel) -> DocumentCursor {
        let config = self.config;
        let panels_config = &config.panels;
        let mut panels = vec![(panels_config.original_caption.clone(), &model.original)];
        if let Some(overlay) = &model.overlay {
            panels.push((panels_config.overlay_caption.clone(), overlay));
        }

        let margin = config.page.margin;
        let content_width = config.page.content_width();
        let height = panels_config.height;
        let row_height = CAPTION_BAND + height;

        if panels_config.arrangement == PanelArrangement::SideBySide && panels.len() == 2 {
            let gap = panels_config.gap;
            let width = (content_width - gap) / 2.0;
            cursor = self.ensure_space(cursor, row_height);
            for (i, (caption, source)) in panels.iter().enumerate() {
                let x = margin + i as f32 * (width + gap);
                self.draw_panel(cursor.y, x, width, height, caption, source);
            }
            cursor = cursor.advance(row_height + PANEL_SPACING);
        } else {
            for (caption, source) in &panels {
                cursor = self.ensure_space(cursor, row_height);
                self.draw_panel(cursor.y, margin, content_width, height, caption, source);
                cursor = cursor.advance(row_height + PANEL_SPACING);
            }
        }
        cursor
    }

    fn draw_panel(
        &mut self,
        top: f32,
        x: f32,
        width: f32,
        height: f32,
        caption: &str,
        source: &ImageSource,
    ) {
        let caption_size = typography::BODY_SIZE;
        let caption_width = text_width(caption, FontStyle::Bold, caption_size);
        self.current.body.push(DrawOp::Text {
            x: x + (width - caption_width) / 2.0,
            y: top - caption_size - 1.0,
            size: caption_size,
            style: FontStyle::Bold,
            text: caption.to_string(),
        });

        let box_y = top - CAPTION_BAND - height;
        match source.resolve() {
            Ok(image) => {
                let (ix, iy, iw, ih) =
                    fit_in_box(image.width(), image.height(), x, box_y, width, height);
                let index = self.push_image(image);
                self.current.body.push(DrawOp::Image {
                    image: index,
                    x: ix,
                    y: iy,
                    width: iw,
                    height: ih,
                });
            }
            Err(e) => {
                warn!(caption, error = %e, "panel image unavailable, drawing placeholder");
                let placeholder = &self.config.panels.placeholder;
                let size = typography::BODY_SIZE;
                let label_width = text_width(placeholder, FontStyle::Regular, size);
                self.current.body.push(DrawOp::Outline {
                    x,
                    y: box_y,
                    width,
                    height,
                });
                self.current.body.push(DrawOp::Text {
                    x: x + (width - label_width) / 2.0,
                    y: box_y + height / 2.0 - size / 2.0,
                    size,
                    style: FontStyle::Regular,
                    text: placeholder.clone(),
                });
            }
        }
    }

    fn draw_interpretation(&mut self, mut cursor: DocumentCursor, text: &str) -> DocumentCursor {
        let title = styled_words(&self.config.text.section_title, FontStyle::Bold);
        cursor = self.draw_words(cursor, &title, typography::SECTION_SIZE, SECTION_LEADING);

        for block in parse_blocks(text) {
            cursor = match block {
                Block::Heading(words) => self.draw_words(
                    cursor,
                    &words,
                    typography::HEADING_SIZE,
                    typography::HEADING_LEADING,
                ),
                Block::Paragraph(words) => self.draw_words(
                    cursor,
                    &words,
                    typography::BODY_SIZE,
                    typography::BODY_LEADING,
                ),
                Block::Gap => cursor.advance(typography::PARAGRAPH_GAP),
            };
        }
        cursor
    }

    /// Wrap words to the content width and draw them one line at a time
    fn draw_words(
        &mut self,
        mut cursor: DocumentCursor,
        words: &[Word],
        size: f32,
        leading: f32,
    ) -> DocumentCursor {
        let margin = self.config.page.margin;
        for line in wrap_words(words, self.config.page.content_width(), size) {
            cursor = self.ensure_space(cursor, leading);
            let baseline = cursor.y - size;
            for (dx, span) in line_runs(&line, size) {
                self.current.body.push(DrawOp::Text {
                    x: margin + dx,
                    y: baseline,
                    size,
                    style: span.style,
                    text: span.text,
                });
            }
            cursor = cursor.advance(leading);
        }
        cursor
    }

    fn draw_footer(&mut self, caption: &str) {
        let size = typography::CAPTION_SIZE;
        let width = text_width(caption, FontStyle::Regular, size);
        self.current.body.push(DrawOp::Text {
            x: (self.config.page.width - width) / 2.0,
            y: self.config.page.footer_y,
            size,
            style: FontStyle::Regular,
            text: caption.to_string(),
        });
    }
}

fn load_logo(path: &Path) -> Option<RgbImage> {
    if !path.exists() {
        debug!(path = %path.display(), "logo not found, skipping");
        return None;
    }
    match image_loader::load_image(path) {
        Ok(logo) if logo.width() > 0 && logo.height() > 0 => Some(logo),
        Ok(_) => None,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "logo unreadable, skipping");
            None
        }
    }
}
