//! PDF serialization of a laid out report
//!
//! Pages share one resource dictionary holding the two standard Helvetica
//! faces and every image as an RGB XObject. Streams are Flate-compressed
//! when the document is saved.

use image::RgbImage;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};

use super::layout::{DrawOp, Page, ReportLayout};
use super::metrics::{encode_win_ansi, FontStyle};
use crate::error::{ReportError, Result};

/// Gray used for placeholder outlines
const OUTLINE_GRAY: f32 = 0.6;

/// Serialize a layout into PDF bytes
///
/// # Errors
///
/// Returns `ReportError::PdfError` if a content stream cannot be encoded
/// or the document cannot be written.
pub fn write_pdf(layout: &ReportLayout) -> Result<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut fonts = Dictionary::new();
    for style in [FontStyle::Regular, FontStyle::Bold] {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => style.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(style.resource_name(), font_id);
    }

    let mut xobjects = Dictionary::new();
    for (index, image) in layout.images.iter().enumerate() {
        let image_id = doc.add_object(image_xobject(image));
        xobjects.set(image_name(index), image_id);
    }

    let resources_id = doc.add_object(dictionary! {
        "Font" => fonts,
        "XObject" => xobjects,
    });

    let mut kids: Vec<Object> = Vec::with_capacity(layout.pages.len());
    for (number, page) in layout.pages.iter().enumerate() {
        let content = Content {
            operations: page_operations(page),
        };
        let encoded = content
            .encode()
            .map_err(|e| ReportError::pdf(format!("encode content of page {}", number + 1), e))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id: ObjectId = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let media_box: Vec<Object> = vec![0i64.into(), 0i64.into(), layout.width.into(), layout.height.into()];
    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => media_box,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::String(text_string(&layout.title), StringFormat::Hexadecimal),
        "Producer" => Object::string_literal("seismic-report"),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);
    doc.compress();

    let mut out = Vec::new();
    doc.save_to(&mut out)
        .map_err(|e| ReportError::pdf("write document", e))?;
    Ok(out)
}

/// Encode a document-info text string as UTF-16BE with a byte order mark
fn text_string(text: &str) -> Vec<u8> {
    let mut out = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        out.extend_from_slice(&unit.to_be_bytes());
    }
    out
}

fn image_name(index: usize) -> String {
    format!("Im{}", index)
}

fn image_xobject(image: &RgbImage) -> Stream {
    Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => image.width() as i64,
            "Height" => image.height() as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8i64,
        },
        image.as_raw().clone(),
    )
}

fn page_operations(page: &Page) -> Vec<Operation> {
    let mut ops = Vec::new();
    for op in page.ops() {
        match op {
            DrawOp::Text {
                x,
                y,
                size,
                style,
                text,
            } => {
                ops.push(Operation::new("BT", vec![]));
                ops.push(Operation::new(
                    "Tf",
                    vec![style.resource_name().into(), (*size).into()],
                ));
                ops.push(Operation::new("Td", vec![(*x).into(), (*y).into()]));
                ops.push(Operation::new(
                    "Tj",
                    vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
                ));
                ops.push(Operation::new("ET", vec![]));
            }
            DrawOp::Rule {
                x1,
                x2,
                y,
                width,
                color,
            } => {
                ops.push(Operation::new("q", vec![]));
                ops.push(Operation::new(
                    "RG",
                    color.iter().map(|&c| c.into()).collect(),
                ));
                ops.push(Operation::new("w", vec![(*width).into()]));
                ops.push(Operation::new("m", vec![(*x1).into(), (*y).into()]));
                ops.push(Operation::new("l", vec![(*x2).into(), (*y).into()]));
                ops.push(Operation::new("S", vec![]));
                ops.push(Operation::new("Q", vec![]));
            }
            DrawOp::Outline {
                x,
                y,
                width,
                height,
            } => {
                ops.push(Operation::new("q", vec![]));
                ops.push(Operation::new("G", vec![OUTLINE_GRAY.into()]));
                ops.push(Operation::new("w", vec![0.5f32.into()]));
                ops.push(Operation::new(
                    "re",
                    vec![(*x).into(), (*y).into(), (*width).into(), (*height).into()],
                ));
                ops.push(Operation::new("S", vec![]));
                ops.push(Operation::new("Q", vec![]));
            }
            DrawOp::Image {
                image,
                x,
                y,
                width,
                height,
            } => {
                ops.push(Operation::new("q", vec![]));
                ops.push(Operation::new(
                    "cm",
                    vec![
                        (*width).into(),
                        0i64.into(),
                        0i64.into(),
                        (*height).into(),
                        (*x).into(),
                        (*y).into(),
                    ],
                ));
                ops.push(Operation::new("Do", vec![Object::Name(image_name(*image).into_bytes())]));
                ops.push(Operation::new("Q", vec![]));
            }
        }
    }
    ops
}
