//! # PDF Canvas
//!
//! The concrete [`Canvas`] backed by `printpdf`. The adapter owns the
//! cursor in top-left-origin page coordinates and flips Y into PDF
//! bottom-left coordinates at the last moment, tracks the open text
//! section, deduplicates font/color state changes, and embeds logo
//! images as cached XObjects.
//!
//! Fonts are supplied by the caller as raw TTF bytes; kvitto does not
//! ship or discover font data.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use printpdf::font::ParsedFont;
use printpdf::graphics::{LinePoint, PaintMode, Point, Polygon, PolygonRing, WindingOrder};
use printpdf::matrix::TextMatrix;
use printpdf::ops::Op;
use printpdf::text::TextItem;
use printpdf::xobject::{XObject, XObjectTransform};
use printpdf::{FontId, Mm, PdfDocument, PdfPage, PdfSaveOptions, Pt, XObjectId};

use crate::canvas::{Canvas, FontFamily, Rgb};
use crate::error::{Error, Result};
use crate::format;
use crate::image_probe;
use crate::layout::LayoutConfig;
use crate::model::Receipt;

/// A4 height in points; used to flip the Y axis.
const PAGE_HEIGHT_PT: f64 = 841.89;
const PAGE_WIDTH_MM: f64 = 210.0;
const PAGE_HEIGHT_MM: f64 = 297.0;
const MARGIN: f64 = 40.0;

/// Raw TTF data for the two faces the layout uses.
#[derive(Debug, Clone)]
pub struct FontData {
    pub regular: Vec<u8>,
    pub bold: Vec<u8>,
}

/// A [`Canvas`] that accumulates `printpdf` operations for a single A4
/// page with 40-point margins.
pub struct PdfCanvas {
    document: PdfDocument,
    ops: Vec<Op>,
    regular: FontId,
    bold: FontId,
    images: HashMap<String, (XObjectId, (u32, u32))>,
    x: f64,
    y: f64,
    font: (FontFamily, f64),
    text_color: Rgb,
    stroke_color: Rgb,
    applied_font: Option<(FontFamily, f64)>,
    applied_fill: Option<Rgb>,
    text_section_open: bool,
}

impl PdfCanvas {
    /// Create a canvas, parsing and embedding the supplied fonts. A font
    /// that fails to parse is fatal before any drawing happens.
    pub fn new(fonts: &FontData) -> Result<Self> {
        let mut document = PdfDocument::new("Receipt");
        let regular = add_font(&mut document, &fonts.regular, "regular")?;
        let bold = add_font(&mut document, &fonts.bold, "bold")?;
        Ok(Self {
            document,
            ops: Vec::new(),
            regular,
            bold,
            images: HashMap::new(),
            x: MARGIN,
            y: MARGIN,
            font: (FontFamily::Regular, 12.0),
            text_color: (0, 0, 0),
            stroke_color: (0, 0, 0),
            applied_font: None,
            applied_fill: None,
            text_section_open: false,
        })
    }

    /// Finalize the page and serialize the document to PDF bytes.
    pub fn into_bytes(mut self) -> Vec<u8> {
        self.close_text_section();
        let page = PdfPage::new(
            Mm(PAGE_WIDTH_MM as f32),
            Mm(PAGE_HEIGHT_MM as f32),
            std::mem::take(&mut self.ops),
        );
        self.document.pages.push(page);

        let mut bytes = Vec::new();
        let mut warnings = Vec::new();
        self.document
            .save_writer(&mut bytes, &PdfSaveOptions::default(), &mut warnings);
        bytes
    }

    fn font_id(&self, family: FontFamily) -> FontId {
        match family {
            FontFamily::Regular => self.regular.clone(),
            FontFamily::Bold => self.bold.clone(),
        }
    }

    fn open_text_section(&mut self) {
        if !self.text_section_open {
            self.ops.push(Op::StartTextSection);
            self.text_section_open = true;
        }
    }

    fn close_text_section(&mut self) {
        if self.text_section_open {
            self.ops.push(Op::EndTextSection);
            self.text_section_open = false;
        }
    }
}

fn add_font(document: &mut PdfDocument, data: &[u8], which: &str) -> Result<FontId> {
    let mut warnings = Vec::new();
    let parsed = ParsedFont::from_bytes(data, 0, &mut warnings)
        .ok_or_else(|| Error::FontLoad(format!("failed to parse {which} font data")))?;
    Ok(document.add_font(&parsed))
}

fn to_pdf_color(color: Rgb) -> printpdf::color::Color {
    printpdf::color::Color::Rgb(printpdf::Rgb::new(
        f32::from(color.0) / 255.0,
        f32::from(color.1) / 255.0,
        f32::from(color.2) / 255.0,
        None,
    ))
}

impl Canvas for PdfCanvas {
    fn set_font(&mut self, family: FontFamily, size: f64) -> Result<()> {
        self.font = (family, size);
        Ok(())
    }

    fn set_text_color(&mut self, color: Rgb) {
        self.text_color = color;
    }

    fn set_stroke_color(&mut self, color: Rgb) {
        self.stroke_color = color;
    }

    fn draw_text(&mut self, text: &str) -> Result<()> {
        self.open_text_section();

        if self.applied_fill != Some(self.text_color) {
            self.ops.push(Op::SetFillColor {
                col: to_pdf_color(self.text_color),
            });
            self.applied_fill = Some(self.text_color);
        }

        let (family, size) = self.font;
        let font = self.font_id(family);
        if self.applied_font != Some(self.font) {
            self.ops.push(Op::SetFontSize {
                size: Pt(size as f32),
                font: font.clone(),
            });
            self.applied_font = Some(self.font);
        }

        // The cursor marks the top of the text box; the baseline sits a
        // bit below it.
        let baseline_y = self.y + size * 0.8;
        let pdf_y = PAGE_HEIGHT_PT - baseline_y;
        self.ops.push(Op::SetTextMatrix {
            matrix: TextMatrix::Translate(Pt(self.x as f32), Pt(pdf_y as f32)),
        });
        self.ops.push(Op::WriteText {
            items: vec![TextItem::Text(text.to_string())],
            font,
        });
        Ok(())
    }

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> Result<()> {
        self.close_text_section();
        // printpdf draws strokes through polygons; a two-point stroked
        // ring is a line segment.
        let line = Polygon {
            rings: vec![PolygonRing {
                points: vec![
                    LinePoint {
                        p: Point {
                            x: Pt(x1 as f32),
                            y: Pt((PAGE_HEIGHT_PT - y1) as f32),
                        },
                        bezier: false,
                    },
                    LinePoint {
                        p: Point {
                            x: Pt(x2 as f32),
                            y: Pt((PAGE_HEIGHT_PT - y2) as f32),
                        },
                        bezier: false,
                    },
                ],
            }],
            mode: PaintMode::Stroke,
            winding_order: WindingOrder::EvenOdd,
        };
        self.ops.push(Op::SetOutlineColor {
            col: to_pdf_color(self.stroke_color),
        });
        self.ops.push(Op::SetOutlineThickness { pt: Pt(1.0) });
        self.ops.push(Op::DrawPolygon { polygon: line });
        Ok(())
    }

    fn draw_image(&mut self, src: &str, x: f64, y: f64, w: f64, h: f64) -> Result<()> {
        self.close_text_section();

        let (xobj_id, (img_w, img_h)) = match self.images.get(src) {
            Some(cached) => (cached.0.clone(), cached.1),
            None => {
                let bytes = image_probe::read_source_bytes(src)?;
                let mut warnings = Vec::new();
                let raw = printpdf::image::RawImage::decode_from_bytes(&bytes, &mut warnings)
                    .map_err(|e| Error::Image(format!("failed to decode image '{src}': {e}")))?;
                let dims = (raw.width as u32, raw.height as u32);
                let xobj_id = XObjectId::new();
                self.document
                    .resources
                    .xobjects
                    .map
                    .insert(xobj_id.clone(), XObject::Image(raw));
                self.images.insert(src.to_string(), (xobj_id.clone(), dims));
                (xobj_id, dims)
            }
        };

        let pdf_y = PAGE_HEIGHT_PT - (y + h);
        let transform = XObjectTransform {
            translate_x: Some(Pt(x as f32)),
            translate_y: Some(Pt(pdf_y as f32)),
            scale_x: Some(w as f32 / img_w as f32),
            scale_y: Some(h as f32 / img_h as f32),
            rotate: None,
            dpi: Some(72.0),
        };
        self.ops.push(Op::UseXobject {
            id: xobj_id,
            transform,
        });
        Ok(())
    }

    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }

    fn set_x(&mut self, x: f64) {
        self.x = x;
    }

    fn set_y(&mut self, y: f64) {
        self.y = y;
    }

    fn advance(&mut self, dy: f64) {
        self.y += dy;
        self.x = MARGIN;
    }

    fn left_margin(&self) -> f64 {
        MARGIN
    }
}

/// Render a receipt to PDF bytes.
pub fn render_to_bytes(
    receipt: &Receipt,
    fonts: &FontData,
    config: &LayoutConfig,
) -> Result<Vec<u8>> {
    let mut canvas = PdfCanvas::new(fonts)?;
    crate::render_with_config(&mut canvas, receipt, config)?;
    Ok(canvas.into_bytes())
}

/// Render a receipt into `out_dir`, named
/// `<number>-<recipient-with-hyphens>.pdf`. Returns the written path.
///
/// If the write fails the partial file is removed, so persistence either
/// succeeds completely or leaves nothing behind.
pub fn render_to_file(
    receipt: &Receipt,
    out_dir: &Path,
    fonts: &FontData,
    config: &LayoutConfig,
) -> Result<PathBuf> {
    let bytes = render_to_bytes(receipt, fonts, config)?;

    fs::create_dir_all(out_dir).map_err(|e| Error::Persist {
        path: out_dir.to_path_buf(),
        source: e,
    })?;

    let path = out_dir.join(format::output_filename(
        &receipt.number,
        &receipt.bill_to.name,
    ));
    if let Err(e) = fs::write(&path, &bytes) {
        let _ = fs::remove_file(&path);
        return Err(Error::Persist { path, source: e });
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unparseable_font_data_is_a_font_load_error() {
        let fonts = FontData {
            regular: vec![0x00, 0x01, 0x02],
            bold: vec![0x00, 0x01, 0x02],
        };
        let err = match PdfCanvas::new(&fonts) {
            Ok(_) => panic!("junk font bytes must not parse"),
            Err(e) => e,
        };
        match err {
            Error::FontLoad(msg) => assert!(msg.contains("regular")),
            other => panic!("expected FontLoad error, got: {other}"),
        }
    }
}
