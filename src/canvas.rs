//! # Canvas Abstraction
//!
//! The layout engine draws through this trait instead of talking to a
//! PDF library directly. A canvas owns the cursor (current x/y write
//! position) and the active font/color state; the layout routines mutate
//! that state sequentially. One canvas exists per render invocation, so
//! independent documents can render concurrently on separate canvases
//! without any shared state.
//!
//! Coordinates are in page units (points) with the origin at the
//! top-left of the page. Backends that use a different origin, like the
//! PDF adapter, convert at their own boundary.

use crate::error::Result;

/// An RGB color with 0-255 components.
pub type Rgb = (u8, u8, u8);

/// The two font faces a receipt uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFamily {
    Regular,
    Bold,
}

/// Abstract drawing surface accepting absolute-positioned primitives.
pub trait Canvas {
    /// Select the active font face and size for subsequent text.
    fn set_font(&mut self, family: FontFamily, size: f64) -> Result<()>;

    fn set_text_color(&mut self, color: Rgb);

    fn set_stroke_color(&mut self, color: Rgb);

    /// Draw text at the current cursor position. The cursor is left
    /// unchanged; the layout routines reposition explicitly.
    fn draw_text(&mut self, text: &str) -> Result<()>;

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> Result<()>;

    /// Draw the image behind `src` scaled to `w` by `h` with its top-left
    /// corner at (`x`, `y`).
    fn draw_image(&mut self, src: &str, x: f64, y: f64, w: f64, h: f64) -> Result<()>;

    fn x(&self) -> f64;

    fn y(&self) -> f64;

    fn set_x(&mut self, x: f64);

    fn set_y(&mut self, y: f64);

    fn set_xy(&mut self, x: f64, y: f64) {
        self.set_x(x);
        self.set_y(y);
    }

    /// Move the cursor down by `dy` and back to the left margin, like a
    /// line break.
    fn advance(&mut self, dy: f64);

    fn left_margin(&self) -> f64;
}

/// A canvas operation captured by [`RecordingCanvas`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedOp {
    Text {
        content: String,
        x: f64,
        y: f64,
        font: FontFamily,
        size: f64,
        color: Rgb,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        color: Rgb,
    },
    Image {
        src: String,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
    },
}

/// An in-memory canvas that records every draw call instead of
/// rasterizing anything.
///
/// This is what the integration tests assert against, and it doubles as
/// a golden-output tool for downstream code: render once, inspect the
/// ordered op list.
#[derive(Debug)]
pub struct RecordingCanvas {
    ops: Vec<RecordedOp>,
    x: f64,
    y: f64,
    left_margin: f64,
    font: FontFamily,
    size: f64,
    text_color: Rgb,
    stroke_color: Rgb,
}

impl RecordingCanvas {
    pub fn new(left_margin: f64, top_margin: f64) -> Self {
        Self {
            ops: Vec::new(),
            x: left_margin,
            y: top_margin,
            left_margin,
            font: FontFamily::Regular,
            size: 12.0,
            text_color: (0, 0, 0),
            stroke_color: (0, 0, 0),
        }
    }

    /// Every recorded operation, in draw order.
    pub fn ops(&self) -> &[RecordedOp] {
        &self.ops
    }

    /// The contents of every text operation, in draw order.
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                RecordedOp::Text { content, .. } => Some(content.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Default for RecordingCanvas {
    /// A canvas matching the PDF adapter's page setup: 40-point margins.
    fn default() -> Self {
        Self::new(40.0, 40.0)
    }
}

impl Canvas for RecordingCanvas {
    fn set_font(&mut self, family: FontFamily, size: f64) -> Result<()> {
        self.font = family;
        self.size = size;
        Ok(())
    }

    fn set_text_color(&mut self, color: Rgb) {
        self.text_color = color;
    }

    fn set_stroke_color(&mut self, color: Rgb) {
        self.stroke_color = color;
    }

    fn draw_text(&mut self, text: &str) -> Result<()> {
        self.ops.push(RecordedOp::Text {
            content: text.to_string(),
            x: self.x,
            y: self.y,
            font: self.font,
            size: self.size,
            color: self.text_color,
        });
        Ok(())
    }

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> Result<()> {
        self.ops.push(RecordedOp::Line {
            x1,
            y1,
            x2,
            y2,
            color: self.stroke_color,
        });
        Ok(())
    }

    fn draw_image(&mut self, src: &str, x: f64, y: f64, w: f64, h: f64) -> Result<()> {
        self.ops.push(RecordedOp::Image {
            src: src.to_string(),
            x,
            y,
            w,
            h,
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
        self.x = self.left_margin;
    }

    fn left_margin(&self) -> f64 {
        self.left_margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_moves_down_and_returns_to_margin() {
        let mut canvas = RecordingCanvas::new(40.0, 40.0);
        canvas.set_x(405.0);
        canvas.advance(24.0);
        assert_eq!(canvas.x(), 40.0);
        assert_eq!(canvas.y(), 64.0);
    }

    #[test]
    fn set_y_leaves_x_alone() {
        let mut canvas = RecordingCanvas::new(40.0, 40.0);
        canvas.set_x(200.0);
        canvas.set_y(650.0);
        assert_eq!(canvas.x(), 200.0);
        assert_eq!(canvas.y(), 650.0);
    }

    #[test]
    fn draw_text_records_cursor_and_style() {
        let mut canvas = RecordingCanvas::default();
        canvas.set_font(FontFamily::Bold, 11.5).unwrap();
        canvas.set_text_color((75, 75, 75));
        canvas.set_xy(405.0, 650.0);
        canvas.draw_text("TOTAL").unwrap();
        assert_eq!(
            canvas.ops(),
            &[RecordedOp::Text {
                content: "TOTAL".to_string(),
                x: 405.0,
                y: 650.0,
                font: FontFamily::Bold,
                size: 11.5,
                color: (75, 75, 75),
            }]
        );
    }
}
