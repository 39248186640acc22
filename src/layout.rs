//! # Layout Engine
//!
//! The block routines that place a receipt onto a page. Every routine
//! draws through the [`Canvas`] trait and advances the shared cursor; the
//! assembler in `lib.rs` calls them in a fixed order.
//!
//! The page is a fixed, absolute-positioned layout. Column offsets are
//! invariant constants shared between the item table, the totals block,
//! and the header's label/value pairs. Notes and totals both anchor at
//! the same fixed Y ([`LayoutConfig::footer_anchor_y`]), which means a
//! long enough item table runs into them. That is a known limit of the
//! fixed layout: the anchor is tunable through the config, but the engine
//! does not fall back to dynamic flow.

use log::warn;

use crate::canvas::{Canvas, FontFamily, Rgb};
use crate::error::Result;
use crate::format;
use crate::image_probe;
use crate::model::{LineItem, Party};

/// X offset of the quantity column.
pub const QUANTITY_COL: f64 = 360.0;
/// X offset of the rate column. Also the left edge of the right-aligned
/// label/value pairs in the header and totals blocks.
pub const RATE_COL: f64 = 405.0;
/// X offset of the amount/total column.
pub const AMOUNT_COL: f64 = 480.0;

pub const RECEIPT_LABEL: &str = "RECEIPT";
pub const NOTES_LABEL: &str = "NOTES";
pub const RECEIPT_NO_LABEL: &str = "RECEIPT NO";
pub const DATE_LABEL: &str = "DATE";
pub const BILL_TO_LABEL: &str = "BILL TO";
pub const SUBTOTAL_LABEL: &str = "SUBTOTAL";
pub const TAX_LABEL: &str = "TAX";
pub const DISCOUNT_LABEL: &str = "DISCOUNT";
pub const TOTAL_LABEL: &str = "TOTAL";
pub const ITEM_LABEL: &str = "ITEM";
pub const QUANTITY_LABEL: &str = "QTY";
pub const PRICE_LABEL: &str = "PRICE";

/// Body text and amount values.
const INK: Rgb = (0, 0, 0);
/// Section headings and the biller name.
const MUTED: Rgb = (55, 55, 55);
/// Labels in the recipient block and label/value rows.
const LABEL: Rgb = (75, 75, 75);
/// The biller block's horizontal rule.
const RULE: Rgb = (225, 225, 225);

/// Tunable layout parameters. The defaults reproduce the reference
/// layout on an A4 page with 40-point margins.
#[derive(Debug, Clone, Copy)]
pub struct LayoutConfig {
    /// Absolute Y at which both the notes block and the totals block
    /// anchor. Item tables long enough to reach this Y will overlap;
    /// lower the anchor to make room for more rows.
    pub footer_anchor_y: f64,

    /// Width the logo is scaled to, preserving its aspect ratio.
    pub logo_width: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            footer_anchor_y: 650.0,
            logo_width: 100.0,
        }
    }
}

/// Semantic category of a totals-block row. Each kind carries its own
/// label and label style; the grand total is the only emphasized row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Subtotal,
    Tax,
    Discount,
    Total,
}

impl RowKind {
    pub fn label(self) -> &'static str {
        match self {
            RowKind::Subtotal => SUBTOTAL_LABEL,
            RowKind::Tax => TAX_LABEL,
            RowKind::Discount => DISCOUNT_LABEL,
            RowKind::Total => TOTAL_LABEL,
        }
    }

    /// Font face and size for the row's label.
    pub fn label_font(self) -> (FontFamily, f64) {
        match self {
            RowKind::Total => (FontFamily::Bold, 11.5),
            _ => (FontFamily::Regular, 9.0),
        }
    }
}

/// The shared right-aligned primitive: a label at the rate column, a
/// value at the amount column, then a fixed row advance. The header and
/// the totals block are both composed from this.
pub fn label_value_row<C: Canvas>(
    canvas: &mut C,
    label: &str,
    value: &str,
    label_font: (FontFamily, f64),
) -> Result<()> {
    let (family, size) = label_font;
    canvas.set_font(family, size)?;
    canvas.set_text_color(LABEL);
    canvas.set_x(RATE_COL);
    canvas.draw_text(label)?;
    canvas.set_font(family, 12.0)?;
    canvas.set_text_color(INK);
    canvas.set_x(AMOUNT_COL);
    canvas.draw_text(value)?;
    canvas.advance(24.0);
    Ok(())
}

/// A totals-block row: the kind's label plus a formatted amount.
pub fn amount_row<C: Canvas>(canvas: &mut C, kind: RowKind, amount: f64) -> Result<()> {
    label_value_row(
        canvas,
        kind.label(),
        &format::currency(amount),
        kind.label_font(),
    )
}

/// The top-right header: a large title anchored at the rate column, then
/// the receipt number and date as label/value pairs. Number and date come
/// from the receipt itself, never from constants.
pub fn header<C: Canvas>(canvas: &mut C, number: &str, date: &str) -> Result<()> {
    canvas.set_font(FontFamily::Regular, 32.0)?;
    canvas.set_xy(RATE_COL, 40.0);
    canvas.set_text_color(INK);
    canvas.draw_text(RECEIPT_LABEL)?;
    canvas.advance(36.0);
    canvas.advance(24.0);
    label_value_row(canvas, RECEIPT_NO_LABEL, number, (FontFamily::Regular, 9.0))?;
    label_value_row(canvas, DATE_LABEL, date, (FontFamily::Regular, 9.0))
}

/// The biller block: optional logo, name, and a short horizontal rule.
///
/// A logo that fails to probe is skipped with a warning and layout
/// continues at the name line. The probe guarantees non-zero source
/// dimensions, so the scale factor is always well defined.
pub fn biller<C: Canvas>(canvas: &mut C, party: &Party, config: &LayoutConfig) -> Result<()> {
    if let Some(logo) = party.logo.as_deref().filter(|l| !l.is_empty()) {
        match image_probe::probe(logo) {
            Ok(dims) => {
                let scaled_height = scaled_logo_height(dims.width, dims.height, config.logo_width);
                canvas.draw_image(logo, canvas.x(), canvas.y(), config.logo_width, scaled_height)?;
                canvas.advance(scaled_height + 24.0);
            }
            Err(err) => warn!("skipping logo '{logo}': {err}"),
        }
    }
    canvas.set_font(FontFamily::Regular, 12.0)?;
    canvas.set_text_color(MUTED);
    canvas.draw_text(&party.name)?;
    canvas.advance(36.0);
    canvas.set_stroke_color(RULE);
    canvas.draw_line(canvas.x(), canvas.y(), 100.0, canvas.y())?;
    canvas.advance(36.0);
    Ok(())
}

/// Proportional logo height for a target width:
/// `height * target_width / width`.
pub fn scaled_logo_height(width_px: u32, height_px: u32, target_width: f64) -> f64 {
    f64::from(height_px) * target_width / f64::from(width_px)
}

/// The recipient block: label, name, and contact in three stacked lines.
/// An empty contact still draws and advances, keeping the vertical
/// rhythm fixed.
pub fn bill_to<C: Canvas>(canvas: &mut C, party: &Party) -> Result<()> {
    canvas.set_text_color(LABEL);
    canvas.set_font(FontFamily::Regular, 9.0)?;
    canvas.draw_text(BILL_TO_LABEL)?;
    canvas.advance(18.0);
    canvas.set_font(FontFamily::Regular, 15.0)?;
    canvas.draw_text(&party.name)?;
    canvas.advance(24.0);
    canvas.set_font(FontFamily::Regular, 12.0)?;
    canvas.draw_text(&party.email)?;
    canvas.advance(64.0);
    Ok(())
}

/// The item table: a header row plus one row per line item, in model
/// order. Returns the accumulated subtotal; the totals block must be fed
/// this exact value so display and computation cannot drift.
pub fn item_table<C: Canvas>(canvas: &mut C, items: &[LineItem]) -> Result<f64> {
    canvas.set_font(FontFamily::Regular, 9.0)?;
    canvas.set_text_color(MUTED);
    canvas.draw_text(ITEM_LABEL)?;
    canvas.set_x(QUANTITY_COL);
    canvas.draw_text(QUANTITY_LABEL)?;
    canvas.set_x(RATE_COL);
    canvas.draw_text(PRICE_LABEL)?;
    canvas.set_x(AMOUNT_COL);
    canvas.draw_text(TOTAL_LABEL)?;
    canvas.advance(24.0);

    let mut subtotal = 0.0;
    for item in items {
        canvas.set_font(FontFamily::Regular, 11.0)?;
        canvas.set_text_color(INK);
        canvas.draw_text(&item.name)?;
        canvas.set_x(QUANTITY_COL);
        canvas.draw_text(&item.quantity.to_string())?;
        canvas.set_x(RATE_COL);
        canvas.draw_text(&format::currency(item.price))?;
        canvas.set_x(AMOUNT_COL);
        let total = item.total();
        canvas.draw_text(&format::currency(total))?;
        canvas.advance(24.0);
        subtotal += total;
    }

    Ok(subtotal)
}

/// The totals block, anchored at the configured footer Y. Tax and
/// discount rows appear only for amounts strictly greater than zero; the
/// grand total is always `subtotal + tax - discount`.
pub fn totals<C: Canvas>(
    canvas: &mut C,
    subtotal: f64,
    tax: f64,
    discount: f64,
    config: &LayoutConfig,
) -> Result<()> {
    canvas.set_y(config.footer_anchor_y);
    amount_row(canvas, RowKind::Subtotal, subtotal)?;
    if tax > 0.0 {
        amount_row(canvas, RowKind::Tax, tax)?;
    }
    if discount > 0.0 {
        amount_row(canvas, RowKind::Discount, discount)?;
    }
    amount_row(canvas, RowKind::Total, subtotal + tax - discount)
}

/// The notes block, anchored at the same footer Y as the totals block.
pub fn notes<C: Canvas>(canvas: &mut C, raw: &str, config: &LayoutConfig) -> Result<()> {
    canvas.set_y(config.footer_anchor_y);
    canvas.set_font(FontFamily::Regular, 10.0)?;
    canvas.set_text_color(MUTED);
    canvas.draw_text(NOTES_LABEL)?;
    canvas.advance(18.0);
    canvas.set_font(FontFamily::Regular, 9.0)?;
    canvas.set_text_color(INK);
    for line in format::split_notes(raw) {
        canvas.draw_text(&line)?;
        canvas.advance(15.0);
    }
    canvas.advance(48.0);
    Ok(())
}
