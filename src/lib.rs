//! # Kvitto
//!
//! A fixed-layout receipt renderer.
//!
//! Most document generators run a full flow-layout engine to place
//! content. A receipt doesn't need one: the page is a single fixed grid
//! of blocks whose positions never change. Kvitto renders that grid
//! directly with absolute column offsets, fixed vertical advances, and a
//! cursor threaded through a short, ordered list of block routines.
//!
//! ## Architecture
//!
//! ```text
//! Input (JSON/API)
//!       ↓
//!   [model]    — Receipt: parties, line items, amounts, notes
//!       ↓
//!   [layout]   — Block routines: header, parties, item table, totals, notes
//!       ↓
//!   [canvas]   — Abstract drawing surface (cursor + primitives)
//!       ↓
//!   [pdf]      — printpdf-backed canvas, file output
//! ```
//!
//! Totals are derived, never stored: the item table accumulates the
//! subtotal while it draws, and the totals block receives that exact
//! value. Rendering is sequential and fail-fast; the first canvas error
//! abandons the remaining blocks. Concurrent renders of independent
//! receipts are safe as long as each owns its own canvas.

pub mod canvas;
pub mod error;
pub mod format;
pub mod image_probe;
pub mod layout;
pub mod model;
pub mod pdf;

pub use canvas::{Canvas, FontFamily};
pub use error::{Error, Result};
pub use layout::LayoutConfig;
pub use model::{LineItem, Party, Receipt};

/// Render a receipt onto a canvas with the default layout.
///
/// This is the primary entry point for custom canvases; PDF callers
/// usually want [`pdf::render_to_file`] instead.
pub fn render<C: Canvas>(canvas: &mut C, receipt: &Receipt) -> Result<()> {
    render_with_config(canvas, receipt, &LayoutConfig::default())
}

/// Render a receipt onto a canvas with a tuned layout.
///
/// The blocks run in a fixed order: biller, recipient, item table, notes,
/// totals, header. The item table accumulates the subtotal that the
/// totals block consumes; notes, totals, and the header write at fixed
/// absolute positions, so their relative order only matters for the data
/// dependency.
pub fn render_with_config<C: Canvas>(
    canvas: &mut C,
    receipt: &Receipt,
    config: &LayoutConfig,
) -> Result<()> {
    if receipt.number.is_empty() {
        return Err(Error::EmptyReceiptNumber);
    }
    layout::biller(canvas, &receipt.bill_from, config)?;
    layout::bill_to(canvas, &receipt.bill_to)?;
    let subtotal = layout::item_table(canvas, &receipt.items)?;
    layout::notes(canvas, &receipt.notes, config)?;
    layout::totals(canvas, subtotal, receipt.tax, receipt.discount, config)?;
    layout::header(canvas, &receipt.number, &receipt.date)
}

/// Parse a receipt described as JSON.
pub fn receipt_from_json(json: &str) -> Result<Receipt> {
    Ok(serde_json::from_str(json)?)
}
