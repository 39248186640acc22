//! # Receipt Model
//!
//! The input representation for the layout engine. A receipt is a flat
//! record: two parties, an ordered list of line items, free-text notes,
//! and tax/discount amounts. This is designed to be easily produced by
//! direct JSON construction or by application code building the structs.
//!
//! Subtotal and grand total are deliberately absent: they are derived
//! from the line items on every render, never stored, so the displayed
//! figures can never drift from the data.

use serde::{Deserialize, Serialize};

/// A complete receipt ready for rendering.
///
/// Not mutated after construction. Item order is significant: rows render
/// in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    /// Receipt identifier. Used in the output file name, so it must be
    /// non-empty; render entry points reject an empty number.
    pub number: String,

    /// Issue date as a display string. Never parsed.
    pub date: String,

    /// The issuing party.
    pub bill_from: Party,

    /// The receiving party.
    pub bill_to: Party,

    /// Line items, rendered in insertion order.
    #[serde(default)]
    pub items: Vec<LineItem>,

    /// Free-text notes. A literal `\n` escape (backslash followed by
    /// the letter n) marks a line break; see [`crate::format::split_notes`].
    #[serde(default)]
    pub notes: String,

    /// Tax amount. Zero suppresses the tax row.
    #[serde(default)]
    pub tax: f64,

    /// Discount amount. Zero suppresses the discount row.
    #[serde(default)]
    pub discount: f64,
}

/// A named party on the receipt, biller or recipient.
///
/// A party has no identity beyond its fields; it is compared and passed
/// by value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    pub name: String,

    /// Logo image reference: a file path, a `data:image/...` URI, or raw
    /// base64 image data. `None` (or empty) means no logo block is drawn.
    #[serde(default)]
    pub logo: Option<String>,

    /// Contact string. An empty contact still occupies its line in the
    /// recipient block so the vertical rhythm stays fixed.
    #[serde(default)]
    pub email: String,
}

/// One purchasable entry with a quantity and a unit price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub name: String,
    pub quantity: u32,
    pub price: f64,
}

impl LineItem {
    /// Line total: quantity times unit price.
    pub fn total(&self) -> f64 {
        f64::from(self.quantity) * self.price
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_total_is_quantity_times_price() {
        let item = LineItem {
            name: "Mystic Staff".to_string(),
            quantity: 8,
            price: 320.0,
        };
        assert_eq!(item.total(), 2560.0);
    }

    #[test]
    fn receipt_parses_from_camel_case_json() {
        let json = r#"{
            "number": "083",
            "date": "Aug 3, 2023",
            "billFrom": { "name": "Gopher Inc.", "logo": "gopher.png", "email": "gopher@gmail.com" },
            "billTo": { "name": "John Doe", "email": "john@gmail.com" },
            "items": [
                { "name": "Perseverance", "quantity": 1, "price": 100 }
            ],
            "notes": "Thank you for your business",
            "tax": 130,
            "discount": 80
        }"#;
        let receipt: Receipt = serde_json::from_str(json).unwrap();
        assert_eq!(receipt.number, "083");
        assert_eq!(receipt.bill_from.logo.as_deref(), Some("gopher.png"));
        assert_eq!(receipt.bill_to.logo, None);
        assert_eq!(receipt.items[0].total(), 100.0);
        assert_eq!(receipt.tax, 130.0);
    }

    #[test]
    fn optional_fields_default_when_absent() {
        let json = r#"{
            "number": "1",
            "date": "Jan 1, 2026",
            "billFrom": { "name": "A" },
            "billTo": { "name": "B" }
        }"#;
        let receipt: Receipt = serde_json::from_str(json).unwrap();
        assert!(receipt.items.is_empty());
        assert_eq!(receipt.notes, "");
        assert_eq!(receipt.tax, 0.0);
        assert_eq!(receipt.discount, 0.0);
        assert_eq!(receipt.bill_from.email, "");
    }
}
