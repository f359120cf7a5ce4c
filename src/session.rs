use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;

use crate::models::ProductId;

/// Quantities typed on the calculator screen, keyed by product.
///
/// Text is stored verbatim so half-typed or empty input survives editing.
/// It is only parsed when totals are computed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuantitySession {
    entries: HashMap<ProductId, String>,
}

impl QuantitySession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_quantity(&mut self, product_id: ProductId, text: impl Into<String>) {
        self.entries.insert(product_id, text.into());
    }

    #[must_use]
    pub fn raw(&self, product_id: &ProductId) -> Option<&str> {
        self.entries.get(product_id).map(String::as_str)
    }

    /// Parsed quantity for a product; see [`parse_quantity`].
    #[must_use]
    pub fn quantity(&self, product_id: &ProductId) -> Decimal {
        self.raw(product_id).map_or(Decimal::ZERO, parse_quantity)
    }

    pub fn remove(&mut self, product_id: &ProductId) -> Option<String> {
        self.entries.remove(product_id)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Coerces quantity text to a number. Empty, non-numeric and negative input
/// all count as zero.
#[must_use]
pub fn parse_quantity(text: &str) -> Decimal {
    let text = text.trim();
    if text.is_empty() {
        return Decimal::ZERO;
    }

    match Decimal::from_str(text) {
        Ok(qty) if qty > Decimal::ZERO => qty.normalize(),
        _ => Decimal::ZERO,
    }
}
