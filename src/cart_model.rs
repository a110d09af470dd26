//! Cart data model.
//!
//! A [`CartLine`] is keyed by the catalog item's id and carries a display
//! snapshot taken when the item was first added, so the price shown in the
//! cart is the price at that moment. [`CartState`] is the ordered line list;
//! its subtotal and item count are always computed from the lines and never
//! stored.
//!
//! The serialized form of a `CartState` is a bare JSON array of lines:
//!
//! ```json
//! [{"id":1,"name":"Masala Dosa","price":10.0,"quantity":2,"image":"/dosa.jpg","category":"Mains"}]
//! ```

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::catalog_model::MenuItem;
use crate::formatters::format_price;

/// What gets captured about an item when it is added to the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: u32,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub category: String,
}

impl From<&MenuItem> for CartItem {
    fn from(item: &MenuItem) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            price: item.price,
            image: item.image.clone(),
            category: item.category.clone(),
        }
    }
}

/// One row of the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: u32,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub category: String,
}

impl CartLine {
    pub fn new(item: CartItem, quantity: NonZeroU32) -> Self {
        Self {
            id: item.id,
            name: item.name,
            price: item.price,
            quantity: quantity.get(),
            image: item.image,
            category: item.category,
        }
    }

    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// The ordered cart lines, in insertion order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartState {
    lines: Vec<CartLine>,
}

impl CartState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a state from raw lines, enforcing the line invariants: lines
    /// with quantity 0 are dropped and repeated ids are folded into their
    /// first occurrence.
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        let mut state = Self::new();
        for line in lines {
            if line.quantity == 0 {
                continue;
            }
            match state.line_mut(line.id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(line.quantity)
                }
                None => state.lines.push(line),
            }
        }
        state
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, id: u32) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id == id)
    }

    pub(crate) fn line_mut(&mut self, id: u32) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.id == id)
    }

    pub(crate) fn push(&mut self, line: CartLine) {
        self.lines.push(line);
    }

    /// Removes the line for `id`, returning whether one existed.
    pub(crate) fn remove(&mut self, id: u32) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.id != id);
        self.lines.len() != before
    }

    pub(crate) fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Σ price × quantity.
    pub fn subtotal(&self) -> f64 {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Σ quantity.
    pub fn count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |acc, line| acc.saturating_add(line.quantity))
    }
}

/// Read model handed to display surfaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    pub lines: Vec<CartLine>,
    pub subtotal: f64,
    pub formatted_subtotal: String,
    pub count: u32,
    pub is_open: bool,
}

impl CartSnapshot {
    pub fn new(state: &CartState, is_open: bool) -> Self {
        let subtotal = state.subtotal();
        Self {
            lines: state.lines().to_vec(),
            subtotal,
            formatted_subtotal: format_price(subtotal),
            count: state.count(),
            is_open,
        }
    }
}

pub const CHECKOUT_MESSAGE: &str = "Thank you for your order!";

/// Signal returned by checkout. No order is recorded anywhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutConfirmation {
    pub item_count: u32,
    pub subtotal: f64,
    pub message: String,
}
