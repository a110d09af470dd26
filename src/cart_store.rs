//! The cart aggregate.
//!
//! [`CartStore`] is the only place cart lines are mutated. Every operation
//! applies to memory first, then writes the whole line list to its storage
//! slot. Operations that change nothing (removing an unknown id, setting the
//! quantity of an unknown id) do not write.
//!
//! A failed write is logged and the in-memory cart stays authoritative; the
//! next successful write catches storage up. Callers that need to know call
//! [`CartStore::persist`] themselves.
//!
//! ```
//! use std::num::NonZeroU32;
//! use storefront_core::cart_model::CartItem;
//! use storefront_core::cart_store::CartStore;
//! use storefront_core::local_db_state::MemoryStorage;
//!
//! let mut cart = CartStore::open(MemoryStorage::new(), "cart");
//! let dosa = CartItem {
//!     id: 1,
//!     name: "Masala Dosa".to_string(),
//!     price: 10.0,
//!     image: String::new(),
//!     category: "Mains".to_string(),
//! };
//! cart.add(dosa.clone(), NonZeroU32::MIN);
//! cart.add(dosa, NonZeroU32::new(2).unwrap());
//!
//! assert_eq!(cart.lines().len(), 1);
//! assert_eq!(cart.count(), 3);
//! assert_eq!(cart.subtotal(), 30.0);
//! assert!(cart.is_open());
//! ```

use std::num::NonZeroU32;

use log::{debug, info, warn};

use crate::app_response::AppResponse;
use crate::cart_model::{
    CartItem, CartLine, CartSnapshot, CartState, CheckoutConfirmation, CHECKOUT_MESSAGE,
};
use crate::local_db_state::SlotStorage;

pub struct CartStore<S: SlotStorage> {
    storage: S,
    key: String,
    state: CartState,
    is_open: bool,
}

impl<S: SlotStorage> CartStore<S> {
    /// Rehydrates the cart from `key` in `storage`. An absent, unreadable or
    /// corrupt slot yields an empty cart. The cart starts closed.
    pub fn open(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let state = load_state(&storage, &key);
        info!(
            "Cart rehydrated from slot '{}' with {} line(s)",
            key,
            state.lines().len()
        );
        Self {
            storage,
            key,
            state,
            is_open: false,
        }
    }

    /// Adds `quantity` of `item`. An item already in the cart keeps its
    /// original snapshot and only its quantity grows; a new item is appended.
    /// Opens the cart.
    pub fn add(&mut self, item: CartItem, quantity: NonZeroU32) {
        match self.state.line_mut(item.id) {
            Some(line) => {
                line.quantity = line.quantity.saturating_add(quantity.get());
                debug!("Cart line {} now has quantity {}", line.id, line.quantity);
            }
            None => {
                debug!("Cart line {} added with quantity {}", item.id, quantity);
                self.state.push(CartLine::new(item, quantity));
            }
        }
        self.is_open = true;
        self.write_through();
    }

    /// Removes the line for `id`. Returns `false`, without touching storage,
    /// when there was no such line.
    pub fn remove(&mut self, id: u32) -> bool {
        if !self.state.remove(id) {
            debug!("Cart remove ignored, no line {}", id);
            return false;
        }
        self.write_through();
        true
    }

    /// Overwrites the quantity of the line for `id`; zero or less removes the
    /// line. Unknown ids are ignored.
    pub fn set_quantity(&mut self, id: u32, quantity: i64) {
        if quantity <= 0 {
            self.remove(id);
            return;
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        match self.state.line_mut(id) {
            Some(line) if line.quantity == quantity => {}
            Some(line) => {
                line.quantity = quantity;
                self.write_through();
            }
            None => debug!("Cart quantity update ignored, no line {}", id),
        }
    }

    pub fn clear(&mut self) {
        self.state.clear();
        self.write_through();
    }

    pub fn open_cart(&mut self) {
        self.is_open = true;
    }

    pub fn close_cart(&mut self) {
        self.is_open = false;
    }

    pub fn toggle_cart(&mut self) {
        self.is_open = !self.is_open;
    }

    /// Simulated checkout: empties and closes the cart. Nothing is charged
    /// and no order is kept.
    pub fn checkout(&mut self) -> CheckoutConfirmation {
        let confirmation = CheckoutConfirmation {
            item_count: self.state.count(),
            subtotal: self.state.subtotal(),
            message: CHECKOUT_MESSAGE.to_string(),
        };
        info!(
            "Checkout of {} item(s) for {}",
            confirmation.item_count, confirmation.subtotal
        );
        self.clear();
        self.close_cart();
        confirmation
    }

    pub fn lines(&self) -> &[CartLine] {
        self.state.lines()
    }

    pub fn state(&self) -> &CartState {
        &self.state
    }

    pub fn subtotal(&self) -> f64 {
        self.state.subtotal()
    }

    pub fn count(&self) -> u32 {
        self.state.count()
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot::new(&self.state, self.is_open)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Re-reads the cart from storage, discarding the in-memory lines.
    pub fn reload(&mut self) {
        self.state = load_state(&self.storage, &self.key);
    }

    /// Writes the current lines to the storage slot.
    pub fn persist(&mut self) -> Result<(), AppResponse> {
        let json = serde_json::to_string(&self.state)?;
        self.storage.write_slot(&self.key, &json)
    }

    fn write_through(&mut self) {
        if let Err(e) = self.persist() {
            warn!("Failed to persist cart to slot '{}': {}", self.key, e);
        }
    }
}

fn load_state<S: SlotStorage>(storage: &S, key: &str) -> CartState {
    let raw = match storage.read_slot(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return CartState::new(),
        Err(e) => {
            warn!("Could not read cart slot '{}', starting empty: {}", key, e);
            return CartState::new();
        }
    };

    match serde_json::from_str::<Vec<CartLine>>(&raw) {
        Ok(lines) => CartState::from_lines(lines),
        Err(e) => {
            warn!("Cart slot '{}' is corrupt, starting empty: {}", key, e);
            CartState::new()
        }
    }
}
