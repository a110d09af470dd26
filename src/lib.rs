//! # Storefront Core
//!
//! On-device core for a hotel and restaurant storefront app: the bundled
//! catalogs (menu, rooms, banquet venues, gallery, staff), the search and
//! filter engine over them, and a shopping cart persisted to local storage.
//! Designed to be linked into a UI shell (Flutter and friends) over a C ABI;
//! Rust hosts can use the modules directly.
//!
//! ## Features
//!
//! - **Pure catalog filtering**: text search, category, dietary and spice
//!   filters, price range, guest capacity and bed type, with stable sorting
//! - **Persisted cart**: one line per item, locked-in prices, totals derived
//!   from the lines, stored in an LMDB slot and rehydrated on start
//! - **Forgiving storage**: a missing or corrupt cart slot starts an empty cart
//! - **Safe error handling**: every FFI call answers with a JSON [`AppResponse`]
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::ffi::CString;
//! use storefront_core::{add_menu_item, create_store, filter_catalog, load_catalog};
//!
//! let name = CString::new("hotel").unwrap();
//! let state = create_store(name.as_ptr());
//!
//! let kind = CString::new("menu").unwrap();
//! let menu = CString::new(r#"[{"id":1,"name":"Paneer Tikka","category":"Starters","price":9.5}]"#).unwrap();
//! load_catalog(state, kind.as_ptr(), menu.as_ptr());
//!
//! let criteria = CString::new(r#"{"search":"paneer","sort":"price-asc"}"#).unwrap();
//! let matches = filter_catalog(state, kind.as_ptr(), criteria.as_ptr());
//!
//! let cart = add_menu_item(state, 1, 2);
//! ```
//!
//! ## FFI Functions
//!
//! - [`create_store`] / [`create_store_with_config`] - Open the store
//! - [`load_catalog`] - Load one catalog from bundled JSON
//! - [`filter_catalog`] / [`search_catalogs`] - Run filter criteria
//! - [`catalog_categories`], [`catalog_price_bounds`] - Filter panel inputs
//! - [`find_catalog_item`], [`find_catalog_item_by_slug`], [`related_items`], [`featured_items`]
//! - [`get_cart`], [`add_to_cart`], [`add_menu_item`], [`remove_from_cart`],
//!   [`update_quantity`], [`clear_cart`] - Cart lines
//! - [`open_cart`], [`close_cart`], [`toggle_cart`], [`checkout`] - Cart visibility and checkout
//! - [`quote_room`], [`book_room`] - Room stay price and simulated booking
//! - [`format_amount`], [`truncate_description`] - Display text for cards
//! - [`reset_store`] - Wipe stored data
//! - [`close_store`] - Release the store
//! - [`free_response`] - Release a string returned by any of the above

pub mod app_response;
pub mod cart_model;
pub mod cart_store;
pub mod catalog_filter;
pub mod catalog_model;
pub mod catalog_view;
pub mod formatters;
pub mod local_db_state;
pub mod room_booking;
pub mod store_config;
pub mod storefront_state;

use std::ffi::{CStr, CString};
use std::num::NonZeroU32;
use std::os::raw::c_char;

use log::{info, warn};
use serde::{Deserialize, Serialize};

pub use crate::app_response::AppResponse;
use crate::cart_model::CartItem;
use crate::catalog_filter::FilterCriteria;
use crate::catalog_model::{CatalogKind, Room};
use crate::formatters::{format_price, truncate_text};
use crate::store_config::StoreConfig;
pub use crate::storefront_state::StorefrontState;

/// Opens the store named `name`, creating its database when missing.
///
/// The database lives in the directory `<name>.lmdb`. The cart is
/// rehydrated from the `cart` slot; if that slot is missing or corrupt the
/// cart starts empty.
///
/// # Returns
///
/// A pointer to the [`StorefrontState`], or null on failure. Release it with
/// [`close_store`].
///
/// # Errors
///
/// Returns null if:
/// - `name` is null or not valid UTF-8
/// - the name is empty
/// - the database cannot be opened
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn create_store(name: *const c_char) -> *mut StorefrontState {
    if name.is_null() {
        warn!("Null name pointer passed to create_store");
        return std::ptr::null_mut();
    }

    let name_str = match unsafe { CStr::from_ptr(name).to_str() } {
        Ok(s) => s,
        Err(e) => {
            warn!("Invalid UTF-8 in name parameter: {e}");
            return std::ptr::null_mut();
        }
    };

    open_store(StoreConfig::new(name_str))
}

/// Opens a store from a JSON [`StoreConfig`].
///
/// ```json
/// { "name": "hotel", "mapSize": 10485760, "cartKey": "cart" }
/// ```
///
/// Omitted fields take their defaults. Returns null on a null pointer,
/// invalid JSON, an invalid config or a database failure.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn create_store_with_config(config_ptr: *const c_char) -> *mut StorefrontState {
    if config_ptr.is_null() {
        warn!("Null config pointer passed to create_store_with_config");
        return std::ptr::null_mut();
    }

    let config_str = match unsafe { CStr::from_ptr(config_ptr).to_str() } {
        Ok(s) => s,
        Err(e) => {
            warn!("Invalid UTF-8 in config parameter: {e}");
            return std::ptr::null_mut();
        }
    };

    match StoreConfig::from_json(config_str) {
        Ok(config) => open_store(config),
        Err(e) => {
            warn!("Rejected store config: {e}");
            std::ptr::null_mut()
        }
    }
}

fn open_store(config: StoreConfig) -> *mut StorefrontState {
    let db_dir = config.db_dir();
    info!("Opening storefront at: {}", db_dir.display());

    match StorefrontState::init(config) {
        Ok(state) => {
            info!("✅ Storefront initialized successfully");
            Box::into_raw(Box::new(state))
        }
        Err(e) => {
            warn!("❌ Failed to initialize storefront: {}", e);
            warn!("Attempted path: {}", db_dir.display());
            std::ptr::null_mut()
        }
    }
}

/// Loads (or replaces) one catalog from a JSON array of records.
///
/// # Parameters
///
/// * `state` - Store pointer from [`create_store`]
/// * `kind_ptr` - One of `menu`, `rooms`, `banquets`, `gallery`, `staff`
/// * `json_ptr` - The bundled records, e.g. the contents of `menu.json`
///
/// # Returns
///
/// `Ok` with the number of records loaded, `ValidationError` for an unknown
/// kind, `SerializationError` for malformed records.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn load_catalog(
    state: *mut StorefrontState,
    kind_ptr: *const c_char,
    json_ptr: *const c_char,
) -> *const c_char {
    let state = match state_mut(state, "load_catalog") {
        Ok(s) => s,
        Err(err) => return err,
    };
    let kind = match parse_kind(kind_ptr) {
        Ok(kind) => kind,
        Err(err) => return err,
    };
    let json = match c_ptr_to_string(json_ptr, "JSON") {
        Ok(json) => json,
        Err(err) => return err,
    };

    match state.catalogs.load_json(kind, &json) {
        Ok(count) => response_to_c_string(&AppResponse::Ok(count.to_string())),
        Err(e) => response_to_c_string(&e),
    }
}

/// Filters one catalog.
///
/// `criteria_ptr` holds a JSON [`FilterCriteria`]; an empty string means the
/// neutral criteria. The `Ok` payload is the JSON array of matching records,
/// possibly empty.
///
/// ```json
/// {
///   "search": "curry",
///   "category": "Mains",
///   "vegetarianOnly": true,
///   "maxSpiceLevel": 3,
///   "priceRange": { "min": 8, "max": 20 },
///   "sort": "price-asc"
/// }
/// ```
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn filter_catalog(
    state: *mut StorefrontState,
    kind_ptr: *const c_char,
    criteria_ptr: *const c_char,
) -> *const c_char {
    let state = match state_mut(state, "filter_catalog") {
        Ok(s) => s,
        Err(err) => return err,
    };
    let kind = match parse_kind(kind_ptr) {
        Ok(kind) => kind,
        Err(err) => return err,
    };
    let criteria = match parse_criteria(criteria_ptr) {
        Ok(criteria) => criteria,
        Err(err) => return err,
    };

    match state.catalogs.filter_json(kind, &criteria) {
        Ok(json) => response_to_c_string(&AppResponse::Ok(json)),
        Err(e) => response_to_c_string(&e),
    }
}

/// Applies the criteria to every loaded catalog. Records carry a `kind` tag.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn search_catalogs(
    state: *mut StorefrontState,
    criteria_ptr: *const c_char,
) -> *const c_char {
    let state = match state_mut(state, "search_catalogs") {
        Ok(s) => s,
        Err(err) => return err,
    };
    let criteria = match parse_criteria(criteria_ptr) {
        Ok(criteria) => criteria,
        Err(err) => return err,
    };

    json_response(&state.catalogs.search_all(&criteria))
}

/// Distinct categories (staff: roles) of a catalog, in first-seen order.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn catalog_categories(
    state: *mut StorefrontState,
    kind_ptr: *const c_char,
) -> *const c_char {
    let state = match state_mut(state, "catalog_categories") {
        Ok(s) => s,
        Err(err) => return err,
    };
    let kind = match parse_kind(kind_ptr) {
        Ok(kind) => kind,
        Err(err) => return err,
    };

    json_response(&state.catalogs.categories(kind))
}

/// `{"min":..,"max":..}` over the catalog's prices, `{0,0}` when empty.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn catalog_price_bounds(
    state: *mut StorefrontState,
    kind_ptr: *const c_char,
) -> *const c_char {
    let state = match state_mut(state, "catalog_price_bounds") {
        Ok(s) => s,
        Err(err) => return err,
    };
    let kind = match parse_kind(kind_ptr) {
        Ok(kind) => kind,
        Err(err) => return err,
    };

    json_response(&state.catalogs.price_bounds(kind))
}

/// Looks a record up by id. `NotFound` when no record has that id.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn find_catalog_item(
    state: *mut StorefrontState,
    kind_ptr: *const c_char,
    id: u32,
) -> *const c_char {
    let state = match state_mut(state, "find_catalog_item") {
        Ok(s) => s,
        Err(err) => return err,
    };
    let kind = match parse_kind(kind_ptr) {
        Ok(kind) => kind,
        Err(err) => return err,
    };

    match state.catalogs.find(kind, id) {
        Some(item) => json_response(&item),
        None => response_to_c_string(&AppResponse::NotFound(format!(
            "No {kind} record with id: {id}"
        ))),
    }
}

/// Looks a room or banquet venue up by slug.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn find_catalog_item_by_slug(
    state: *mut StorefrontState,
    kind_ptr: *const c_char,
    slug_ptr: *const c_char,
) -> *const c_char {
    let state = match state_mut(state, "find_catalog_item_by_slug") {
        Ok(s) => s,
        Err(err) => return err,
    };
    let kind = match parse_kind(kind_ptr) {
        Ok(kind) => kind,
        Err(err) => return err,
    };
    let slug = match c_ptr_to_string(slug_ptr, "slug") {
        Ok(slug) => slug,
        Err(err) => return err,
    };

    match state.catalogs.find_by_slug(kind, &slug) {
        Some(item) => json_response(&item),
        None => response_to_c_string(&AppResponse::NotFound(format!(
            "No {kind} record with slug: {slug}"
        ))),
    }
}

/// Up to `limit` records related to record `id` (same category when the kind
/// has categories).
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn related_items(
    state: *mut StorefrontState,
    kind_ptr: *const c_char,
    id: u32,
    limit: u32,
) -> *const c_char {
    let state = match state_mut(state, "related_items") {
        Ok(s) => s,
        Err(err) => return err,
    };
    let kind = match parse_kind(kind_ptr) {
        Ok(kind) => kind,
        Err(err) => return err,
    };

    json_response(&state.catalogs.related(kind, id, limit as usize))
}

/// Up to `limit` featured records, for the home page.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn featured_items(
    state: *mut StorefrontState,
    kind_ptr: *const c_char,
    limit: u32,
) -> *const c_char {
    let state = match state_mut(state, "featured_items") {
        Ok(s) => s,
        Err(err) => return err,
    };
    let kind = match parse_kind(kind_ptr) {
        Ok(kind) => kind,
        Err(err) => return err,
    };

    json_response(&state.catalogs.featured(kind, limit as usize))
}

/// Current cart: lines, subtotal, formatted subtotal, item count and
/// whether the cart is open.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_cart(state: *mut StorefrontState) -> *const c_char {
    match state_mut(state, "get_cart") {
        Ok(s) => json_response(&s.cart.snapshot()),
        Err(err) => err,
    }
}

#[derive(Debug, Deserialize)]
struct AddToCartRequest {
    id: u32,
    name: String,
    price: f64,
    #[serde(default)]
    image: String,
    #[serde(default)]
    category: String,
    #[serde(default = "default_quantity")]
    quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

/// Adds an item snapshot to the cart and opens it.
///
/// # JSON Format
///
/// ```json
/// { "id": 4, "name": "Butter Chicken", "price": 16.5, "image": "/img/bc.jpg", "category": "Mains", "quantity": 1 }
/// ```
///
/// `quantity` defaults to 1 and must be at least 1. When the id is already in
/// the cart only the quantity grows; the stored name and price are kept.
///
/// # Returns
///
/// `Ok` with the cart snapshot, `ValidationError` for a zero quantity.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn add_to_cart(
    state: *mut StorefrontState,
    json_ptr: *const c_char,
) -> *const c_char {
    let state = match state_mut(state, "add_to_cart") {
        Ok(s) => s,
        Err(err) => return err,
    };
    let json_str = match c_ptr_to_string(json_ptr, "JSON") {
        Ok(json) => json,
        Err(err) => return err,
    };

    let request: AddToCartRequest = match serde_json::from_str(&json_str) {
        Ok(r) => r,
        Err(e) => {
            let error = AppResponse::SerializationError(format!("Invalid JSON: {e}"));
            return response_to_c_string(&error);
        }
    };

    let quantity = match NonZeroU32::new(request.quantity) {
        Some(q) => q,
        None => return response_to_c_string(&zero_quantity()),
    };

    let item = CartItem {
        id: request.id,
        name: request.name,
        price: request.price,
        image: request.image,
        category: request.category,
    };
    state.cart.add(item, quantity);
    json_response(&state.cart.snapshot())
}

/// Adds `quantity` of the menu dish `id`, snapshotting it from the loaded
/// menu. `NotFound` when the menu has no such dish.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn add_menu_item(
    state: *mut StorefrontState,
    id: u32,
    quantity: u32,
) -> *const c_char {
    let state = match state_mut(state, "add_menu_item") {
        Ok(s) => s,
        Err(err) => return err,
    };
    let quantity = match NonZeroU32::new(quantity) {
        Some(q) => q,
        None => return response_to_c_string(&zero_quantity()),
    };

    let item = match state.catalogs.menu.find(id) {
        Some(dish) => CartItem::from(dish),
        None => {
            let error = AppResponse::NotFound(format!("No menu record with id: {id}"));
            return response_to_c_string(&error);
        }
    };
    state.cart.add(item, quantity);
    json_response(&state.cart.snapshot())
}

/// Removes the line for `id`. Removing an id that is not in the cart is not
/// an error and leaves the cart as it was.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn remove_from_cart(state: *mut StorefrontState, id: u32) -> *const c_char {
    let state = match state_mut(state, "remove_from_cart") {
        Ok(s) => s,
        Err(err) => return err,
    };
    state.cart.remove(id);
    json_response(&state.cart.snapshot())
}

/// Sets the quantity of line `id`; zero or a negative value removes it.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn update_quantity(
    state: *mut StorefrontState,
    id: u32,
    quantity: i64,
) -> *const c_char {
    let state = match state_mut(state, "update_quantity") {
        Ok(s) => s,
        Err(err) => return err,
    };
    state.cart.set_quantity(id, quantity);
    json_response(&state.cart.snapshot())
}

#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn clear_cart(state: *mut StorefrontState) -> *const c_char {
    let state = match state_mut(state, "clear_cart") {
        Ok(s) => s,
        Err(err) => return err,
    };
    state.cart.clear();
    json_response(&state.cart.snapshot())
}

#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn open_cart(state: *mut StorefrontState) -> *const c_char {
    let state = match state_mut(state, "open_cart") {
        Ok(s) => s,
        Err(err) => return err,
    };
    state.cart.open_cart();
    json_response(&state.cart.snapshot())
}

#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn close_cart(state: *mut StorefrontState) -> *const c_char {
    let state = match state_mut(state, "close_cart") {
        Ok(s) => s,
        Err(err) => return err,
    };
    state.cart.close_cart();
    json_response(&state.cart.snapshot())
}

#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn toggle_cart(state: *mut StorefrontState) -> *const c_char {
    let state = match state_mut(state, "toggle_cart") {
        Ok(s) => s,
        Err(err) => return err,
    };
    state.cart.toggle_cart();
    json_response(&state.cart.snapshot())
}

/// Simulated checkout: empties and closes the cart and answers with a
/// confirmation (`itemCount`, `subtotal`, `message`). Nothing is charged and
/// no order is stored.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn checkout(state: *mut StorefrontState) -> *const c_char {
    let state = match state_mut(state, "checkout") {
        Ok(s) => s,
        Err(err) => return err,
    };
    json_response(&state.cart.checkout())
}

/// Price of a stay of `nights` nights in room `room_id`: `nights`,
/// `nightlyRate`, `subtotal`, `tax` (15% taxes and fees) and `total`.
/// Zero nights is quoted as one.
///
/// # Returns
///
/// `Ok` with the quote, `NotFound` for an unknown room, `ValidationError` for
/// a room that is currently unavailable.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn quote_room(
    state: *mut StorefrontState,
    room_id: u32,
    nights: u32,
) -> *const c_char {
    let state = match state_mut(state, "quote_room") {
        Ok(s) => s,
        Err(err) => return err,
    };

    match find_room(state, room_id).and_then(|room| room.booking_quote(nights)) {
        Ok(quote) => json_response(&quote),
        Err(e) => response_to_c_string(&e),
    }
}

/// Simulated room booking. Answers with a confirmation carrying the quote
/// and a thank-you message; nothing is reserved or stored.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn book_room(
    state: *mut StorefrontState,
    room_id: u32,
    nights: u32,
) -> *const c_char {
    let state = match state_mut(state, "book_room") {
        Ok(s) => s,
        Err(err) => return err,
    };

    match find_room(state, room_id).and_then(|room| room.book(nights)) {
        Ok(confirmation) => json_response(&confirmation),
        Err(e) => response_to_c_string(&e),
    }
}

fn find_room(state: &StorefrontState, room_id: u32) -> Result<&Room, AppResponse> {
    state
        .catalogs
        .rooms
        .find(room_id)
        .ok_or_else(|| AppResponse::NotFound(format!("No rooms record with id: {room_id}")))
}

/// Formats an amount as US dollars, e.g. `$1,234.50`.
#[no_mangle]
pub extern "C" fn format_amount(amount: f64) -> *const c_char {
    response_to_c_string(&AppResponse::Ok(format_price(amount)))
}

/// Shortens a card description to `max_chars` characters, appending `...`
/// when it was cut.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn truncate_description(
    text_ptr: *const c_char,
    max_chars: u32,
) -> *const c_char {
    match c_ptr_to_string(text_ptr, "text") {
        Ok(text) => {
            let short = truncate_text(&text, max_chars as usize);
            response_to_c_string(&AppResponse::Ok(short))
        }
        Err(err) => err,
    }
}

/// Wipes every storage slot and starts an empty, closed cart. Loaded
/// catalogs are kept.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn reset_store(state: *mut StorefrontState) -> *const c_char {
    let state = match state_mut(state, "reset_store") {
        Ok(s) => s,
        Err(err) => return err,
    };

    match state.cart.storage().clear_all_slots() {
        Ok(()) => {
            state.cart.reload();
            state.cart.close_cart();
            json_response(&state.cart.snapshot())
        }
        Err(e) => {
            let error = AppResponse::DatabaseError(format!("Error resetting store: {e}"));
            response_to_c_string(&error)
        }
    }
}

/// Releases a store opened with [`create_store`].
///
/// The pointer must not be used afterwards. The LMDB environment is closed
/// when the state is dropped; the cart is already on disk because every
/// mutation writes through.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn close_store(state: *mut StorefrontState) -> *const c_char {
    if state.is_null() {
        let error = AppResponse::BadRequest("Null state pointer passed to close_store".to_string());
        return response_to_c_string(&error);
    }

    let state = unsafe { Box::from_raw(state) };
    info!("Closing storefront '{}'", state.config.name);
    drop(state);

    response_to_c_string(&AppResponse::Ok("Store closed successfully".to_string()))
}

/// Frees a string returned by any function of this library. Null is ignored.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn free_response(ptr: *const c_char) {
    if ptr.is_null() {
        return;
    }
    drop(unsafe { CString::from_raw(ptr as *mut c_char) });
}

fn zero_quantity() -> AppResponse {
    AppResponse::ValidationError("Quantity must be at least 1".to_string())
}

fn state_mut<'a>(
    state: *mut StorefrontState,
    caller: &str,
) -> Result<&'a mut StorefrontState, *const c_char> {
    match unsafe { state.as_mut() } {
        Some(s) => Ok(s),
        None => {
            let error = AppResponse::BadRequest(format!("Null state pointer passed to {caller}"));
            Err(response_to_c_string(&error))
        }
    }
}

fn parse_kind(kind_ptr: *const c_char) -> Result<CatalogKind, *const c_char> {
    let kind = c_ptr_to_string(kind_ptr, "kind")?;
    kind.parse::<CatalogKind>()
        .map_err(|e| response_to_c_string(&e))
}

fn parse_criteria(criteria_ptr: *const c_char) -> Result<FilterCriteria, *const c_char> {
    let json = c_ptr_to_string(criteria_ptr, "criteria")?;
    if json.trim().is_empty() {
        return Ok(FilterCriteria::default());
    }

    serde_json::from_str(&json).map_err(|e| {
        let error = AppResponse::SerializationError(format!("Invalid criteria JSON: {e}"));
        response_to_c_string(&error)
    })
}

/// Wraps `value`, serialized to JSON, in an `Ok` response.
fn json_response<T: Serialize + ?Sized>(value: &T) -> *const c_char {
    match serde_json::to_string(value) {
        Ok(json) => response_to_c_string(&AppResponse::Ok(json)),
        Err(e) => {
            let error = AppResponse::SerializationError(format!("Failed to serialize result: {e}"));
            response_to_c_string(&error)
        }
    }
}

/// Converts an [`AppResponse`] to a C string owned by the caller.
///
/// Returns null if serialization or C string creation fails.
fn response_to_c_string(response: &AppResponse) -> *const c_char {
    let json = match serde_json::to_string(response) {
        Ok(j) => j,
        Err(e) => {
            warn!("Error serializing response: {e}");
            return std::ptr::null();
        }
    };

    match CString::new(json) {
        Ok(c_str) => c_str.into_raw(),
        Err(e) => {
            warn!("Error creating CString: {e}");
            std::ptr::null()
        }
    }
}

/// Converts a C string pointer to a `String`, answering null pointers and
/// invalid UTF-8 with a `BadRequest` response.
fn c_ptr_to_string(ptr: *const c_char, field_name: &str) -> Result<String, *const c_char> {
    if ptr.is_null() {
        let error = AppResponse::BadRequest(format!("Null {field_name} pointer"));
        return Err(response_to_c_string(&error));
    }

    match unsafe { CStr::from_ptr(ptr).to_str() } {
        Ok(s) => Ok(s.to_string()),
        Err(e) => {
            let error = AppResponse::BadRequest(format!("Invalid UTF-8 in {field_name}: {e}"));
            Err(response_to_c_string(&error))
        }
    }
}
