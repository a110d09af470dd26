//! Store configuration.
//!
//! A [`StoreConfig`] names the on-device database and the storage slot the
//! cart is persisted under. Hosts either pass a bare name (every other field
//! defaulted) or a JSON document:
//!
//! ```json
//! { "name": "hotel", "mapSize": 10485760, "cartKey": "cart" }
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::app_response::AppResponse;

/// Default database name used when none is given.
pub const DEFAULT_STORE_NAME: &str = "storefront";

/// Storage slot holding the serialized cart lines.
pub const DEFAULT_CART_KEY: &str = "cart";

/// 10 MiB is far beyond what a cart needs but keeps room for host data.
pub const DEFAULT_MAP_SIZE: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StoreConfig {
    /// Database name. The LMDB environment lives in `<name>.lmdb`.
    pub name: String,
    /// LMDB map size in bytes.
    pub map_size: usize,
    /// Slot key the cart is written under.
    pub cart_key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_STORE_NAME.to_string(),
            map_size: DEFAULT_MAP_SIZE,
            cart_key: DEFAULT_CART_KEY.to_string(),
        }
    }
}

impl StoreConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Parses a JSON config document; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, AppResponse> {
        let config: StoreConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppResponse> {
        if self.name.trim().is_empty() {
            return Err(AppResponse::ValidationError(
                "Store name cannot be empty".to_string(),
            ));
        }
        if self.cart_key.is_empty() {
            return Err(AppResponse::ValidationError(
                "Cart key cannot be empty".to_string(),
            ));
        }
        if self.map_size == 0 {
            return Err(AppResponse::ValidationError(
                "Map size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Directory holding the LMDB environment.
    pub fn db_dir(&self) -> PathBuf {
        PathBuf::from(format!("{}.lmdb", self.name))
    }
}
