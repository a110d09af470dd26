use log::info;

use crate::app_response::AppResponse;
use crate::cart_store::CartStore;
use crate::catalog_view::Catalogs;
use crate::local_db_state::AppDbState;
use crate::store_config::StoreConfig;

/// Everything a host holds on to for one session: the loaded catalogs and
/// the persisted cart.
pub struct StorefrontState {
    pub config: StoreConfig,
    pub catalogs: Catalogs,
    pub cart: CartStore<AppDbState>,
}

impl StorefrontState {
    pub fn init(config: StoreConfig) -> Result<Self, AppResponse> {
        let db = AppDbState::init(&config)?;
        let cart = CartStore::open(db, config.cart_key.clone());
        info!("Storefront '{}' ready", config.name);
        Ok(Self {
            config,
            catalogs: Catalogs::new(),
            cart,
        })
    }
}
