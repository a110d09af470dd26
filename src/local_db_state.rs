//! On-device key-value slots.
//!
//! The cart lives in a single named slot of local storage. [`SlotStorage`]
//! is the seam the cart store is written against; [`AppDbState`] backs it
//! with an LMDB environment on disk and [`MemoryStorage`] keeps slots in a
//! map for hosts that have no writable filesystem.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use lmdb::{Database, DatabaseFlags, Environment, Error as LmdbError, Transaction, WriteFlags};
use log::{debug, info};

use crate::app_response::AppResponse;
use crate::store_config::StoreConfig;

const SLOTS_DB: &str = "slots";

/// Named string slots in local storage.
pub trait SlotStorage {
    /// Returns the slot's value, or `None` when the slot was never written.
    fn read_slot(&self, key: &str) -> Result<Option<String>, AppResponse>;

    fn write_slot(&mut self, key: &str, value: &str) -> Result<(), AppResponse>;
}

/// LMDB-backed slot storage.
pub struct AppDbState {
    env: Environment,
    db: Database,
    path: PathBuf,
}

impl AppDbState {
    /// Opens (creating when missing) the environment at `<name>.lmdb`.
    pub fn init(config: &StoreConfig) -> Result<Self, AppResponse> {
        config.validate()?;
        let path = config.db_dir();
        Self::open_at(&path, config.map_size)
    }

    pub fn open_at(path: &Path, map_size: usize) -> Result<Self, AppResponse> {
        fs::create_dir_all(path)?;

        let env = Environment::new()
            .set_max_dbs(1)
            .set_map_size(map_size)
            .open(path)?;
        let db = env.create_db(Some(SLOTS_DB), DatabaseFlags::empty())?;

        info!("Opened slot storage at {}", path.display());
        Ok(Self {
            env,
            db,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Removes every slot while keeping the environment open.
    pub fn clear_all_slots(&self) -> Result<(), AppResponse> {
        let mut txn = self.env.begin_rw_txn()?;
        txn.clear_db(self.db)?;
        txn.commit()?;
        info!("Cleared all slots in {}", self.path.display());
        Ok(())
    }
}

impl SlotStorage for AppDbState {
    fn read_slot(&self, key: &str) -> Result<Option<String>, AppResponse> {
        let txn = self.env.begin_ro_txn()?;
        match txn.get(self.db, &key) {
            Ok(bytes) => {
                let value = String::from_utf8(bytes.to_vec()).map_err(|e| {
                    AppResponse::SerializationError(format!("Slot '{key}' is not UTF-8: {e}"))
                })?;
                Ok(Some(value))
            }
            Err(LmdbError::NotFound) => {
                debug!("Slot '{}' not present", key);
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn write_slot(&mut self, key: &str, value: &str) -> Result<(), AppResponse> {
        let mut txn = self.env.begin_rw_txn()?;
        txn.put(self.db, &key, &value, WriteFlags::empty())?;
        txn.commit()?;
        debug!("Wrote {} bytes to slot '{}'", value.len(), key);
        Ok(())
    }
}

/// In-memory slot storage. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_slot(key: &str, value: &str) -> Self {
        let mut slots = HashMap::new();
        slots.insert(key.to_string(), value.to_string());
        Self { slots }
    }
}

impl SlotStorage for MemoryStorage {
    fn read_slot(&self, key: &str) -> Result<Option<String>, AppResponse> {
        Ok(self.slots.get(key).cloned())
    }

    fn write_slot(&mut self, key: &str, value: &str) -> Result<(), AppResponse> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
