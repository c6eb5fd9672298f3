//! High-score persistence.

use crate::error::GameError;
use web_sys::Storage;

pub trait HighScoreStore {
    /// `None` when nothing is stored yet or persistence is unavailable.
    fn get_high_score(&self) -> Option<u32>;
    fn set_high_score(&mut self, score: u32);
    /// False when the store degraded to a no-op.
    fn is_available(&self) -> bool;
}

/// Browser `localStorage`, checked once at startup.
pub struct LocalStorageStore {
    storage: Option<Storage>,
    key: String,
}

const PROBE_KEY: &str = "__punchline_cat_probe__";

impl LocalStorageStore {
    /// Probe storage by writing and removing a key; on failure every later call is a no-op.
    pub fn probe(key: &str) -> Self {
        let storage = match Self::try_storage() {
            Ok(storage) => Some(storage),
            Err(err) => {
                log::warn!("{err}");
                None
            }
        };
        Self { storage, key: key.to_string() }
    }

    fn try_storage() -> Result<Storage, GameError> {
        let unavailable = |what: &str| GameError::PersistenceUnavailable(what.to_string());
        let storage = web_sys::window()
            .ok_or_else(|| unavailable("no window"))?
            .local_storage()
            .map_err(|_| unavailable("localStorage access denied"))?
            .ok_or_else(|| unavailable("localStorage missing"))?;
        storage
            .set_item(PROBE_KEY, PROBE_KEY)
            .map_err(|_| unavailable("localStorage is not writable"))?;
        storage
            .remove_item(PROBE_KEY)
            .map_err(|_| unavailable("localStorage is not writable"))?;
        Ok(storage)
    }
}

impl HighScoreStore for LocalStorageStore {
    fn get_high_score(&self) -> Option<u32> {
        let storage = self.storage.as_ref()?;
        let raw = storage.get_item(&self.key).ok().flatten()?;
        raw.trim().parse().ok()
    }

    fn set_high_score(&mut self, score: u32) {
        if let Some(storage) = &self.storage {
            if storage.set_item(&self.key, &score.to_string()).is_err() {
                log::warn!("could not save high score {score}");
            }
        }
    }

    fn is_available(&self) -> bool {
        self.storage.is_some()
    }
}

/// In-memory store for tests and for hosts without storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    value: Option<u32>,
    available: bool,
    writes: usize,
}

impl MemoryStore {
    pub fn new(value: Option<u32>) -> Self {
        Self { value, available: true, writes: 0 }
    }

    /// Behaves like a browser with storage disabled.
    pub fn unavailable() -> Self {
        Self { value: None, available: false, writes: 0 }
    }

    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl HighScoreStore for MemoryStore {
    fn get_high_score(&self) -> Option<u32> {
        if self.available { self.value } else { None }
    }

    fn set_high_score(&mut self, score: u32) {
        if self.available {
            self.value = Some(score);
            self.writes += 1;
        }
    }

    fn is_available(&self) -> bool {
        self.available
    }
}
