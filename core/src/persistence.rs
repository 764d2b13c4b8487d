use std::collections::BTreeMap;

use crate::*;

/// String key-value store the engine persists into, `localStorage` in the browser.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Process-local store, for native hosts and tests.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// JSON documents of the game: the resumable snapshot and the completed-game history.
#[derive(Clone, Debug)]
pub struct Persistence<S> {
    store: S,
    snapshot_key: String,
    history_key: String,
}

impl<S: KeyValueStore> Persistence<S> {
    pub fn new(store: S, config: &EngineConfig) -> Self {
        Self {
            store,
            snapshot_key: config.snapshot_key.clone(),
            history_key: config.history_key.clone(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn save_snapshot(&mut self, state: &GameState) -> Result<()> {
        let json = serde_json::to_string(state)?;
        self.store.set(&self.snapshot_key, &json)
    }

    /// `Ok(None)` when nothing is saved; an error when the document is unreadable or inconsistent.
    pub fn load_snapshot(&self) -> Result<Option<GameState>> {
        let Some(json) = self.store.get(&self.snapshot_key) else {
            return Ok(None);
        };
        let state: GameState = serde_json::from_str(&json)?;
        state.validate()?;
        Ok(Some(state))
    }

    pub fn clear_snapshot(&mut self) -> Result<()> {
        self.store.remove(&self.snapshot_key)
    }

    pub fn has_snapshot(&self) -> bool {
        self.store.get(&self.snapshot_key).is_some()
    }

    pub fn save_history(&mut self, history: &History) -> Result<()> {
        let json = serde_json::to_string(history)?;
        self.store.set(&self.history_key, &json)
    }

    pub fn load_history(&self) -> Result<History> {
        match self.store.get(&self.history_key) {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(History::default()),
        }
    }
}
