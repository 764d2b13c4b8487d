use gloo::storage::{LocalStorage, Storage};
use memento_core::{GameError, KeyValueStore, Result};
use wasm_bindgen::JsValue;

/// `window.localStorage` as the engine's key-value store.
#[derive(Copy, Clone, Debug, Default)]
pub struct BrowserStore;

fn storage_error(err: JsValue) -> GameError {
    GameError::Storage(format!("{:?}", err))
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        match LocalStorage::raw().get_item(key) {
            Ok(value) => value,
            Err(err) => {
                log::error!("Could not read {:?} from local storage: {:?}", key, err);
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(storage_error)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        LocalStorage::raw().remove_item(key).map_err(storage_error)
    }
}
