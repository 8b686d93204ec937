//! Key-value blob persistence for the building collection and chat log.
//!
//! Reads and writes never fail from the caller's point of view: a missing,
//! unreadable or incompatible blob loads as the supplied default, and a failed
//! write is logged and dropped.

pub mod file;
pub mod memory;

pub use crate::error::StoreError;
pub use file::FileStore;
pub use memory::MemoryStore;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error};

pub const BUILDINGS_KEY: &str = "sitewise_buildings_data";
pub const MESSAGES_KEY: &str = "sitewise_chat_messages";

/// A string-keyed store of string blobs.
pub trait BlobStore {
    /// Returns `Ok(None)` when nothing is stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Load and decode `key`, falling back to `default` on any failure.
pub fn load_or<T, S>(store: &S, key: &str, default: T) -> T
where
    T: DeserializeOwned,
    S: BlobStore + ?Sized,
{
    match try_load(store, key) {
        Ok(Some(value)) => value,
        Ok(None) => {
            debug!(key, "nothing stored, using default");
            default
        }
        Err(err) => {
            error!(key, %err, "error loading from storage");
            default
        }
    }
}

fn try_load<T, S>(store: &S, key: &str) -> Result<Option<T>, StoreError>
where
    T: DeserializeOwned,
    S: BlobStore + ?Sized,
{
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    if raw.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StoreError::Decode {
            key: key.to_string(),
            source,
        })
}

/// Encode and write `value` under `key`. Failures are logged only.
pub fn save<T, S>(store: &mut S, key: &str, value: &T)
where
    T: Serialize + ?Sized,
    S: BlobStore + ?Sized,
{
    let result = serde_json::to_string(value)
        .map_err(|source| StoreError::Encode {
            key: key.to_string(),
            source,
        })
        .and_then(|json| store.set(key, &json));

    if let Err(err) = result {
        error!(key, %err, "error saving to storage");
    }
}

/// Remove `key`. Failures are logged only.
pub fn forget<S>(store: &mut S, key: &str)
where
    S: BlobStore + ?Sized,
{
    if let Err(err) = store.remove(key) {
        error!(key, %err, "error removing from storage");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BuildingCollection, ChatMessage, Sender};
    use pretty_assertions::assert_eq;

    struct BrokenStore;

    impl BlobStore for BrokenStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Read {
                key: key.to_string(),
                path: "broken".into(),
                source: std::io::Error::other("disk gone"),
            })
        }

        fn set(&mut self, key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Write {
                key: key.to_string(),
                path: "broken".into(),
                source: std::io::Error::other("disk gone"),
            })
        }

        fn remove(&mut self, _key: &str) -> Result<(), StoreError> {
            Ok(())
        }
    }

    #[test]
    fn missing_key_loads_default() {
        let store = MemoryStore::default();
        let loaded: BuildingCollection = load_or(&store, BUILDINGS_KEY, BuildingCollection::default());
        assert_eq!(loaded, BuildingCollection::default());
    }

    #[test]
    fn incompatible_payload_is_a_hard_reset() {
        let mut store = MemoryStore::default();
        store.set(BUILDINGS_KEY, r#"{"buildings": 42}"#).unwrap();

        let loaded: BuildingCollection = load_or(&store, BUILDINGS_KEY, BuildingCollection::default());

        assert_eq!(loaded, BuildingCollection::default());
    }

    #[test]
    fn read_failure_loads_default_and_write_failure_is_swallowed() {
        let mut store = BrokenStore;
        let loaded: Vec<ChatMessage> = load_or(&store, MESSAGES_KEY, Vec::new());
        assert!(loaded.is_empty());

        save(&mut store, MESSAGES_KEY, &loaded);
    }

    #[test]
    fn message_timestamps_are_rehydrated() {
        let mut store = MemoryStore::default();
        let messages = vec![ChatMessage::new("1", Sender::User, "add 2 floors")];
        save(&mut store, MESSAGES_KEY, &messages);

        let raw = store.get(MESSAGES_KEY).unwrap().unwrap();
        assert!(raw.contains(r#""type":"user""#));

        let loaded: Vec<ChatMessage> = load_or(&store, MESSAGES_KEY, Vec::new());
        assert_eq!(loaded, messages);
    }
}
