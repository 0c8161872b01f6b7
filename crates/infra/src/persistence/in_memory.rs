use std::collections::HashMap;
use std::sync::RwLock;

use super::r#trait::{PersistenceError, PersistenceStore};

/// In-memory persistence store.
///
/// Intended for tests/dev and for embedding where durability is not needed.
#[derive(Debug, Default)]
pub struct InMemoryPersistenceStore {
    values: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryPersistenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a key, as if an earlier session had saved it.
    pub fn with_value(self, key: &str, bytes: impl Into<Vec<u8>>) -> Self {
        if let Ok(mut values) = self.values.write() {
            values.insert(key.to_string(), bytes.into());
        }
        self
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.values.read().map(|v| v.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PersistenceStore for InMemoryPersistenceStore {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, PersistenceError> {
        let values = self
            .values
            .read()
            .map_err(|_| PersistenceError::Backend("lock poisoned".to_string()))?;
        Ok(values.get(key).cloned())
    }

    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), PersistenceError> {
        let mut values = self
            .values
            .write()
            .map_err(|_| PersistenceError::Backend("lock poisoned".to_string()))?;
        values.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }
}
