use std::sync::Arc;

use thiserror::Error;

/// Whole-value key/value byte store.
///
/// `save` replaces whatever was stored under `key`; there is no append.
pub trait PersistenceStore: Send + Sync {
    /// Returns `Ok(None)` when nothing was ever saved under `key`.
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, PersistenceError>;

    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), PersistenceError>;
}

impl<S> PersistenceStore for Arc<S>
where
    S: PersistenceStore + ?Sized,
{
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, PersistenceError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), PersistenceError> {
        (**self).save(key, bytes)
    }
}

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("i/o failure on `{key}`: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("persistence backend error: {0}")]
    Backend(String),
}

impl PersistenceError {
    pub fn io(key: &str, source: std::io::Error) -> Self {
        Self::Io {
            key: key.to_string(),
            source,
        }
    }
}
