use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::r#trait::{PersistenceError, PersistenceStore};

/// File-backed persistence store: one `<key>.json` file per key in a directory.
///
/// Saves go through a temporary file in the same directory and are renamed into
/// place, so a failed save leaves the previous value untouched.
#[derive(Debug, Clone)]
pub struct FilePersistenceStore {
    dir: PathBuf,
}

impl FilePersistenceStore {
    /// Open (creating if needed) the store directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .map_err(|e| PersistenceError::io(&dir.to_string_lossy(), e))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl PersistenceStore for FilePersistenceStore {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, PersistenceError> {
        match std::fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PersistenceError::io(key, e)),
        }
    }

    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), PersistenceError> {
        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(|e| PersistenceError::io(key, e))?;
        tmp.write_all(bytes)
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| PersistenceError::io(key, e))?;
        tmp.persist(self.path_for(key))
            .map_err(|e| PersistenceError::io(key, e.error))?;
        Ok(())
    }
}
