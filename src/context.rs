use std::fs;
use std::io;
use std::path::PathBuf;

use crate::error::{AskError, Result};

/// The transcript file. Contents are an opaque blob in the model's chat
/// template form; this store never parses or trims them. Single-user tool,
/// no cross-process locking.
pub struct ContextStore {
    path: PathBuf,
}

impl ContextStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Full verbatim contents; a missing file reads as the empty string.
    pub fn load(&self) -> Result<String> {
        match fs::read_to_string(&self.path) {
            Ok(transcript) => Ok(transcript),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(self.io_error(e)),
        }
    }

    /// Overwrite the file with the given transcript, UTF-8, no BOM.
    pub fn save(&self, transcript: &str) -> Result<()> {
        fs::write(&self.path, transcript).map_err(|e| self.io_error(e))
    }

    /// Truncate to zero bytes, creating the file if absent.
    pub fn clear(&self) -> Result<()> {
        self.save("")
    }

    fn io_error(&self, source: io::Error) -> AskError {
        AskError::ContextIo {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> ContextStore {
        ContextStore::new(dir.path().join("context.txt"))
    }

    #[test]
    fn missing_file_loads_as_empty() {
        let dir = TempDir::new().unwrap();
        assert_eq!(store_in(&dir).load().unwrap(), "");
    }

    #[test]
    fn save_then_load_round_trips_verbatim() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let transcript = "<|system|>s<|end|>\n  trailing ws \n";
        store.save(transcript).unwrap();
        assert_eq!(store.load().unwrap(), transcript);
    }

    #[test]
    fn clear_is_idempotent_and_leaves_an_empty_file() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save("old conversation").unwrap();
        for _ in 0..3 {
            store.clear().unwrap();
            let path = dir.path().join("context.txt");
            assert!(path.exists());
            assert_eq!(fs::read(&path).unwrap().len(), 0);
        }
    }

    #[test]
    fn unreadable_path_surfaces_as_context_io() {
        let dir = TempDir::new().unwrap();
        // The directory itself is not a readable file.
        let store = ContextStore::new(dir.path());
        assert!(matches!(
            store.load().unwrap_err(),
            AskError::ContextIo { .. }
        ));
    }
}
