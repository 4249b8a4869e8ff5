use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::warn;

use crate::engine::mastery::ProgressStore;
use crate::store::schema::{self, MODE_KEY, PROGRESS_KEY};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to serialize progress: {0}")]
    Serialize(#[from] serde_json::Error),
}

fn io_err(path: &Path) -> impl FnOnce(io::Error) -> StoreError + '_ {
    move |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Two named blobs under one directory. Every save overwrites its blob
/// wholesale; last write wins.
pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self, StoreError> {
        fs::create_dir_all(&base_dir).map_err(io_err(&base_dir))?;
        Ok(Self { base_dir })
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    fn read(&self, name: &str) -> Option<String> {
        let path = self.file_path(name);
        if !path.exists() {
            return None;
        }
        match fs::read_to_string(&path) {
            Ok(content) => Some(content),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "unreadable blob, using defaults");
                None
            }
        }
    }

    fn write(&self, name: &str, content: &str) -> Result<(), StoreError> {
        let path = self.file_path(name);
        let tmp_path = path.with_extension("tmp");

        let mut file = fs::File::create(&tmp_path).map_err(io_err(&tmp_path))?;
        file.write_all(content.as_bytes()).map_err(io_err(&tmp_path))?;
        file.sync_all().map_err(io_err(&tmp_path))?;

        fs::rename(&tmp_path, &path).map_err(io_err(&path))?;
        Ok(())
    }

    /// Missing, unreadable or corrupt progress all load as an empty store.
    pub fn load_progress(&self) -> ProgressStore {
        let Some(content) = self.read(PROGRESS_KEY) else {
            return ProgressStore::default();
        };
        serde_json::from_str(&content).unwrap_or_else(|e| {
            warn!(error = %e, "corrupt progress blob discarded");
            ProgressStore::default()
        })
    }

    pub fn save_progress(&self, progress: &ProgressStore) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(progress)?;
        self.write(PROGRESS_KEY, &json)
    }

    pub fn clear_progress(&self) -> Result<(), StoreError> {
        let path = self.file_path(PROGRESS_KEY);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_err(&path)(e)),
        }
    }

    pub fn load_advanced_mode(&self) -> bool {
        self.read(MODE_KEY)
            .map(|raw| schema::decode_mode(&raw))
            .unwrap_or(false)
    }

    pub fn save_advanced_mode(&self, advanced: bool) -> Result<(), StoreError> {
        self.write(MODE_KEY, &schema::encode_mode(advanced))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Item;
    use tempfile::TempDir;

    fn make_test_store() -> (TempDir, JsonStore) {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        (dir, store)
    }

    #[test]
    fn empty_dir_loads_defaults() {
        let (_dir, store) = make_test_store();
        assert!(store.load_progress().is_empty());
        assert!(!store.load_advanced_mode());
    }

    #[test]
    fn progress_survives_reload() {
        let (dir, store) = make_test_store();
        let mut progress = ProgressStore::default();
        let ma = Item::from("妈");
        progress.record_attempt(&ma, true, 5);
        progress.record_attempt(&ma, true, 5);
        store.save_progress(&progress).unwrap();

        let reopened = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        let loaded = reopened.load_progress();
        assert_eq!(loaded.get(&ma).correct_streak, 2);
        assert!(!loaded.get(&ma).mastered);
    }

    #[test]
    fn corrupt_progress_is_discarded() {
        let (_dir, store) = make_test_store();
        fs::write(store.file_path(PROGRESS_KEY), "{not json").unwrap();
        assert!(store.load_progress().is_empty());
    }

    #[test]
    fn mode_flag_is_stored_as_text() {
        let (_dir, store) = make_test_store();
        store.save_advanced_mode(true).unwrap();
        let raw = fs::read_to_string(store.file_path(MODE_KEY)).unwrap();
        assert_eq!(raw, "true");
        assert!(store.load_advanced_mode());
    }

    #[test]
    fn clear_progress_removes_blob_and_is_idempotent() {
        let (_dir, store) = make_test_store();
        store.save_progress(&ProgressStore::default()).unwrap();
        assert!(store.file_path(PROGRESS_KEY).exists());
        store.clear_progress().unwrap();
        assert!(!store.file_path(PROGRESS_KEY).exists());
        store.clear_progress().unwrap();
    }

    #[test]
    fn save_leaves_no_tmp_files() {
        let (dir, store) = make_test_store();
        store.save_progress(&ProgressStore::default()).unwrap();
        store.save_advanced_mode(false).unwrap();
        let tmp_files: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().and_then(|x| x.to_str()) == Some("tmp"))
            .collect();
        assert!(tmp_files.is_empty(), "no residual .tmp files");
    }

    #[test]
    fn write_failure_is_reported() {
        let (dir, _store) = make_test_store();
        let missing = JsonStore {
            base_dir: dir.path().join("gone"),
        };
        let err = missing.save_progress(&ProgressStore::default()).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }
}
