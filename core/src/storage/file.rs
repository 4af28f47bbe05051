// marketplace/src/storage/file.rs

//! Directory-backed storage: one file per key, written atomically.

use super::LocalStorage;
use crate::error::{MarketError, MarketResult};
use parking_lot::Mutex;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{event, Level};

#[derive(Debug)]
pub struct FileStorage {
  root: PathBuf,
  // Serializes writers within this process; the rename keeps readers consistent.
  write_lock: Mutex<()>,
}

impl FileStorage {
  /// Creates the directory if it does not exist yet.
  pub fn open(root: impl Into<PathBuf>) -> MarketResult<Self> {
    let root = root.into();
    fs::create_dir_all(&root).map_err(|e| MarketError::Storage {
      key: root.display().to_string(),
      message: format!("failed to create storage directory: {}", e),
    })?;
    event!(Level::DEBUG, root = %root.display(), "File storage opened.");
    Ok(Self {
      root,
      write_lock: Mutex::new(()),
    })
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  /// Keys are escaped reversibly: `[A-Za-z0-9_-]` pass through, every other
  /// byte becomes `%XX`. Distinct keys therefore never share a file, and no key
  /// can name a path outside `root`.
  fn path_for(&self, key: &str) -> PathBuf {
    self.root.join(format!("{}.json", escape_key(key)))
  }

  fn storage_error(key: &str, what: &str, err: std::io::Error) -> MarketError {
    MarketError::Storage {
      key: key.to_string(),
      message: format!("{}: {}", what, err),
    }
  }
}

fn escape_key(key: &str) -> String {
  let mut escaped = String::with_capacity(key.len());
  for byte in key.bytes() {
    if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
      escaped.push(byte as char);
    } else {
      escaped.push_str(&format!("%{:02X}", byte));
    }
  }
  escaped
}

impl LocalStorage for FileStorage {
  fn get_item(&self, key: &str) -> MarketResult<Option<String>> {
    match fs::read_to_string(self.path_for(key)) {
      Ok(contents) => Ok(Some(contents)),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
      Err(e) => Err(Self::storage_error(key, "read failed", e)),
    }
  }

  fn set_item(&self, key: &str, value: &str) -> MarketResult<()> {
    let _guard = self.write_lock.lock();
    let path = self.path_for(key);
    let temp_path = path.with_extension("tmp");

    let written = File::create(&temp_path)
      .map_err(|e| Self::storage_error(key, "create temp file failed", e))
      .and_then(|mut temp_file| {
        temp_file
          .write_all(value.as_bytes())
          .map_err(|e| Self::storage_error(key, "write failed", e))?;
        temp_file
          .sync_all()
          .map_err(|e| Self::storage_error(key, "sync failed", e))
      })
      .and_then(|()| fs::rename(&temp_path, &path).map_err(|e| Self::storage_error(key, "rename failed", e)));

    if written.is_err() {
      if let Err(e) = fs::remove_file(&temp_path) {
        if e.kind() != ErrorKind::NotFound {
          event!(Level::WARN, path = %temp_path.display(), error = %e, "Failed to remove temp file.");
        }
      }
    }
    written
  }

  fn remove_item(&self, key: &str) -> MarketResult<()> {
    let _guard = self.write_lock.lock();
    match fs::remove_file(self.path_for(key)) {
      Ok(()) => Ok(()),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
      Err(e) => Err(Self::storage_error(key, "remove failed", e)),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_values_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    {
      let storage = FileStorage::open(dir.path()).unwrap();
      storage.set_item("cart", "[]").unwrap();
    }
    let reopened = FileStorage::open(dir.path()).unwrap();
    assert_eq!(reopened.get_item("cart").unwrap().as_deref(), Some("[]"));
    assert_eq!(reopened.get_item("missing").unwrap(), None);
  }

  #[test]
  fn test_keys_are_escaped_into_file_names() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::open(dir.path()).unwrap();
    storage.set_item("../escape/attempt", "x").unwrap();
    assert!(dir.path().join("%2E%2E%2Fescape%2Fattempt.json").exists());
    storage.remove_item("../escape/attempt").unwrap();
    storage.remove_item("../escape/attempt").unwrap();
    assert_eq!(storage.get_item("../escape/attempt").unwrap(), None);
  }

  #[test]
  fn test_similar_keys_do_not_collide() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::open(dir.path()).unwrap();
    storage.set_item("a/b", "slash").unwrap();
    storage.set_item("a_b", "underscore").unwrap();
    storage.set_item("a%2Fb", "literal").unwrap();
    assert_eq!(storage.get_item("a/b").unwrap().as_deref(), Some("slash"));
    assert_eq!(storage.get_item("a_b").unwrap().as_deref(), Some("underscore"));
    assert_eq!(storage.get_item("a%2Fb").unwrap().as_deref(), Some("literal"));
  }

  #[test]
  fn test_failed_write_leaves_no_temp_file() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::open(dir.path()).unwrap();
    // A directory in the target's place makes the final rename fail.
    fs::create_dir(dir.path().join("cart.json")).unwrap();

    let result = storage.set_item("cart", "[]");

    assert!(matches!(result, Err(MarketError::Storage { .. })));
    assert!(!dir.path().join("cart.tmp").exists());
  }
}
