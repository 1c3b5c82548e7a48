//! Persisted fact history.
//!
//! The history is an ordered list of fact strings stored as a JSON array in
//! a single file. Append is a read-modify-write of the whole array under a
//! lock, so concurrent appends within the process cannot lose entries.

use color_eyre::{eyre::eyre, Result};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

pub struct HistoryStore {
  path: PathBuf,
  lock: Mutex<()>,
}

impl HistoryStore {
  /// Open the history at the given file path. The file is created lazily
  /// on first append.
  pub fn open(path: impl Into<PathBuf>) -> Self {
    Self {
      path: path.into(),
      lock: Mutex::new(()),
    }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Read the stored facts in insertion order.
  ///
  /// A missing or unparseable file is an empty history, never an error.
  pub fn load(&self) -> Vec<String> {
    let _guard = match self.lock.lock() {
      Ok(g) => g,
      Err(_) => return Vec::new(),
    };
    self.read_unlocked()
  }

  /// Append one fact, rewriting the full array.
  pub fn append(&self, fact: &str) -> Result<()> {
    let _guard = self
      .lock
      .lock()
      .map_err(|e| eyre!("History lock poisoned: {}", e))?;

    let mut facts = self.read_unlocked();
    facts.push(fact.to_string());

    if let Some(parent) = self.path.parent() {
      std::fs::create_dir_all(parent)
        .map_err(|e| eyre!("Failed to create history directory: {}", e))?;
    }

    let data = serde_json::to_vec(&facts).map_err(|e| eyre!("Failed to serialize history: {}", e))?;

    std::fs::write(&self.path, data)
      .map_err(|e| eyre!("Failed to write history file {}: {}", self.path.display(), e))?;

    Ok(())
  }

  /// Remove the history file entirely. A history that never existed clears
  /// successfully.
  pub fn clear(&self) -> Result<()> {
    let _guard = self
      .lock
      .lock()
      .map_err(|e| eyre!("History lock poisoned: {}", e))?;

    match std::fs::remove_file(&self.path) {
      Ok(()) => Ok(()),
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
      Err(e) => Err(eyre!(
        "Failed to remove history file {}: {}",
        self.path.display(),
        e
      )),
    }
  }

  fn read_unlocked(&self) -> Vec<String> {
    let data = match std::fs::read(&self.path) {
      Ok(data) => data,
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
      Err(e) => {
        warn!("Failed to read history file {}: {}", self.path.display(), e);
        return Vec::new();
      }
    };

    match serde_json::from_slice(&data) {
      Ok(facts) => facts,
      Err(e) => {
        warn!(
          "History file {} is not a JSON string array, treating as empty: {}",
          self.path.display(),
          e
        );
        Vec::new()
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::Arc;

  fn temp_store(name: &str) -> HistoryStore {
    let path = std::env::temp_dir().join(format!("c9s-test-{}-{}.json", std::process::id(), name));
    let _ = std::fs::remove_file(&path);
    HistoryStore::open(path)
  }

  #[test]
  fn test_missing_file_is_empty() {
    let store = temp_store("missing");
    assert!(store.load().is_empty());
  }

  #[test]
  fn test_append_preserves_order() {
    let store = temp_store("order");

    store.append("fact A").unwrap();
    store.append("fact B").unwrap();
    store.append("fact C").unwrap();

    assert_eq!(store.load(), vec!["fact A", "fact B", "fact C"]);

    // On-disk format is a plain JSON string array
    let raw = std::fs::read_to_string(store.path()).unwrap();
    assert_eq!(raw, r#"["fact A","fact B","fact C"]"#);

    store.clear().unwrap();
  }

  #[test]
  fn test_append_to_seeded_file() {
    let store = temp_store("seeded");
    std::fs::write(store.path(), r#"["fact A","fact B"]"#).unwrap();

    store.append("fact C").unwrap();

    assert_eq!(store.load(), vec!["fact A", "fact B", "fact C"]);
    store.clear().unwrap();
  }

  #[test]
  fn test_corrupt_file_is_empty() {
    let store = temp_store("corrupt");
    std::fs::write(store.path(), "not json at all").unwrap();

    assert!(store.load().is_empty());

    // Appending over a corrupt file starts fresh
    store.append("fact A").unwrap();
    assert_eq!(store.load(), vec!["fact A"]);
    store.clear().unwrap();
  }

  #[test]
  fn test_clear_removes_file() {
    let store = temp_store("clear");
    store.append("fact A").unwrap();

    store.clear().unwrap();

    assert!(!store.path().exists());
    assert!(store.load().is_empty());

    // Clearing twice is fine
    store.clear().unwrap();
  }

  #[test]
  fn test_concurrent_appends_lose_nothing() {
    let store = Arc::new(temp_store("concurrent"));

    let handles: Vec<_> = (0..8)
      .map(|i| {
        let store = store.clone();
        std::thread::spawn(move || store.append(&format!("fact {}", i)).unwrap())
      })
      .collect();

    for handle in handles {
      handle.join().unwrap();
    }

    let facts = store.load();
    assert_eq!(facts.len(), 8);
    for i in 0..8 {
      assert!(facts.contains(&format!("fact {}", i)));
    }

    store.clear().unwrap();
  }
}
