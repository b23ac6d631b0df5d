//! Bounded recent-results log behind a string key-value store.
//!
//! The store itself is a trait so tests can point it at a temp directory;
//! the production implementation keeps one file per key under the platform
//! config directory. A corrupted or missing payload is always treated as an
//! empty history, never surfaced as an error.

use crate::config::{Difficulty, Mode};
use chrono::{DateTime, Local};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Key under which the result log is persisted.
pub const HISTORY_KEY: &str = "typing_test_history_v1";

/// Key under which the theme preference is persisted.
pub const THEME_KEY: &str = "typing_theme";

/// Maximum number of records retained; oldest are evicted on overflow.
pub const HISTORY_CAP: usize = 5;

/// Snapshot of one finished session, created once on the transition to
/// Finished and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRecord {
    pub date: DateTime<Local>,
    pub mode: Mode,
    pub difficulty: Difficulty,
    pub duration_seconds: u32,
    pub word_target: usize,
    pub wpm: u32,
    pub accuracy: u32,
    pub errors: usize,
    pub time_sec: u32,
    pub chars: usize,
}

/// Flat string-keyed persistence boundary shared by history and theme.
pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;
    fn put(&self, key: &str, value: &str) -> io::Result<()>;
    fn delete(&self, key: &str) -> io::Result<()>;
}

/// One file per key under the application config directory.
#[derive(Debug, Clone)]
pub struct FileKvStore {
    dir: PathBuf,
}

impl FileKvStore {
    pub fn new() -> Self {
        let dir = if let Some(pd) = ProjectDirs::from("", "", "typr") {
            pd.config_dir().to_path_buf()
        } else {
            PathBuf::from(".")
        };
        Self { dir }
    }

    pub fn with_dir<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl Default for FileKvStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KvStore for FileKvStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn put(&self, key: &str, value: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)
    }

    fn delete(&self, key: &str) -> io::Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

/// Ordered result log, newest first, capped at [`HISTORY_CAP`] entries.
#[derive(Debug)]
pub struct History<S: KvStore> {
    store: S,
}

impl<S: KvStore> History<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Current records, newest first. Malformed or non-array payloads read
    /// as an empty list.
    pub fn list(&self) -> Vec<ResultRecord> {
        self.store
            .get(HISTORY_KEY)
            .and_then(|raw| serde_json::from_str::<Vec<ResultRecord>>(&raw).ok())
            .unwrap_or_default()
    }

    /// Inserts `record` at the front, truncates to the cap, persists.
    pub fn append(&self, record: ResultRecord) -> io::Result<()> {
        let mut records = self.list();
        records.insert(0, record);
        records.truncate(HISTORY_CAP);
        let data = serde_json::to_string(&records).unwrap_or_else(|_| "[]".into());
        self.store.put(HISTORY_KEY, &data)
    }

    pub fn clear(&self) -> io::Result<()> {
        self.store.delete(HISTORY_KEY)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Difficulty, Mode};
    use tempfile::tempdir;

    fn record(wpm: u32) -> ResultRecord {
        ResultRecord {
            date: Local::now(),
            mode: Mode::Timed,
            difficulty: Difficulty::Medium,
            duration_seconds: 60,
            word_target: 25,
            wpm,
            accuracy: 97,
            errors: 2,
            time_sec: 60,
            chars: 240,
        }
    }

    #[test]
    fn empty_store_lists_nothing() {
        let dir = tempdir().unwrap();
        let history = History::new(FileKvStore::with_dir(dir.path()));
        assert!(history.list().is_empty());
    }

    #[test]
    fn append_puts_newest_first() {
        let dir = tempdir().unwrap();
        let history = History::new(FileKvStore::with_dir(dir.path()));
        history.append(record(40)).unwrap();
        history.append(record(55)).unwrap();

        let records = history.list();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].wpm, 55);
        assert_eq!(records[1].wpm, 40);
    }

    #[test]
    fn append_evicts_past_the_cap() {
        let dir = tempdir().unwrap();
        let history = History::new(FileKvStore::with_dir(dir.path()));
        for wpm in 1..=7 {
            history.append(record(wpm)).unwrap();
        }

        let records = history.list();
        assert_eq!(records.len(), HISTORY_CAP);
        let wpms: Vec<u32> = records.iter().map(|r| r.wpm).collect();
        assert_eq!(wpms, vec![7, 6, 5, 4, 3]);
    }

    #[test]
    fn corrupt_payload_reads_as_empty() {
        let dir = tempdir().unwrap();
        let store = FileKvStore::with_dir(dir.path());
        store.put(HISTORY_KEY, "not json").unwrap();

        let history = History::new(store);
        assert!(history.list().is_empty());
        // appending on top of corruption starts a fresh list
        history.append(record(30)).unwrap();
        assert_eq!(history.list().len(), 1);
    }

    #[test]
    fn non_array_payload_reads_as_empty() {
        let dir = tempdir().unwrap();
        let store = FileKvStore::with_dir(dir.path());
        store.put(HISTORY_KEY, "{\"wpm\": 12}").unwrap();
        assert!(History::new(store).list().is_empty());
    }

    #[test]
    fn clear_removes_all_records() {
        let dir = tempdir().unwrap();
        let history = History::new(FileKvStore::with_dir(dir.path()));
        history.append(record(42)).unwrap();
        history.clear().unwrap();
        assert!(history.list().is_empty());
        // clearing an already-empty store is fine
        history.clear().unwrap();
    }

    #[test]
    fn record_serializes_with_camel_case_keys() {
        let json = serde_json::to_string(&record(42)).unwrap();
        assert!(json.contains("\"durationSeconds\":60"));
        assert!(json.contains("\"wordTarget\":25"));
        assert!(json.contains("\"timeSec\":60"));
        assert!(json.contains("\"mode\":\"timed\""));
        assert!(json.contains("\"difficulty\":\"medium\""));
        assert!(json.contains("\"date\":"));
    }

    #[test]
    fn record_roundtrips_through_json() {
        let original = record(61);
        let json = serde_json::to_string(&original).unwrap();
        let parsed: ResultRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.wpm, original.wpm);
        assert_eq!(parsed.mode, original.mode);
        assert_eq!(parsed.date.timestamp(), original.date.timestamp());
    }
}
