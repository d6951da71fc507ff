use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use tracing::warn;

use crate::error::AppResult;

/// Durable set of ticket ids that already have a Jira issue.
///
/// Backed by a newline-delimited UTF-8 file that is only ever appended to,
/// so a crash mid-run loses at most the record being written. Reading a
/// missing or broken file yields an empty set: a duplicate issue on the next
/// run is preferred over halting the sync entirely.
pub struct ProcessedStore {
    file_path: PathBuf,
    ids: HashSet<String>,
}

impl ProcessedStore {
    pub fn load(file_path: PathBuf) -> Self {
        let ids = match fs::read_to_string(&file_path) {
            Ok(contents) => contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect(),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => HashSet::new(),
            Err(err) => {
                warn!(path = %file_path.display(), %err, "could not read processed-tickets file, starting empty");
                HashSet::new()
            }
        };

        Self { file_path, ids }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Appends the id to the file and the in-memory set. Call this only
    /// after the issue was confirmed created; the append is what makes the
    /// creation idempotent across runs.
    pub fn record(&mut self, id: &str) -> AppResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.file_path)?;
        writeln!(file, "{id}")?;
        self.ids.insert(id.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProcessedStore::load(dir.path().join("does-not-exist.txt"));
        assert!(store.is_empty());
    }

    #[test]
    fn record_appends_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("processed.txt");

        let mut store = ProcessedStore::load(path.clone());
        store.record("T1").unwrap();
        store.record("T2").unwrap();
        assert!(store.contains("T1"));

        let reloaded = ProcessedStore::load(path.clone());
        assert_eq!(reloaded.len(), 2);
        assert!(reloaded.contains("T2"));

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "T1\nT2\n");
    }

    #[test]
    fn record_preserves_existing_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("processed.txt");
        fs::write(&path, "T1\n").unwrap();

        let mut store = ProcessedStore::load(path.clone());
        store.record("T2").unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "T1\nT2\n");
    }

    #[test]
    fn blank_lines_are_ignored_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("processed.txt");
        fs::write(&path, "T1\n\n  \nT2\n").unwrap();

        let store = ProcessedStore::load(path);
        assert_eq!(store.len(), 2);
    }
}
