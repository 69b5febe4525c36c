use crate::index::types::{IndexEntry, Offset};
use crate::store::error::{StoreError, StoreResult};
use rustc_hash::FxHashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// In-memory identifier -> byte offset table loaded from a sidecar file.
///
/// Read-only once loaded. When the same identifier appears more than once,
/// the last entry wins.
#[derive(Debug, Clone, Default)]
pub struct OffsetIndex {
    offsets: FxHashMap<String, Offset>,
}

impl OffsetIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a sidecar file.
    ///
    /// Every line must hold exactly two whitespace-separated fields: the identifier
    /// and a base-10 offset. The first malformed line aborts the load.
    pub fn load(path: &Path) -> StoreResult<Self> {
        let io_err = |source| StoreError::CouldntSetIndexFile {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(io_err)?;
        let reader = BufReader::new(file);
        let mut index = Self::new();

        for (i, line) in reader.lines().enumerate() {
            let line = line.map_err(io_err)?;
            let (identifier, offset) =
                parse_entry(&line).ok_or_else(|| StoreError::CouldntLoadIndexEntry {
                    line: i + 1,
                    entry: line.clone(),
                })?;
            index.insert(identifier, offset);
        }

        log::debug!("loaded {} index entries from {}", index.len(), path.display());
        Ok(index)
    }

    pub fn insert(&mut self, identifier: impl Into<String>, offset: Offset) {
        self.offsets.insert(identifier.into(), offset);
    }

    /// Exact-key lookup
    pub fn get(&self, identifier: &str) -> Option<Offset> {
        self.offsets.get(identifier).copied()
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.offsets.contains_key(identifier)
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

impl FromIterator<IndexEntry> for OffsetIndex {
    fn from_iter<I: IntoIterator<Item = IndexEntry>>(iter: I) -> Self {
        let mut index = Self::new();
        for entry in iter {
            index.insert(entry.identifier, entry.offset);
        }
        index
    }
}

fn parse_entry(line: &str) -> Option<(&str, Offset)> {
    let mut fields = line.split_whitespace();
    let identifier = fields.next()?;
    let offset = fields.next()?.parse::<Offset>().ok()?;
    if fields.next().is_some() {
        return None;
    }
    Some((identifier, offset))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::error::ErrorKind;

    fn write_sidecar(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("16S.fasta.idx");
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_parse_entry() {
        assert_eq!(parse_entry("NR_1.1 42"), Some(("NR_1.1", 42)));
        assert_eq!(parse_entry("NR_1.1\t42"), Some(("NR_1.1", 42)));
        assert_eq!(parse_entry("NR_1.1"), None);
        assert_eq!(parse_entry("NR_1.1 42 7"), None);
        assert_eq!(parse_entry("NR_1.1 -3"), None);
        assert_eq!(parse_entry("NR_1.1 forty"), None);
        assert_eq!(parse_entry(""), None);
    }

    #[test]
    fn test_load() {
        let (_dir, path) = write_sidecar("NR_1.1 0\nNR_2.1 13\n");
        let index = OffsetIndex::load(&path).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.get("NR_2.1"), Some(13));
        assert_eq!(index.get("NR_2"), None);
    }

    #[test]
    fn test_load_last_duplicate_wins() {
        let (_dir, path) = write_sidecar("NR_1.1 0\nNR_1.1 26\n");
        let index = OffsetIndex::load(&path).unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index.get("NR_1.1"), Some(26));
    }

    #[test]
    fn test_load_malformed_entry() {
        let (_dir, path) = write_sidecar("NR_1.1 0\nNR_2.1 oops\nNR_3.1 40\n");
        let err = OffsetIndex::load(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CouldntLoadIndexEntry);
        assert!(matches!(err, StoreError::CouldntLoadIndexEntry { line: 2, .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = OffsetIndex::load(&dir.path().join("absent.idx")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CouldntSetIndexFile);
    }

    #[test]
    fn test_from_entries() {
        let index: OffsetIndex = vec![IndexEntry::new("NR_1.1", 0), IndexEntry::new("NR_1.1", 9)]
            .into_iter()
            .collect();
        assert_eq!(index.get("NR_1.1"), Some(9));
    }
}
