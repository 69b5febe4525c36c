use serde::{Deserialize, Serialize};
use std::fmt;

/// Byte offset of a line start within a record file
pub type Offset = u64;

/// One row of the sidecar offset table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Identifier token found on the line
    pub identifier: String,
    /// Offset of the first byte of the line containing the token
    pub offset: Offset,
}

impl IndexEntry {
    pub fn new(identifier: impl Into<String>, offset: Offset) -> Self {
        Self {
            identifier: identifier.into(),
            offset,
        }
    }
}

/// Sidecar line format: `<identifier> <offset>`
impl fmt::Display for IndexEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.identifier, self.offset)
    }
}

/// Summary of a finished index build
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildStats {
    /// Lines scanned in the input
    pub lines: usize,
    /// Entries emitted (duplicates included)
    pub entries: usize,
    /// Bytes scanned
    pub bytes: u64,
}
