//! Error taxonomy for [`RecordStore`](super::RecordStore) operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for record store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Failure of a single store operation.
///
/// Each variant maps to exactly one [`ErrorKind`] and renders one descriptive message.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid line number {requested} entered. Maximum is {max}")]
    InvalidLineNumber { requested: usize, max: usize },

    #[error("Could not read line {line}")]
    CantReadLine {
        line: usize,
        #[source]
        source: io::Error,
    },

    #[error("Sequence {id} was not found")]
    SequenceNotFound { id: String },

    #[error("Wrong file given ({path}), must be of FASTA format (fasta, fna, ffn, faa, frn)")]
    WrongFileFormat { path: PathBuf },

    #[error("Could not read FASTA file {path}, make sure it exists and is readable")]
    CantReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("FASTA file contains missing information or is corrupt. Possible line of fault: {line}")]
    BadFile { line: usize },

    #[error("FASTA file seems to be empty")]
    EmptyFile,

    #[error("Could not set index file {path}, make sure it exists")]
    CouldntSetIndexFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to load index entry on line {line}: {entry:?}")]
    CouldntLoadIndexEntry { line: usize, entry: String },

    #[error("Bad nucleobase {symbol:?} given, all nucleobases must range from A to Z")]
    BadNucleobase { symbol: char },

    #[error("Search pattern could not be compiled: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Flat classification of store outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    None,
    InvalidLineNumber,
    CantReadLine,
    SequenceNotFound,
    WrongFileFormat,
    CantReadFile,
    BadFile,
    EmptyFile,
    CouldntSetIndexFile,
    CouldntLoadIndexEntry,
    BadNucleobase,
    InvalidPattern,
}

impl ErrorKind {
    /// Classify the outcome of any store operation
    pub fn of<T>(result: &StoreResult<T>) -> Self {
        match result {
            Ok(_) => ErrorKind::None,
            Err(e) => e.kind(),
        }
    }
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::InvalidLineNumber { .. } => ErrorKind::InvalidLineNumber,
            StoreError::CantReadLine { .. } => ErrorKind::CantReadLine,
            StoreError::SequenceNotFound { .. } => ErrorKind::SequenceNotFound,
            StoreError::WrongFileFormat { .. } => ErrorKind::WrongFileFormat,
            StoreError::CantReadFile { .. } => ErrorKind::CantReadFile,
            StoreError::BadFile { .. } => ErrorKind::BadFile,
            StoreError::EmptyFile => ErrorKind::EmptyFile,
            StoreError::CouldntSetIndexFile { .. } => ErrorKind::CouldntSetIndexFile,
            StoreError::CouldntLoadIndexEntry { .. } => ErrorKind::CouldntLoadIndexEntry,
            StoreError::BadNucleobase { .. } => ErrorKind::BadNucleobase,
            StoreError::InvalidPattern(_) => ErrorKind::InvalidPattern,
        }
    }

    /// Open-time failures leave no usable store behind
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::WrongFileFormat
                | ErrorKind::CantReadFile
                | ErrorKind::BadFile
                | ErrorKind::EmptyFile
        )
    }
}
