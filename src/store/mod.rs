//! Sequential and indexed access to a two-line record file.
//!
//! A [`RecordStore`] owns the open file and its read cursor. The whole file is
//! validated once in [`RecordStore::open`]; every later operation trusts that
//! the file is still well formed and starts its scan from a fresh cursor.
//!
//! ```no_run
//! use seqidx::store::RecordStore;
//!
//! let mut store = RecordStore::open("16S.fasta")?;
//! let first = store.get_by_line_range(1, 1)?;
//! let record = store.get_by_id("NR_118889.1", false)?;
//! let ids = store.get_ids_by_metadata("Streptomyces")?;
//! # Ok::<(), seqidx::store::StoreError>(())
//! ```

pub mod error;

pub use error::{ErrorKind, StoreError, StoreResult};

use crate::index::reader::OffsetIndex;
use crate::query::pattern::{metadata_matcher, CompositionPattern};
use crate::utils::{extract_identifiers, first_invalid_symbol, is_header_line};
use log::{debug, warn};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Seek, SeekFrom};
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};

/// Substrings a record file path must contain to be accepted
pub const RECORD_EXTENSIONS: [&str; 5] = ["fasta", "fna", "ffn", "faa", "frn"];

/// Check the extension gate (substring match anywhere in the path)
pub fn has_record_extension(path: &Path) -> bool {
    let name = path.to_string_lossy();
    RECORD_EXTENSIONS.iter().any(|ext| name.contains(ext))
}

/// Read-only store over one record file
#[derive(Debug)]
pub struct RecordStore {
    path: PathBuf,
    reader: BufReader<File>,
    total_lines: usize,
    index: Option<OffsetIndex>,
}

impl RecordStore {
    /// Open and validate a record file.
    ///
    /// Header lines must satisfy the header grammar and body lines may only
    /// contain letters. The scan stops at the first malformed line.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        if !has_record_extension(path) {
            return Err(StoreError::WrongFileFormat {
                path: path.to_path_buf(),
            });
        }

        let file = File::open(path).map_err(|source| StoreError::CantReadFile {
            path: path.to_path_buf(),
            source,
        })?;

        let mut store = Self {
            path: path.to_path_buf(),
            reader: BufReader::new(file),
            total_lines: 0,
            index: None,
        };
        store.total_lines = store.validate()?;
        store.reset()?;

        debug!(
            "opened {} ({} lines, {} records)",
            store.path.display(),
            store.total_lines,
            store.record_count()
        );
        Ok(store)
    }

    /// Single structural pass; returns the line count
    fn validate(&mut self) -> StoreResult<usize> {
        let mut buf = Vec::new();
        let mut lines = 0usize;

        loop {
            let line = read_line(&mut self.reader, &mut buf).map_err(|source| {
                StoreError::CantReadFile {
                    path: self.path.clone(),
                    source,
                }
            })?;
            let Some(line) = line else { break };
            lines += 1;

            let valid = if lines % 2 == 1 {
                is_header_line(&line)
            } else {
                first_invalid_symbol(&line).is_none()
            };
            if !valid {
                warn!("{}: malformed record at line {}", self.path.display(), lines);
                return Err(StoreError::BadFile { line: lines });
            }
        }

        if lines == 0 {
            return Err(StoreError::EmptyFile);
        }
        if lines % 2 == 1 {
            // Trailing header without its body line
            return Err(StoreError::BadFile { line: lines + 1 });
        }
        Ok(lines)
    }

    /// Discard buffered read state and move the cursor to byte 0
    pub fn reset(&mut self) -> StoreResult<()> {
        // BufReader::seek drops its internal buffer
        self.reader
            .seek(SeekFrom::Start(0))
            .map_err(|source| StoreError::CantReadFile {
                path: self.path.clone(),
                source,
            })?;
        Ok(())
    }

    /// True while the underlying handle is still usable
    pub fn is_ready(&self) -> bool {
        self.reader.get_ref().metadata().is_ok()
    }

    /// Release the file handle
    pub fn close(self) {
        debug!("closing {}", self.path.display());
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of lines counted at open time
    pub fn total_lines(&self) -> usize {
        self.total_lines
    }

    /// Number of header/body pairs
    pub fn record_count(&self) -> usize {
        self.total_lines / 2
    }

    pub fn index(&self) -> Option<&OffsetIndex> {
        self.index.as_ref()
    }

    /// Load a sidecar offset index and attach it.
    ///
    /// On failure the previously attached index, if any, is kept.
    pub fn set_index_file(&mut self, path: impl AsRef<Path>) -> StoreResult<()> {
        let index = OffsetIndex::load(path.as_ref())?;
        self.attach_index(index);
        Ok(())
    }

    pub fn attach_index(&mut self, index: OffsetIndex) {
        debug!("attached index with {} identifiers", index.len());
        self.index = Some(index);
    }

    /// Return `count` records starting at 1-based `line_number`, each line followed by `\n`.
    ///
    /// Only the upper bound is enforced; callers pass an odd (header) line
    /// number for meaningful output. Reading stops early at end of file.
    pub fn get_by_line_range(&mut self, line_number: usize, count: usize) -> StoreResult<String> {
        self.reset()?;

        if line_number > self.total_lines {
            return Err(StoreError::InvalidLineNumber {
                requested: line_number,
                max: self.total_lines,
            });
        }

        let mut buf = Vec::new();
        for line in 1..line_number {
            match read_line(&mut self.reader, &mut buf) {
                Ok(Some(_)) => {}
                Ok(None) => {
                    return Err(StoreError::CantReadLine {
                        line,
                        source: io::ErrorKind::UnexpectedEof.into(),
                    });
                }
                Err(source) => return Err(StoreError::CantReadLine { line, source }),
            }
        }

        let mut output = String::new();
        let first = line_number.max(1);
        for line in (first..).take(count.saturating_mul(2)) {
            match read_line(&mut self.reader, &mut buf) {
                Ok(Some(text)) => {
                    output.push_str(&text);
                    output.push('\n');
                }
                Ok(None) => break,
                Err(source) => return Err(StoreError::CantReadLine { line, source }),
            }
        }
        Ok(output)
    }

    /// Return the first record whose header contains `>` + `id`, as `header\nbody`.
    ///
    /// With `use_index`, `id` must be an exact key of the attached index and the
    /// scan starts at the stored offset. The scan itself still matches by substring.
    pub fn get_by_id(&mut self, id: &str, use_index: bool) -> StoreResult<String> {
        self.reset()?;

        if use_index {
            let offset = match self.index.as_ref().and_then(|index| index.get(id)) {
                Some(offset) => offset,
                None => {
                    if self.index.is_none() {
                        warn!("indexed lookup of {} without an attached index", id);
                    }
                    return Err(not_found(id));
                }
            };
            self.reader
                .seek(SeekFrom::Start(offset))
                .map_err(|source| StoreError::CantReadLine { line: 0, source })?;
        }

        let needle = format!(">{}", id);
        let mut header: Option<String> = None;
        let mut body: Option<String> = None;
        self.for_each_line(|line| {
            if header.is_some() {
                body = Some(line);
                return ControlFlow::Break(());
            }
            if line.contains(&needle) {
                header = Some(line);
            }
            ControlFlow::Continue(())
        })?;

        let header = header.ok_or_else(|| not_found(id))?;
        let mut output = header;
        output.push('\n');
        if let Some(body) = body {
            output.push_str(&body);
        }
        Ok(output)
    }

    /// Identifiers from the headers of every record whose body matches `pattern`.
    ///
    /// Without `wildcard` the pattern must consist of body symbols only; with
    /// `wildcard` each `*` stands for zero or more letters.
    pub fn get_ids_by_composition(&mut self, pattern: &str, wildcard: bool) -> StoreResult<Vec<String>> {
        self.reset()?;
        let pattern = CompositionPattern::compile(pattern, wildcard)?;

        let mut ids = Vec::new();
        let mut current_header = String::new();
        self.for_each_line(|line| {
            if is_header_line(&line) {
                current_header = line;
            } else if pattern.is_match(&line) {
                ids.extend(extract_identifiers(&current_header));
            }
            ControlFlow::Continue(())
        })?;

        debug!("composition {:?} matched {} identifiers", pattern.as_str(), ids.len());
        Ok(ids)
    }

    /// Identifiers from every line containing `text` as a case-insensitive whole word
    pub fn get_ids_by_metadata(&mut self, text: &str) -> StoreResult<Vec<String>> {
        self.reset()?;
        let matcher = metadata_matcher(text)?;

        let mut ids = Vec::new();
        self.for_each_line(|line| {
            if matcher.is_match(&line) {
                ids.extend(extract_identifiers(&line));
            }
            ControlFlow::Continue(())
        })?;

        debug!("metadata {:?} matched {} identifiers", text, ids.len());
        Ok(ids)
    }

    /// Feed lines from the current cursor to `f` until it breaks or the file ends
    fn for_each_line<F>(&mut self, mut f: F) -> StoreResult<()>
    where
        F: FnMut(String) -> ControlFlow<()>,
    {
        let mut buf = Vec::new();
        let mut line = 0usize;
        loop {
            line += 1;
            match read_line(&mut self.reader, &mut buf) {
                Ok(Some(text)) => {
                    if f(text).is_break() {
                        return Ok(());
                    }
                }
                Ok(None) => return Ok(()),
                Err(source) => return Err(StoreError::CantReadLine { line, source }),
            }
        }
    }
}

fn not_found(id: &str) -> StoreError {
    StoreError::SequenceNotFound { id: id.to_string() }
}

/// Read one line without its `\n` / `\r\n` terminator; `None` at end of file
fn read_line<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> io::Result<Option<String>> {
    buf.clear();
    if reader.read_until(b'\n', buf)? == 0 {
        return Ok(None);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
    Ok(Some(String::from_utf8_lossy(buf).into_owned()))
}
