use crate::index::types::IndexEntry;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write entries to a sidecar file, one `identifier offset` line each, in build order.
///
/// An existing file at `path` is truncated.
pub fn write_index(path: &Path, entries: &[IndexEntry]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create index file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_entries(&mut writer, entries)?;
    writer
        .flush()
        .with_context(|| format!("Failed to flush index file {}", path.display()))?;
    Ok(())
}

/// Write entries in sidecar format to any writer
pub fn write_entries<W: Write>(writer: &mut W, entries: &[IndexEntry]) -> Result<()> {
    for entry in entries {
        writeln!(writer, "{}", entry)?;
    }
    Ok(())
}
