use crate::index::types::{BuildStats, IndexEntry, Offset};
use crate::index::writer::write_index;
use crate::utils::{identifier_spans, spinner};
use anyhow::{Context, Result};
use memchr::memchr_iter;
use memmap2::Mmap;
use std::fs::File;
use std::path::Path;

/// Scan record file content and emit one entry per identifier token occurrence.
///
/// Entries are in file order. Each entry carries the offset of the start of the
/// line the token was found on, not of the token itself.
pub fn scan_entries(content: &[u8]) -> (Vec<IndexEntry>, BuildStats) {
    let mut entries = Vec::new();
    let mut stats = BuildStats {
        bytes: content.len() as u64,
        ..Default::default()
    };

    for (start, line) in lines_with_offsets(content) {
        stats.lines += 1;
        let text = String::from_utf8_lossy(line);
        for (s, e) in identifier_spans(&text) {
            entries.push(IndexEntry::new(&text[s..e], start));
        }
    }

    stats.entries = entries.len();
    (entries, stats)
}

/// Iterate over `(line_start_offset, line_bytes)`; the terminator (`\n` or `\r\n`) is stripped
fn lines_with_offsets(content: &[u8]) -> impl Iterator<Item = (Offset, &[u8])> {
    let mut start = 0usize;
    let mut newlines = memchr_iter(b'\n', content);
    std::iter::from_fn(move || {
        if start >= content.len() {
            return None;
        }
        let end = newlines.next().unwrap_or(content.len());
        let mut line = &content[start..end];
        if line.last() == Some(&b'\r') {
            line = &line[..line.len() - 1];
        }
        let item = (start as Offset, line);
        start = end + 1;
        Some(item)
    })
}

/// Build the offset table for a record file
pub fn build_entries(input: &Path) -> Result<(Vec<IndexEntry>, BuildStats)> {
    let file = File::open(input)
        .with_context(|| format!("Failed to open {}", input.display()))?;
    let len = file.metadata()?.len();

    // Zero-length files cannot be mapped on every platform
    if len == 0 {
        return Ok((Vec::new(), BuildStats::default()));
    }

    let mmap = unsafe { Mmap::map(&file) }
        .with_context(|| format!("Failed to map {}", input.display()))?;
    Ok(scan_entries(&mmap))
}

/// Build the offset table for `input` and write it to `output`
pub fn build_index_file(input: &Path, output: &Path, silent: bool) -> Result<BuildStats> {
    if !silent {
        println!("Indexing: {}", input.display());
    }

    let spinner = spinner(silent, "Scanning records...");

    let (entries, stats) = build_entries(input)?;

    if let Some(spinner) = &spinner {
        spinner.set_message(format!("Writing {} entries...", entries.len()));
    }

    write_index(output, &entries)?;

    if let Some(spinner) = spinner {
        spinner.finish_with_message(format!(
            "Indexed {} identifiers over {} lines",
            stats.entries, stats.lines
        ));
    }

    log::info!(
        "built index for {}: {} entries, {} lines, {} bytes",
        input.display(),
        stats.entries,
        stats.lines,
        stats.bytes
    );

    if !silent {
        println!("Index stored at: {}", output.display());
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_entries_offsets_are_line_starts() {
        let content = b">NR_1.1 first\nACGT\n>NR_22.1 second\nGGCC\n";
        let (entries, stats) = scan_entries(content);

        assert_eq!(
            entries,
            vec![IndexEntry::new("NR_1.1", 0), IndexEntry::new("NR_22.1", 19)]
        );
        assert_eq!(stats.lines, 4);
        assert_eq!(stats.entries, 2);
        assert_eq!(stats.bytes, content.len() as u64);
    }

    #[test]
    fn test_scan_entries_multiple_tokens_share_offset() {
        let content = b">NR_1.1 dup of NR_2.3\nAC\n";
        let (entries, _) = scan_entries(content);
        assert_eq!(
            entries,
            vec![IndexEntry::new("NR_1.1", 0), IndexEntry::new("NR_2.3", 0)]
        );
    }

    #[test]
    fn test_scan_entries_keeps_duplicates() {
        let content = b">NR_1.1 a\nAC\n>NR_1.1 b\nGT\n";
        let (entries, _) = scan_entries(content);
        assert_eq!(
            entries,
            vec![IndexEntry::new("NR_1.1", 0), IndexEntry::new("NR_1.1", 13)]
        );
    }

    #[test]
    fn test_scan_entries_crlf() {
        let content = b">NR_1.1 a\r\nAC\r\n>NR_2.1 b\r\nGT\r\n";
        let (entries, stats) = scan_entries(content);
        assert_eq!(
            entries,
            vec![IndexEntry::new("NR_1.1", 0), IndexEntry::new("NR_2.1", 15)]
        );
        assert_eq!(stats.lines, 4);
    }

    #[test]
    fn test_scan_entries_no_trailing_newline() {
        let content = b"AC\n>NR_7.2 last";
        let (entries, stats) = scan_entries(content);
        assert_eq!(entries, vec![IndexEntry::new("NR_7.2", 3)]);
        assert_eq!(stats.lines, 2);
    }

    #[test]
    fn test_build_entries_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.fasta");
        std::fs::write(&path, "").unwrap();

        let (entries, stats) = build_entries(&path).unwrap();
        assert!(entries.is_empty());
        assert_eq!(stats, BuildStats::default());
    }

    #[test]
    fn test_build_index_file_writes_sidecar() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("16S.fasta");
        let output = dir.path().join("16S.fasta.idx");
        std::fs::write(&input, ">NR_1.1 a\nAC\n>NR_2.1 b\nGT\n").unwrap();

        let stats = build_index_file(&input, &output, true).unwrap();
        assert_eq!(stats.entries, 2);
        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "NR_1.1 0\nNR_2.1 13\n"
        );
    }

    #[test]
    fn test_build_entries_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(build_entries(&dir.path().join("absent.fasta")).is_err());
    }
}
