//! Input provider: plain-text files in a directory, split into paragraphs.
//!
//! Each `.txt` file becomes one section of the deck. The file name is the
//! section title; paragraphs are blocks separated by a blank line.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};

use crate::errors::{DeckError, Result};

pub const SOURCE_EXTENSION: &str = ".txt";

/// One input file, read and split.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceDocument {
    /// File name including the extension, used verbatim as the title.
    pub name: String,
    pub path: PathBuf,
    pub paragraphs: Vec<String>,
}

/// Lists `.txt` regular files directly inside `dir`, sorted by file name.
pub fn scan_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    let read_dir_err = |source| DeckError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries: Vec<(String, PathBuf)> = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_dir_err)? {
        let entry = entry.map_err(read_dir_err)?;
        let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
            warn!(path = %entry.path().display(), "Skipping file with non-UTF-8 name");
            continue;
        };
        if !name.ends_with(SOURCE_EXTENSION) {
            continue;
        }
        // Follows symlinks, so a linked text file still counts.
        if !entry.path().is_file() {
            debug!(name = %name, "Skipping non-file entry");
            continue;
        }
        entries.push((name, entry.path()));
    }

    entries.sort_by(|(a, _), (b, _)| a.cmp(b));
    Ok(entries.into_iter().map(|(_, path)| path).collect())
}

/// Splits text into trimmed, non-empty paragraphs on blank lines.
///
/// Line endings are normalized first so CRLF files split the same way.
/// A "blank line" is exactly two consecutive newlines; a line holding only
/// spaces does not separate paragraphs.
pub fn split_paragraphs(content: &str) -> Vec<String> {
    let normalized = content.replace("\r\n", "\n").replace('\r', "\n");
    normalized
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Reads a source file as UTF-8 and splits it into paragraphs.
pub fn load(path: &Path) -> Result<SourceDocument> {
    let bytes = fs::read(path).map_err(|source| DeckError::ReadSource {
        path: path.to_path_buf(),
        source,
    })?;
    let content = String::from_utf8(bytes).map_err(|_| DeckError::InvalidUtf8 {
        path: path.to_path_buf(),
    })?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(SourceDocument {
        name,
        path: path.to_path_buf(),
        paragraphs: split_paragraphs(&content),
    })
}

/// Scans `dir` and loads every source file in order.
pub fn load_dir(dir: &Path) -> Result<Vec<SourceDocument>> {
    scan_dir(dir)?.iter().map(|p| load(p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, content: &[u8]) {
        fs::write(dir.join(name), content).unwrap();
    }

    // ── split_paragraphs ─────────────────────────────────────────────────────

    #[test]
    fn test_split_on_blank_line() {
        let paragraphs = split_paragraphs("first\nstill first\n\nsecond");
        assert_eq!(paragraphs, vec!["first\nstill first", "second"]);
    }

    #[test]
    fn test_split_trims_and_drops_empty_blocks() {
        let paragraphs = split_paragraphs("\n\n  one  \n\n\n\n\ttwo\n\n   \n\n");
        assert_eq!(paragraphs, vec!["one", "two"]);
    }

    #[test]
    fn test_split_normalizes_crlf() {
        let paragraphs = split_paragraphs("가나다\r\n라마\r\n\r\n바사");
        assert_eq!(paragraphs, vec!["가나다\n라마", "바사"]);
    }

    #[test]
    fn test_split_empty_content() {
        assert!(split_paragraphs("").is_empty());
        assert!(split_paragraphs("\n\n\n").is_empty());
    }

    #[test]
    fn test_whitespace_only_line_does_not_split() {
        let paragraphs = split_paragraphs("a\n \nb");
        assert_eq!(paragraphs, vec!["a\n \nb"]);
    }

    // ── scan_dir / load ──────────────────────────────────────────────────────

    #[test]
    fn test_scan_dir_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "b.txt", b"b");
        write(dir.path(), "a.txt", b"a");
        write(dir.path(), "notes.md", b"skip");
        write(dir.path(), "c.TXT", b"skip");
        fs::create_dir(dir.path().join("folder.txt")).unwrap();

        let files = scan_dir(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_owned())
            .collect();
        assert_eq!(names, vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn test_scan_dir_orders_by_code_point() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "가.txt", b"");
        write(dir.path(), "Z.txt", b"");
        write(dir.path(), "a.txt", b"");
        let names: Vec<_> = scan_dir(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_owned())
            .collect();
        assert_eq!(names, vec!["Z.txt", "a.txt", "가.txt"]);
    }

    #[test]
    fn test_scan_missing_dir_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = scan_dir(&dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, DeckError::ReadDir { .. }));
    }

    #[test]
    fn test_load_reads_name_and_paragraphs() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "찬양.txt", "첫 절\n둘째 줄\n\n후렴".as_bytes());
        let doc = load(&dir.path().join("찬양.txt")).unwrap();
        assert_eq!(doc.name, "찬양.txt");
        assert_eq!(doc.paragraphs, vec!["첫 절\n둘째 줄", "후렴"]);
    }

    #[test]
    fn test_load_rejects_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "bad.txt", &[0xff, 0xfe, 0x00, 0x41]);
        let err = load(&dir.path().join("bad.txt")).unwrap_err();
        assert!(matches!(err, DeckError::InvalidUtf8 { .. }));
    }

    #[test]
    fn test_load_dir_keeps_empty_files() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "empty.txt", b"\n\n");
        write(dir.path(), "full.txt", b"one\n\ntwo");
        let docs = load_dir(dir.path()).unwrap();
        assert_eq!(docs.len(), 2);
        assert!(docs[0].paragraphs.is_empty());
        assert_eq!(docs[1].paragraphs.len(), 2);
    }
}
