//! File operations for the notes system
//!
//! Handles slugification, filename derivation, path validation and the raw
//! reads/writes of note files.

use chrono::NaiveDate;
use regex::Regex;
use std::fs;
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

use super::error::{NoteError, NoteResult};

/// Extension of note files, without the dot
pub const NOTE_EXTENSION: &str = "md";

static NON_SLUG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9\s-]").unwrap());
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static DASHES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-+").unwrap());

/// Slugify a title for use in a filename (e.g. "Hello, World!! 2024" -> "hello-world-2024")
pub fn slugify(title: &str) -> String {
    let lower = title.to_lowercase();
    let stripped = NON_SLUG_RE.replace_all(&lower, "");
    let dashed = WHITESPACE_RE.replace_all(&stripped, "-");
    let collapsed = DASHES_RE.replace_all(&dashed, "-");
    collapsed.trim_matches('-').to_string()
}

/// `<slug>-<YYYY-MM-DD>.md`
pub fn dated_filename(title: &str, date: NaiveDate) -> String {
    format!(
        "{}-{}.{}",
        slugify(title),
        date.format("%Y-%m-%d"),
        NOTE_EXTENSION
    )
}

/// Insert a numeric suffix before the extension: `a.md` -> `a-2.md`
pub fn with_suffix(filename: &str, n: u32) -> String {
    let ext = format!(".{}", NOTE_EXTENSION);
    match filename.strip_suffix(&ext) {
        Some(stem) => format!("{}-{}{}", stem, n, ext),
        None => format!("{}-{}", filename, n),
    }
}

/// Check that `filename` stays inside the store root
pub fn validate_relative(filename: &str) -> NoteResult<&Path> {
    let path = Path::new(filename);
    if filename.trim().is_empty() {
        return Err(NoteError::Validation("Filename must not be empty".to_string()));
    }
    let escapes = path
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes {
        return Err(NoteError::Validation(format!(
            "Filename must be a relative path inside the notes directory: {}",
            filename
        )));
    }
    Ok(path)
}

/// Write a note file (creates parent directories as needed)
pub fn write_note(path: &Path, content: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = fs::File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

/// Read a note file, returning `None` if it does not exist
pub fn read_note(path: &Path) -> io::Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// List note filenames directly inside `notes_dir`, sorted. A missing
/// directory yields an empty list.
pub fn list_notes(notes_dir: &Path) -> io::Result<Vec<String>> {
    let entries = match fs::read_dir(notes_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };

    let suffix = format!(".{}", NOTE_EXTENSION);
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if name.ends_with(&suffix) {
            files.push(name);
        }
    }

    files.sort();
    Ok(files)
}

/// Join a validated relative filename onto the store root
pub fn note_path(notes_dir: &Path, filename: &str) -> NoteResult<PathBuf> {
    Ok(notes_dir.join(validate_relative(filename)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello, World!! 2024"), "hello-world-2024");
        assert_eq!(slugify("  multiple   spaces  "), "multiple-spaces");
        assert_eq!(slugify("already-slugified"), "already-slugified");
        assert_eq!(slugify("dash -- and  - space"), "dash-and-space");
        assert_eq!(slugify("CamelCase_with_underscores"), "camelcasewithunderscores");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_dated_filename() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(
            dated_filename("Hello, World!! 2024", date),
            "hello-world-2024-2024-06-01.md"
        );
    }

    #[test]
    fn test_with_suffix() {
        assert_eq!(with_suffix("trip-2024-06-01.md", 2), "trip-2024-06-01-2.md");
        assert_eq!(with_suffix("noext", 3), "noext-3");
    }

    #[test]
    fn test_validate_relative() {
        assert!(validate_relative("note.md").is_ok());
        assert!(validate_relative("ideas/note.md").is_ok());
        assert!(validate_relative("../escape.md").is_err());
        assert!(validate_relative("/etc/passwd").is_err());
        assert!(validate_relative("  ").is_err());
    }

    #[test]
    fn test_write_and_read_note() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/test-note.md");

        write_note(&path, "# Test\n\nContent here").unwrap();
        let content = read_note(&path).unwrap().unwrap();
        assert!(content.contains("Content here"));
    }

    #[test]
    fn test_read_note_not_found() {
        let dir = tempdir().unwrap();
        assert!(read_note(&dir.path().join("nonexistent.md")).unwrap().is_none());
    }

    #[test]
    fn test_list_notes_direct_md_files_only() {
        let dir = tempdir().unwrap();
        let notes_dir = dir.path();

        fs::write(notes_dir.join("b.md"), "content").unwrap();
        fs::write(notes_dir.join("a.md"), "content").unwrap();
        fs::write(notes_dir.join("readme.txt"), "content").unwrap();
        fs::create_dir(notes_dir.join("folder.md")).unwrap();
        fs::create_dir(notes_dir.join("ideas")).unwrap();
        fs::write(notes_dir.join("ideas/nested.md"), "content").unwrap();

        assert_eq!(list_notes(notes_dir).unwrap(), vec!["a.md", "b.md"]);
    }

    #[test]
    fn test_list_notes_missing_dir() {
        let dir = tempdir().unwrap();
        assert!(list_notes(&dir.path().join("never-created")).unwrap().is_empty());
    }
}
