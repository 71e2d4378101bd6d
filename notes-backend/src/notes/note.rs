//! A note document: `---` delimited header followed by a free-text body.

use notes_types::{NoteDetail, NoteSummary};
use std::path::{Path, PathBuf};

use super::error::{NoteError, NoteResult};
use super::header::{self, ParseWarning};
use super::metadata::NoteMetadata;

/// Header delimiter line
pub const DELIMITER: &str = "---";

/// A note loaded from disk
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    /// Path relative to the store root; unique per note
    pub filename: String,
    pub metadata: NoteMetadata,
    /// Body text with surrounding blank lines removed
    pub body: String,
    pub full_path: PathBuf,
    /// Header lines or fields skipped while parsing
    pub warnings: Vec<ParseWarning>,
}

impl Note {
    /// First `# ` heading of the body, or the filename without its extension.
    pub fn title(&self) -> String {
        self.body
            .lines()
            .map(str::trim)
            .find_map(|line| line.strip_prefix("# "))
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| {
                Path::new(&self.filename)
                    .file_stem()
                    .map(|s| s.to_string_lossy().to_string())
                    .unwrap_or_else(|| self.filename.clone())
            })
    }

    /// True if any of `tags` exactly equals one of this note's tags
    pub fn has_any_tag(&self, tags: &[String]) -> bool {
        tags.iter().any(|t| self.metadata.tags.contains(t))
    }

    pub fn summary(&self) -> NoteSummary {
        NoteSummary {
            filename: self.filename.clone(),
            title: self.title(),
            summary: self.metadata.summary.clone(),
            tags: self.metadata.tags.clone(),
            created: self.metadata.created.clone(),
            updated: self.metadata.updated.clone(),
        }
    }

    pub fn detail(&self) -> NoteDetail {
        NoteDetail {
            filename: self.filename.clone(),
            title: self.title(),
            created: self.metadata.created.clone(),
            updated: self.metadata.updated.clone(),
            summary: self.metadata.summary.clone(),
            tags: self.metadata.tags.clone(),
            conversation_id: self.metadata.conversation_id.clone(),
            ai_client: self.metadata.ai_client.clone(),
            body: self.body.clone(),
            warnings: self.warnings.iter().map(|w| w.to_string()).collect(),
        }
    }
}

/// Render the full file content for a note
pub fn format_note(metadata: &NoteMetadata, body: &str) -> String {
    format!(
        "{delim}\n{}\n{delim}\n\n{}",
        header::serialize(&metadata.to_header()),
        body,
        delim = DELIMITER
    )
}

fn is_delimiter(line: &str) -> bool {
    line.strip_suffix('\r').unwrap_or(line) == DELIMITER
}

/// Drop leading and trailing whitespace-only lines
fn trim_blank_lines(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let start = lines.iter().position(|l| !l.trim().is_empty());
    let end = lines.iter().rposition(|l| !l.trim().is_empty());
    match (start, end) {
        (Some(s), Some(e)) => lines[s..=e].join("\n"),
        _ => String::new(),
    }
}

/// Split file content into (header text, body). The first line must be the
/// delimiter and a later standalone delimiter line must close the header.
pub fn split_note(content: &str) -> Result<(String, String), &'static str> {
    let mut lines = content.split('\n');

    match lines.next() {
        Some(first) if is_delimiter(first) => {}
        _ => return Err("missing opening --- delimiter"),
    }

    let mut header_lines = Vec::new();
    let mut closed = false;
    for line in lines.by_ref() {
        if is_delimiter(line) {
            closed = true;
            break;
        }
        header_lines.push(line);
    }
    if !closed {
        return Err("missing closing --- delimiter");
    }

    let rest: Vec<&str> = lines.collect();
    Ok((header_lines.join("\n"), trim_blank_lines(&rest.join("\n"))))
}

/// Parse raw file content into a `Note`
pub fn parse_note(filename: &str, full_path: PathBuf, content: &str) -> NoteResult<Note> {
    let (header_text, body) = split_note(content).map_err(|reason| NoteError::Format {
        filename: filename.to_string(),
        reason,
    })?;

    let parsed = header::parse(&header_text);
    let (metadata, field_warnings) = NoteMetadata::from_header(&parsed.header);
    let mut warnings = parsed.warnings;
    warnings.extend(field_warnings);

    Ok(Note {
        filename: filename.to_string(),
        metadata,
        body,
        full_path,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note_from(content: &str) -> NoteResult<Note> {
        parse_note("test-note.md", PathBuf::from("/tmp/test-note.md"), content)
    }

    #[test]
    fn test_format_then_parse() {
        let meta = NoteMetadata {
            created: "2024-06-01T00:00:00.000Z".to_string(),
            updated: "2024-06-01T00:00:00.000Z".to_string(),
            tags: vec!["a".to_string()],
            summary: "Short".to_string(),
            ..Default::default()
        };
        let content = format_note(&meta, "Went hiking.");
        assert!(content.starts_with("---\ncreated: \"2024-06-01T00:00:00.000Z\"\n"));
        assert!(content.ends_with("---\n\nWent hiking."));

        let note = note_from(&content).unwrap();
        assert_eq!(note.metadata, meta);
        assert_eq!(note.body, "Went hiking.");
        assert!(note.warnings.is_empty());
    }

    #[test]
    fn test_missing_opening_delimiter() {
        let err = note_from("title: x\n---\nbody").unwrap_err();
        assert!(matches!(err, NoteError::Format { .. }));
    }

    #[test]
    fn test_missing_closing_delimiter() {
        let err = note_from("---\nsummary: x\nbody").unwrap_err();
        match err {
            NoteError::Format { reason, .. } => assert!(reason.contains("closing")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_body_blank_lines_trimmed() {
        let note = note_from("---\nsummary: s\n---\n\n\n  indented first\n\nlast\n\n\n").unwrap();
        assert_eq!(note.body, "  indented first\n\nlast");
    }

    #[test]
    fn test_crlf_delimiters() {
        let note = note_from("---\r\nsummary: s\r\n---\r\n\r\nbody\r\n").unwrap();
        assert_eq!(note.metadata.summary, "s");
        assert_eq!(note.body.trim_end(), "body");
    }

    #[test]
    fn test_delimiter_must_be_exact() {
        let padded_open = note_from("---  \nsummary: s\n---\nbody").unwrap_err();
        assert!(matches!(padded_open, NoteError::Format { .. }));

        // A padded line inside the header does not close it
        let padded_close = note_from("---\nsummary: s\n--- \nbody").unwrap_err();
        match padded_close {
            NoteError::Format { reason, .. } => assert!(reason.contains("closing")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_empty_body() {
        let note = note_from("---\nsummary: s\n---").unwrap();
        assert_eq!(note.body, "");
    }

    #[test]
    fn test_title_from_heading_or_filename() {
        let with_heading = note_from("---\nsummary: s\n---\n\n# Trip Notes\n\nbody").unwrap();
        assert_eq!(with_heading.title(), "Trip Notes");

        let without = note_from("---\nsummary: s\n---\n\nplain").unwrap();
        assert_eq!(without.title(), "test-note");
    }

    #[test]
    fn test_warnings_surface_on_note() {
        let note = note_from("---\nsummary: s\nstray line\n---\nbody").unwrap();
        assert_eq!(note.warnings.len(), 1);
        assert_eq!(note.detail().warnings.len(), 1);
    }

    #[test]
    fn test_has_any_tag_is_or() {
        let note = note_from("---\ntags:\n  - work\n  - rust\n---\nbody").unwrap();
        assert!(note.has_any_tag(&["home".to_string(), "rust".to_string()]));
        assert!(!note.has_any_tag(&["home".to_string()]));
        assert!(!note.has_any_tag(&["Rust".to_string()]));
    }
}
