//! NoteStore: a directory of markdown notes
//!
//! Every note is one `.md` file directly under the store root. There is no
//! index: listing and search re-read the directory on each call.

use chrono::{DateTime, NaiveDate, Utc};
use notes_types::{CreateNoteParams, NoteSummary};
use std::cmp::Ordering;
use std::path::PathBuf;
use strum::{AsRefStr, EnumString};

use super::error::{NoteError, NoteResult};
use super::file_ops;
use super::metadata::NoteMetadata;
use super::note::{self, Note};

/// Highest numeric suffix tried before giving up on a free filename
const MAX_FILENAME_SUFFIX: u32 = 1000;

/// Field used to order `list_summaries` output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum SortField {
    Created,
    #[default]
    Updated,
    Title,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Filtering, ordering and paging for `list_summaries`
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Keep notes carrying at least one of these tags (empty = keep all)
    pub tags: Vec<String>,
    pub sort: SortField,
    pub order: SortOrder,
    pub offset: usize,
    /// `None` returns everything after `offset`
    pub limit: Option<usize>,
}

pub struct NoteStore {
    root: PathBuf,
}

impl NoteStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the store root if it does not exist yet
    pub fn ensure_store(&self) -> NoteResult<()> {
        std::fs::create_dir_all(&self.root).map_err(|e| NoteError::io(&self.root, e))
    }

    pub fn exists(&self, filename: &str) -> NoteResult<bool> {
        Ok(file_ops::note_path(&self.root, filename)?.is_file())
    }

    /// Serialize and write a note, replacing any existing file of that name
    pub fn write(&self, filename: &str, metadata: &NoteMetadata, body: &str) -> NoteResult<()> {
        let path = file_ops::note_path(&self.root, filename)?;
        let content = note::format_note(metadata, body);
        file_ops::write_note(&path, &content).map_err(|e| NoteError::io(&path, e))
    }

    /// Read and parse a note. A missing file is `Ok(None)`.
    pub fn read(&self, filename: &str) -> NoteResult<Option<Note>> {
        let path = file_ops::note_path(&self.root, filename)?;
        let Some(content) = file_ops::read_note(&path).map_err(|e| NoteError::io(&path, e))? else {
            return Ok(None);
        };
        note::parse_note(filename, path, &content).map(Some)
    }

    /// Note filenames directly under the root, sorted
    pub fn list(&self) -> NoteResult<Vec<String>> {
        file_ops::list_notes(&self.root).map_err(|e| NoteError::io(&self.root, e))
    }

    /// Load every readable note. Unreadable or malformed files are logged and skipped.
    pub fn load_all(&self) -> NoteResult<Vec<Note>> {
        let mut notes = Vec::new();
        for filename in self.list()? {
            match self.read(&filename) {
                Ok(Some(note)) => notes.push(note),
                // Removed between listing and reading
                Ok(None) => {}
                Err(e) => log::warn!("[NOTES] Skipping {}: {}", filename, e),
            }
        }
        Ok(notes)
    }

    /// Filename for a note created today (UTC)
    pub fn generate_filename(&self, title: &str) -> String {
        self.generate_filename_on(title, Utc::now().date_naive())
    }

    pub fn generate_filename_on(&self, title: &str, date: NaiveDate) -> String {
        file_ops::dated_filename(title, date)
    }

    /// Create a new note and return its filename. An existing file is never
    /// overwritten: a numeric suffix is appended until the name is free.
    pub fn create_note(&self, params: &CreateNoteParams, now: DateTime<Utc>) -> NoteResult<String> {
        let title = params.title.trim();
        if title.is_empty() {
            return Err(NoteError::Validation("Title is required".to_string()));
        }
        if file_ops::slugify(title).is_empty() {
            return Err(NoteError::Validation(format!(
                "Title must contain at least one letter or digit: {}",
                title
            )));
        }

        let filename = self.free_filename(&self.generate_filename_on(title, now.date_naive()))?;

        let tags: Vec<String> = params
            .tags
            .iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        let metadata = NoteMetadata::new_for_title(
            title,
            params.summary.as_deref(),
            tags,
            params.conversation_id.as_deref(),
            params.ai_client.as_deref(),
            now,
        );

        self.write(&filename, &metadata, &params.content)?;
        log::info!("[NOTES] Created note {}", filename);
        Ok(filename)
    }

    fn free_filename(&self, base: &str) -> NoteResult<String> {
        if !self.exists(base)? {
            return Ok(base.to_string());
        }
        for n in 2..=MAX_FILENAME_SUFFIX {
            let candidate = file_ops::with_suffix(base, n);
            if !self.exists(&candidate)? {
                return Ok(candidate);
            }
        }
        Err(NoteError::Validation(format!(
            "Too many notes named {} already exist",
            base
        )))
    }

    /// Summaries of every note matching `options.tags`, sorted and paged.
    /// Returns the match count before paging alongside the page itself.
    pub fn list_summaries(&self, options: &ListOptions) -> NoteResult<(usize, Vec<NoteSummary>)> {
        let mut summaries: Vec<NoteSummary> = self
            .load_all()?
            .iter()
            .filter(|n| options.tags.is_empty() || n.has_any_tag(&options.tags))
            .map(Note::summary)
            .collect();

        summaries.sort_by(|a, b| {
            let ordering = compare_by(a, b, options.sort);
            match options.order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });

        let total = summaries.len();
        let page = summaries
            .into_iter()
            .skip(options.offset)
            .take(options.limit.unwrap_or(usize::MAX))
            .collect();
        Ok((total, page))
    }
}

fn compare_by(a: &NoteSummary, b: &NoteSummary, field: SortField) -> Ordering {
    let primary = match field {
        SortField::Created => a.created.cmp(&b.created),
        SortField::Updated => a.updated.cmp(&b.updated),
        SortField::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
    };
    primary.then_with(|| a.filename.cmp(&b.filename))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::path::Path;
    use tempfile::tempdir;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, day, hour, 0, 0).unwrap()
    }

    fn params(title: &str, content: &str, tags: &[&str]) -> CreateNoteParams {
        CreateNoteParams {
            title: title.to_string(),
            content: content.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_note_store_create_and_read() {
        let dir = tempdir().unwrap();
        let store = NoteStore::new(dir.path().join("notes"));
        store.ensure_store().unwrap();

        let filename = store
            .create_note(&params("Trip Notes", "Went hiking.", &[]), at(1, 9))
            .expect("Failed to create note");
        assert_eq!(filename, "trip-notes-2024-06-01.md");

        let note = store.read(&filename).unwrap().expect("note should exist");
        assert_eq!(note.body, "Went hiking.");
        assert_eq!(note.metadata.summary, "Note about Trip Notes");
        assert_eq!(note.metadata.created, "2024-06-01T09:00:00.000Z");
        assert_eq!(note.metadata.created, note.metadata.updated);
        assert!(note.metadata.tags.is_empty());
        assert_eq!(note.full_path, dir.path().join("notes").join(&filename));
    }

    #[test]
    fn test_note_store_collision_gets_suffix() {
        let dir = tempdir().unwrap();
        let store = NoteStore::new(dir.path());

        let first = store.create_note(&params("Daily Log", "one", &[]), at(1, 9)).unwrap();
        let second = store.create_note(&params("Daily Log", "two", &[]), at(1, 10)).unwrap();
        let third = store.create_note(&params("Daily Log", "three", &[]), at(1, 11)).unwrap();

        assert_eq!(first, "daily-log-2024-06-01.md");
        assert_eq!(second, "daily-log-2024-06-01-2.md");
        assert_eq!(third, "daily-log-2024-06-01-3.md");
        assert_eq!(store.read(&first).unwrap().unwrap().body, "one");
    }

    #[test]
    fn test_note_store_create_validation() {
        let dir = tempdir().unwrap();
        let store = NoteStore::new(dir.path().join("notes"));

        let blank = store.create_note(&params("   ", "x", &[]), at(1, 9));
        assert!(matches!(blank, Err(NoteError::Validation(_))));

        let symbols = store.create_note(&params("!!!", "x", &[]), at(1, 9));
        assert!(matches!(symbols, Err(NoteError::Validation(_))));

        // Rejected before any I/O: the root was never created
        assert!(!dir.path().join("notes").exists());
    }

    #[test]
    fn test_note_store_tags_with_newlines_stay_in_tags() {
        let dir = tempdir().unwrap();
        let store = NoteStore::new(dir.path());
        let mut p = params("Tagged", "body", &["ok\nsummary: injected", "plain"]);
        p.summary = Some("real summary".to_string());

        let filename = store.create_note(&p, at(1, 9)).unwrap();
        let note = store.read(&filename).unwrap().unwrap();
        assert!(note.warnings.is_empty());
        assert_eq!(note.metadata.summary, "real summary");
        assert_eq!(note.metadata.tags, vec!["ok\nsummary: injected", "plain"]);
        assert!(note.metadata.extra.is_empty());
    }

    #[test]
    fn test_note_store_read_missing_is_none() {
        let dir = tempdir().unwrap();
        let store = NoteStore::new(dir.path());
        assert!(store.read("nope.md").unwrap().is_none());
    }

    #[test]
    fn test_note_store_read_format_error() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("broken.md"), "no header here").unwrap();
        let store = NoteStore::new(dir.path());

        let err = store.read("broken.md").unwrap_err();
        assert!(matches!(err, NoteError::Format { .. }));
    }

    #[test]
    fn test_note_store_rejects_escaping_paths() {
        let dir = tempdir().unwrap();
        let store = NoteStore::new(dir.path());
        let meta = NoteMetadata::default();

        assert!(matches!(
            store.write("../outside.md", &meta, "x"),
            Err(NoteError::Validation(_))
        ));
        assert!(matches!(store.read("/etc/hosts"), Err(NoteError::Validation(_))));
    }

    #[test]
    fn test_note_store_write_overwrites() {
        let dir = tempdir().unwrap();
        let store = NoteStore::new(dir.path());
        let meta = NoteMetadata::default();

        store.write("a.md", &meta, "first").unwrap();
        store.write("a.md", &meta, "second").unwrap();
        assert_eq!(store.read("a.md").unwrap().unwrap().body, "second");
    }

    #[test]
    fn test_note_store_list_absent_root() {
        let dir = tempdir().unwrap();
        let store = NoteStore::new(dir.path().join("missing"));
        assert!(store.list().unwrap().is_empty());
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_note_store_load_all_skips_broken() {
        let dir = tempdir().unwrap();
        let store = NoteStore::new(dir.path());
        store.create_note(&params("Good", "fine", &[]), at(1, 9)).unwrap();
        std::fs::write(dir.path().join("bad.md"), "---\nunterminated").unwrap();

        let notes = store.load_all().unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].filename, "good-2024-06-01.md");
    }

    #[test]
    fn test_generate_filename_uses_date() {
        let store = NoteStore::new("/tmp/unused");
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(
            store.generate_filename_on("Hello, World!! 2024", date),
            "hello-world-2024-2024-06-01.md"
        );
        assert!(store.generate_filename("x").starts_with("x-"));
    }

    fn seeded_store(dir: &Path) -> NoteStore {
        let store = NoteStore::new(dir);
        store
            .create_note(&params("Bravo", "# Bravo\n\nb", &["rust"]), at(2, 9))
            .unwrap();
        store
            .create_note(&params("Alpha", "# Alpha\n\na", &["rust", "web"]), at(3, 9))
            .unwrap();
        store
            .create_note(&params("Charlie", "# Charlie\n\nc", &["home"]), at(1, 9))
            .unwrap();
        store
    }

    fn titles(summaries: &[NoteSummary]) -> Vec<&str> {
        summaries.iter().map(|s| s.title.as_str()).collect()
    }

    #[test]
    fn test_list_summaries_sorting() {
        let dir = tempdir().unwrap();
        let store = seeded_store(dir.path());

        let (total, newest_first) = store.list_summaries(&ListOptions::default()).unwrap();
        assert_eq!(total, 3);
        assert_eq!(titles(&newest_first), vec!["Alpha", "Bravo", "Charlie"]);

        let (_, by_created_asc) = store
            .list_summaries(&ListOptions {
                sort: SortField::Created,
                order: SortOrder::Asc,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(titles(&by_created_asc), vec!["Charlie", "Bravo", "Alpha"]);

        let (_, by_title_desc) = store
            .list_summaries(&ListOptions {
                sort: SortField::Title,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(titles(&by_title_desc), vec!["Charlie", "Bravo", "Alpha"]);
    }

    #[test]
    fn test_list_summaries_filter_and_paging() {
        let dir = tempdir().unwrap();
        let store = seeded_store(dir.path());

        let (total, page) = store
            .list_summaries(&ListOptions {
                tags: vec!["rust".to_string()],
                sort: SortField::Title,
                order: SortOrder::Asc,
                offset: 1,
                limit: Some(5),
            })
            .unwrap();
        assert_eq!(total, 2);
        assert_eq!(titles(&page), vec!["Bravo"]);

        let (_, empty) = store
            .list_summaries(&ListOptions {
                offset: 10,
                ..Default::default()
            })
            .unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_sort_names() {
        assert_eq!("title".parse::<SortField>().unwrap(), SortField::Title);
        assert_eq!("asc".parse::<SortOrder>().unwrap(), SortOrder::Asc);
        assert!("size".parse::<SortField>().is_err());
        assert_eq!(SortField::default().as_ref(), "updated");
    }
}
