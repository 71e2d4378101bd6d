//! Notes system: markdown notes with a `key: value` header block
//!
//! Each note is a plain `.md` file: a `---` delimited header (created/updated
//! timestamps, tags, summary, ...) followed by the body. Files stay readable
//! and editable by hand; search is a relevance-scored scan over all notes.

pub mod error;
pub mod file_ops;
pub mod header;
pub mod metadata;
pub mod note;
pub mod search;
pub mod store;

pub use error::NoteError;
pub use store::{ListOptions, NoteStore, SortField, SortOrder};
