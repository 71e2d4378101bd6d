use std::path::PathBuf;

/// Errors surfaced by the note store. A missing note is not an error: reads
/// return `Ok(None)` for that.
#[derive(Debug, thiserror::Error)]
pub enum NoteError {
    /// The file exists but its header delimiters are broken
    #[error("invalid note format in {filename}: {reason}")]
    Format {
        filename: String,
        reason: &'static str,
    },
    /// Caller input rejected before touching the filesystem
    #[error("{0}")]
    Validation(String),
    #[error("I/O error for {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl NoteError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        NoteError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type NoteResult<T> = Result<T, NoteError>;
