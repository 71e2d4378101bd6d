mod create_note;
mod get_note;
mod list_notes;
mod search_notes;

pub use create_note::CreateNoteTool;
pub use get_note::GetNoteTool;
pub use list_notes::ListNotesTool;
pub use search_notes::SearchNotesTool;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::git::{CommitOutcome, VersionControl};
    use crate::notes::NoteStore;
    use crate::tools::types::ToolContext;
    use async_trait::async_trait;
    use chrono::Utc;
    use notes_types::CreateNoteParams;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    pub fn context_in(root: impl Into<PathBuf>) -> ToolContext {
        ToolContext::new(Arc::new(NoteStore::new(root)))
    }

    /// Create a note directly through the store and return its filename
    pub fn seed_note(context: &ToolContext, title: &str, content: &str, tags: &[&str]) -> String {
        let params = CreateNoteParams {
            title: title.to_string(),
            content: content.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        };
        context.notes_store.create_note(&params, Utc::now()).unwrap()
    }

    /// Records commits instead of running git
    pub struct FakeVersionControl {
        repository: bool,
        outcome: CommitOutcome,
        commits: Mutex<Vec<(String, String)>>,
    }

    impl FakeVersionControl {
        pub fn new(repository: bool, outcome: CommitOutcome) -> Self {
            Self {
                repository,
                outcome,
                commits: Mutex::new(Vec::new()),
            }
        }

        pub fn commits(&self) -> Vec<(String, String)> {
            self.commits.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl VersionControl for FakeVersionControl {
        async fn is_repository(&self) -> bool {
            self.repository
        }

        async fn commit(&self, filename: &str, title: &str) -> CommitOutcome {
            self.commits
                .lock()
                .unwrap()
                .push((filename.to_string(), title.to_string()));
            self.outcome.clone()
        }
    }
}
