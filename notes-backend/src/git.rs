//! Version control for the notes directory
//!
//! After a note is created it is committed with the `git` CLI. Failures never
//! bubble up: the note is already on disk, so a failed commit is logged and
//! reported as a sentinel instead.

use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Output;
use tokio::process::Command;

/// Placeholder replaced by the note title in commit message templates
pub const TITLE_PLACEHOLDER: &str = "{title}";
/// Older placeholder spelling, still honoured
const LEGACY_TITLE_PLACEHOLDER: &str = "%TITLE%";

/// Result of a commit attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Commit created and HEAD resolved to this hash
    Committed(String),
    /// `git commit` succeeded but HEAD could not be read back
    Unconfirmed,
    Failed,
}

impl CommitOutcome {
    /// The commit hash, or a `commit_created` / `commit_failed` sentinel
    pub fn identifier(&self) -> &str {
        match self {
            CommitOutcome::Committed(hash) => hash,
            CommitOutcome::Unconfirmed => "commit_created",
            CommitOutcome::Failed => "commit_failed",
        }
    }

    pub fn is_committed(&self) -> bool {
        matches!(self, CommitOutcome::Committed(_))
    }
}

#[async_trait]
pub trait VersionControl: Send + Sync {
    async fn is_repository(&self) -> bool;

    /// Commit `filename` (relative to the store root). Never fails outright.
    async fn commit(&self, filename: &str, title: &str) -> CommitOutcome;
}

/// Commits notes with the `git` binary found on PATH
pub struct GitCommitter {
    root: PathBuf,
    message_template: String,
}

impl GitCommitter {
    pub fn new(root: impl Into<PathBuf>, message_template: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            message_template: message_template.into(),
        }
    }

    pub fn commit_message(&self, title: &str) -> String {
        self.message_template
            .replace(TITLE_PLACEHOLDER, title)
            .replace(LEGACY_TITLE_PLACEHOLDER, title)
    }

    async fn git(&self, args: &[&str]) -> std::io::Result<Output> {
        Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .output()
            .await
    }

    /// Run a git step, logging why it failed. Returns stdout on success.
    async fn step(&self, name: &str, args: &[&str]) -> Option<String> {
        match self.git(args).await {
            Ok(output) if output.status.success() => {
                Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
            }
            Ok(output) => {
                log::warn!(
                    "[GIT] git {} failed: {}",
                    name,
                    String::from_utf8_lossy(&output.stderr).trim()
                );
                None
            }
            Err(e) => {
                log::warn!("[GIT] Could not run git {}: {}", name, e);
                None
            }
        }
    }
}

#[async_trait]
impl VersionControl for GitCommitter {
    async fn is_repository(&self) -> bool {
        match self.git(&["rev-parse", "--git-dir"]).await {
            Ok(output) => output.status.success(),
            Err(e) => {
                log::debug!("[GIT] git unavailable in {}: {}", self.root.display(), e);
                false
            }
        }
    }

    async fn commit(&self, filename: &str, title: &str) -> CommitOutcome {
        if self.step("add", &["add", "--", filename]).await.is_none() {
            return CommitOutcome::Failed;
        }

        let message = self.commit_message(title);
        if self.step("commit", &["commit", "-m", &message]).await.is_none() {
            return CommitOutcome::Failed;
        }

        match self.step("rev-parse", &["rev-parse", "HEAD"]).await {
            Some(hash) if !hash.is_empty() => {
                log::info!("[GIT] Committed {} as {}", filename, hash);
                CommitOutcome::Committed(hash)
            }
            _ => CommitOutcome::Unconfirmed,
        }
    }
}
