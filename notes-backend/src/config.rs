use std::env;
use std::path::{Path, PathBuf};

/// Environment variable names - single source of truth
pub mod env_vars {
    /// Root directory of the note store
    pub const NOTES_VAULT_PATH: &str = "NOTES_VAULT_PATH";
    /// Older name for the store root, read when NOTES_VAULT_PATH is unset
    pub const OBSIDIAN_VAULT_PATH: &str = "OBSIDIAN_VAULT_PATH";
    /// Commit message template; `{title}` is replaced by the note title
    pub const GIT_COMMIT_TEMPLATE: &str = "GIT_COMMIT_TEMPLATE";
    /// Set to "true", "1" or "yes" to skip committing new notes.
    /// Default: false (git enabled).
    pub const DISABLE_GIT: &str = "DISABLE_GIT";
    pub const HOME: &str = "HOME";
}

/// Default values
pub mod defaults {
    pub const GIT_COMMIT_TEMPLATE: &str = "Add note: {title}";
    pub const LOG_FILTER: &str = "info";
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("NOTES_VAULT_PATH environment variable is required")]
    MissingNotesDir,
    #[error("cannot resolve relative notes path {path}: {source}")]
    WorkingDir {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Clone, Debug)]
pub struct Config {
    /// Absolute path of the store root
    pub notes_dir: PathBuf,
    pub commit_template: String,
    pub git_enabled: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup (the process environment in production)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let raw_dir = non_empty(env_vars::NOTES_VAULT_PATH)
            .or_else(|| non_empty(env_vars::OBSIDIAN_VAULT_PATH))
            .ok_or(ConfigError::MissingNotesDir)?;
        let notes_dir = resolve_dir(raw_dir.trim(), lookup(env_vars::HOME).as_deref())?;

        let commit_template = non_empty(env_vars::GIT_COMMIT_TEMPLATE)
            .unwrap_or_else(|| defaults::GIT_COMMIT_TEMPLATE.to_string());

        let git_disabled = lookup(env_vars::DISABLE_GIT)
            .map(|v| is_truthy(&v))
            .unwrap_or(false);

        Ok(Self {
            notes_dir,
            commit_template,
            git_enabled: !git_disabled,
        })
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "true" | "1" | "yes")
}

/// Expand a leading `~/` against `home` and make relative paths absolute
fn resolve_dir(raw: &str, home: Option<&str>) -> Result<PathBuf, ConfigError> {
    let expanded = match home {
        Some(home) if raw == "~" => PathBuf::from(home),
        Some(home) => match raw.strip_prefix("~/") {
            Some(rest) => Path::new(home).join(rest),
            None => PathBuf::from(raw),
        },
        None => PathBuf::from(raw),
    };

    if expanded.is_absolute() {
        return Ok(expanded);
    }
    env::current_dir()
        .map(|cwd| cwd.join(&expanded))
        .map_err(|source| ConfigError::WorkingDir {
            path: raw.to_string(),
            source,
        })
}
