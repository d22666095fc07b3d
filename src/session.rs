//! The logged-in user, persisted between CLI invocations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Not logged in. Run 'healthtrack login <username>' first.")]
    NotLoggedIn,

    #[error("Failed to access session file '{}': {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse session file '{}': {}", .0.display(), .1)]
    Parse(PathBuf, #[source] serde_yaml::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: i64,
    pub username: String,
    pub logged_in_at: DateTime<Utc>,
}

impl Session {
    pub fn new(user_id: i64, username: impl Into<String>) -> Self {
        Self {
            user_id,
            username: username.into(),
            logged_in_at: Utc::now(),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), SessionError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| SessionError::Io(path.to_path_buf(), e))?;
        }
        let contents = serde_yaml::to_string(self)
            .map_err(|e| SessionError::Parse(path.to_path_buf(), e))?;
        std::fs::write(path, contents).map_err(|e| SessionError::Io(path.to_path_buf(), e))
    }

    /// Load the current session, or `None` when nobody is logged in.
    pub fn load(path: &Path) -> Result<Option<Self>, SessionError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(SessionError::Io(path.to_path_buf(), e)),
        };
        serde_yaml::from_str(&contents)
            .map(Some)
            .map_err(|e| SessionError::Parse(path.to_path_buf(), e))
    }

    pub fn require(path: &Path) -> Result<Self, SessionError> {
        Self::load(path)?.ok_or(SessionError::NotLoggedIn)
    }

    /// Remove the session file. Returns whether a session existed.
    pub fn clear(path: &Path) -> Result<bool, SessionError> {
        match std::fs::remove_file(path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(SessionError::Io(path.to_path_buf(), e)),
        }
    }
}
