use crate::user_models::{User, UserProfile};
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

pub const SESSION_FILE: &str = ".session";

/// Holds the single authenticated identity and keeps it durable across
/// restarts. At most one user is active; login replaces the whole
/// identity, it never merges with a prior one.
pub struct SessionStore {
    path: PathBuf,
    user: Option<User>,
}

impl SessionStore {
    /// Rehydrates the session from disk. An absent file yields an
    /// anonymous store; a malformed one is a parse failure.
    pub fn restore(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let user = if path.exists() {
            let data = fs::read_to_string(&path)
                .context("Failed to read session file")?;
            Some(serde_json::from_str(&data)
                .context("Failed to parse session file")?)
        } else {
            None
        };

        Ok(Self { path, user })
    }

    pub fn current(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn login(&mut self, profile: UserProfile) -> Result<()> {
        let user = User::new(profile);
        let json = serde_json::to_string_pretty(&user)
            .context("Failed to serialize session")?;
        fs::write(&self.path, json)
            .context("Failed to write session file")?;
        self.user = Some(user);
        Ok(())
    }

    pub fn logout(&mut self) -> Result<()> {
        self.user = None;
        if self.path.exists() {
            fs::remove_file(&self.path)
                .context("Failed to remove session file")?;
        }
        Ok(())
    }
}
