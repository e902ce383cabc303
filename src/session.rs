//! Session-scoped key/value storage.
//!
//! Each interactive session gets its own store, identified by a UUID and
//! backed by `<sessions>/<id>.json`. The file is only created on the first
//! write and is removed when the session ends, so nothing outlives the session
//! unless the process is killed.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStore {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    #[serde(default)]
    values: BTreeMap<String, String>,

    #[serde(skip)]
    path: PathBuf,
}

impl SessionStore {
    /// Start a fresh session. Nothing is written until the first `set`.
    pub fn start(sessions_dir: &Path) -> Self {
        let id = Uuid::new_v4();
        Self {
            id,
            started_at: Utc::now(),
            values: BTreeMap::new(),
            path: Self::file_for(sessions_dir, id),
        }
    }

    /// Reopen an existing session, or start an empty one with that id
    pub fn open(sessions_dir: &Path, id: Uuid) -> Result<Self> {
        let path = Self::file_for(sessions_dir, id);
        if path.exists() {
            Self::read(&path)
        } else {
            Ok(Self {
                id,
                started_at: Utc::now(),
                values: BTreeMap::new(),
                path,
            })
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read session file {}", path.display()))?;
        let mut store: SessionStore = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse session file {}", path.display()))?;
        store.path = path.to_path_buf();
        Ok(store)
    }

    fn file_for(sessions_dir: &Path, id: Uuid) -> PathBuf {
        sessions_dir.join(format!("{}.json", id))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether anything has been written for this session yet
    pub fn is_persisted(&self) -> bool {
        self.path.exists()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if self.get(key) == Some(value) {
            return Ok(());
        }
        self.values.insert(key.to_string(), value.to_string());
        self.save()
    }

    pub fn remove(&mut self, key: &str) -> Result<()> {
        if self.values.remove(key).is_some() {
            self.save()?;
        }
        Ok(())
    }

    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).context("Failed to create sessions directory")?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write session file {}", self.path.display()))?;
        Ok(())
    }

    /// End the session, discarding everything it stored
    pub fn end(self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path).with_context(|| {
                format!("Failed to remove session file {}", self.path.display())
            })?;
        }
        tracing::debug!(session = %self.id, "Session ended");
        Ok(())
    }

    /// Sessions left on disk, oldest first
    pub fn list(sessions_dir: &Path) -> Result<Vec<SessionStore>> {
        if !sessions_dir.exists() {
            return Ok(Vec::new());
        }

        let mut sessions = Vec::new();
        for entry in fs::read_dir(sessions_dir).context("Failed to read sessions directory")? {
            let path = entry?.path();
            if path.extension().is_none_or(|e| e != "json") {
                continue;
            }
            match Self::read(&path) {
                Ok(store) => sessions.push(store),
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "Skipping session file"),
            }
        }
        sessions.sort_by_key(|s| s.started_at);
        Ok(sessions)
    }

    /// Remove every leftover session file; returns how many were removed
    pub fn clear_all(sessions_dir: &Path) -> Result<usize> {
        let sessions = Self::list(sessions_dir)?;
        let count = sessions.len();
        for session in sessions {
            session.end()?;
        }
        Ok(count)
    }
}
