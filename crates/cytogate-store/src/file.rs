//! JSON file session store.
//!
//! The whole store lives in one JSON document with a key per namespace, so a save
//! file can be inspected or hand-edited. Writes go to a sibling temp file that is
//! renamed over the original.

use chrono::Utc;
use cytogate_core::error::{CytogateError, Result};
use cytogate_core::models::{Gate, ScratchEntry, SessionMeta, SessionRecord, SessionSnapshot};
use cytogate_core::ports::SessionStore;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::records;

/// On-disk layout of the store file
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(rename = "polygon_chart_saves", default)]
    sessions: Vec<SessionRecord>,

    #[serde(rename = "polygon_chart_scratch", default)]
    scratch: Vec<ScratchEntry>,
}

/// Session store backed by a single JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Open a store at `path`; the file is created on first write
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<StoreDocument> {
        if !self.path.exists() {
            return Ok(StoreDocument::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(StoreDocument::default());
        }

        serde_json::from_str(&content).map_err(|e| CytogateError::CorruptStore {
            reason: format!("{}: {}", self.path.display(), e),
        })
    }

    fn write_document(&self, document: &StoreDocument) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(document)?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &self.path)?;

        tracing::debug!(
            path = %self.path.display(),
            sessions = document.sessions.len(),
            scratch = document.scratch.len(),
            "Wrote session store"
        );
        Ok(())
    }
}

impl SessionStore for JsonFileStore {
    fn save_session(&self, name: &str, snapshot: &SessionSnapshot) -> Result<()> {
        let mut document = self.read_document()?;
        records::upsert(&mut document.sessions, name, snapshot);
        self.write_document(&document)
    }

    fn load_session(&self, name: &str) -> Result<Option<SessionSnapshot>> {
        let document = self.read_document()?;
        Ok(document.sessions.into_iter().find(|r| r.name == name).map(|r| r.data))
    }

    fn delete_session(&self, name: &str) -> Result<bool> {
        let mut document = self.read_document()?;
        let removed = records::remove(&mut document.sessions, name);
        self.write_document(&document)?;
        Ok(removed)
    }

    fn list_sessions(&self) -> Result<Vec<SessionMeta>> {
        let document = self.read_document()?;
        Ok(document.sessions.iter().map(SessionRecord::meta).collect())
    }

    fn append_scratch(&self, gate: &Gate) -> Result<()> {
        let mut document = self.read_document()?;
        document.scratch.push(ScratchEntry { timestamp: Utc::now(), gate: gate.clone() });
        self.write_document(&document)
    }

    fn scratch_entries(&self) -> Result<Vec<ScratchEntry>> {
        Ok(self.read_document()?.scratch)
    }
}
