//! Session store that lives only as long as the process.
//!
//! Saved snapshots and the scratch log sit behind one lock each, so clones of
//! the store share them. Nothing is written to disk; use
//! [`JsonFileStore`](crate::file::JsonFileStore) for sessions that must survive a restart.

use chrono::Utc;
use cytogate_core::error::Result;
use cytogate_core::models::{Gate, ScratchEntry, SessionMeta, SessionRecord, SessionSnapshot};
use cytogate_core::ports::SessionStore;
use std::sync::{Arc, RwLock};

use crate::records;

/// In-memory implementation of SessionStore
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    sessions: Arc<RwLock<Vec<SessionRecord>>>,
    scratch: Arc<RwLock<Vec<ScratchEntry>>>,
}

impl MemorySessionStore {
    /// Create a new in-memory session store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of saved sessions
    pub fn len(&self) -> usize {
        self.sessions.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionStore for MemorySessionStore {
    fn save_session(&self, name: &str, snapshot: &SessionSnapshot) -> Result<()> {
        let mut sessions = self.sessions.write().unwrap();
        records::upsert(&mut sessions, name, snapshot);
        Ok(())
    }

    fn load_session(&self, name: &str) -> Result<Option<SessionSnapshot>> {
        let sessions = self.sessions.read().unwrap();
        Ok(sessions.iter().find(|r| r.name == name).map(|r| r.data.clone()))
    }

    fn delete_session(&self, name: &str) -> Result<bool> {
        let mut sessions = self.sessions.write().unwrap();
        Ok(records::remove(&mut sessions, name))
    }

    fn list_sessions(&self) -> Result<Vec<SessionMeta>> {
        let sessions = self.sessions.read().unwrap();
        Ok(sessions.iter().map(SessionRecord::meta).collect())
    }

    fn append_scratch(&self, gate: &Gate) -> Result<()> {
        let mut scratch = self.scratch.write().unwrap();
        scratch.push(ScratchEntry { timestamp: Utc::now(), gate: gate.clone() });
        Ok(())
    }

    fn scratch_entries(&self) -> Result<Vec<ScratchEntry>> {
        Ok(self.scratch.read().unwrap().clone())
    }
}
