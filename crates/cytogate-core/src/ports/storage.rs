use crate::error::Result;
use crate::models::{Gate, ScratchEntry, SessionMeta, SessionSnapshot};

/// Port for durable session persistence
///
/// A store holds two namespaces: named session snapshots, and an append-only
/// scratch log of every gate the user finished drawing.
pub trait SessionStore {
    /// Insert or replace the snapshot saved under `name`, refreshing its timestamp
    fn save_session(&self, name: &str, snapshot: &SessionSnapshot) -> Result<()>;

    /// Retrieve a snapshot by name
    fn load_session(&self, name: &str) -> Result<Option<SessionSnapshot>>;

    /// Delete a snapshot; returns whether anything was removed
    fn delete_session(&self, name: &str) -> Result<bool>;

    /// List saved sessions in insertion order
    fn list_sessions(&self) -> Result<Vec<SessionMeta>>;

    /// Append a drawn gate to the scratch log
    fn append_scratch(&self, gate: &Gate) -> Result<()>;

    /// Read the scratch log, oldest first
    fn scratch_entries(&self) -> Result<Vec<ScratchEntry>>;
}
