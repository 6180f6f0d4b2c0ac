use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::gate::Gate;
use super::point::Point;
use crate::error::Result;

/// Per-group display flag, keyed by group name
pub type GroupVisibility = BTreeMap<String, bool>;

/// Everything needed to restore a gating session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Points with their current classification
    pub points: Vec<Point>,

    /// Saved gates that have not been dyed yet
    #[serde(rename = "polygons")]
    pub gates: Vec<Gate>,

    /// Visibility flag per dyed group
    #[serde(rename = "dyedGroups")]
    pub group_visibility: GroupVisibility,
}

impl SessionSnapshot {
    /// Check the invariants of every gate in the snapshot
    pub fn validate(&self) -> Result<()> {
        for gate in &self.gates {
            gate.validate()?;
        }
        Ok(())
    }
}

/// A named, timestamped snapshot as held by a session store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub name: String,

    /// Time of the last save, as epoch milliseconds on disk
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,

    pub data: SessionSnapshot,
}

impl SessionRecord {
    pub fn meta(&self) -> SessionMeta {
        SessionMeta { name: self.name.clone(), timestamp: self.timestamp }
    }
}

/// Listing entry for a saved session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionMeta {
    pub name: String,
    pub timestamp: DateTime<Utc>,
}

/// A drawn gate recorded in the append-only scratch log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScratchEntry {
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,

    pub gate: Gate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Plot, Vertex};

    #[test]
    fn test_snapshot_uses_legacy_field_names() {
        let snapshot = SessionSnapshot::default();
        let json = serde_json::to_value(&snapshot).unwrap();
        assert!(json.get("polygons").is_some());
        assert!(json.get("dyedGroups").is_some());
    }

    #[test]
    fn test_record_timestamp_is_millis() {
        let record = SessionRecord {
            name: "s".to_string(),
            timestamp: DateTime::from_timestamp_millis(1_700_000_000_123).unwrap(),
            data: SessionSnapshot::default(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["timestamp"], 1_700_000_000_123i64);
    }

    #[test]
    fn test_validate_rejects_broken_gate() {
        let snapshot = SessionSnapshot {
            gates: vec![Gate {
                vertices: vec![Vertex::new(0.0, 0.0, Plot::A)],
                color: "red".to_string(),
                name: "tiny".to_string(),
                visible: true,
            }],
            ..Default::default()
        };
        assert!(snapshot.validate().is_err());
    }
}
