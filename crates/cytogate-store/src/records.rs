use chrono::Utc;
use cytogate_core::models::{SessionRecord, SessionSnapshot};

/// Replace the record named `name` in place, or append a new one
pub(crate) fn upsert(records: &mut Vec<SessionRecord>, name: &str, snapshot: &SessionSnapshot) {
    let record = SessionRecord {
        name: name.to_string(),
        timestamp: Utc::now(),
        data: snapshot.clone(),
    };

    match records.iter_mut().find(|r| r.name == name) {
        Some(existing) => *existing = record,
        None => records.push(record),
    }
}

/// Remove the record named `name`; returns whether one existed
pub(crate) fn remove(records: &mut Vec<SessionRecord>, name: &str) -> bool {
    let before = records.len();
    records.retain(|r| r.name != name);
    records.len() != before
}
