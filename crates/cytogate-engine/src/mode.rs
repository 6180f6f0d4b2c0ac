use std::time::{Duration, Instant};

/// What the workbench is doing between user actions.
///
/// Exactly one mode is active; gate drawing happens in `Browsing` and is tracked
/// by the gate session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UiMode {
    #[default]
    Browsing,
    /// Busy applying a dye; the result lands at `ready_at`
    Dyeing { gate: String, ready_at: Instant },
    /// Session save dialog open
    SavingSession,
    /// Session load dialog open
    LoadingSession,
}

impl UiMode {
    pub fn label(&self) -> &'static str {
        match self {
            UiMode::Browsing => "browsing",
            UiMode::Dyeing { .. } => "dyeing",
            UiMode::SavingSession => "saving a session",
            UiMode::LoadingSession => "loading a session",
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, UiMode::Dyeing { .. })
    }

    /// Time left before a pending dye may be applied
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        match self {
            UiMode::Dyeing { ready_at, .. } => Some(ready_at.saturating_duration_since(now)),
            _ => None,
        }
    }
}
