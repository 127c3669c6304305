//! Session-scoped record of reminders that already fired
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use std::collections::HashSet;
use std::fmt;

/// Class of reminder the watcher can emit for a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReminderKind {
    /// Deadline is within the near-deadline window
    NearDeadline,
    /// Deadline has passed
    Missed,
    /// AI-generated reminders were requested
    Ai,
}

impl fmt::Display for ReminderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReminderKind::NearDeadline => write!(f, "10min"),
            ReminderKind::Missed => write!(f, "missed"),
            ReminderKind::Ai => write!(f, "ai"),
        }
    }
}

/// Composite key: (task_id, kind)
pub type DedupKey = (String, ReminderKind);

/// Grows monotonically for the lifetime of its owner; never evicted or persisted
#[derive(Debug, Default)]
pub struct FiredKeySet {
    keys: HashSet<DedupKey>,
}

impl FiredKeySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, task_id: &str, kind: ReminderKind) -> bool {
        self.keys.contains(&(task_id.to_string(), kind))
    }

    /// Record a key; returns `false` if it was already present
    pub fn record(&mut self, task_id: &str, kind: ReminderKind) -> bool {
        self.keys.insert((task_id.to_string(), kind))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_once() {
        let mut fired = FiredKeySet::new();
        assert!(fired.is_empty());
        assert!(fired.record("t1", ReminderKind::Missed));
        assert!(!fired.record("t1", ReminderKind::Missed));
        assert!(fired.contains("t1", ReminderKind::Missed));
        assert_eq!(fired.len(), 1);
    }

    #[test]
    fn test_kinds_and_tasks_are_independent() {
        let mut fired = FiredKeySet::new();
        fired.record("t1", ReminderKind::Ai);

        assert!(!fired.contains("t1", ReminderKind::Missed));
        assert!(!fired.contains("t1", ReminderKind::NearDeadline));
        assert!(!fired.contains("t2", ReminderKind::Ai));
    }

    #[test]
    fn test_kind_tags() {
        assert_eq!(ReminderKind::NearDeadline.to_string(), "10min");
        assert_eq!(ReminderKind::Missed.to_string(), "missed");
        assert_eq!(ReminderKind::Ai.to_string(), "ai");
    }
}
