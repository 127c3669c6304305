//! # Reminders Feature
//!
//! Reminder normalization, timer-based delivery and the periodic deadline watcher.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod fired;
pub mod normalizer;
pub mod scheduler;
pub mod watcher;

pub use fired::{DedupKey, FiredKeySet, ReminderKind};
pub use normalizer::{normalize, reminders_from_text, NormalizedReminder};
pub use scheduler::{ReminderScheduler, Scheduled};
pub use watcher::{
    DeadlineWatcher, DisabledGenerator, ReminderGenerator, TickReport, WatcherConfig,
};
