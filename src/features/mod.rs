//! # Features
//!
//! - `tasks`: task model and read-only task sources
//! - `reminders`: normalization, scheduling and the deadline watcher
//! - `assistant`: AI prompts, completion backend and reply parsing
//! - `notify`: notification surfaces

pub mod assistant;
pub mod notify;
pub mod reminders;
pub mod tasks;

pub use assistant::{Assistant, CompletionBackend, OpenAiBackend, Suggestion, Tips};
pub use notify::{ChannelNotifier, ConsoleNotifier, NotificationSurface};
pub use reminders::{
    normalize, DeadlineWatcher, FiredKeySet, NormalizedReminder, ReminderGenerator,
    ReminderKind, ReminderScheduler, WatcherConfig,
};
pub use tasks::{HttpTaskSource, JsonFileTaskSource, Task, TaskSource};
