// Core layer - configuration, timestamps and lenient JSON parsing
pub mod core;

// Features layer - tasks, reminders, AI assistant and notifications
pub mod features;

pub use crate::core::{parse_lenient, Config};

pub use features::{
    // Assistant
    Assistant, CompletionBackend, OpenAiBackend, Suggestion, Tips,
    // Notifications
    ChannelNotifier, ConsoleNotifier, NotificationSurface,
    // Reminders
    normalize, DeadlineWatcher, FiredKeySet, NormalizedReminder, ReminderGenerator,
    ReminderKind, ReminderScheduler, WatcherConfig,
    // Tasks
    HttpTaskSource, JsonFileTaskSource, Task, TaskSource,
};
