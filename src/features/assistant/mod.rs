//! # Feature: AI Assistant
//!
//! Reminder, tips and subtask prompts sent to a completion backend (OpenAI),
//! with lenient parsing of the replies and a session tips cache.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: true

pub mod backend;
pub mod prompt_builder;
pub mod service;

pub use backend::{CompletionBackend, OpenAiBackend};
pub use prompt_builder::{build_reminder_prompt, build_suggest_prompt, build_tips_prompt};
pub use service::{Assistant, Suggestion, Tips};
