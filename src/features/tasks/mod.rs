//! # Feature: Tasks
//!
//! Task model and read-only task sources (flat file or task server HTTP API).
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod model;
pub mod source;

pub use model::Task;
pub use source::{HttpTaskSource, JsonFileTaskSource, TaskSource};
