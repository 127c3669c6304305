//! # Feature: Notifications
//!
//! User-visible notification surfaces.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod surface;

pub use surface::{ChannelNotifier, ConsoleNotifier, NotificationSurface};
