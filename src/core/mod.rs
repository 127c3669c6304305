//! # Core Module
//!
//! Configuration, timestamp handling and lenient JSON parsing shared by all features.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod config;
pub mod lenient_json;
pub mod timestamp;

// Re-export commonly used items
pub use config::Config;
pub use lenient_json::{extract_brace_block, parse_lenient};
pub use timestamp::{
    format_local_clock, format_local_minute, local_to_utc, parse_timestamp, MINUTE_FORMAT,
};
