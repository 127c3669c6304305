//! AI helper: reminders, productivity tips and subtask suggestions
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//!
//! Every reply is treated as untrusted text and goes through the lenient JSON
//! parser. Backend failures degrade to empty results and are logged.

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::backend::CompletionBackend;
use super::prompt_builder::{build_reminder_prompt, build_suggest_prompt, build_tips_prompt};
use crate::core::parse_lenient;
use crate::features::reminders::{reminders_from_text, NormalizedReminder, ReminderGenerator};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tips {
    pub tips: Vec<String>,
}

impl Tips {
    /// Read `{"tips": [...]}`; non-string entries are rendered as JSON
    pub fn from_value(value: &Value) -> Self {
        let tips = value
            .get("tips")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(render_item).collect())
            .unwrap_or_default();
        Self { tips }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub subtasks: Vec<String>,
    /// Minutes
    pub estimated_duration: Option<f64>,
    pub priority: Option<String>,
}

impl Suggestion {
    /// Read a suggestion field by field so one malformed field does not void the rest
    pub fn from_value(value: &Value) -> Self {
        let subtasks = value
            .get("subtasks")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(render_item).collect())
            .unwrap_or_default();

        let estimated_duration = value.get("estimated_duration").and_then(|d| match d {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => leading_number(s),
            _ => None,
        });

        let priority = value
            .get("priority")
            .and_then(Value::as_str)
            .map(|p| p.trim().to_lowercase())
            .filter(|p| !p.is_empty());

        Self {
            subtasks,
            estimated_duration,
            priority,
        }
    }
}

fn render_item(item: &Value) -> String {
    match item {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Parse the number at the start of strings like `"45 minutes"`
fn leading_number(s: &str) -> Option<f64> {
    let s = s.trim();
    let end = s
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(s.len());
    s[..end].parse().ok()
}

/// AI helper over a completion backend.
///
/// Owns the session's tips cache: created with the assistant, dropped with it.
pub struct Assistant<B: CompletionBackend> {
    backend: B,
    tips_cache: DashMap<String, Tips>,
}

impl<B: CompletionBackend> Assistant<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            tips_cache: DashMap::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Normalized reminders for a task; empty on any failure
    pub async fn reminders(&self, title: &str, deadline: Option<&str>) -> Vec<NormalizedReminder> {
        match self.generate_reminders(title, deadline).await {
            Ok(text) => reminders_from_text(&text),
            Err(e) => {
                warn!("AI reminder request failed for \"{title}\": {e:#}");
                Vec::new()
            }
        }
    }

    /// Productivity tips, served from the session cache after the first success
    pub async fn tips(&self, title: &str) -> Tips {
        if let Some(cached) = self.tips_cache.get(title) {
            debug!("Serving cached tips for \"{title}\"");
            return cached.clone();
        }

        match self.backend.complete(&build_tips_prompt(title)).await {
            Ok(text) => {
                let tips = Tips::from_value(&parse_lenient(&text, Value::Null));
                self.tips_cache.insert(title.to_string(), tips.clone());
                tips
            }
            Err(e) => {
                warn!("AI tips request failed for \"{title}\": {e:#}");
                Tips::default()
            }
        }
    }

    /// Subtask breakdown, effort estimate and priority; empty on any failure
    pub async fn suggest(&self, title: &str) -> Suggestion {
        match self.backend.complete(&build_suggest_prompt(title)).await {
            Ok(text) => Suggestion::from_value(&parse_lenient(&text, Value::Null)),
            Err(e) => {
                warn!("AI suggestion request failed for \"{title}\": {e:#}");
                Suggestion::default()
            }
        }
    }

    pub fn cached_tips(&self) -> usize {
        self.tips_cache.len()
    }
}

#[async_trait]
impl<B: CompletionBackend> ReminderGenerator for Assistant<B> {
    async fn generate_reminders(&self, title: &str, deadline: Option<&str>) -> Result<String> {
        let prompt = build_reminder_prompt(title, deadline, Utc::now());
        self.backend.complete(&prompt).await
    }
}
