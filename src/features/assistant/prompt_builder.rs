//! Prompt construction for the AI helper
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//!
//! All builders are pure: the current time is passed in, never read.

use chrono::{DateTime, Duration, Utc};

use crate::core::{format_local_minute, parse_timestamp};

/// Horizon assumed when a task has no usable deadline
pub const DEFAULT_DEADLINE_HORIZON_HOURS: i64 = 24;

/// Lead times (minutes before the deadline) used in the reminder example
const EXAMPLE_LEADS: [(i64, &str); 3] = [
    (60, "Start preparing"),
    (30, "Begin task"),
    (5, "Final reminder"),
];

/// Build the reminder prompt for a task.
///
/// Times are rendered as local `YYYY-MM-DDTHH:MM`, the same format the
/// reminder normalizer reads back.
pub fn build_reminder_prompt(title: &str, deadline: Option<&str>, now: DateTime<Utc>) -> String {
    let deadline_at = deadline
        .and_then(parse_timestamp)
        .unwrap_or_else(|| now + Duration::hours(DEFAULT_DEADLINE_HORIZON_HOURS));

    let examples = EXAMPLE_LEADS
        .iter()
        .enumerate()
        .map(|(i, (lead, text))| {
            format!(
                "    \"Reminder {}: {} by {}\"",
                i + 1,
                text,
                format_local_minute(deadline_at - Duration::minutes(*lead))
            )
        })
        .collect::<Vec<_>>()
        .join(",\n");

    format!(
        "TASK: \"{title}\"\n\
         DEADLINE: \"{}\"\n\
         CURRENT TIME: \"{}\"\n\
         \n\
         Create 3 helpful reminders with specific times. \
         Format each as \"Reminder X: [message] by [YYYY-MM-DDTHH:MM]\"\n\
         \n\
         Respond ONLY with JSON:\n\
         {{\n  \"reminders\": [\n{examples}\n  ]\n}}",
        format_local_minute(deadline_at),
        format_local_minute(now),
    )
}

/// Build the productivity-tips prompt for a task title
pub fn build_tips_prompt(title: &str) -> String {
    format!(
        "You are a productivity coach.\n\
         Given the task: \"{title}\", suggest 3 short productivity tips.\n\
         \n\
         Respond ONLY with JSON:\n\
         {{ \"tips\": [\"...\", \"...\", \"...\"] }}"
    )
}

/// Build the subtask-breakdown prompt for a task title
pub fn build_suggest_prompt(title: &str) -> String {
    format!(
        "You are a planning assistant.\n\
         Break the task \"{title}\" into 3 to 6 concrete subtasks, estimate the total \
         effort in minutes and rate its priority.\n\
         \n\
         Respond ONLY with JSON:\n\
         {{ \"subtasks\": [\"...\"], \"estimated_duration\": 30, \"priority\": \"low|medium|high\" }}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reminder_prompt_contains_task_and_times() {
        let now = parse_timestamp("2025-09-14T12:00").unwrap();
        let prompt = build_reminder_prompt("Cook dinner", Some("2025-09-14T16:07"), now);

        assert!(prompt.contains("TASK: \"Cook dinner\""));
        assert!(prompt.contains("DEADLINE: \"2025-09-14T16:07\""));
        assert!(prompt.contains("CURRENT TIME: \"2025-09-14T12:00\""));
        assert!(prompt.contains("\"Reminder 1: Start preparing by 2025-09-14T15:07\""));
        assert!(prompt.contains("\"Reminder 2: Begin task by 2025-09-14T15:37\""));
        assert!(prompt.contains("\"Reminder 3: Final reminder by 2025-09-14T16:02\""));
        assert!(prompt.contains("Respond ONLY with JSON"));
    }

    #[test]
    fn test_reminder_prompt_defaults_deadline_to_a_day_out() {
        let now = parse_timestamp("2025-09-14T12:00").unwrap();
        let expected = format_local_minute(now + Duration::hours(24));

        let prompt = build_reminder_prompt("Read", None, now);
        assert!(prompt.contains(&format!("DEADLINE: \"{expected}\"")));

        let prompt = build_reminder_prompt("Read", Some("someday"), now);
        assert!(prompt.contains(&format!("DEADLINE: \"{expected}\"")));
    }

    #[test]
    fn test_reminder_prompt_example_is_valid_json() {
        let now = parse_timestamp("2025-09-14T12:00").unwrap();
        let prompt = build_reminder_prompt("x", Some("2025-09-14T16:07"), now);
        let example = crate::core::extract_brace_block(&prompt).unwrap();
        let value: serde_json::Value = serde_json::from_str(example).unwrap();
        assert_eq!(value["reminders"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_tips_prompt() {
        let prompt = build_tips_prompt("Write thesis");
        assert!(prompt.contains("\"Write thesis\""));
        assert!(prompt.contains("\"tips\""));
    }

    #[test]
    fn test_suggest_prompt() {
        let prompt = build_suggest_prompt("Plan trip");
        assert!(prompt.contains("\"Plan trip\""));
        assert!(prompt.contains("\"subtasks\""));
        assert!(prompt.contains("\"estimated_duration\""));
        assert!(prompt.contains("\"priority\""));
    }
}
