//! # Reminder Scheduler
//!
//! Shows a normalized reminder now, or registers a one-shot deferred
//! notification for its scheduled time.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//!
//! Deferred entries cannot be cancelled individually. Dropping the scheduler
//! aborts every entry that has not fired yet, which is how a session teardown
//! discards them. The scheduler performs no de-duplication; callers own that.

use chrono::{DateTime, Utc};
use log::debug;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;

use super::normalizer::NormalizedReminder;
use crate::core::format_local_clock;
use crate::features::notify::NotificationSurface;

/// What the scheduler did with a reminder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheduled {
    /// Shown during the call
    Immediate,
    /// Will be shown after the delay elapses
    Deferred(Duration),
}

pub struct ReminderScheduler {
    surface: Arc<dyn NotificationSurface>,
    pending: Mutex<Vec<JoinHandle<()>>>,
}

impl ReminderScheduler {
    pub fn new(surface: Arc<dyn NotificationSurface>) -> Self {
        Self {
            surface,
            pending: Mutex::new(Vec::new()),
        }
    }

    /// Schedule relative to the current wall clock
    pub fn schedule(&self, reminder: &NormalizedReminder) -> Scheduled {
        self.schedule_at(reminder, None, Utc::now())
    }

    /// Schedule a reminder that belongs to a named task
    pub fn schedule_for_task(&self, task_title: &str, reminder: &NormalizedReminder) -> Scheduled {
        self.schedule_at(reminder, Some(task_title), Utc::now())
    }

    /// Schedule relative to `now`.
    ///
    /// Must be called from within a tokio runtime when the reminder lies in the future.
    pub fn schedule_at(
        &self,
        reminder: &NormalizedReminder,
        task_title: Option<&str>,
        now: DateTime<Utc>,
    ) -> Scheduled {
        let subject = match task_title {
            Some(title) => format!("Reminder for \"{title}\""),
            None => "Reminder".to_string(),
        };

        match reminder.scheduled_at {
            Some(at) if at > now => {
                let delay = (at - now).to_std().unwrap_or_default();
                let surface = Arc::clone(&self.surface);
                let message = format!("⏰ Scheduled {subject}: {}", reminder.message);

                let handle = tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    surface.show(&message);
                });
                self.track(handle);

                debug!("Deferred reminder '{}' by {:?}", reminder.message, delay);
                self.surface
                    .show(&format!("Reminder scheduled for {}", format_local_clock(at)));
                Scheduled::Deferred(delay)
            }
            _ => {
                self.surface
                    .show(&format!("⏰ {subject}: {}", reminder.message));
                Scheduled::Immediate
            }
        }
    }

    /// Number of deferred reminders that have not fired yet
    pub fn pending(&self) -> usize {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        pending.retain(|handle| !handle.is_finished());
        pending.len()
    }

    /// Wait until every deferred reminder registered so far has fired
    pub async fn drain(&self) {
        let handles = std::mem::take(
            &mut *self.pending.lock().unwrap_or_else(PoisonError::into_inner),
        );
        for handle in handles {
            let _ = handle.await;
        }
    }

    fn track(&self, handle: JoinHandle<()>) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        pending.retain(|handle| !handle.is_finished());
        pending.push(handle);
    }
}

impl Drop for ReminderScheduler {
    fn drop(&mut self) {
        let pending = self.pending.get_mut().unwrap_or_else(PoisonError::into_inner);
        for handle in pending.drain(..) {
            handle.abort();
        }
    }
}
