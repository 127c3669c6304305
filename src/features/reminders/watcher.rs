//! # Periodic Deadline Watcher
//!
//! Ticks on a fixed cadence, checks every open task's deadline and drives the
//! reminder scheduler. Each `(task, kind)` pair fires at most once per session.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//!
//! Per task, per tick:
//! 1. near-deadline warning when `0 < deadline - now <= near_deadline`
//! 2. missed warning when the deadline has passed
//! 3. one AI reminder request per task, recorded as soon as it is spawned

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::fired::{FiredKeySet, ReminderKind};
use super::normalizer::reminders_from_text;
use super::scheduler::ReminderScheduler;
use crate::features::notify::NotificationSurface;
use crate::features::tasks::{Task, TaskSource};

pub const DEFAULT_TICK_INTERVAL_SECS: u64 = 60;
pub const DEFAULT_NEAR_DEADLINE_MINUTES: i64 = 10;
pub const DEFAULT_REFRESH_TIMEOUT_SECS: u64 = 10;

/// Produces raw (untrusted) reminder text for a task
#[async_trait]
pub trait ReminderGenerator: Send + Sync {
    async fn generate_reminders(&self, title: &str, deadline: Option<&str>) -> Result<String>;
}

/// Stand-in when no AI backend is configured: every request fails, so the
/// watcher still fires its deadline warnings but schedules no AI reminders
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledGenerator;

#[async_trait]
impl ReminderGenerator for DisabledGenerator {
    async fn generate_reminders(&self, _title: &str, _deadline: Option<&str>) -> Result<String> {
        Err(anyhow!("AI reminders are disabled (OPENAI_API_KEY is not set)"))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct WatcherConfig {
    pub tick_interval: Duration,
    pub near_deadline: chrono::Duration,
    /// A task fetch slower than this is abandoned and the tick uses the cached snapshot
    pub refresh_timeout: Duration,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(DEFAULT_TICK_INTERVAL_SECS),
            near_deadline: chrono::Duration::minutes(DEFAULT_NEAR_DEADLINE_MINUTES),
            refresh_timeout: Duration::from_secs(DEFAULT_REFRESH_TIMEOUT_SECS),
        }
    }
}

/// Outcome of a single tick
#[derive(Debug, Default)]
pub struct TickReport {
    pub near_deadline: usize,
    pub missed: usize,
    /// AI requests spawned this tick; dropping the handles detaches them
    pub ai_requests: Vec<JoinHandle<()>>,
}

pub struct DeadlineWatcher {
    source: Arc<dyn TaskSource>,
    generator: Arc<dyn ReminderGenerator>,
    scheduler: Arc<ReminderScheduler>,
    surface: Arc<dyn NotificationSurface>,
    config: WatcherConfig,
    tasks: Vec<Task>,
    fired: FiredKeySet,
}

impl DeadlineWatcher {
    pub fn new(
        source: Arc<dyn TaskSource>,
        generator: Arc<dyn ReminderGenerator>,
        scheduler: Arc<ReminderScheduler>,
        surface: Arc<dyn NotificationSurface>,
        config: WatcherConfig,
    ) -> Self {
        Self {
            source,
            generator,
            scheduler,
            surface,
            config,
            tasks: Vec::new(),
            fired: FiredKeySet::new(),
        }
    }

    /// Last task snapshot
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn fired(&self) -> &FiredKeySet {
        &self.fired
    }

    /// Tick forever.
    ///
    /// The first tick runs immediately at startup, not one interval later.
    pub async fn run(mut self) {
        let mut interval = tokio::time::interval(self.config.tick_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(
            "Deadline watcher started (interval: {:?}, near-deadline window: {} min)",
            self.config.tick_interval,
            self.config.near_deadline.num_minutes()
        );

        loop {
            interval.tick().await;
            let report = self.tick_at(Utc::now()).await;
            debug!(
                "Tick: {} tasks, {} near-deadline, {} missed, {} AI requests",
                self.tasks.len(),
                report.near_deadline,
                report.missed,
                report.ai_requests.len()
            );
        }
    }

    /// Evaluate every task once against `now`
    pub async fn tick_at(&mut self, now: DateTime<Utc>) -> TickReport {
        self.refresh().await;

        let mut report = TickReport::default();
        let window_minutes = self.config.near_deadline.num_minutes();

        for task in &self.tasks {
            if task.completed {
                continue;
            }
            let Some(deadline) = task.deadline_at() else {
                continue;
            };
            let diff = deadline - now;

            if diff > chrono::Duration::zero()
                && diff <= self.config.near_deadline
                && !self.fired.contains(&task.id, ReminderKind::NearDeadline)
            {
                self.surface.show(&format!(
                    "⏰ Only {window_minutes} minutes left for \"{}\"!",
                    task.title
                ));
                self.fired.record(&task.id, ReminderKind::NearDeadline);
                report.near_deadline += 1;
            }

            if diff < chrono::Duration::zero()
                && !self.fired.contains(&task.id, ReminderKind::Missed)
            {
                self.surface
                    .show(&format!("⚠️ You missed \"{}\"!", task.title));
                self.fired.record(&task.id, ReminderKind::Missed);
                report.missed += 1;
            }

            if !self.fired.contains(&task.id, ReminderKind::Ai) {
                report.ai_requests.push(self.spawn_ai_request(task));
                self.fired.record(&task.id, ReminderKind::Ai);
            }
        }

        report
    }

    async fn refresh(&mut self) {
        match tokio::time::timeout(self.config.refresh_timeout, self.source.get_all()).await {
            Ok(Ok(tasks)) => self.tasks = tasks,
            Ok(Err(e)) => warn!(
                "Failed to refresh tasks, keeping {} cached: {e:#}",
                self.tasks.len()
            ),
            Err(_) => warn!(
                "Task refresh timed out after {:?}, keeping {} cached",
                self.config.refresh_timeout,
                self.tasks.len()
            ),
        }
    }

    fn spawn_ai_request(&self, task: &Task) -> JoinHandle<()> {
        let generator = Arc::clone(&self.generator);
        let scheduler = Arc::clone(&self.scheduler);
        let title = task.title.clone();
        let deadline = task.deadline.clone();

        tokio::spawn(async move {
            let text = match generator
                .generate_reminders(&title, deadline.as_deref())
                .await
            {
                Ok(text) => text,
                Err(e) => {
                    warn!("AI reminder request failed for \"{title}\": {e:#}");
                    return;
                }
            };

            let reminders = reminders_from_text(&text);
            debug!("AI produced {} reminders for \"{title}\"", reminders.len());
            for reminder in &reminders {
                scheduler.schedule_for_task(&title, reminder);
            }
        })
    }
}
