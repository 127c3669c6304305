//! Read-only task sources
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//!
//! The reminder core never writes tasks. It takes a fresh snapshot on every
//! watcher tick from either the task server's flat file or its HTTP API.

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::model::Task;

/// Snapshot provider for the current task list
#[async_trait]
pub trait TaskSource: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Task>>;
}

/// Reads the whole `tasks.json` file on every call
pub struct JsonFileTaskSource {
    path: PathBuf,
}

impl JsonFileTaskSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TaskSource for JsonFileTaskSource {
    async fn get_all(&self) -> Result<Vec<Task>> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Task file {} not found, treating as empty", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read task file {}", self.path.display()))
            }
        };

        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&raw)
            .with_context(|| format!("Malformed task file {}", self.path.display()))
    }
}

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Fetches `GET {base}/api/tasks` from the task server
pub struct HttpTaskSource {
    client: reqwest::Client,
    tasks_url: String,
}

impl HttpTaskSource {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
    }

    /// Every request, connect through body, must finish within `timeout`
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client for the task server")?;

        Ok(Self {
            client,
            tasks_url: format!("{}/api/tasks", base_url.trim_end_matches('/')),
        })
    }

    pub fn tasks_url(&self) -> &str {
        &self.tasks_url
    }
}

#[async_trait]
impl TaskSource for HttpTaskSource {
    async fn get_all(&self) -> Result<Vec<Task>> {
        let response = self
            .client
            .get(&self.tasks_url)
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", self.tasks_url))?
            .error_for_status()
            .with_context(|| format!("Task server rejected {}", self.tasks_url))?;

        response
            .json::<Vec<Task>>()
            .await
            .with_context(|| format!("Malformed task list from {}", self.tasks_url))
    }
}
