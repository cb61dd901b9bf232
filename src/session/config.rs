//! Configuration for processing sessions.

use std::path::{Path, PathBuf};

/// Configuration for a processing session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Application name, used in log output
    app_name: String,
    /// How many times a failing task is attempted before the failure is fatal
    max_task_failures: usize,
    /// Whether nodes with repeated failures are excluded from further work
    exclude_failing_nodes: bool,
    /// Number of threads the engine may use
    concurrency: usize,
    /// Directory checkpoints are materialized into
    checkpoint_dir: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            app_name: "etlrs".to_string(),
            max_task_failures: 4,
            exclude_failing_nodes: false,
            concurrency: num_cpus::get(),
            checkpoint_dir: None,
        }
    }
}

impl SessionConfig {
    /// Creates a new configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the application name
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = app_name.into();
        self
    }

    /// Sets the task-failure tolerance
    pub fn with_max_task_failures(mut self, max_task_failures: usize) -> Self {
        self.max_task_failures = max_task_failures;
        self
    }

    /// Sets whether repeatedly failing nodes are excluded
    pub fn with_exclude_failing_nodes(mut self, exclude: bool) -> Self {
        self.exclude_failing_nodes = exclude;
        self
    }

    /// Sets the number of threads the engine may use
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Sets the directory checkpoints are materialized into
    pub fn with_checkpoint_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.checkpoint_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Gets the application name
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Gets the task-failure tolerance
    pub fn max_task_failures(&self) -> usize {
        self.max_task_failures
    }

    /// Gets whether repeatedly failing nodes are excluded
    pub fn exclude_failing_nodes(&self) -> bool {
        self.exclude_failing_nodes
    }

    /// Gets the concurrency level
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Gets the checkpoint directory, if configured
    pub fn checkpoint_dir(&self) -> Option<&Path> {
        self.checkpoint_dir.as_deref()
    }
}
