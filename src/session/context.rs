//! Processing session context.

use std::io::ErrorKind;
use std::path::Path;

use crate::dataframe::DataFrame;
use crate::error::{Error, Result};
use crate::io;
use crate::session::checkpoint::{Checkpoint, CheckpointManager};
use crate::session::config::SessionConfig;
use crate::session::engine::{QueryEngine, SqliteEngine};
use crate::session::fault::{FaultToleranceHandler, RetryPolicy};

/// A handle to a processing session.
///
/// The session owns the query engine, the fault-tolerance settings, and any
/// checkpoint storage. Operations take the handle explicitly; there is no
/// ambient session state.
pub struct Session {
    config: SessionConfig,
    engine: Box<dyn QueryEngine>,
    fault_handler: FaultToleranceHandler,
    checkpoints: Option<CheckpointManager>,
    stopped: bool,
}

impl Session {
    /// Creates a new session from `config`.
    ///
    /// Construction fails when the engine or the checkpoint directory cannot
    /// be initialized.
    pub fn new(config: SessionConfig) -> Result<Self> {
        let engine = Box::new(SqliteEngine::new()?);

        // The configured tolerance counts attempts; retries are one fewer
        let retry_policy = RetryPolicy::Fixed {
            max_retries: config.max_task_failures().saturating_sub(1),
            delay_ms: 100,
        };
        let fault_handler =
            FaultToleranceHandler::new(retry_policy, config.exclude_failing_nodes());

        let checkpoints = match config.checkpoint_dir() {
            Some(dir) => Some(CheckpointManager::new(dir)?),
            None => None,
        };

        log::info!(
            "Session '{}' started (concurrency {}, task failure tolerance {})",
            config.app_name(),
            config.concurrency(),
            config.max_task_failures()
        );

        Ok(Self {
            config,
            engine,
            fault_handler,
            checkpoints,
            stopped: false,
        })
    }

    /// Loads a CSV dataset through the session.
    ///
    /// A stopped session and a missing path are reported as the narrower
    /// `SessionStopped` and `PathNotFound` conditions; anything else
    /// propagates unchanged. The wrapper itself never retries; retry policy
    /// belongs to the session's configured task-failure tolerance.
    pub fn read_csv<P: AsRef<Path>>(&self, path: P) -> Result<DataFrame> {
        self.ensure_active()?;
        match io::csv::read_csv(path.as_ref(), true) {
            Err(Error::Io(e)) if e.kind() == ErrorKind::NotFound => {
                Err(Error::PathNotFound(path.as_ref().to_path_buf()))
            }
            other => other,
        }
    }

    /// Creates or replaces a named view over `df` for ad-hoc querying
    pub fn register_view(&mut self, name: &str, df: &DataFrame) -> Result<()> {
        self.ensure_active()?;
        self.engine.register_view(name, df)
    }

    /// Executes a query against the registered views.
    ///
    /// Runs under the session's configured task-failure tolerance.
    pub fn sql(&mut self, query: &str) -> Result<DataFrame> {
        self.ensure_active()?;
        let engine = &mut self.engine;
        self.fault_handler.execute_with_retry(|| engine.sql(query))
    }

    /// Executes a query, reporting failure instead of propagating it.
    ///
    /// On failure the diagnostic is logged and no result is returned.
    pub fn run_query(&mut self, query: &str) -> Option<DataFrame> {
        match self.sql(query) {
            Ok(df) => Some(df),
            Err(e) => {
                log::error!("SQL error: {}", e);
                None
            }
        }
    }

    /// Materializes an eager snapshot of `df` in the checkpoint directory
    /// and returns the re-read frame
    pub fn checkpoint(&self, df: &DataFrame) -> Result<DataFrame> {
        self.ensure_active()?;
        match &self.checkpoints {
            Some(manager) => manager.create(df),
            None => Err(Error::Checkpoint(
                "no checkpoint directory configured".to_string(),
            )),
        }
    }

    /// Checkpoints materialized so far
    pub fn checkpoints(&self) -> Result<Vec<Checkpoint>> {
        match &self.checkpoints {
            Some(manager) => manager.list(),
            None => Ok(Vec::new()),
        }
    }

    /// Configuration backing this session
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Fault-tolerance bookkeeping for this session
    pub fn fault_handler(&self) -> &FaultToleranceHandler {
        &self.fault_handler
    }

    /// Whether the session has been stopped
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Stops the session and discards its checkpoints. Idempotent.
    pub fn stop(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;

        if let Some(manager) = &self.checkpoints {
            if let Err(e) = manager.clear() {
                log::debug!("Failed to discard checkpoints: {}", e);
            }
        }
        log::info!("Session '{}' stopped", self.config.app_name());
    }

    fn ensure_active(&self) -> Result<()> {
        if self.stopped {
            Err(Error::SessionStopped)
        } else {
            Ok(())
        }
    }
}

impl Drop for Session {
    /// Sessions release their resources on every exit path
    fn drop(&mut self) {
        self.stop();
    }
}
