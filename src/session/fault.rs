//! Fault detection and retry handling for session operations.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use crate::error::{Error, Result};

/// Failures a node may accumulate before it is excluded.
const NODE_EXCLUSION_THRESHOLD: usize = 2;

/// Retry policy for failed operations
#[derive(Debug, Clone, Copy)]
pub enum RetryPolicy {
    /// No retry attempts
    None,
    /// Fixed interval between retry attempts
    Fixed {
        /// Maximum number of retry attempts
        max_retries: usize,
        /// Delay between retry attempts in milliseconds
        delay_ms: u64,
    },
    /// Exponential backoff between retry attempts
    Exponential {
        /// Maximum number of retry attempts
        max_retries: usize,
        /// Initial delay in milliseconds
        initial_delay_ms: u64,
        /// Maximum delay in milliseconds
        max_delay_ms: u64,
        /// Backoff factor
        backoff_factor: f64,
    },
}

impl RetryPolicy {
    /// Gets the maximum number of retries
    pub fn max_retries(&self) -> usize {
        match self {
            Self::None => 0,
            Self::Fixed { max_retries, .. } => *max_retries,
            Self::Exponential { max_retries, .. } => *max_retries,
        }
    }

    /// Gets the delay for a specific retry attempt
    pub fn delay_for_attempt(&self, attempt: usize) -> Duration {
        match self {
            Self::None => Duration::from_millis(0),
            Self::Fixed { delay_ms, .. } => Duration::from_millis(*delay_ms),
            Self::Exponential {
                initial_delay_ms,
                max_delay_ms,
                backoff_factor,
                ..
            } => {
                let delay = (*initial_delay_ms as f64 * backoff_factor.powi(attempt as i32)) as u64;
                Duration::from_millis(delay.min(*max_delay_ms))
            }
        }
    }
}

/// Type of operation failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureType {
    /// Communication error
    Network,
    /// A worker node went down
    Node,
    /// Operation took too long
    Timeout,
    /// Bad data, schema mismatch, or a failed query
    Data,
    /// Unknown error
    Unknown,
}

impl FailureType {
    /// Determines if the failure is retriable
    pub fn is_retriable(&self) -> bool {
        match self {
            Self::Network | Self::Node | Self::Timeout => true,
            Self::Data | Self::Unknown => false,
        }
    }

    /// Classifies an error
    pub fn from_error(error: &Error) -> Self {
        match error {
            Error::Io(_) => Self::Network,
            Error::Csv(_)
            | Error::Sql(_)
            | Error::QueryFailed(_)
            | Error::PathNotFound(_)
            | Error::EmptyData(_) => Self::Data,
            _ => Self::Unknown,
        }
    }
}

/// Information about an operation failure
#[derive(Debug, Clone)]
pub struct FailureInfo {
    /// Type of failure
    pub failure_type: FailureType,
    /// Time of failure
    pub failure_time: Instant,
    /// Node the failure is attributed to (if any)
    pub node_id: Option<String>,
    /// Specific error message
    pub error_message: String,
    /// Retry attempts made before this failure
    pub retry_attempts: usize,
}

impl FailureInfo {
    /// Creates a new failure info
    pub fn new(failure_type: FailureType, error_message: impl Into<String>) -> Self {
        Self {
            failure_type,
            failure_time: Instant::now(),
            node_id: None,
            error_message: error_message.into(),
            retry_attempts: 0,
        }
    }

    /// Attributes the failure to a node
    pub fn with_node_id(mut self, node_id: impl Into<String>) -> Self {
        self.node_id = Some(node_id.into());
        self
    }
}

/// Handler for fault detection and recovery.
///
/// Tracks recent failures and, when node exclusion is enabled, the failure
/// counts of nodes that failures were attributed to.
pub struct FaultToleranceHandler {
    retry_policy: RetryPolicy,
    exclude_failing_nodes: bool,
    recent_failures: RwLock<Vec<FailureInfo>>,
    node_failures: RwLock<HashMap<String, usize>>,
}

impl FaultToleranceHandler {
    /// Creates a new fault tolerance handler
    pub fn new(retry_policy: RetryPolicy, exclude_failing_nodes: bool) -> Self {
        Self {
            retry_policy,
            exclude_failing_nodes,
            recent_failures: RwLock::new(Vec::new()),
            node_failures: RwLock::new(HashMap::new()),
        }
    }

    /// Gets the retry policy
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry_policy
    }

    /// Executes an operation, retrying retriable failures up to the policy's
    /// limit
    pub fn execute_with_retry<F, T>(&self, mut operation: F) -> Result<T>
    where
        F: FnMut() -> Result<T>,
    {
        let mut attempt = 0;

        loop {
            match operation() {
                Ok(result) => return Ok(result),
                Err(error) => {
                    let failure_type = FailureType::from_error(&error);

                    let mut failure = FailureInfo::new(failure_type, error.to_string());
                    failure.retry_attempts = attempt;
                    self.record_failure(failure)?;

                    if !failure_type.is_retriable() || attempt >= self.retry_policy.max_retries() {
                        return Err(error);
                    }

                    attempt += 1;
                    log::info!(
                        "Retrying after {:?} failure (attempt {} of {})",
                        failure_type,
                        attempt,
                        self.retry_policy.max_retries()
                    );
                    std::thread::sleep(self.retry_policy.delay_for_attempt(attempt));
                }
            }
        }
    }

    /// Records a failure, updating node bookkeeping when the failure names a
    /// node
    pub fn record_failure(&self, failure: FailureInfo) -> Result<()> {
        if let Some(node_id) = &failure.node_id {
            match self.node_failures.write() {
                Ok(mut nodes) => {
                    *nodes.entry(node_id.clone()).or_insert(0) += 1;
                }
                Err(_) => {
                    return Err(Error::Session(
                        "failed to update node failure counts".to_string(),
                    ))
                }
            }
        }

        match self.recent_failures.write() {
            Ok(mut failures) => {
                failures.push(failure);
                Ok(())
            }
            Err(_) => Err(Error::Session("failed to record failure".to_string())),
        }
    }

    /// Gets recent failures
    pub fn recent_failures(&self) -> Result<Vec<FailureInfo>> {
        match self.recent_failures.read() {
            Ok(failures) => Ok(failures.clone()),
            Err(_) => Err(Error::Session(
                "failed to read recent failures".to_string(),
            )),
        }
    }

    /// Nodes currently excluded from further work.
    ///
    /// Always empty unless node exclusion is enabled.
    pub fn excluded_nodes(&self) -> Result<Vec<String>> {
        if !self.exclude_failing_nodes {
            return Ok(Vec::new());
        }

        match self.node_failures.read() {
            Ok(nodes) => Ok(nodes
                .iter()
                .filter(|(_, &count)| count >= NODE_EXCLUSION_THRESHOLD)
                .map(|(node, _)| node.clone())
                .collect()),
            Err(_) => Err(Error::Session(
                "failed to read node failure counts".to_string(),
            )),
        }
    }

    /// Whether a node has been excluded
    pub fn is_node_excluded(&self, node_id: &str) -> Result<bool> {
        Ok(self.excluded_nodes()?.iter().any(|n| n == node_id))
    }

    /// Clears all recorded failures
    pub fn clear_failures(&self) -> Result<()> {
        match (self.recent_failures.write(), self.node_failures.write()) {
            (Ok(mut failures), Ok(mut nodes)) => {
                failures.clear();
                nodes.clear();
                Ok(())
            }
            _ => Err(Error::Session("failed to clear failures".to_string())),
        }
    }
}
