//! Resilient processing sessions.
//!
//! A session owns a query engine, fault-tolerance settings, and optional
//! checkpoint storage. It is explicit context: every operation that needs a
//! session takes a handle, and the handle releases its resources when
//! stopped or dropped.

mod checkpoint;
mod config;
mod context;
mod engine;
mod fault;

pub use checkpoint::{Checkpoint, CheckpointManager};
pub use config::SessionConfig;
pub use context::Session;
pub use engine::{QueryEngine, SqliteEngine};
pub use fault::{FailureInfo, FailureType, FaultToleranceHandler, RetryPolicy};
