//! Checkpoint materialization for fault recovery.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;

use crate::dataframe::DataFrame;
use crate::error::{Error, Result};
use crate::io;

/// A materialized dataset snapshot.
#[derive(Debug, Clone)]
pub struct Checkpoint {
    /// Identifier within the owning manager
    pub id: String,
    /// Snapshot location on stable storage
    pub path: PathBuf,
    /// Rows materialized
    pub row_count: usize,
    /// Creation time
    pub created_at: Instant,
}

/// Manages dataset snapshots in a checkpoint directory.
///
/// Snapshots bound recovery cost after a failure. They are never mutated and
/// are discarded when the owning session stops.
pub struct CheckpointManager {
    dir: PathBuf,
    state: Mutex<CheckpointState>,
}

#[derive(Default)]
struct CheckpointState {
    next_id: usize,
    checkpoints: Vec<Checkpoint>,
}

impl CheckpointManager {
    /// Creates a manager rooted at `dir`, creating the directory if needed
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self> {
        fs::create_dir_all(dir.as_ref())?;
        Ok(Self {
            dir: dir.as_ref().to_path_buf(),
            state: Mutex::new(CheckpointState::default()),
        })
    }

    /// The checkpoint directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Materializes `df` to a snapshot file and returns the re-read frame
    pub fn create(&self, df: &DataFrame) -> Result<DataFrame> {
        let path = {
            let mut state = self
                .state
                .lock()
                .map_err(|_| Error::Checkpoint("checkpoint registry is poisoned".to_string()))?;

            let id = format!("checkpoint-{}", state.next_id);
            state.next_id += 1;

            let path = self.dir.join(format!("{}.csv", id));
            io::csv::write_csv(df, &path)?;
            log::debug!("Materialized checkpoint {} at {}", id, path.display());

            state.checkpoints.push(Checkpoint {
                id,
                path: path.clone(),
                row_count: df.row_count(),
                created_at: Instant::now(),
            });
            path
        };

        // Eager: reading the snapshot back proves it is durable
        io::csv::read_csv(path, true)
    }

    /// Checkpoints created so far and not yet discarded
    pub fn list(&self) -> Result<Vec<Checkpoint>> {
        match self.state.lock() {
            Ok(state) => Ok(state.checkpoints.clone()),
            Err(_) => Err(Error::Checkpoint(
                "checkpoint registry is poisoned".to_string(),
            )),
        }
    }

    /// Removes every snapshot file and clears the registry
    pub fn clear(&self) -> Result<()> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| Error::Checkpoint("checkpoint registry is poisoned".to_string()))?;

        for checkpoint in state.checkpoints.drain(..) {
            if let Err(e) = fs::remove_file(&checkpoint.path) {
                log::debug!(
                    "Could not remove checkpoint {}: {}",
                    checkpoint.path.display(),
                    e
                );
            }
        }
        Ok(())
    }
}
