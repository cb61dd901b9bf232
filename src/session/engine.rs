//! Query execution engines.

use rusqlite::Connection;

use crate::dataframe::DataFrame;
use crate::error::{Error, Result};
use crate::io::sql;

/// Executes SQL over registered tabular views.
pub trait QueryEngine {
    /// Creates or replaces a named view backed by `df`
    fn register_view(&mut self, name: &str, df: &DataFrame) -> Result<()>;

    /// Runs a query and collects the result
    fn sql(&mut self, query: &str) -> Result<DataFrame>;
}

/// In-process engine backed by an in-memory embedded database.
pub struct SqliteEngine {
    conn: Connection,
}

impl SqliteEngine {
    /// Creates a new engine with an empty in-memory database
    pub fn new() -> Result<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }
}

impl QueryEngine for SqliteEngine {
    fn register_view(&mut self, name: &str, df: &DataFrame) -> Result<()> {
        // Replace-or-create semantics for repeated registrations
        self.conn
            .execute(
                &format!("DROP TABLE IF EXISTS {}", sql::quote_identifier(name)),
                [],
            )
            .map_err(|e| Error::QueryFailed(e.to_string()))?;
        sql::create_table_from_dataframe(&self.conn, name, df).map_err(classify)?;
        sql::insert_dataframe(&mut self.conn, name, df).map_err(classify)
    }

    fn sql(&mut self, query: &str) -> Result<DataFrame> {
        sql::query_to_dataframe(&self.conn, query).map_err(classify)
    }
}

/// Re-expresses engine-level failures as query failures at this boundary
fn classify(error: Error) -> Error {
    match error {
        Error::Sql(e) => Error::QueryFailed(e.to_string()),
        other => other,
    }
}
