//! Input/output for tabular data.

pub mod csv;
pub mod sql;

pub use csv::{read_csv, write_csv};
pub use sql::{execute_sql, read_sql, write_table};
