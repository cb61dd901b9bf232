//! Minimal embedded-database read/write example.

use etlrs::error::Result;
use etlrs::io::sql::{execute_sql, read_sql};

/// Database file; created on first run
const DB_PATH: &str = "movies.db";

fn main() -> Result<()> {
    env_logger::init();

    execute_sql(
        "CREATE TABLE IF NOT EXISTS movie (title TEXT, year INTEGER, score REAL)",
        DB_PATH,
    )?;
    execute_sql("INSERT INTO movie VALUES ('Title', 2025, 9.5)", DB_PATH)?;

    let movies = read_sql("SELECT * FROM movie", DB_PATH)?;
    println!("{}", movies);

    Ok(())
}
