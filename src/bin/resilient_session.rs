//! Demonstrates resilient error handling around a processing session:
//! session creation, classified read failures, safe aggregation,
//! checkpointing, view registration, and query execution.
//!
//! Exit codes: 0 success, 1 session-creation failure, 2 file not found,
//! 3 other read failure.

use std::process::ExitCode;

use etlrs::error::Error;
use etlrs::session::{Session, SessionConfig};
use etlrs::stats;

/// Dataset the demo loads; point this at a real export to see the happy path
const CUSTOMERS_PATH: &str = "./data/customers.csv";
/// Where checkpoint snapshots are materialized
const CHECKPOINT_DIR: &str = "/tmp/etlrs_checkpoints";

const CUSTOMER_QUERY: &str = "SELECT * FROM customers WHERE age > 30";
const BROKEN_QUERY: &str = "SELECT * FROM nonexistent_table";

fn main() -> ExitCode {
    env_logger::init();

    let config = SessionConfig::new()
        .with_app_name("Error Handling Demo")
        .with_max_task_failures(3)
        .with_exclude_failing_nodes(true)
        .with_checkpoint_dir(CHECKPOINT_DIR);

    let mut session = match Session::new(config) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Failed to create session: {}", e);
            return ExitCode::from(1);
        }
    };

    // Returning an ExitCode (rather than exiting the process directly) lets
    // the session drop on every path out of `run`, including failures
    let code = run(&mut session);
    session.stop();
    code
}

fn run(session: &mut Session) -> ExitCode {
    let df = match session.read_csv(CUSTOMERS_PATH) {
        Ok(df) => df,
        Err(e @ Error::PathNotFound(_)) => {
            eprintln!("File error: {}", e);
            return ExitCode::from(2);
        }
        Err(e) => {
            eprintln!("Error reading CSV: {}", e);
            return ExitCode::from(3);
        }
    };

    for (name, kind) in df.schema() {
        println!("{}: {}", name, kind);
    }
    println!("{}", df.head(5));

    let unique_customers = stats::safe_distinct_count(&df, "customer_id");
    println!("Unique customers count: {}", unique_customers);

    let checkpointed = match session.checkpoint(&df) {
        Ok(df) => df,
        Err(e) => {
            eprintln!("Checkpoint error: {}", e);
            return ExitCode::from(3);
        }
    };
    println!("Checkpointed DataFrame count: {}", checkpointed.row_count());

    if let Err(e) = session.register_view("customers", &df) {
        eprintln!("Error registering view: {}", e);
        return ExitCode::from(3);
    }

    if let Some(result) = session.run_query(CUSTOMER_QUERY) {
        println!("{}", result.head(5));
    }

    // A deliberately broken query: the runner reports the failure and
    // returns no result instead of aborting the script
    let _ = session.run_query(BROKEN_QUERY);

    ExitCode::SUCCESS
}
