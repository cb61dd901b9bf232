//! Merges per-branch employee CSV exports into a single master dataset.

use std::process::ExitCode;

use etlrs::etl;

/// Folder with one CSV export per branch
const INPUT_DIR: &str = "./employee_data";
/// Destination for the cleaned master dataset
const OUTPUT_PATH: &str = "clean_employee_master.csv";

fn main() -> ExitCode {
    env_logger::init();

    match etl::merge_employee_files(INPUT_DIR, OUTPUT_PATH) {
        Ok(master) => {
            println!(
                "Employee master dataset saved! ({} rows, {} columns)",
                master.row_count(),
                master.column_count()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Merge failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
