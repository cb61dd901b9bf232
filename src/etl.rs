//! Branch-file standardization and merge pipeline.
//!
//! Loads every branch CSV export, canonicalizes column names, repairs the
//! salary column, and concatenates the frames into one master dataset.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::dataframe::DataFrame;
use crate::error::{Error, Result};
use crate::io;
use crate::stats;
use crate::value::Value;

/// Canonical name of the employee identifier column
pub const EMPLOYEE_ID: &str = "Employee_ID";
/// Canonical name of the salary column
pub const SALARY: &str = "Salary";
/// Canonical name of the department column
pub const DEPARTMENT: &str = "Department";

/// The synonym-to-canonical rename map applied to every loaded frame
pub fn canonical_columns() -> HashMap<String, String> {
    let mut mapping = HashMap::new();
    mapping.insert("empID".to_string(), EMPLOYEE_ID.to_string());
    mapping.insert("id".to_string(), EMPLOYEE_ID.to_string());
    mapping.insert("sal".to_string(), SALARY.to_string());
    mapping.insert("salary".to_string(), SALARY.to_string());
    mapping.insert("dept".to_string(), DEPARTMENT.to_string());
    mapping
}

/// All CSV files directly inside `dir`, sorted by file name so discovery
/// order is deterministic
pub fn discover_csv_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir.as_ref())? {
        let path = entry?.path();
        let is_csv = path
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("csv"));
        if path.is_file() && is_csv {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Standardizes one branch frame: canonical column names, numeric salaries,
/// and per-frame median imputation of missing salaries.
pub fn standardize_branch_frame(mut df: DataFrame) -> Result<DataFrame> {
    df.rename_columns(&canonical_columns())?;

    let salaries = df.column(SALARY)?.to_numeric();
    let numeric = salaries.numeric_values();
    let repaired = if numeric.is_empty() {
        // Median undefined: leave the gaps in place rather than invent one
        log::warn!(
            "Column '{}' has no numeric values; missing salaries left unfilled",
            SALARY
        );
        salaries
    } else if salaries.null_count() > 0 {
        let median = stats::median(&numeric)?;
        salaries.fill_null(Value::Float(median))
    } else {
        salaries
    };
    df.replace_column(SALARY, repaired)?;

    Ok(df)
}

/// Merges every branch CSV in `input_dir` into a master dataset at
/// `output_path`, returning the merged frame.
///
/// Frames are concatenated in file-discovery order. Any read or parse
/// failure aborts the merge; a directory with no CSV files is an error.
pub fn merge_employee_files<P: AsRef<Path>, Q: AsRef<Path>>(
    input_dir: P,
    output_path: Q,
) -> Result<DataFrame> {
    let files = discover_csv_files(&input_dir)?;
    if files.is_empty() {
        return Err(Error::EmptyData(format!(
            "no CSV files found in {}",
            input_dir.as_ref().display()
        )));
    }

    let mut frames = Vec::with_capacity(files.len());
    for file in &files {
        log::info!("Loading branch file {}", file.display());
        let frame = io::csv::read_csv(file, true)?;
        frames.push(standardize_branch_frame(frame)?);
    }

    let master = DataFrame::concat(&frames)?;
    io::csv::write_csv(&master, output_path)?;
    Ok(master)
}
