//! Statistical helpers for tabular data.

use crate::dataframe::DataFrame;
use crate::error::{Error, Result};

/// Median of a numeric slice.
///
/// Fails on empty input; the caller decides what an undefined median means.
pub fn median(data: &[f64]) -> Result<f64> {
    if data.is_empty() {
        return Err(Error::EmptyData(
            "cannot compute the median of no values".to_string(),
        ));
    }

    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Ok(sorted[mid])
    } else {
        Ok((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}

/// Count of distinct non-null values in `column_name`, or zero with a logged
/// warning when the column is absent. Never fails.
pub fn safe_distinct_count(df: &DataFrame, column_name: &str) -> usize {
    match df.get_column(column_name) {
        Some(series) => series.distinct_count(),
        None => {
            log::warn!("Column '{}' not found. Returning count=0.", column_name);
            0
        }
    }
}
