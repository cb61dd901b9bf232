//! Column-oriented tabular data.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::error::{Error, Result};
use crate::series::Series;
use crate::value::{Value, ValueKind};

/// DataFrame struct: column-oriented 2D data structure
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataFrame {
    columns: HashMap<String, Series>,
    column_order: Vec<String>,
    row_count: usize,
}

impl DataFrame {
    /// Create a new empty DataFrame
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the DataFrame contains a column with the given name
    pub fn contains_column(&self, column_name: &str) -> bool {
        self.columns.contains_key(column_name)
    }

    /// Get the number of rows in the DataFrame
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Get the number of columns in the DataFrame
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get column names in order
    pub fn column_names(&self) -> &[String] {
        &self.column_order
    }

    /// Add a column to the DataFrame
    pub fn add_column(&mut self, column_name: String, series: Series) -> Result<()> {
        if self.contains_column(&column_name) {
            return Err(Error::DuplicateColumnName(column_name));
        }

        let series_len = series.len();
        if !self.columns.is_empty() && series_len != self.row_count {
            return Err(Error::InconsistentRowCount {
                expected: self.row_count,
                found: series_len,
            });
        }

        self.columns.insert(column_name.clone(), series);
        self.column_order.push(column_name);

        if self.row_count == 0 {
            self.row_count = series_len;
        }

        Ok(())
    }

    /// Get a column, failing when absent
    pub fn column(&self, column_name: &str) -> Result<&Series> {
        self.columns
            .get(column_name)
            .ok_or_else(|| Error::ColumnNotFound(column_name.to_string()))
    }

    /// Get a column if present
    pub fn get_column(&self, column_name: &str) -> Option<&Series> {
        self.columns.get(column_name)
    }

    /// Replace the contents of an existing column
    pub fn replace_column(&mut self, column_name: &str, series: Series) -> Result<()> {
        if !self.contains_column(column_name) {
            return Err(Error::ColumnNotFound(column_name.to_string()));
        }
        if series.len() != self.row_count {
            return Err(Error::InconsistentRowCount {
                expected: self.row_count,
                found: series.len(),
            });
        }
        self.columns.insert(column_name.to_string(), series);
        Ok(())
    }

    /// Renames columns according to `mapping`; names without an entry are
    /// kept. Renaming two columns to the same target is an error.
    pub fn rename_columns(&mut self, mapping: &HashMap<String, String>) -> Result<()> {
        let new_order: Vec<String> = self
            .column_order
            .iter()
            .map(|name| mapping.get(name).cloned().unwrap_or_else(|| name.clone()))
            .collect();

        let mut seen = HashSet::new();
        for name in &new_order {
            if !seen.insert(name.clone()) {
                return Err(Error::DuplicateColumnName(name.clone()));
            }
        }

        let mut columns = HashMap::with_capacity(self.columns.len());
        for (old, new) in self.column_order.iter().zip(&new_order) {
            if let Some(series) = self.columns.remove(old) {
                columns.insert(new.clone(), series.with_name(new.clone()));
            }
        }
        self.columns = columns;
        self.column_order = new_order;
        Ok(())
    }

    /// Value at (column, row)
    pub fn value(&self, column_name: &str, row: usize) -> Result<&Value> {
        let series = self.column(column_name)?;
        series.get(row).ok_or(Error::IndexOutOfBounds {
            index: row,
            size: self.row_count,
        })
    }

    /// Schema as (name, kind) pairs in column order
    pub fn schema(&self) -> Vec<(String, ValueKind)> {
        self.column_order
            .iter()
            .filter_map(|name| self.columns.get(name).map(|s| (name.clone(), s.kind())))
            .collect()
    }

    /// Count of distinct non-null values in a column
    pub fn distinct_count(&self, column_name: &str) -> Result<usize> {
        Ok(self.column(column_name)?.distinct_count())
    }

    /// First `n` rows as a new frame
    pub fn head(&self, n: usize) -> DataFrame {
        let take = n.min(self.row_count);
        let mut columns = HashMap::with_capacity(self.columns.len());
        for (name, series) in &self.columns {
            let values = series.values()[..take].to_vec();
            columns.insert(name.clone(), Series::new(values, Some(name.clone())));
        }
        DataFrame {
            columns,
            column_order: self.column_order.clone(),
            row_count: take,
        }
    }

    /// Row-wise concatenation preserving input order.
    ///
    /// The output carries the union of columns in first-seen order; cells a
    /// frame does not have become missing values.
    pub fn concat(frames: &[DataFrame]) -> Result<DataFrame> {
        let mut order: Vec<String> = Vec::new();
        for frame in frames {
            for name in frame.column_names() {
                if !order.contains(name) {
                    order.push(name.clone());
                }
            }
        }

        let total_rows: usize = frames.iter().map(|f| f.row_count).sum();
        let mut columns = HashMap::with_capacity(order.len());
        for name in &order {
            let mut values = Vec::with_capacity(total_rows);
            for frame in frames {
                match frame.get_column(name) {
                    Some(series) => values.extend_from_slice(series.values()),
                    None => values.extend(std::iter::repeat(Value::Null).take(frame.row_count)),
                }
            }
            columns.insert(name.clone(), Series::new(values, Some(name.clone())));
        }

        Ok(DataFrame {
            columns,
            column_order: order,
            row_count: total_rows,
        })
    }
}

impl fmt::Display for DataFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.column_order.is_empty() {
            return write!(f, "Empty DataFrame");
        }

        let mut widths: Vec<usize> = self.column_order.iter().map(|n| n.len()).collect();
        let mut rows: Vec<Vec<String>> = Vec::with_capacity(self.row_count);
        for row in 0..self.row_count {
            let mut rendered = Vec::with_capacity(self.column_order.len());
            for (idx, name) in self.column_order.iter().enumerate() {
                let cell = self
                    .columns
                    .get(name)
                    .and_then(|s| s.get(row))
                    .map(|v| v.to_string())
                    .unwrap_or_default();
                widths[idx] = widths[idx].max(cell.len());
                rendered.push(cell);
            }
            rows.push(rendered);
        }

        for (idx, name) in self.column_order.iter().enumerate() {
            if idx > 0 {
                write!(f, "  ")?;
            }
            write!(f, "{:<width$}", name, width = widths[idx])?;
        }
        for rendered in rows {
            writeln!(f)?;
            for (idx, cell) in rendered.iter().enumerate() {
                if idx > 0 {
                    write!(f, "  ")?;
                }
                write!(f, "{:<width$}", cell, width = widths[idx])?;
            }
        }
        Ok(())
    }
}
