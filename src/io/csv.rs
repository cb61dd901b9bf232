use csv::{ReaderBuilder, Writer};
use std::fs::File;
use std::path::Path;

use crate::dataframe::DataFrame;
use crate::error::Result;
use crate::series::Series;

/// Read a DataFrame from a CSV file
pub fn read_csv<P: AsRef<Path>>(path: P, has_header: bool) -> Result<DataFrame> {
    let file = File::open(path.as_ref())?;

    // Set up the CSV reader
    let mut rdr = ReaderBuilder::new()
        .has_headers(has_header)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let named_headers: Vec<String> = if has_header {
        rdr.headers()?.iter().map(|h| h.to_string()).collect()
    } else {
        Vec::new()
    };

    let mut records = Vec::new();
    for result in rdr.records() {
        records.push(result?);
    }

    // If there is no header, use "column_0", "column_1", etc.
    let headers = if has_header {
        named_headers
    } else if let Some(first) = records.first() {
        (0..first.len()).map(|i| format!("column_{}", i)).collect()
    } else {
        // The file is empty
        return Ok(DataFrame::new());
    };

    // Collect data for each column; short rows pad with empty fields
    let mut columns: Vec<Vec<String>> = vec![Vec::with_capacity(records.len()); headers.len()];
    for record in &records {
        for (i, column) in columns.iter_mut().enumerate() {
            column.push(record.get(i).unwrap_or("").to_string());
        }
    }

    let mut df = DataFrame::new();
    for (header, fields) in headers.into_iter().zip(columns) {
        df.add_column(header.clone(), Series::from_strings(fields, Some(header)))?;
    }

    Ok(df)
}

/// Write a DataFrame to a CSV file
pub fn write_csv<P: AsRef<Path>>(df: &DataFrame, path: P) -> Result<()> {
    let file = File::create(path.as_ref())?;
    let mut wtr = Writer::from_writer(file);

    // Write the header row
    wtr.write_record(df.column_names())?;

    // Write each row of data; missing values render as empty fields
    for row in 0..df.row_count() {
        let mut record = Vec::with_capacity(df.column_count());
        for name in df.column_names() {
            record.push(df.value(name, row)?.to_string());
        }
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}
