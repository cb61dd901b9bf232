use std::path::Path;

use rusqlite::types::ValueRef;
use rusqlite::Connection;

use crate::dataframe::DataFrame;
use crate::error::{Error, Result};
use crate::series::Series;
use crate::value::Value;

/// Create a DataFrame from SQL query results
///
/// # Arguments
///
/// * `query` - SQL query to execute
/// * `db_path` - Path to the database file
pub fn read_sql<P: AsRef<Path>>(query: &str, db_path: P) -> Result<DataFrame> {
    let conn = Connection::open(db_path)?;
    query_to_dataframe(&conn, query)
}

/// Execute an SQL statement (without returning results)
///
/// Returns the number of affected rows.
pub fn execute_sql<P: AsRef<Path>>(sql: &str, db_path: P) -> Result<usize> {
    let conn = Connection::open(db_path)?;
    Ok(conn.execute(sql, [])?)
}

/// Write a DataFrame to a database table
///
/// `if_exists` controls the behavior for existing tables: "fail", "replace",
/// or "append".
pub fn write_table<P: AsRef<Path>>(
    df: &DataFrame,
    table_name: &str,
    db_path: P,
    if_exists: &str,
) -> Result<()> {
    let mut conn = Connection::open(db_path)?;

    let table_exists = conn
        .prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?
        .exists([table_name])?;

    if table_exists {
        match if_exists {
            "fail" => {
                return Err(Error::OperationFailed(format!(
                    "table '{}' already exists",
                    table_name
                )));
            }
            "replace" => {
                conn.execute(
                    &format!("DROP TABLE IF EXISTS {}", quote_identifier(table_name)),
                    [],
                )?;
                create_table_from_dataframe(&conn, table_name, df)?;
            }
            "append" => {}
            other => {
                return Err(Error::InvalidInput(format!(
                    "unknown if_exists value: {}",
                    other
                )));
            }
        }
    } else {
        create_table_from_dataframe(&conn, table_name, df)?;
    }

    insert_dataframe(&mut conn, table_name, df)
}

/// Run `query` on an open connection and collect the rows into a DataFrame
pub(crate) fn query_to_dataframe(conn: &Connection, query: &str) -> Result<DataFrame> {
    let mut stmt = conn.prepare(query)?;
    let column_names: Vec<String> = stmt
        .column_names()
        .iter()
        .map(|&name| name.to_string())
        .collect();

    let mut columns: Vec<Vec<Value>> = vec![Vec::new(); column_names.len()];
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        for (idx, column) in columns.iter_mut().enumerate() {
            column.push(decode_value(row.get_ref(idx)?));
        }
    }

    let mut df = DataFrame::new();
    for (name, values) in column_names.into_iter().zip(columns) {
        df.add_column(name.clone(), Series::new(values, Some(name)))?;
    }

    Ok(df)
}

/// Create a table whose columns mirror the frame's schema
pub(crate) fn create_table_from_dataframe(
    conn: &Connection,
    table_name: &str,
    df: &DataFrame,
) -> Result<()> {
    let mut columns = Vec::with_capacity(df.column_count());
    for (name, kind) in df.schema() {
        columns.push(format!("{} {}", quote_identifier(&name), kind.sql_type()));
    }

    let create_sql = format!(
        "CREATE TABLE {} ({})",
        quote_identifier(table_name),
        columns.join(", ")
    );
    conn.execute(&create_sql, [])?;

    Ok(())
}

/// Insert every row of the frame inside a single transaction
pub(crate) fn insert_dataframe(
    conn: &mut Connection,
    table_name: &str,
    df: &DataFrame,
) -> Result<()> {
    if df.row_count() == 0 {
        return Ok(());
    }

    let column_names = df.column_names();
    let columns = column_names
        .iter()
        .map(|name| quote_identifier(name))
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = (1..=column_names.len())
        .map(|i| format!("?{}", i))
        .collect::<Vec<_>>()
        .join(", ");
    let insert_sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote_identifier(table_name),
        columns,
        placeholders
    );

    let tx = conn.transaction()?;
    {
        let mut stmt = tx.prepare(&insert_sql)?;
        for row in 0..df.row_count() {
            let mut params = Vec::with_capacity(column_names.len());
            for name in column_names {
                params.push(encode_value(df.value(name, row)?));
            }
            stmt.execute(rusqlite::params_from_iter(params))?;
        }
    }
    tx.commit()?;

    Ok(())
}

/// Double-quote an identifier for use in generated SQL
pub(crate) fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn decode_value(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Int(i),
        ValueRef::Real(f) => Value::Float(f),
        ValueRef::Text(t) => Value::Str(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => Value::Str(String::from_utf8_lossy(b).into_owned()),
    }
}

fn encode_value(value: &Value) -> rusqlite::types::Value {
    match value {
        Value::Null => rusqlite::types::Value::Null,
        Value::Int(i) => rusqlite::types::Value::Integer(*i),
        Value::Float(f) => rusqlite::types::Value::Real(*f),
        Value::Str(s) => rusqlite::types::Value::Text(s.clone()),
    }
}
