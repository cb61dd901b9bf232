use etlrs::error::Error;
use etlrs::io::csv::{read_csv, write_csv};
use etlrs::io::sql::{execute_sql, read_sql, write_table};
use etlrs::{DataFrame, Series, Value, ValueKind};

#[test]
fn test_csv_round_trip() -> Result<(), Error> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("frame.csv");

    let mut df = DataFrame::new();
    df.add_column(
        "name".to_string(),
        Series::from_strings(
            vec!["Alice".to_string(), "Bob".to_string()],
            Some("name".to_string()),
        ),
    )?;
    df.add_column(
        "age".to_string(),
        Series::new(vec![Value::Int(30), Value::Null], Some("age".to_string())),
    )?;

    write_csv(&df, &path)?;
    let loaded = read_csv(&path, true)?;

    assert_eq!(loaded.column_names(), ["name", "age"]);
    assert_eq!(loaded.row_count(), 2);
    assert_eq!(loaded.value("name", 0)?, &Value::from("Alice"));
    assert_eq!(loaded.value("age", 0)?, &Value::Int(30));
    // A missing value writes as an empty field and reads back as missing
    assert_eq!(loaded.value("age", 1)?, &Value::Null);
    Ok(())
}

#[test]
fn test_read_csv_infers_column_kinds() -> Result<(), Error> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("typed.csv");
    std::fs::write(&path, "id,score,label\n1,4.5,foo\n2,5.5,bar\n")?;

    let df = read_csv(&path, true)?;
    assert_eq!(df.column("id")?.kind(), ValueKind::Int);
    assert_eq!(df.column("score")?.kind(), ValueKind::Float);
    assert_eq!(df.column("label")?.kind(), ValueKind::Str);
    Ok(())
}

#[test]
fn test_read_csv_pads_short_rows() -> Result<(), Error> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("short.csv");
    std::fs::write(&path, "a,b,c\n1,2,3\n4,5\n")?;

    let df = read_csv(&path, true)?;
    assert_eq!(df.row_count(), 2);
    assert_eq!(df.value("b", 1)?, &Value::Int(5));
    assert_eq!(df.value("c", 1)?, &Value::Null);
    Ok(())
}

#[test]
fn test_read_csv_without_header_names_columns() -> Result<(), Error> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("bare.csv");
    std::fs::write(&path, "1,2\n3,4\n")?;

    let df = read_csv(&path, false)?;
    assert_eq!(df.column_names(), ["column_0", "column_1"]);
    assert_eq!(df.row_count(), 2);
    assert_eq!(df.value("column_1", 1)?, &Value::Int(4));
    Ok(())
}

#[test]
fn test_sql_round_trip() -> Result<(), Error> {
    let dir = tempfile::tempdir()?;
    let db = dir.path().join("test.db");

    execute_sql(
        "CREATE TABLE movie (title TEXT, year INTEGER, score REAL)",
        &db,
    )?;
    let inserted = execute_sql("INSERT INTO movie VALUES ('Title', 2025, 9.5)", &db)?;
    assert_eq!(inserted, 1);

    let df = read_sql("SELECT * FROM movie", &db)?;
    assert_eq!(df.column_names(), ["title", "year", "score"]);
    assert_eq!(df.row_count(), 1);
    assert_eq!(df.value("title", 0)?, &Value::from("Title"));
    assert_eq!(df.value("year", 0)?, &Value::Int(2025));
    assert_eq!(df.value("score", 0)?, &Value::Float(9.5));
    Ok(())
}

#[test]
fn test_write_table_respects_if_exists() -> Result<(), Error> {
    let dir = tempfile::tempdir()?;
    let db = dir.path().join("test.db");

    let mut df = DataFrame::new();
    df.add_column(
        "title".to_string(),
        Series::new(vec![Value::from("Alien")], Some("title".to_string())),
    )?;
    df.add_column(
        "year".to_string(),
        Series::new(vec![Value::Int(1979)], Some("year".to_string())),
    )?;

    write_table(&df, "movie", &db, "fail")?;
    assert_eq!(read_sql("SELECT * FROM movie", &db)?.row_count(), 1);

    // A second write must respect the existing-table policy
    let result = write_table(&df, "movie", &db, "fail");
    assert!(matches!(result, Err(Error::OperationFailed(_))));

    write_table(&df, "movie", &db, "append")?;
    assert_eq!(read_sql("SELECT * FROM movie", &db)?.row_count(), 2);

    write_table(&df, "movie", &db, "replace")?;
    assert_eq!(read_sql("SELECT * FROM movie", &db)?.row_count(), 1);

    let result = write_table(&df, "movie", &db, "bogus");
    assert!(matches!(result, Err(Error::InvalidInput(_))));
    Ok(())
}

#[test]
fn test_write_table_preserves_missing_values() -> Result<(), Error> {
    let dir = tempfile::tempdir()?;
    let db = dir.path().join("test.db");

    let mut df = DataFrame::new();
    df.add_column(
        "score".to_string(),
        Series::new(
            vec![Value::Float(9.5), Value::Null],
            Some("score".to_string()),
        ),
    )?;

    write_table(&df, "ratings", &db, "fail")?;
    let loaded = read_sql("SELECT score FROM ratings", &db)?;
    assert_eq!(loaded.value("score", 0)?, &Value::Float(9.5));
    assert_eq!(loaded.value("score", 1)?, &Value::Null);
    Ok(())
}
