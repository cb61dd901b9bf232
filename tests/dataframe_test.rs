use std::collections::HashMap;

use etlrs::error::Error;
use etlrs::{DataFrame, Series, Value, ValueKind};

fn series_of(values: Vec<Value>, name: &str) -> Series {
    Series::new(values, Some(name.to_string()))
}

#[test]
fn test_add_column_and_lookup() -> Result<(), Error> {
    let mut df = DataFrame::new();
    df.add_column(
        "id".to_string(),
        series_of(vec![Value::Int(1), Value::Int(2)], "id"),
    )?;
    df.add_column(
        "name".to_string(),
        series_of(vec![Value::from("a"), Value::from("b")], "name"),
    )?;

    assert_eq!(df.row_count(), 2);
    assert_eq!(df.column_count(), 2);
    assert_eq!(df.column_names(), ["id", "name"]);
    assert_eq!(df.value("name", 1)?, &Value::from("b"));
    Ok(())
}

#[test]
fn test_duplicate_column_is_rejected() {
    let mut df = DataFrame::new();
    df.add_column("id".to_string(), series_of(vec![Value::Int(1)], "id"))
        .unwrap();

    let result = df.add_column("id".to_string(), series_of(vec![Value::Int(2)], "id"));
    assert!(matches!(result, Err(Error::DuplicateColumnName(name)) if name == "id"));
}

#[test]
fn test_inconsistent_row_count_is_rejected() {
    let mut df = DataFrame::new();
    df.add_column("id".to_string(), series_of(vec![Value::Int(1)], "id"))
        .unwrap();

    let too_long = series_of(vec![Value::Int(1), Value::Int(2), Value::Int(3)], "extra");
    let result = df.add_column("extra".to_string(), too_long);
    assert!(matches!(
        result,
        Err(Error::InconsistentRowCount {
            expected: 1,
            found: 3
        })
    ));
}

#[test]
fn test_rename_columns() {
    let mut df = DataFrame::new();
    df.add_column("empID".to_string(), series_of(vec![Value::Int(7)], "empID"))
        .unwrap();
    df.add_column("dept".to_string(), series_of(vec![Value::from("IT")], "dept"))
        .unwrap();

    let mut mapping = HashMap::new();
    mapping.insert("empID".to_string(), "Employee_ID".to_string());
    df.rename_columns(&mapping).unwrap();

    assert_eq!(df.column_names(), ["Employee_ID", "dept"]);
    assert!(!df.contains_column("empID"));
    assert_eq!(df.column("Employee_ID").unwrap().name(), Some("Employee_ID"));
}

#[test]
fn test_rename_collision_is_rejected() {
    let mut df = DataFrame::new();
    df.add_column("id".to_string(), series_of(vec![Value::Int(1)], "id"))
        .unwrap();
    df.add_column("empID".to_string(), series_of(vec![Value::Int(2)], "empID"))
        .unwrap();

    let mut mapping = HashMap::new();
    mapping.insert("id".to_string(), "Employee_ID".to_string());
    mapping.insert("empID".to_string(), "Employee_ID".to_string());

    let result = df.rename_columns(&mapping);
    assert!(matches!(result, Err(Error::DuplicateColumnName(_))));
    // The frame is left untouched
    assert_eq!(df.column_names(), ["id", "empID"]);
}

#[test]
fn test_concat_unions_columns_in_first_seen_order() {
    let mut first = DataFrame::new();
    first
        .add_column(
            "a".to_string(),
            series_of(vec![Value::Int(1), Value::Int(2)], "a"),
        )
        .unwrap();
    first
        .add_column(
            "b".to_string(),
            series_of(vec![Value::from("x"), Value::from("y")], "b"),
        )
        .unwrap();

    let mut second = DataFrame::new();
    second
        .add_column("b".to_string(), series_of(vec![Value::from("z")], "b"))
        .unwrap();
    second
        .add_column("c".to_string(), series_of(vec![Value::Float(9.5)], "c"))
        .unwrap();

    let merged = DataFrame::concat(&[first, second]).unwrap();
    assert_eq!(merged.column_names(), ["a", "b", "c"]);
    assert_eq!(merged.row_count(), 3);

    // Rows keep input order; absent cells are missing
    assert_eq!(merged.value("b", 2).unwrap(), &Value::from("z"));
    assert_eq!(merged.value("a", 2).unwrap(), &Value::Null);
    assert_eq!(merged.value("c", 0).unwrap(), &Value::Null);
    assert_eq!(merged.value("c", 2).unwrap(), &Value::Float(9.5));
}

#[test]
fn test_head_limits_rows() {
    let mut df = DataFrame::new();
    df.add_column(
        "n".to_string(),
        series_of(vec![Value::Int(1), Value::Int(2), Value::Int(3)], "n"),
    )
    .unwrap();

    assert_eq!(df.head(2).row_count(), 2);
    assert_eq!(df.head(10).row_count(), 3);
    assert_eq!(df.head(2).value("n", 1).unwrap(), &Value::Int(2));
}

#[test]
fn test_distinct_count_skips_missing_values() {
    let mut df = DataFrame::new();
    df.add_column(
        "v".to_string(),
        series_of(
            vec![Value::Int(1), Value::Int(2), Value::Int(2), Value::Null],
            "v",
        ),
    )
    .unwrap();

    assert_eq!(df.distinct_count("v").unwrap(), 2);
    assert!(matches!(
        df.distinct_count("missing"),
        Err(Error::ColumnNotFound(_))
    ));
}

#[test]
fn test_value_out_of_bounds() {
    let mut df = DataFrame::new();
    df.add_column("a".to_string(), series_of(vec![Value::Int(1)], "a"))
        .unwrap();

    assert!(matches!(
        df.value("a", 99),
        Err(Error::IndexOutOfBounds { index: 99, size: 1 })
    ));
}

#[test]
fn test_schema_promotes_column_kinds() {
    let mut df = DataFrame::new();
    df.add_column(
        "ints".to_string(),
        series_of(vec![Value::Int(1), Value::Null], "ints"),
    )
    .unwrap();
    df.add_column(
        "mixed".to_string(),
        series_of(vec![Value::Int(1), Value::Float(2.5)], "mixed"),
    )
    .unwrap();
    df.add_column(
        "text".to_string(),
        series_of(vec![Value::Int(1), Value::from("x")], "text"),
    )
    .unwrap();

    let schema = df.schema();
    assert_eq!(schema[0], ("ints".to_string(), ValueKind::Int));
    assert_eq!(schema[1], ("mixed".to_string(), ValueKind::Float));
    assert_eq!(schema[2], ("text".to_string(), ValueKind::Str));
}
