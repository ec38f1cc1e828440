use std::sync::Arc;

use tabula::{
    arrow::{
        array::{
            ArrayRef, AsArray, Int64Array, Int64Builder, ListArray, MapBuilder, StringArray,
            StringBuilder, StructArray,
        },
        datatypes::{DataType, Field, Int64Type},
    },
    frame::{Column, Value},
    table, DataFrame, FlattenConfig, Flattener, LevelFilter,
};

fn person() -> StructArray {
    StructArray::from(vec![
        (
            Arc::new(Field::new("name", DataType::Utf8, true)),
            Arc::new(StringArray::from(vec!["Alice", "Bob"])) as ArrayRef,
        ),
        (
            Arc::new(Field::new("age", DataType::Int64, true)),
            Arc::new(Int64Array::from(vec![30, 25])) as ArrayRef,
        ),
    ])
}

fn recursive() -> FlattenConfig {
    FlattenConfig::builder()
        .recursive(true)
        .composite_names(true)
        .build()
}

fn na_positions(df: &DataFrame) -> Vec<Vec<bool>> {
    df.columns()
        .iter()
        .map(|col| (0..col.len()).map(|i| col.is_null(i)).collect())
        .collect()
}

#[test]
fn flatten_person_table() -> anyhow::Result<()> {
    tabula::init_logging(LevelFilter::INFO);

    let list = ListArray::from_iter_primitive::<Int64Type, _, _>(vec![
        Some(vec![Some(1)]),
        Some(vec![Some(5)]),
    ]);
    let table = table!(
        id = Int64Array::from(vec![1, 2]),
        person = person(),
        simple_list = list,
    )?;

    let mut flattener = Flattener::with_table(table);
    let flat = flattener.flatten_all_columns(&recursive())?;

    assert_eq!(
        flat.column_names(),
        vec!["id", "person.name", "person.age", "simple_list"]
    );
    assert!(!flat.has_nested_columns());

    let names = flat.column("person.name")?.concat()?;
    assert_eq!(
        names.as_string::<i32>().iter().collect::<Vec<_>>(),
        vec![Some("Alice"), Some("Bob")]
    );
    let ages = flat.column("person.age")?.concat()?;
    assert_eq!(ages.as_primitive::<Int64Type>().values(), &[30, 25]);
    let list = flat.column("simple_list")?.concat()?;
    assert_eq!(list.as_primitive::<Int64Type>().values(), &[1, 5]);

    assert_eq!(flattener.table(), Some(&flat));
    Ok(())
}

#[test]
fn flatten_then_convert() -> anyhow::Result<()> {
    let mut builder = MapBuilder::new(None, StringBuilder::new(), Int64Builder::new());
    builder.keys().append_value("k");
    builder.values().append_value(1);
    builder.append(true)?;
    builder.keys().append_value("k");
    builder.values().append_null();
    builder.append(true)?;
    let table = table!(
        label = StringArray::from(vec![Some("a"), None]),
        tags = builder.finish(),
    )?;

    let df = tabula::flatten_to_dataframe(table.clone(), &recursive())?;
    assert_eq!(df.names(), vec!["label", "tags.keys", "tags.values"]);
    assert_eq!(**df.column("tags.values")?, Column::Int64(vec![Some(1), None]));
    assert!(df.is_na("label", 1)?);

    let direct = tabula::to_dataframe_safe(&table)?;
    assert_eq!(
        direct.column("tags")?.value(1),
        Value::Map(vec![(Value::from("k"), Value::Null)])
    );
    Ok(())
}

#[test]
fn parquet_round_trip_keeps_missing_values() -> anyhow::Result<()> {
    let list = ListArray::from_iter_primitive::<Int64Type, _, _>(vec![
        Some(vec![Some(1)]),
        Some(vec![None]),
        Some(vec![Some(5)]),
    ]);
    let table = table!(
        list_with_none = list,
        label = StringArray::from(vec![Some("x"), None, Some("z")]),
    )?;
    let flat = tabula::flatten_all(table, &recursive())?;
    let before = tabula::to_dataframe_safe(&flat)?;

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("flat.parquet");
    tabula::write_table(&flat, &path)?;
    let after = tabula::to_dataframe_safe(&tabula::read_table(&path)?)?;

    assert_eq!(after.nrows(), before.nrows());
    assert_eq!(na_positions(&after), na_positions(&before));
    assert_eq!(na_positions(&after)[0], vec![false, true, false]);
    assert_eq!(after, before);
    Ok(())
}

#[test]
fn unset_flattener_fails() {
    let mut flattener = Flattener::new();
    assert!(matches!(
        flattener.flatten_struct_columns(true),
        Err(tabula::Error::TableNotSet)
    ));
}

#[test]
fn full_flatten_is_idempotent() -> anyhow::Result<()> {
    let list = ListArray::from_iter_primitive::<Int64Type, _, _>(vec![
        Some(vec![Some(1)]),
        Some(vec![Some(5)]),
    ]);
    let table = table!(person = person(), simple_list = list)?;
    let once = tabula::flatten_all(table, &recursive())?;
    let twice = tabula::flatten_all(once.clone(), &recursive())?;
    assert_eq!(once, twice);
    assert!(twice.columns().iter().all(|c| !c.is_nested()));
    Ok(())
}
