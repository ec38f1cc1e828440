use arrow::{
    array::{Array, AsArray},
    datatypes::*,
};
use tabula_common::{ScalarType, Table};

use crate::{Column, ColumnType, DataFrame, MapValue, NamedColumn, Value};

/// Convert `table` into a dataframe without silent type coercion.
///
/// Scalar columns keep their width and signedness with nulls as `None`. Map rows become
/// insertion-ordered mappings where a repeated key keeps its first position and last value.
/// Every other type is read cell by cell into an object column.
pub fn to_dataframe_safe(table: &Table) -> crate::Result<DataFrame> {
    let columns = table
        .iter()
        .map(|(field, column)| {
            let array = column.concat()?;
            Ok(NamedColumn::new(
                field.name().clone(),
                convert_column(array.as_ref())?,
            ))
        })
        .collect::<crate::Result<Vec<_>>>()?;

    tracing::debug!(
        rows = table.num_rows(),
        columns = columns.len(),
        "converted table to dataframe"
    );
    DataFrame::try_new(table.num_rows(), columns)
}

/// Convert a single arrow array into a dataframe column.
pub fn convert_column(array: &dyn Array) -> crate::Result<Column> {
    Ok(match ColumnType::for_arrow(array.data_type()) {
        ColumnType::Scalar(dtype) => scalar_column(dtype, array),
        ColumnType::Map => map_column(array)?,
        ColumnType::Object => Column::Object(
            (0..array.len())
                .map(|i| Value::from_array(array, i))
                .collect::<crate::Result<Vec<_>>>()?,
        ),
    })
}

fn map_column(array: &dyn Array) -> crate::Result<Column> {
    let map = array.as_map();
    let (keys, values) = (map.keys(), map.values());
    let offsets = map.value_offsets();

    let rows = (0..map.len())
        .map(|i| {
            if map.is_null(i) {
                return Ok(None);
            }
            let (start, end) = (offsets[i] as usize, offsets[i + 1] as usize);
            let mut entries = MapValue::with_capacity(end - start);
            for j in start..end {
                entries.insert(
                    Value::from_array(keys.as_ref(), j)?,
                    Value::from_array(values.as_ref(), j)?,
                );
            }
            Ok(Some(entries))
        })
        .collect::<crate::Result<Vec<_>>>()?;
    Ok(Column::Map(rows))
}

macro_rules! impl_scalar_column {
    ($([$variant:ident $arrow_type:ty])+) => {
        fn scalar_column(dtype: ScalarType, array: &dyn Array) -> Column {
            match dtype {
                ScalarType::Bool => Column::Bool(array.as_boolean().iter().collect()),
                ScalarType::String => Column::String(
                    array
                        .as_string::<i32>()
                        .iter()
                        .map(|v| v.map(str::to_string))
                        .collect(),
                ),
                $(
                    ScalarType::$variant => {
                        Column::$variant(array.as_primitive::<$arrow_type>().iter().collect())
                    }
                )+
            }
        }
    };
}

impl_scalar_column!(
    [Int8    Int8Type]
    [Int16   Int16Type]
    [Int32   Int32Type]
    [Int64   Int64Type]
    [UInt8   UInt8Type]
    [UInt16  UInt16Type]
    [UInt32  UInt32Type]
    [UInt64  UInt64Type]
    [Float32 Float32Type]
    [Float64 Float64Type]
);
