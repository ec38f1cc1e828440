use std::{fmt, ops::Deref};

use arrow::datatypes::DataType;
use indexmap::IndexMap;
use tabula_common::ScalarType;

use crate::Value;

/// One converted map cell. Keys keep their first-seen position.
pub type MapValue = IndexMap<Value, Value>;

/// A fully materialized, nullable dataframe column.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Bool(Vec<Option<bool>>),
    Int8(Vec<Option<i8>>),
    Int16(Vec<Option<i16>>),
    Int32(Vec<Option<i32>>),
    Int64(Vec<Option<i64>>),
    UInt8(Vec<Option<u8>>),
    UInt16(Vec<Option<u16>>),
    UInt32(Vec<Option<u32>>),
    UInt64(Vec<Option<u64>>),
    Float32(Vec<Option<f32>>),
    Float64(Vec<Option<f64>>),
    String(Vec<Option<String>>),
    Map(Vec<Option<MapValue>>),
    /// Cells of any type outside the scalar mapping.
    Object(Vec<Value>),
}

/// The dataframe type an arrow column converts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Scalar(ScalarType),
    Map,
    Object,
}

impl ColumnType {
    pub fn for_arrow(dtype: &DataType) -> Self {
        match dtype {
            DataType::Map(_, _) => Self::Map,
            dtype => ScalarType::lookup(dtype).map_or(Self::Object, Self::Scalar),
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Scalar(t) => write!(f, "{t}"),
            ColumnType::Map => f.write_str("map"),
            ColumnType::Object => f.write_str("object"),
        }
    }
}

macro_rules! dispatch {
    ($column:expr, $values:ident => $body:expr) => {
        match $column {
            Column::Bool($values) => $body,
            Column::Int8($values) => $body,
            Column::Int16($values) => $body,
            Column::Int32($values) => $body,
            Column::Int64($values) => $body,
            Column::UInt8($values) => $body,
            Column::UInt16($values) => $body,
            Column::UInt32($values) => $body,
            Column::UInt64($values) => $body,
            Column::Float32($values) => $body,
            Column::Float64($values) => $body,
            Column::String($values) => $body,
            Column::Map($values) => $body,
            Column::Object($values) => $body,
        }
    };
}

impl Column {
    pub fn len(&self) -> usize {
        dispatch!(self, values => values.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn dtype(&self) -> ColumnType {
        use Column::*;

        let scalar = match self {
            Bool(_) => ScalarType::Bool,
            Int8(_) => ScalarType::Int8,
            Int16(_) => ScalarType::Int16,
            Int32(_) => ScalarType::Int32,
            Int64(_) => ScalarType::Int64,
            UInt8(_) => ScalarType::UInt8,
            UInt16(_) => ScalarType::UInt16,
            UInt32(_) => ScalarType::UInt32,
            UInt64(_) => ScalarType::UInt64,
            Float32(_) => ScalarType::Float32,
            Float64(_) => ScalarType::Float64,
            String(_) => ScalarType::String,
            Map(_) => return ColumnType::Map,
            Object(_) => return ColumnType::Object,
        };
        ColumnType::Scalar(scalar)
    }

    /// Whether row `i` holds a missing value.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of bounds.
    pub fn is_null(&self, i: usize) -> bool {
        match self {
            Column::Object(values) => values[i].is_null(),
            Column::Map(values) => values[i].is_none(),
            Column::Bool(values) => values[i].is_none(),
            Column::Int8(values) => values[i].is_none(),
            Column::Int16(values) => values[i].is_none(),
            Column::Int32(values) => values[i].is_none(),
            Column::Int64(values) => values[i].is_none(),
            Column::UInt8(values) => values[i].is_none(),
            Column::UInt16(values) => values[i].is_none(),
            Column::UInt32(values) => values[i].is_none(),
            Column::UInt64(values) => values[i].is_none(),
            Column::Float32(values) => values[i].is_none(),
            Column::Float64(values) => values[i].is_none(),
            Column::String(values) => values[i].is_none(),
        }
    }

    pub fn null_count(&self) -> usize {
        (0..self.len()).filter(|&i| self.is_null(i)).count()
    }

    /// Read row `i` as a dynamic value. Missing values become [`Value::Null`].
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of bounds.
    pub fn value(&self, i: usize) -> Value {
        match self {
            Column::Bool(values) => values[i].into(),
            Column::Int8(values) => values[i].map(i64::from).into(),
            Column::Int16(values) => values[i].map(i64::from).into(),
            Column::Int32(values) => values[i].map(i64::from).into(),
            Column::Int64(values) => values[i].into(),
            Column::UInt8(values) => values[i].map(u64::from).into(),
            Column::UInt16(values) => values[i].map(u64::from).into(),
            Column::UInt32(values) => values[i].map(u64::from).into(),
            Column::UInt64(values) => values[i].into(),
            Column::Float32(values) => values[i].map(f64::from).into(),
            Column::Float64(values) => values[i].into(),
            Column::String(values) => values[i].clone().into(),
            Column::Map(values) => values[i].as_ref().map_or(Value::Null, |entries| {
                Value::Map(
                    entries
                        .iter()
                        .map(|(k, v)| (k.clone(), v.clone()))
                        .collect(),
                )
            }),
            Column::Object(values) => values[i].clone(),
        }
    }
}

/// A column paired with its name.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedColumn {
    name: String,
    column: Column,
}

impl NamedColumn {
    pub fn new(name: impl Into<String>, column: Column) -> Self {
        Self {
            name: name.into(),
            column,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn into_inner(self) -> Column {
        self.column
    }
}

impl Deref for NamedColumn {
    type Target = Column;

    fn deref(&self) -> &Self::Target {
        &self.column
    }
}

impl From<(String, Column)> for NamedColumn {
    fn from((name, column): (String, Column)) -> Self {
        NamedColumn::new(name, column)
    }
}

impl From<NamedColumn> for (String, Column) {
    fn from(NamedColumn { name, column }: NamedColumn) -> Self {
        (name, column)
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use arrow::datatypes::Field;

    use super::*;

    #[test]
    fn test_column_types() {
        assert_eq!(
            ColumnType::for_arrow(&DataType::Int16),
            ColumnType::Scalar(ScalarType::Int16)
        );
        let entries = Field::new_struct(
            "entries",
            vec![
                Field::new("keys", DataType::Utf8, false),
                Field::new("values", DataType::Int64, true),
            ],
            false,
        );
        assert_eq!(
            ColumnType::for_arrow(&DataType::Map(Arc::new(entries), false)),
            ColumnType::Map
        );
        assert_eq!(
            ColumnType::for_arrow(&DataType::LargeUtf8),
            ColumnType::Object
        );
        assert_eq!(ColumnType::Scalar(ScalarType::Bool).to_string(), "bool");
        assert_eq!(ColumnType::Object.to_string(), "object");
    }

    #[test]
    fn test_nulls() {
        let column = Column::Float32(vec![Some(1.5), None]);
        assert_eq!(column.len(), 2);
        assert_eq!(column.null_count(), 1);
        assert!(column.is_null(1));
        assert_eq!(column.value(0), Value::from(1.5));
        assert_eq!(column.value(1), Value::Null);
        assert_eq!(column.dtype(), ColumnType::Scalar(ScalarType::Float32));
    }

    #[test]
    fn test_map_value() {
        let mut entries = MapValue::new();
        entries.insert(Value::from("a"), Value::Int(1));
        let column = Column::Map(vec![Some(entries), None]);
        assert_eq!(
            column.value(0),
            Value::Map(vec![(Value::from("a"), Value::Int(1))])
        );
        assert!(column.is_null(1));
        assert_eq!(column.dtype(), ColumnType::Map);
    }

    #[test]
    fn test_named_column() {
        let column = NamedColumn::new("id", Column::Int32(vec![Some(1), None]));
        let renamed = column.clone().with_name("key");
        assert_eq!(renamed.name(), "key");
        assert_eq!(renamed.null_count(), 1);
        assert_eq!(renamed.into_inner(), Column::Int32(vec![Some(1), None]));

        let (name, inner): (String, Column) = column.into();
        assert_eq!(name, "id");
        let column = NamedColumn::from((name, inner));
        assert_eq!(column.name(), "id");
        assert_eq!(column.value(0), Value::Int(1));
    }
}
