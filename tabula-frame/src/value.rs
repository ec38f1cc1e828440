use std::fmt::{self, Display};

use arrow::{
    array::{Array, AsArray},
    datatypes::*,
    util::display::{ArrayFormatter, FormatOptions},
};
use ordered_float::OrderedFloat;

/// A single dynamically typed cell.
///
/// Floats are wrapped in [`OrderedFloat`] so values can be used as map keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::From)]
pub enum Value {
    #[from(ignore)]
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(OrderedFloat<f64>),
    String(String),
    Binary(Vec<u8>),
    List(Vec<Value>),
    Struct(Vec<(String, Value)>),
    /// Entries in stored order, duplicates included.
    Map(Vec<(Value, Value)>),
    /// Display form of a type without a dedicated variant.
    #[from(ignore)]
    Other(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Read the value at index `i` of `array`.
    pub fn from_array(array: &dyn Array, i: usize) -> crate::Result<Self> {
        if array.is_null(i) {
            return Ok(Value::Null);
        }

        macro_rules! primitive {
            ($variant:ident, $arrow:ty) => {
                Value::$variant(array.as_primitive::<$arrow>().value(i).into())
            };
        }

        Ok(match array.data_type() {
            DataType::Boolean => Value::Bool(array.as_boolean().value(i)),
            DataType::Int8 => primitive!(Int, Int8Type),
            DataType::Int16 => primitive!(Int, Int16Type),
            DataType::Int32 => primitive!(Int, Int32Type),
            DataType::Int64 => primitive!(Int, Int64Type),
            DataType::UInt8 => primitive!(UInt, UInt8Type),
            DataType::UInt16 => primitive!(UInt, UInt16Type),
            DataType::UInt32 => primitive!(UInt, UInt32Type),
            DataType::UInt64 => primitive!(UInt, UInt64Type),
            DataType::Float16 => {
                Value::Float(array.as_primitive::<Float16Type>().value(i).to_f64().into())
            }
            DataType::Float32 => {
                Value::Float(f64::from(array.as_primitive::<Float32Type>().value(i)).into())
            }
            DataType::Float64 => primitive!(Float, Float64Type),
            DataType::Utf8 => Value::String(array.as_string::<i32>().value(i).to_string()),
            DataType::LargeUtf8 => Value::String(array.as_string::<i64>().value(i).to_string()),
            DataType::Binary => Value::Binary(array.as_binary::<i32>().value(i).to_vec()),
            DataType::LargeBinary => Value::Binary(array.as_binary::<i64>().value(i).to_vec()),
            DataType::FixedSizeBinary(_) => {
                Value::Binary(array.as_fixed_size_binary().value(i).to_vec())
            }
            DataType::List(_) => list_values(array.as_list::<i32>().value(i).as_ref())?,
            DataType::LargeList(_) => list_values(array.as_list::<i64>().value(i).as_ref())?,
            DataType::FixedSizeList(_, _) => {
                list_values(array.as_fixed_size_list().value(i).as_ref())?
            }
            DataType::Struct(fields) => {
                let array = array.as_struct();
                let values = fields
                    .iter()
                    .zip(array.columns())
                    .map(|(field, column)| {
                        Ok((field.name().clone(), Value::from_array(column.as_ref(), i)?))
                    })
                    .collect::<crate::Result<Vec<_>>>()?;
                Value::Struct(values)
            }
            DataType::Map(_, _) => {
                let entries = array.as_map().value(i);
                let (keys, values) = (entries.column(0), entries.column(1));
                let pairs = (0..entries.len())
                    .map(|j| {
                        Ok((
                            Value::from_array(keys.as_ref(), j)?,
                            Value::from_array(values.as_ref(), j)?,
                        ))
                    })
                    .collect::<crate::Result<Vec<_>>>()?;
                Value::Map(pairs)
            }
            _ => {
                let formatter = ArrayFormatter::try_new(array, &FormatOptions::default())?;
                Value::Other(formatter.value(i).to_string())
            }
        })
    }
}

fn list_values(array: &dyn Array) -> crate::Result<Value> {
    (0..array.len())
        .map(|j| Value::from_array(array, j))
        .collect::<crate::Result<Vec<_>>>()
        .map(Value::List)
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(OrderedFloat(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("<NA>"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::UInt(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::String(v) | Value::Other(v) => f.write_str(v),
            Value::Binary(v) => {
                for byte in v {
                    write!(f, "{byte:02x}")?;
                }
                Ok(())
            }
            Value::List(values) => {
                f.write_str("[")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{value}")?;
                }
                f.write_str("]")
            }
            Value::Struct(fields) => {
                f.write_str("{")?;
                for (i, (name, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{name}: {value}")?;
                }
                f.write_str("}")
            }
            Value::Map(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use arrow::array::{
        ArrayRef, Date32Array, Int32Array, LargeStringArray, ListArray, StringArray, StructArray,
    };

    use super::*;

    #[test]
    fn test_scalars() {
        let ints = Int32Array::from(vec![Some(3), None]);
        assert_eq!(Value::from_array(&ints, 0).unwrap(), Value::Int(3));
        assert!(Value::from_array(&ints, 1).unwrap().is_null());

        let strings = LargeStringArray::from(vec!["a"]);
        assert_eq!(Value::from_array(&strings, 0).unwrap(), Value::from("a"));
    }

    #[test]
    fn test_nested() {
        let list = ListArray::from_iter_primitive::<Int32Type, _, _>(vec![Some(vec![
            Some(1),
            None,
        ])]);
        assert_eq!(
            Value::from_array(&list, 0).unwrap(),
            Value::List(vec![Value::Int(1), Value::Null])
        );

        let person = StructArray::from(vec![(
            Arc::new(Field::new("name", DataType::Utf8, true)),
            Arc::new(StringArray::from(vec!["Alice"])) as ArrayRef,
        )]);
        let value = Value::from_array(&person, 0).unwrap();
        assert_eq!(
            value,
            Value::Struct(vec![("name".to_string(), Value::from("Alice"))])
        );
        assert_eq!(value.to_string(), "{name: Alice}");
    }

    #[test]
    fn test_fallback_display() {
        let dates = Date32Array::from(vec![0]);
        assert_eq!(
            Value::from_array(&dates, 0).unwrap(),
            Value::Other("1970-01-01".to_string())
        );
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some(2.5)), Value::Float(OrderedFloat(2.5)));
    }
}
