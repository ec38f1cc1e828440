use arrow::datatypes::DataType;

/// Primitive column types that convert to a dedicated nullable column.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::FromRepr,
)]
#[repr(u8)]
#[strum(serialize_all = "snake_case")]
pub enum ScalarType {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    String,
}

impl ScalarType {
    pub fn to_arrow(&self) -> DataType {
        use ScalarType::*;

        match self {
            Bool => DataType::Boolean,
            Int8 => DataType::Int8,
            Int16 => DataType::Int16,
            Int32 => DataType::Int32,
            Int64 => DataType::Int64,
            UInt8 => DataType::UInt8,
            UInt16 => DataType::UInt16,
            UInt32 => DataType::UInt32,
            UInt64 => DataType::UInt64,
            Float32 => DataType::Float32,
            Float64 => DataType::Float64,
            String => DataType::Utf8,
        }
    }

    /// Look up the scalar type for `dtype`, returning `None` for any type outside the mapping.
    pub fn lookup(dtype: &DataType) -> Option<Self> {
        use DataType::*;

        Some(match dtype {
            Boolean => Self::Bool,
            Int8 => Self::Int8,
            Int16 => Self::Int16,
            Int32 => Self::Int32,
            Int64 => Self::Int64,
            UInt8 => Self::UInt8,
            UInt16 => Self::UInt16,
            UInt32 => Self::UInt32,
            UInt64 => Self::UInt64,
            Float32 => Self::Float32,
            Float64 => Self::Float64,
            Utf8 => Self::String,
            _ => return None,
        })
    }

    pub fn from_arrow(dtype: &DataType) -> crate::Result<Self> {
        Self::lookup(dtype).ok_or_else(|| crate::Error::DataType(dtype.clone()))
    }
}

#[cfg(test)]
mod test {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_arrow_mapping_is_closed() {
        assert_eq!(ScalarType::iter().count(), 12);
        for t in ScalarType::iter() {
            assert_eq!(ScalarType::from_arrow(&t.to_arrow()).unwrap(), t);
        }
    }

    #[test]
    fn test_unmapped_types() {
        assert_eq!(ScalarType::lookup(&DataType::LargeUtf8), None);
        assert_eq!(ScalarType::lookup(&DataType::Date32), None);
        assert!(matches!(
            ScalarType::from_arrow(&DataType::Float16),
            Err(crate::Error::DataType(DataType::Float16))
        ));
    }

    #[test]
    fn test_names() {
        assert_eq!(ScalarType::Bool.to_string(), "bool");
        assert_eq!("float64".parse::<ScalarType>().unwrap(), ScalarType::Float64);
    }
}
