use arrow::datatypes::DataType;

/// The nesting kinds recognized by the flattener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum NestedKind {
    Struct,
    /// Variable, large and fixed-size lists.
    List,
    Map,
}

impl NestedKind {
    pub fn of(dtype: &DataType) -> Option<Self> {
        match dtype {
            DataType::Struct(_) => Some(Self::Struct),
            DataType::List(_) | DataType::LargeList(_) | DataType::FixedSizeList(_, _) => {
                Some(Self::List)
            }
            DataType::Map(_, _) => Some(Self::Map),
            _ => None,
        }
    }

    pub fn is_nested(dtype: &DataType) -> bool {
        Self::of(dtype).is_some()
    }

    pub fn is_struct(dtype: &DataType) -> bool {
        Self::of(dtype) == Some(Self::Struct)
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use arrow::datatypes::{Field, Fields};

    use super::*;

    #[test]
    fn test_kinds() {
        let item = Arc::new(Field::new("item", DataType::Int64, true));
        let entries = Arc::new(Field::new(
            "entries",
            DataType::Struct(Fields::from(vec![
                Field::new("key", DataType::Utf8, false),
                Field::new("value", DataType::Int64, true),
            ])),
            false,
        ));

        assert_eq!(NestedKind::of(&DataType::Int64), None);
        assert_eq!(NestedKind::of(&DataType::Utf8), None);
        assert_eq!(
            NestedKind::of(&DataType::List(item.clone())),
            Some(NestedKind::List)
        );
        assert_eq!(
            NestedKind::of(&DataType::LargeList(item.clone())),
            Some(NestedKind::List)
        );
        assert_eq!(
            NestedKind::of(&DataType::FixedSizeList(item, 3)),
            Some(NestedKind::List)
        );
        assert_eq!(
            NestedKind::of(&DataType::Map(entries, false)),
            Some(NestedKind::Map)
        );
        assert!(NestedKind::is_struct(&DataType::Struct(Fields::empty())));
        assert!(!NestedKind::is_nested(&DataType::Boolean));
    }
}
