pub mod error;
mod kind;
pub mod logging;
mod scalar_type;
pub mod table;

pub use arrow;
pub use error::{Error, Result};
pub use kind::NestedKind;
pub use scalar_type::ScalarType;
pub use table::{ChunkedArray, Table};

/// Separator placed between parent and child names when flattening with composite names.
pub const COMPOSITE_SEPARATOR: &str = ".";

/// Join a parent column name and a child name into a composite column name.
pub fn composite_name(parent: &str, child: &str) -> String {
    format!("{parent}{COMPOSITE_SEPARATOR}{child}")
}

/// Build a [`Table`] from `name = array` pairs.
///
/// Dotted names are kept verbatim, so `person.age = ...` creates a column named `person.age`.
/// Expands to a `Result<Table>`.
#[macro_export]
macro_rules! table {
    () => {
        Ok::<_, $crate::Error>($crate::Table::empty())
    };
    ($($($name:tt).+ = $col:expr),+ $(,)?) => {
        $crate::Table::from_columns([
            $((
                stringify!($($name).+),
                $crate::ChunkedArray::from(
                    std::sync::Arc::new($col) as $crate::arrow::array::ArrayRef
                ),
            )),+
        ])
    };
}
