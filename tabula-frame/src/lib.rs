mod column;
mod convert;
mod frame;
mod value;

pub use column::{Column, ColumnType, MapValue, NamedColumn};
pub use convert::{convert_column, to_dataframe_safe};
pub use frame::DataFrame;
pub use value::Value;

pub use tabula_common::{Error, Result};
