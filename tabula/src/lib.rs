//! Flatten nested arrow tables and convert them to nullable dataframes.
//!
//! Nothing is logged until [`init_logging`] is called. It installs a stdout subscriber filtered by
//! the `TABULA_LOG` environment variable and only takes effect on its first call:
//!
//! ```no_run
//! tabula::init_logging(tabula::LevelFilter::INFO);
//! ```

pub mod frame {
    pub use tabula_frame::{
        convert_column, Column, ColumnType, DataFrame, MapValue, NamedColumn, Value,
    };
}

pub use tabula_common as common;
pub use tabula_common::{
    arrow, composite_name, logging::init_logging, table, ChunkedArray, Error, NestedKind, Result,
    ScalarType, Table, COMPOSITE_SEPARATOR,
};
pub use tabula_engine as engine;
pub use tabula_engine::{
    flatten_all, flatten_structs,
    parquet::{read_table, write_table},
    FlattenConfig, FlattenConfigBuilder, Flattener,
};
pub use tabula_frame::{to_dataframe_safe, DataFrame};
pub use tracing::level_filters::LevelFilter;

/// Flatten every nested column of `table` and convert the result to a dataframe.
pub fn flatten_to_dataframe(table: Table, config: &FlattenConfig) -> crate::Result<DataFrame> {
    let flat = flatten_all(table, config)?;
    tracing::debug!(columns = flat.num_columns(), "converting flattened table");
    to_dataframe_safe(&flat)
}
