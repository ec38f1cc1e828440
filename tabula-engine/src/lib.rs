pub mod config;
pub mod flatten;
pub mod parquet;

pub use config::{FlattenConfig, FlattenConfigBuilder};
pub use flatten::{flatten_all, flatten_structs, Flattener};
pub use tabula_common::{ChunkedArray, Error, Result, Table};
