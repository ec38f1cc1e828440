use arrow::{datatypes::DataType, error::ArrowError};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("table must be set before flattening")]
    TableNotSet,
    #[error("unsupported arrow datatype {0}")]
    DataType(DataType),
    #[error("no column found for column name {0}")]
    ColumnLookup(String),
    #[error("column {name} has {actual} rows but the table has {expected} rows")]
    ColumnLength {
        name: String,
        expected: usize,
        actual: usize,
    },
    #[error("expected chunk of type {expected} but found {actual}")]
    ChunkType { expected: DataType, actual: DataType },
    #[error("row {index} is out of bounds for {rows} rows")]
    RowOutOfBounds { index: usize, rows: usize },
    #[error("schema has {fields} fields but {columns} columns were provided")]
    ColumnCount { fields: usize, columns: usize },
    #[error("I/O error")]
    Io(#[from] std::io::Error),
    #[error("arrow error")]
    Arrow(#[from] ArrowError),
    #[error("parquet error")]
    Parquet(#[from] parquet::errors::ParquetError),
}

impl Error {
    pub fn column_length(name: &str, expected: usize, actual: usize) -> Self {
        Self::ColumnLength {
            name: name.to_string(),
            expected,
            actual,
        }
    }

    pub fn chunk_type(expected: &DataType, actual: &DataType) -> Self {
        Self::ChunkType {
            expected: expected.clone(),
            actual: actual.clone(),
        }
    }
}
