//! Parquet persistence for tables.
//!
//! The flattening engine never touches files itself; these helpers are for callers that want to
//! store a flattened table and load it back.

use std::{fs::File, io::Write, path::Path};

use ::parquet::{
    arrow::{arrow_reader::ParquetRecordBatchReaderBuilder, ArrowWriter},
    basic::Compression,
    file::{properties::WriterProperties, reader::ChunkReader},
};
use arrow::{error::ArrowError, record_batch::RecordBatchReader};
use tabula_common::Table;

pub fn write_table(table: &Table, path: impl AsRef<Path>) -> crate::Result<()> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), rows = table.num_rows(), "writing parquet file");
    write_table_to(table, File::create(path)?)
}

/// Write `table` as a single row group.
pub fn write_table_to<W>(table: &Table, writer: W) -> crate::Result<()>
where
    W: Write + Send,
{
    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();
    let mut writer = ArrowWriter::try_new(writer, table.schema().clone(), Some(props))?;
    writer.write(&table.to_batch()?)?;
    writer.close()?;
    Ok(())
}

pub fn read_table(path: impl AsRef<Path>) -> crate::Result<Table> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "reading parquet file");
    read_table_from(File::open(path)?)
}

/// Read every row group of a parquet file into a table with one chunk per batch.
pub fn read_table_from<R>(reader: R) -> crate::Result<Table>
where
    R: ChunkReader + 'static,
{
    let reader = ParquetRecordBatchReaderBuilder::try_new(reader)?.build()?;
    let schema = reader.schema();
    let batches = reader.collect::<Result<Vec<_>, ArrowError>>()?;
    Table::from_batches(schema, batches)
}
