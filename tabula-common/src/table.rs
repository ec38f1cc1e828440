mod chunked;

use std::sync::Arc;

use arrow::{
    array::ArrayRef,
    datatypes::{Field, FieldRef, Fields, Schema, SchemaRef},
    record_batch::{RecordBatch, RecordBatchOptions},
};
pub use chunked::{concat_arrays, concat_ranges, ChunkedArray};

use crate::{composite_name, NestedKind};

/// An ordered set of named columns of equal length.
#[derive(Debug, Clone)]
pub struct Table {
    schema: SchemaRef,
    columns: Vec<ChunkedArray>,
    rows: usize,
}

impl Table {
    pub fn try_new(schema: SchemaRef, columns: Vec<ChunkedArray>) -> crate::Result<Self> {
        if schema.fields().len() != columns.len() {
            return Err(crate::Error::ColumnCount {
                fields: schema.fields().len(),
                columns: columns.len(),
            });
        }
        let rows = columns.first().map_or(0, |c| c.len());
        for (field, column) in schema.fields().iter().zip(&columns) {
            if field.data_type() != column.data_type() {
                return Err(crate::Error::chunk_type(
                    field.data_type(),
                    column.data_type(),
                ));
            }
            if column.len() != rows {
                return Err(crate::Error::column_length(
                    field.name(),
                    rows,
                    column.len(),
                ));
            }
        }
        Ok(Self {
            schema,
            columns,
            rows,
        })
    }

    /// A table without columns or rows.
    pub fn empty() -> Self {
        Self {
            schema: Arc::new(Schema::empty()),
            columns: Vec::new(),
            rows: 0,
        }
    }

    /// Build a table from `(name, column)` pairs.
    ///
    /// Every field is nullable and takes its type from the column.
    pub fn from_columns<I, S, C>(columns: I) -> crate::Result<Self>
    where
        I: IntoIterator<Item = (S, C)>,
        S: Into<String>,
        C: Into<ChunkedArray>,
    {
        let (fields, columns): (Vec<_>, Vec<_>) = columns
            .into_iter()
            .map(|(name, column)| {
                let column = column.into();
                let field = Field::new(name, column.data_type().clone(), true);
                (field, column)
            })
            .unzip();
        Self::try_new(Arc::new(Schema::new(fields)), columns)
    }

    pub fn from_batch(batch: RecordBatch) -> Self {
        let rows = batch.num_rows();
        let schema = batch.schema();
        let columns = batch
            .columns()
            .iter()
            .map(|array| ChunkedArray::from(array.clone()))
            .collect();
        Self {
            schema,
            columns,
            rows,
        }
    }

    /// Build a table whose columns hold one chunk per batch.
    pub fn from_batches<I>(schema: SchemaRef, batches: I) -> crate::Result<Self>
    where
        I: IntoIterator<Item = RecordBatch>,
    {
        let mut chunks: Vec<Vec<ArrayRef>> = vec![Vec::new(); schema.fields().len()];
        let mut rows = 0;
        for batch in batches {
            if batch.num_columns() != chunks.len() {
                return Err(crate::Error::ColumnCount {
                    fields: chunks.len(),
                    columns: batch.num_columns(),
                });
            }
            rows += batch.num_rows();
            for (column, array) in chunks.iter_mut().zip(batch.columns()) {
                column.push(array.clone());
            }
        }

        let columns = schema
            .fields()
            .iter()
            .zip(chunks)
            .map(|(field, chunks)| ChunkedArray::try_new(field.data_type().clone(), chunks))
            .collect::<crate::Result<Vec<_>>>()?;
        let table = Self::try_new(schema, columns)?;
        // A schema without fields still carries the row count of its batches.
        Ok(Self { rows, ..table })
    }

    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    pub fn fields(&self) -> &Fields {
        self.schema.fields()
    }

    pub fn num_rows(&self) -> usize {
        self.rows
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Look up the first column named `name`.
    pub fn column(&self, name: &str) -> crate::Result<&ChunkedArray> {
        self.schema
            .fields()
            .iter()
            .position(|f| f.name() == name)
            .map(|i| &self.columns[i])
            .ok_or_else(|| crate::Error::ColumnLookup(name.to_string()))
    }

    pub fn column_at(&self, i: usize) -> &ChunkedArray {
        &self.columns[i]
    }

    pub fn columns(&self) -> &[ChunkedArray] {
        &self.columns
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldRef, &ChunkedArray)> + '_ {
        self.schema.fields().iter().zip(&self.columns)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.schema
            .fields()
            .iter()
            .map(|f| f.name().as_str())
            .collect()
    }

    /// Memory used by all columns of the table.
    pub fn nbytes(&self) -> usize {
        self.columns.iter().map(|c| c.nbytes()).sum()
    }

    pub fn has_nested_columns(&self) -> bool {
        self.fields()
            .iter()
            .any(|f| NestedKind::is_nested(f.data_type()))
    }

    pub fn has_struct_columns(&self) -> bool {
        self.fields()
            .iter()
            .any(|f| NestedKind::is_struct(f.data_type()))
    }

    /// Replace every top-level struct column with its children, named `parent.child`.
    ///
    /// Only one level is expanded. Lists and maps, including structs stored inside them, are
    /// left untouched.
    pub fn flatten(&self) -> crate::Result<Table> {
        let mut fields = Vec::with_capacity(self.columns.len());
        let mut columns = Vec::with_capacity(self.columns.len());

        for (field, column) in self.iter() {
            if NestedKind::is_struct(field.data_type()) {
                for (child, values) in column.struct_children()? {
                    let name = composite_name(field.name(), child.name());
                    let nullable = field.is_nullable() || child.is_nullable();
                    fields.push(Arc::new(
                        Field::new(name, child.data_type().clone(), nullable)
                            .with_metadata(child.metadata().clone()),
                    ));
                    columns.push(values);
                }
            } else {
                fields.push(field.clone());
                columns.push(column.clone());
            }
        }

        let schema = Schema::new_with_metadata(fields, self.schema.metadata().clone());
        let table = Self::try_new(Arc::new(schema), columns)?;
        Ok(Self {
            rows: self.rows,
            ..table
        })
    }

    /// Concatenate the chunks of every column into a single record batch.
    pub fn to_batch(&self) -> crate::Result<RecordBatch> {
        let arrays = self
            .columns
            .iter()
            .map(|c| c.concat())
            .collect::<crate::Result<Vec<_>>>()?;
        let options = RecordBatchOptions::new().with_row_count(Some(self.rows));
        Ok(RecordBatch::try_new_with_options(
            self.schema.clone(),
            arrays,
            &options,
        )?)
    }
}

impl From<RecordBatch> for Table {
    fn from(batch: RecordBatch) -> Self {
        Self::from_batch(batch)
    }
}

impl TryFrom<Table> for RecordBatch {
    type Error = crate::Error;

    fn try_from(table: Table) -> Result<Self, Self::Error> {
        table.to_batch()
    }
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows && self.schema == other.schema && self.columns == other.columns
    }
}
