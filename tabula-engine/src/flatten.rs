mod map;

use std::time::Instant;

use indexmap::IndexMap;
use tabula_common::{composite_name, ChunkedArray, NestedKind, Table};

use crate::FlattenConfig;

/// Holds a table and replaces it with its flattened form on every call.
#[derive(Debug, Clone, Default)]
pub struct Flattener {
    table: Option<Table>,
}

impl Flattener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(table: Table) -> Self {
        Self { table: Some(table) }
    }

    pub fn set_table(&mut self, table: Table) {
        self.table = Some(table);
    }

    pub fn table(&self) -> Option<&Table> {
        self.table.as_ref()
    }

    pub fn into_table(self) -> Option<Table> {
        self.table
    }

    /// Flatten struct, list and map columns according to `config`.
    ///
    /// The result replaces the held table. See [`flatten_all`].
    pub fn flatten_all_columns(&mut self, config: &FlattenConfig) -> crate::Result<Table> {
        let table = flatten_all(self.current()?.clone(), config)?;
        self.table = Some(table.clone());
        Ok(table)
    }

    /// Expand top-level struct columns into `parent.child` columns.
    ///
    /// The result replaces the held table. See [`flatten_structs`].
    pub fn flatten_struct_columns(&mut self, recursive: bool) -> crate::Result<Table> {
        let table = flatten_structs(self.current()?.clone(), recursive)?;
        self.table = Some(table.clone());
        Ok(table)
    }

    fn current(&self) -> crate::Result<&Table> {
        self.table.as_ref().ok_or_else(|| {
            tracing::error!("no table set for flattening");
            crate::Error::TableNotSet
        })
    }
}

/// Flatten the nested columns of `table`.
///
/// Each pass rewrites every column in schema order:
/// - non-nested columns are copied unchanged;
/// - struct columns become one column per sub-field;
/// - list columns become a single column of the same name holding the elements of all rows;
/// - map columns become a `keys` and a `values` column.
///
/// A table without nested columns is returned unchanged. Unless `config.recursive()` is set only a
/// single pass runs, so nested children such as the structs of a list of structs may remain.
///
/// With `config.keep_nested_columns()` the kept columns stay nested, so recursion stops once a
/// pass produces no new columns.
pub fn flatten_all(mut table: Table, config: &FlattenConfig) -> crate::Result<Table> {
    while table.has_nested_columns() {
        tracing::info!(columns = table.num_columns(), "flattening table");
        let flattened = flatten_pass(&table, config)?;
        let settled = flattened.fields() == table.fields();
        table = flattened;
        if settled || !config.recursive() {
            break;
        }
    }
    Ok(table)
}

/// Expand the top-level struct columns of `table` using [`Table::flatten`].
///
/// Lists and maps are left as they are, as are any structs stored inside them.
pub fn flatten_structs(mut table: Table, recursive: bool) -> crate::Result<Table> {
    while table.has_struct_columns() {
        tracing::info!(
            columns = table.num_columns(),
            "flattening struct columns"
        );
        table = table.flatten()?;
        if !recursive {
            break;
        }
    }
    Ok(table)
}

fn flatten_pass(table: &Table, config: &FlattenConfig) -> crate::Result<Table> {
    let start = Instant::now();
    let columns = flattened_columns(table, config)?;
    let flattened = Table::from_columns(columns)?;
    tracing::info!(
        elapsed = ?start.elapsed(),
        bytes = flattened.nbytes(),
        "flattened table"
    );
    Ok(flattened)
}

/// Build the output columns of one pass.
///
/// Columns are keyed by name: a name produced twice keeps the position of its first occurrence
/// and the data of its last.
fn flattened_columns(
    table: &Table,
    config: &FlattenConfig,
) -> crate::Result<IndexMap<String, ChunkedArray>> {
    let mut columns = IndexMap::with_capacity(table.num_columns());

    for (field, column) in table.iter() {
        let kind = NestedKind::of(field.data_type());
        if kind.is_none() || config.keep_nested_columns() {
            columns.insert(field.name().clone(), column.clone());
        }

        match kind {
            Some(NestedKind::Struct) => {
                for (child, values) in column.struct_children()? {
                    let name = child_name(field.name(), child.name(), config.composite_names());
                    columns.insert(name, values);
                }
            }
            Some(NestedKind::List) => {
                columns.insert(field.name().clone(), column.list_flatten()?);
            }
            Some(NestedKind::Map) => {
                let (keys, values) = map::map_entries(column)?;
                let composite = config.composite_names();
                columns.insert(
                    child_name(field.name(), "keys", composite),
                    ChunkedArray::from(keys),
                );
                columns.insert(
                    child_name(field.name(), "values", composite),
                    ChunkedArray::from(values),
                );
            }
            None => {}
        }
    }
    Ok(columns)
}

fn child_name(parent: &str, child: &str, composite: bool) -> String {
    if composite {
        composite_name(parent, child)
    } else {
        child.to_string()
    }
}
