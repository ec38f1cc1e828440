mod print;

use std::{fmt::Display, ops::Deref, sync::Arc};

use crate::{NamedColumn, Value};

/// A row-addressable collection of named, equal-length columns.
#[derive(Debug, Clone, PartialEq)]
pub struct DataFrame {
    rows: usize,
    columns: Arc<[NamedColumn]>,
}

impl DataFrame {
    /// Build a dataframe with `rows` rows.
    ///
    /// Every column must hold exactly `rows` values.
    pub fn try_new<I>(rows: usize, columns: I) -> crate::Result<Self>
    where
        I: IntoIterator<Item = NamedColumn>,
    {
        let columns: Arc<[NamedColumn]> = columns.into_iter().collect::<Vec<_>>().into();
        if let Some(col) = columns.iter().find(|c| c.len() != rows) {
            return Err(crate::Error::column_length(col.name(), rows, col.len()));
        }
        Ok(Self { rows, columns })
    }

    pub fn nrows(&self) -> usize {
        self.rows
    }

    pub fn ncols(&self) -> usize {
        self.columns.len()
    }

    pub fn names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name()).collect()
    }

    /// Look up the first column named `name`.
    pub fn column(&self, name: &str) -> crate::Result<&NamedColumn> {
        for col in self.columns.deref() {
            if name == col.name() {
                return Ok(col);
            }
        }
        Err(crate::Error::ColumnLookup(name.to_string()))
    }

    pub fn icol(&self, col: usize) -> &NamedColumn {
        &self.columns[col]
    }

    pub fn columns(&self) -> &[NamedColumn] {
        &self.columns
    }

    /// Read row `i` as one value per column.
    pub fn row(&self, i: usize) -> crate::Result<Vec<Value>> {
        self.check_row(i)?;
        Ok(self.columns.iter().map(|c| c.value(i)).collect())
    }

    pub fn rows(&self) -> impl Iterator<Item = Vec<Value>> + '_ {
        (0..self.rows).map(|i| self.columns.iter().map(|c| c.value(i)).collect())
    }

    /// Whether the cell at `row` of column `name` is missing.
    pub fn is_na(&self, name: &str, row: usize) -> crate::Result<bool> {
        let col = self.column(name)?;
        self.check_row(row)?;
        Ok(col.is_null(row))
    }

    pub fn pretty_print(&self) -> impl Display + '_ {
        print::print_frame(self)
    }

    fn check_row(&self, i: usize) -> crate::Result<()> {
        if i >= self.rows {
            return Err(crate::Error::RowOutOfBounds {
                index: i,
                rows: self.rows,
            });
        }
        Ok(())
    }
}

impl Default for DataFrame {
    fn default() -> Self {
        Self {
            rows: 0,
            columns: Arc::new([]),
        }
    }
}

impl FromIterator<NamedColumn> for DataFrame {
    fn from_iter<T: IntoIterator<Item = NamedColumn>>(iter: T) -> Self {
        let columns: Arc<[NamedColumn]> = iter.into_iter().collect::<Vec<_>>().into();
        let rows = columns.first().map_or(0, |c| c.len());
        Self { columns, rows }
    }
}
