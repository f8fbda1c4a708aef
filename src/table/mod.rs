//! Observation table core types and operations.
//!
//! This module provides the in-memory table that experiment data is
//! assembled into before analysis.
//!
//! ## Overview
//!
//! - [`Table`]: ordered rows over named, typed columns
//! - [`Column`], [`ColumnData`], [`Value`], [`ColumnType`]: the typed storage
//!
//! Every column of a table has the same length, and row order is
//! insertion order. A table is never mutated after construction.

mod column;
mod levels;

pub use column::{Column, ColumnData, ColumnType, Value};

use ndarray::Array1;
use std::collections::HashSet;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{Error, Result};

/// An immutable table of named, typed columns sharing one row count.
///
/// Deserialized tables go through [`Table::from_columns`], so they are
/// validated like any other.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "RawTable")
)]
pub struct Table {
    columns: Vec<Column>,
    nrows: usize,
}

/// Unvalidated wire form of a [`Table`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawTable {
    columns: Vec<Column>,
    nrows: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<RawTable> for Table {
    type Error = Error;

    fn try_from(raw: RawTable) -> Result<Self> {
        let table = Self::from_columns(raw.columns)?;
        if table.nrows != raw.nrows {
            return Err(Error::shape_mismatch("nrows", table.nrows, raw.nrows));
        }
        Ok(table)
    }
}

impl Table {
    /// Create a table from columns, validating names and lengths.
    ///
    /// The first column fixes the row count.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - two columns share a name ([`Error::DuplicateColumn`])
    /// - any column's length differs from the first ([`Error::ShapeMismatch`])
    ///
    /// # Example
    ///
    /// ```
    /// use yates::table::{Column, Table};
    ///
    /// let table = Table::from_columns(vec![
    ///     Column::int("Density", vec![6, 12]),
    ///     Column::float("Egg", vec![1.167, 1.5]),
    /// ])
    /// .unwrap();
    /// assert_eq!(table.nrows(), 2);
    ///
    /// let short = Table::from_columns(vec![
    ///     Column::int("Density", vec![6, 12]),
    ///     Column::float("Egg", vec![1.167]),
    /// ]);
    /// assert!(short.is_err());
    /// ```
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(columns.len());
        for col in &columns {
            if !seen.insert(col.name()) {
                return Err(Error::DuplicateColumn(col.name().to_owned()));
            }
        }

        let nrows = columns.first().map_or(0, Column::len);
        if let Some(bad) = columns.iter().find(|c| c.len() != nrows) {
            debug!(
                column = bad.name(),
                expected = nrows,
                actual = bad.len(),
                "rejecting table with ragged columns"
            );
            return Err(Error::shape_mismatch(bad.name(), nrows, bad.len()));
        }

        trace!(rows = nrows, columns = columns.len(), "table assembled");
        Ok(Self { columns, nrows })
    }

    /// Rebuild a table from a schema and a list of rows.
    ///
    /// This is the inverse of [`Table::schema`] plus [`Table::to_rows`].
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - a row's arity differs from the schema width ([`Error::ShapeMismatch`])
    /// - a value's type differs from its column's ([`Error::TypeMismatch`])
    /// - the schema repeats a name ([`Error::DuplicateColumn`])
    /// - rows are given for an empty schema ([`Error::InvalidParams`]), since
    ///   a table without columns cannot hold rows
    pub fn from_rows<S: AsRef<str>>(
        schema: &[(S, ColumnType)],
        rows: impl IntoIterator<Item = Vec<Value>>,
    ) -> Result<Self> {
        let mut data: Vec<ColumnData> = schema
            .iter()
            .map(|(_, ty)| ColumnData::empty(*ty))
            .collect();

        for (row_idx, row) in rows.into_iter().enumerate() {
            if schema.is_empty() {
                return Err(Error::invalid_params(format!(
                    "row {row_idx} given for a table with no columns"
                )));
            }
            if row.len() != schema.len() {
                return Err(Error::shape_mismatch(
                    format!("row {row_idx}"),
                    schema.len(),
                    row.len(),
                ));
            }
            for ((col, (name, ty)), value) in data.iter_mut().zip(schema).zip(row) {
                col.push(value).map_err(|v| Error::TypeMismatch {
                    column: name.as_ref().to_owned(),
                    expected: *ty,
                    actual: v.column_type(),
                })?;
            }
        }

        let columns = schema
            .iter()
            .zip(data)
            .map(|((name, _), d)| Column::new(name.as_ref(), d))
            .collect();
        Self::from_columns(columns)
    }

    /// Get the number of rows.
    #[must_use]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Get the number of columns.
    #[must_use]
    pub fn ncols(&self) -> usize {
        self.columns.len()
    }

    /// Whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nrows == 0
    }

    /// Get the columns in order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Get the column names in order.
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    /// Get the `(name, type)` pairs in column order.
    #[must_use]
    pub fn schema(&self) -> Vec<(String, ColumnType)> {
        self.columns
            .iter()
            .map(|c| (c.name().to_owned(), c.column_type()))
            .collect()
    }

    /// Look up a column by name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ColumnNotFound`] if no column has this name.
    pub fn column(&self, name: &str) -> Result<&Column> {
        self.columns
            .iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| Error::ColumnNotFound(name.to_owned()))
    }

    /// Borrow an integer column.
    ///
    /// # Errors
    ///
    /// Returns an error if the column is missing or not an integer column.
    pub fn int_column(&self, name: &str) -> Result<&[i64]> {
        match self.column(name)?.data() {
            ColumnData::Int(v) => Ok(v),
            other => Err(type_mismatch(name, ColumnType::Int, other)),
        }
    }

    /// Borrow a string column.
    ///
    /// # Errors
    ///
    /// Returns an error if the column is missing or not a string column.
    pub fn str_column(&self, name: &str) -> Result<&[String]> {
        match self.column(name)?.data() {
            ColumnData::Str(v) => Ok(v),
            other => Err(type_mismatch(name, ColumnType::Str, other)),
        }
    }

    /// Borrow a float column.
    ///
    /// # Errors
    ///
    /// Returns an error if the column is missing or not a float column.
    pub fn float_column(&self, name: &str) -> Result<&[f64]> {
        match self.column(name)?.data() {
            ColumnData::Float(v) => Ok(v),
            other => Err(type_mismatch(name, ColumnType::Float, other)),
        }
    }

    /// Copy a numeric (integer or float) column into an `f64` array.
    ///
    /// # Errors
    ///
    /// Returns an error if the column is missing or holds strings.
    pub fn numeric_column(&self, name: &str) -> Result<Array1<f64>> {
        match self.column(name)?.data() {
            ColumnData::Float(v) => Ok(Array1::from(v.clone())),
            ColumnData::Int(v) => Ok(v.iter().map(|&x| x as f64).collect()),
            other @ ColumnData::Str(_) => Err(type_mismatch(name, ColumnType::Float, other)),
        }
    }

    /// Get one row as owned values, in column order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `idx >= nrows()`.
    pub fn row(&self, idx: usize) -> Result<Vec<Value>> {
        if idx >= self.nrows {
            return Err(Error::IndexOutOfBounds {
                index: idx,
                size: self.nrows,
            });
        }
        Ok(self.row_unchecked(idx))
    }

    /// Iterate over rows in insertion order.
    pub fn rows(&self) -> impl Iterator<Item = Vec<Value>> + '_ {
        (0..self.nrows).map(move |idx| self.row_unchecked(idx))
    }

    /// Collect every row.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<Value>> {
        self.rows().collect()
    }

    fn row_unchecked(&self, idx: usize) -> Vec<Value> {
        self.columns
            .iter()
            .filter_map(|c| c.data().get(idx))
            .collect()
    }
}

fn type_mismatch(name: &str, expected: ColumnType, actual: &ColumnData) -> Error {
    Error::TypeMismatch {
        column: name.to_owned(),
        expected,
        actual: actual.column_type(),
    }
}

impl fmt::Display for Table {
    /// Renders an index column followed by right-aligned cells.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells: Vec<Vec<String>> = self
            .rows()
            .map(|row| row.iter().map(ToString::to_string).collect())
            .collect();

        let index_width = self.nrows.saturating_sub(1).to_string().len();
        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(j, c)| {
                cells
                    .iter()
                    .map(|row| row[j].len())
                    .chain(std::iter::once(c.name().len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        write!(f, "{:index_width$}", "")?;
        for (c, &w) in self.columns.iter().zip(&widths) {
            write!(f, "  {:>w$}", c.name())?;
        }
        writeln!(f)?;

        for (i, row) in cells.iter().enumerate() {
            write!(f, "{i:<index_width$}")?;
            for (cell, &w) in row.iter().zip(&widths) {
                write!(f, "  {cell:>w$}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
