//! Factor level encoding.
//!
//! Factor columns are turned into a matrix of level indices, the form the
//! design analysis works on. Levels are numbered in order of first
//! appearance, so `[6, 6, 12, 24]` encodes to `[0, 0, 1, 2]`.

use ndarray::Array2;

use super::{Table, Value};
use crate::error::{Error, Result};

impl Table {
    /// Encode factor columns as a `(rows, factors)` matrix of level indices.
    ///
    /// Returns the matrix and the level labels of each factor, where label
    /// `levels[j][i]` is the value encoded as `i` in column `j`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ColumnNotFound`] if any factor is missing.
    ///
    /// # Example
    ///
    /// ```
    /// use yates::table::{Column, Table, Value};
    ///
    /// let table = Table::from_columns(vec![
    ///     Column::int("Density", vec![6, 6, 12, 24]),
    /// ])
    /// .unwrap();
    /// let (matrix, levels) = table.level_matrix(&["Density"]).unwrap();
    /// assert_eq!(matrix.column(0).to_vec(), vec![0, 0, 1, 2]);
    /// assert_eq!(levels[0], vec![Value::Int(6), Value::Int(12), Value::Int(24)]);
    /// ```
    pub fn level_matrix(&self, factors: &[&str]) -> Result<(Array2<u32>, Vec<Vec<Value>>)> {
        let mut matrix = Array2::zeros((self.nrows(), factors.len()));
        let mut all_levels = Vec::with_capacity(factors.len());

        for (j, name) in factors.iter().enumerate() {
            let data = self.column(name)?.data();
            let mut levels: Vec<Value> = Vec::new();

            for row in 0..self.nrows() {
                let Some(value) = data.get(row) else {
                    return Err(Error::shape_mismatch(*name, self.nrows(), data.len()));
                };
                let idx = match levels.iter().position(|l| *l == value) {
                    Some(idx) => idx,
                    None => {
                        levels.push(value);
                        levels.len() - 1
                    }
                };
                matrix[[row, j]] = u32::try_from(idx)
                    .map_err(|_| Error::invalid_params(format!("too many levels in `{name}`")))?;
            }

            all_levels.push(levels);
        }

        Ok((matrix, all_levels))
    }
}
