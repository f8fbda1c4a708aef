//! Builder pattern for assembling observation tables.
//!
//! The builder collects named columns in order and defers all validation
//! to [`TableBuilder::build`], so a table can be described column by column
//! without intermediate error handling.
//!
//! # Example
//!
//! ```
//! use yates::TableBuilder;
//!
//! let table = TableBuilder::new()
//!     .int_column("Density", vec![6, 6, 12])
//!     .str_column("Season", ["Spring", "Summer", "Spring"])
//!     .float_column("Egg", vec![1.167, 4.0, 1.5])
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(table.nrows(), 3);
//! assert_eq!(table.column_names(), vec!["Density", "Season", "Egg"]);
//! ```

use tracing::debug;

use crate::error::Result;
use crate::table::{Column, Table};

/// Builder for [`Table`].
#[derive(Debug, Clone, Default)]
pub struct TableBuilder {
    columns: Vec<Column>,
}

impl TableBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a prepared column.
    #[must_use]
    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    /// Append an integer column.
    #[must_use]
    pub fn int_column(self, name: impl Into<String>, values: Vec<i64>) -> Self {
        self.column(Column::int(name, values))
    }

    /// Append a string column.
    #[must_use]
    pub fn str_column<S: Into<String>>(
        self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = S>,
    ) -> Self {
        self.column(Column::str(name, values))
    }

    /// Append a float column.
    #[must_use]
    pub fn float_column(self, name: impl Into<String>, values: Vec<f64>) -> Self {
        self.column(Column::float(name, values))
    }

    /// Build the table.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - column lengths differ ([`crate::Error::ShapeMismatch`])
    /// - two columns share a name ([`crate::Error::DuplicateColumn`])
    pub fn build(self) -> Result<Table> {
        debug!(columns = self.columns.len(), "building table");
        Table::from_columns(self.columns)
    }
}
