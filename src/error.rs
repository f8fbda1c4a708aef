//! Error types for the yates library.
//!
//! All fallible operations return [`Result`], built on a single `thiserror`
//! enum with variants for table shape, column lookup, typing and
//! experimental-design validation.

use thiserror::Error;

use crate::table::ColumnType;

/// The main error type for the yates library.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // ============ Table Shape Errors ============
    /// A column (or row) does not have the length shared by the rest of the table.
    #[error("shape mismatch: column `{column}` has {actual} values, expected {expected}")]
    ShapeMismatch {
        /// Name of the offending column, or a row label for row-wise input.
        column: String,
        /// Length fixed by the first column (or the schema width).
        expected: usize,
        /// Length actually supplied.
        actual: usize,
    },

    /// Two columns share a name.
    #[error("duplicate column `{0}`")]
    DuplicateColumn(String),

    /// Index is out of bounds.
    #[error("index {index} is out of bounds for size {size}")]
    IndexOutOfBounds {
        /// The invalid index.
        index: usize,
        /// The number of valid positions.
        size: usize,
    },

    // ============ Column Access Errors ============
    /// No column with the given name exists.
    #[error("column `{0}` not found")]
    ColumnNotFound(String),

    /// A column or value has a different type than requested.
    #[error("type mismatch in column `{column}`: expected {expected}, got {actual}")]
    TypeMismatch {
        /// Name of the column.
        column: String,
        /// The type the caller asked for.
        expected: ColumnType,
        /// The type actually stored.
        actual: ColumnType,
    },

    // ============ Analysis Errors ============
    /// Invalid parameters.
    #[error("invalid parameters: {message}")]
    InvalidParams {
        /// Description of what is invalid.
        message: String,
    },

    /// Factor levels are not replicated evenly.
    #[error("unbalanced design: {message}")]
    UnbalancedDesign {
        /// Description of the imbalance.
        message: String,
    },
}

/// A specialized `Result` type for yates operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    /// Create a new `ShapeMismatch` error.
    #[must_use]
    pub fn shape_mismatch(column: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::ShapeMismatch {
            column: column.into(),
            expected,
            actual,
        }
    }

    /// Create a new `InvalidParams` error.
    #[must_use]
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::InvalidParams {
            message: message.into(),
        }
    }

    /// Create a new `UnbalancedDesign` error.
    #[must_use]
    pub fn unbalanced(message: impl Into<String>) -> Self {
        Self::UnbalancedDesign {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::shape_mismatch("Egg", 18, 17);
        assert!(err.to_string().contains("shape mismatch"));
        assert!(err.to_string().contains("`Egg`"));
        assert!(err.to_string().contains("17"));
        assert!(err.to_string().contains("18"));

        let err = Error::TypeMismatch {
            column: "Season".into(),
            expected: ColumnType::Float,
            actual: ColumnType::Str,
        };
        assert!(err.to_string().contains("expected float"));
        assert!(err.to_string().contains("got str"));

        let err = Error::ColumnNotFound("Humidity".into());
        assert_eq!(err.to_string(), "column `Humidity` not found");
    }

    #[test]
    fn test_error_equality() {
        let err1 = Error::shape_mismatch("Egg", 18, 17);
        let err2 = Error::shape_mismatch("Egg", 18, 17);
        let err3 = Error::shape_mismatch("Egg", 18, 19);

        assert_eq!(err1, err2);
        assert_ne!(err1, err3);
    }
}
