//! Typed columns and cell values.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The element type stored by a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ColumnType {
    /// 64-bit signed integers.
    Int,
    /// Owned strings, typically categorical labels.
    Str,
    /// 64-bit floats, typically measurements.
    Float,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Int => "int",
            Self::Str => "str",
            Self::Float => "float",
        };
        f.write_str(name)
    }
}

/// A single cell.
///
/// Float cells compare equal when they are numerically equal or both NaN,
/// so a table holding NaN still equals its own row round trip and NaN is a
/// single factor level.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Value {
    /// Integer cell.
    Int(i64),
    /// String cell.
    Str(String),
    /// Float cell.
    Float(f64),
}

impl Value {
    /// The type of this cell.
    #[must_use]
    pub fn column_type(&self) -> ColumnType {
        match self {
            Self::Int(_) => ColumnType::Int,
            Self::Str(_) => ColumnType::Str,
            Self::Float(_) => ColumnType::Float,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => same_float(*a, *b),
            _ => false,
        }
    }
}

fn same_float(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Str(v) => f.write_str(v),
            Self::Float(v) => write!(f, "{v}"),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

/// The values of one column, stored contiguously by type.
///
/// Equality treats floats the way [`Value`] does.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ColumnData {
    /// Integer column.
    Int(Vec<i64>),
    /// String column.
    Str(Vec<String>),
    /// Float column.
    Float(Vec<f64>),
}

impl PartialEq for ColumnData {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(&x, &y)| same_float(x, y))
            }
            _ => false,
        }
    }
}

impl ColumnData {
    /// An empty column of the given type.
    #[must_use]
    pub fn empty(column_type: ColumnType) -> Self {
        match column_type {
            ColumnType::Int => Self::Int(Vec::new()),
            ColumnType::Str => Self::Str(Vec::new()),
            ColumnType::Float => Self::Float(Vec::new()),
        }
    }

    /// Number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Int(v) => v.len(),
            Self::Str(v) => v.len(),
            Self::Float(v) => v.len(),
        }
    }

    /// Whether the column holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The element type.
    #[must_use]
    pub fn column_type(&self) -> ColumnType {
        match self {
            Self::Int(_) => ColumnType::Int,
            Self::Str(_) => ColumnType::Str,
            Self::Float(_) => ColumnType::Float,
        }
    }

    /// Clone out the value at `idx`, or `None` past the end.
    #[must_use]
    pub fn get(&self, idx: usize) -> Option<Value> {
        match self {
            Self::Int(v) => v.get(idx).copied().map(Value::Int),
            Self::Str(v) => v.get(idx).cloned().map(Value::Str),
            Self::Float(v) => v.get(idx).copied().map(Value::Float),
        }
    }

    /// Append a value, handing it back if its type does not match.
    pub(crate) fn push(&mut self, value: Value) -> Result<(), Value> {
        match (self, value) {
            (Self::Int(v), Value::Int(x)) => v.push(x),
            (Self::Str(v), Value::Str(x)) => v.push(x),
            (Self::Float(v), Value::Float(x)) => v.push(x),
            (_, other) => return Err(other),
        }
        Ok(())
    }
}

/// A named column.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Column {
    name: String,
    data: ColumnData,
}

impl Column {
    /// Create a column from a name and its values.
    #[must_use]
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// Integer column.
    #[must_use]
    pub fn int(name: impl Into<String>, values: Vec<i64>) -> Self {
        Self::new(name, ColumnData::Int(values))
    }

    /// String column.
    #[must_use]
    pub fn str<S: Into<String>>(name: impl Into<String>, values: impl IntoIterator<Item = S>) -> Self {
        Self::new(
            name,
            ColumnData::Str(values.into_iter().map(Into::into).collect()),
        )
    }

    /// Float column.
    #[must_use]
    pub fn float(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self::new(name, ColumnData::Float(values))
    }

    /// The column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The column values.
    #[must_use]
    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    /// Number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the column holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The element type.
    #[must_use]
    pub fn column_type(&self) -> ColumnType {
        self.data.column_type()
    }
}
