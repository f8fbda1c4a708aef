//! # Yates
//!
//! Typed observation tables and factorial analysis for designed experiments.
//!
//! ## Overview
//!
//! A factorial experiment is recorded as parallel columns: one per factor
//! (the settings of each run) and one for the measured response. This
//! library provides:
//! - Pattern generators for laying out factor columns ([`utils`])
//! - An immutable, typed, column-named [`Table`] with strict shape checks
//! - A builder for assembling tables column by column ([`TableBuilder`])
//! - Built-in example data sets ([`catalogue`])
//! - Main effects and ANOVA for balanced factorial designs (`design`)
//!
//! ## Quick Start
//!
//! ```rust
//! use yates::utils::{repeat_each, tile};
//! use yates::TableBuilder;
//!
//! let table = TableBuilder::new()
//!     .int_column("Density", repeat_each(&[6, 12, 24], 6))
//!     .str_column("Season", repeat_each(&tile(&["Spring", "Summer"], 3), 3))
//!     .float_column("Egg", vec![1.0; 18])
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(table.nrows(), 18);
//! assert_eq!(table.column_names(), vec!["Density", "Season", "Egg"]);
//! ```
//!
//! Columns of different lengths are rejected rather than truncated:
//!
//! ```rust
//! use yates::{Error, TableBuilder};
//!
//! let err = TableBuilder::new()
//!     .int_column("Density", vec![6, 12, 24])
//!     .float_column("Egg", vec![1.167, 0.5])
//!     .build()
//!     .unwrap_err();
//!
//! assert!(matches!(err, Error::ShapeMismatch { .. }));
//! ```
//!
//! ## Features
//!
//! - `doe` (default): factorial analysis in the `design` module
//! - `serde`: Enable serialization/deserialization of tables and results

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)]

pub mod builder;
pub mod catalogue;
#[cfg(feature = "doe")]
pub mod design;
pub mod error;
pub mod table;
pub mod utils;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::builder::TableBuilder;
    pub use crate::catalogue::{
        build_from_parts, build_observation_table, get_by_name, observations, Observation,
    };
    pub use crate::error::{Error, Result};
    pub use crate::table::{Column, ColumnData, ColumnType, Table, Value};
    pub use crate::utils::{repeat_each, tile};

    #[cfg(feature = "doe")]
    pub use crate::design::{
        analyze, AnovaEntry, AnovaTable, ConfidenceInterval, FactorEffect, FactorialAnalysis,
        FactorialConfig,
    };
}

// Re-export commonly used items at crate root
pub use builder::TableBuilder;
pub use catalogue::{build_observation_table, get_by_name as get_dataset};
pub use error::{Error, Result};
pub use table::{Column, ColumnType, Table, Value};

#[cfg(feature = "doe")]
pub use design::analyze;
