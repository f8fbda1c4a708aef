//! Catalogue of built-in example data sets.
//!
//! The egg production experiment records eggs laid per hen under three
//! housing densities across two seasons, with three replicate pens per
//! combination. It is a balanced 3 × 2 factorial with 18 observations.

use tracing::debug;

use crate::builder::TableBuilder;
use crate::error::{Error, Result};
use crate::table::Table;
use crate::utils::{repeat_each, tile};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Name of the density factor column.
pub const DENSITY: &str = "Density";
/// Name of the season factor column.
pub const SEASON: &str = "Season";
/// Name of the egg production response column.
pub const EGG: &str = "Egg";

/// Housing densities, in run order.
pub const DENSITY_LEVELS: [i64; 3] = [6, 12, 24];
/// Consecutive runs sharing one density.
pub const DENSITY_REPEAT: usize = 6;
/// Seasons, in run order.
pub const SEASON_CYCLE: [&str; 2] = ["Spring", "Summer"];
/// Times the season cycle is laid out, once per density.
pub const SEASON_TILE: usize = 3;
/// Replicate pens per density/season cell.
pub const SEASON_REPEAT: usize = 3;

/// Measured egg production, one value per run.
pub const EGG_PRODUCTION: [f64; 18] = [
    1.167, 0.5, 1.667, 4.0, 3.83, 3.83, //
    1.5, 0.833, 1.0, 3.33, 2.58, 2.75, //
    0.667, 0.667, 0.75, 2.54, 1.83, 1.63,
];

/// One row of the egg production table.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Observation {
    /// Hens per pen.
    pub density: i64,
    /// Season label.
    pub season: String,
    /// Eggs per hen.
    pub egg: f64,
}

/// Build the egg production table.
///
/// # Errors
///
/// Cannot fail with the built-in data; the `Result` carries the
/// [`Error::ShapeMismatch`] check of [`build_from_parts`].
///
/// # Example
///
/// ```
/// use yates::catalogue::build_observation_table;
///
/// let table = build_observation_table().unwrap();
/// assert_eq!(table.nrows(), 18);
/// assert_eq!(table.column_names(), vec!["Density", "Season", "Egg"]);
/// ```
pub fn build_observation_table() -> Result<Table> {
    let density = repeat_each(&DENSITY_LEVELS, DENSITY_REPEAT);
    let season = repeat_each(&tile(&SEASON_CYCLE, SEASON_TILE), SEASON_REPEAT);
    build_from_parts(density, season, EGG_PRODUCTION.to_vec())
}

/// Assemble a `[Density, Season, Egg]` table from three parallel vectors.
///
/// Rows pair the i-th element of each vector. No truncation or padding
/// is attempted.
///
/// # Errors
///
/// Returns [`Error::ShapeMismatch`] if the vectors differ in length.
pub fn build_from_parts<S: Into<String>>(
    density: Vec<i64>,
    season: impl IntoIterator<Item = S>,
    egg: Vec<f64>,
) -> Result<Table> {
    debug!(runs = density.len(), "assembling observation table");
    TableBuilder::new()
        .int_column(DENSITY, density)
        .str_column(SEASON, season)
        .float_column(EGG, egg)
        .build()
}

/// Read a `[Density, Season, Egg]` table back as typed observations.
///
/// # Errors
///
/// Returns an error if a column is missing or has the wrong type.
pub fn observations(table: &Table) -> Result<Vec<Observation>> {
    let density = table.int_column(DENSITY)?;
    let season = table.str_column(SEASON)?;
    let egg = table.float_column(EGG)?;

    Ok(density
        .iter()
        .zip(season)
        .zip(egg)
        .map(|((&density, season), &egg)| Observation {
            density,
            season: season.clone(),
            egg,
        })
        .collect())
}

/// Retrieve a built-in data set by name.
///
/// # Example
///
/// ```
/// use yates::catalogue::get_by_name;
///
/// let table = get_by_name("egg_production").unwrap();
/// assert_eq!(table.nrows(), 18);
/// ```
///
/// # Errors
///
/// Returns [`Error::InvalidParams`] for unknown names.
pub fn get_by_name(name: &str) -> Result<Table> {
    match name.to_lowercase().as_str() {
        "egg_production" | "eggs" => build_observation_table(),
        _ => Err(Error::invalid_params(format!("Unknown data set: {name}"))),
    }
}

/// List all built-in data sets.
#[must_use]
pub fn list_datasets() -> Vec<&'static str> {
    vec!["egg_production"]
}
