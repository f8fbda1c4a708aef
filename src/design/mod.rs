//! Factorial design analysis.
//!
//! This module analyses a balanced factorial experiment stored in a
//! [`Table`]:
//! - Main effects with level-mean confidence intervals
//! - ANOVA with optional two-factor interactions, F-ratios and p-values
//!
//! ## Quick Start
//!
//! ```rust
//! # #[cfg(feature = "doe")]
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use yates::catalogue::build_observation_table;
//! use yates::design::{analyze, FactorialConfig};
//!
//! let table = build_observation_table()?;
//! let result = analyze(&table, &["Density", "Season"], "Egg", &FactorialConfig::default())?;
//!
//! let season = result.anova.entry("Season").unwrap();
//! assert!(season.p_value.unwrap() < 0.001);
//! println!("Grand mean: {:.3}", result.grand_mean);
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "doe"))]
//! # fn main() {}
//! ```
//!
//! ## Balance
//!
//! Sums of squares are computed from group means, which partitions the
//! total variation exactly only when every level (and, with interactions,
//! every pair of levels) is replicated equally. Unbalanced tables are
//! rejected with [`Error::UnbalancedDesign`].

mod anova;
mod effects;
mod stats;
mod types;

pub use stats::{f_distribution_p_value, ln_gamma, regularized_incomplete_beta, t_value};
pub use types::{
    AnovaEntry, AnovaTable, ConfidenceInterval, FactorEffect, FactorialAnalysis, FactorialConfig,
};

use ndarray::Array2;
use std::collections::HashSet;
use tracing::{debug, instrument};

use crate::error::{Error, Result};
use crate::table::Table;

/// Run a factorial analysis of `response` against `factors`.
///
/// # Arguments
/// * `table` - Observations, one per row
/// * `factors` - Names of the factor columns (any column type)
/// * `response` - Name of a numeric response column
/// * `config` - Analysis configuration
///
/// # Errors
/// * [`Error::InvalidParams`] if no factors are given, a factor is listed
///   twice or is also the response, a factor has fewer than 2 levels, the
///   table has fewer than 2 rows, or the confidence level is outside (0, 1)
/// * [`Error::ColumnNotFound`] / [`Error::TypeMismatch`] for bad column names
///   or a non-numeric response
/// * [`Error::UnbalancedDesign`] if levels (or level pairs, with
///   interactions) are not replicated equally
#[instrument(level = "debug", skip(table, config), fields(rows = table.nrows()))]
pub fn analyze(
    table: &Table,
    factors: &[&str],
    response: &str,
    config: &FactorialConfig,
) -> Result<FactorialAnalysis> {
    validate_request(table, factors, response, config)?;

    let responses = table.numeric_column(response)?.to_vec();
    let (level_matrix, levels) = table.level_matrix(factors)?;
    let num_levels: Vec<usize> = levels.iter().map(Vec::len).collect();

    for (name, &n) in factors.iter().zip(&num_levels) {
        if n < 2 {
            return Err(Error::invalid_params(format!(
                "factor `{name}` needs at least 2 levels, found {n}"
            )));
        }
    }
    check_balance(&level_matrix, &num_levels, factors, config.include_interactions)?;

    let grand_mean = responses.iter().sum::<f64>() / responses.len() as f64;

    let mut effects =
        effects::calculate_main_effects(&level_matrix, &levels, factors, &responses, grand_mean);
    let anova = anova::calculate_anova(
        &level_matrix,
        &num_levels,
        factors,
        &responses,
        grand_mean,
        config.include_interactions,
    );
    effects::attach_confidence_intervals(
        &mut effects,
        anova.error_ms,
        anova.error_df,
        config.confidence_level,
    );

    debug!(
        grand_mean,
        error_df = anova.error_df,
        sources = anova.entries.len(),
        "factorial analysis complete"
    );

    Ok(FactorialAnalysis {
        response: response.to_owned(),
        observations: responses.len(),
        grand_mean,
        effects,
        anova,
    })
}

fn validate_request(
    table: &Table,
    factors: &[&str],
    response: &str,
    config: &FactorialConfig,
) -> Result<()> {
    if factors.is_empty() {
        return Err(Error::invalid_params("at least one factor is required"));
    }
    if table.nrows() < 2 {
        return Err(Error::invalid_params(format!(
            "analysis needs at least 2 observations, table has {}",
            table.nrows()
        )));
    }
    if !(config.confidence_level > 0.0 && config.confidence_level < 1.0) {
        return Err(Error::invalid_params(format!(
            "confidence level {} must lie in (0, 1)",
            config.confidence_level
        )));
    }

    let mut seen = HashSet::with_capacity(factors.len());
    for &name in factors {
        if name == response {
            return Err(Error::invalid_params(format!(
                "`{name}` cannot be both a factor and the response"
            )));
        }
        if !seen.insert(name) {
            return Err(Error::invalid_params(format!("factor `{name}` listed twice")));
        }
    }
    Ok(())
}

/// Require equal replication of every level, and of every level pair when
/// interactions are fitted.
fn check_balance(
    level_matrix: &Array2<u32>,
    num_levels: &[usize],
    factors: &[&str],
    pairwise: bool,
) -> Result<()> {
    fn all_equal(counts: &[usize]) -> bool {
        counts.windows(2).all(|w| w[0] == w[1])
    }

    for (j, &n) in num_levels.iter().enumerate() {
        let mut counts = vec![0usize; n];
        for &level in level_matrix.column(j) {
            counts[level as usize] += 1;
        }
        if !all_equal(&counts) {
            return Err(Error::unbalanced(format!(
                "levels of `{}` occur {:?} times",
                factors[j], counts
            )));
        }
    }

    if pairwise {
        for a in 0..num_levels.len() {
            for b in (a + 1)..num_levels.len() {
                let cells = num_levels[a].saturating_mul(num_levels[b]);
                if cells > level_matrix.nrows() {
                    return Err(Error::unbalanced(format!(
                        "`{}` × `{}` has {cells} cells but only {} observations",
                        factors[a],
                        factors[b],
                        level_matrix.nrows()
                    )));
                }
                let mut counts = vec![0usize; cells];
                for row in level_matrix.rows() {
                    counts[row[a] as usize * num_levels[b] + row[b] as usize] += 1;
                }
                if !all_equal(&counts) {
                    return Err(Error::unbalanced(format!(
                        "cells of `{}` × `{}` occur {:?} times",
                        factors[a], factors[b], counts
                    )));
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::{build_observation_table, DENSITY, EGG, SEASON};
    use crate::table::{Column, Value};
    use crate::TableBuilder;

    fn egg_analysis(config: &FactorialConfig) -> FactorialAnalysis {
        let table = build_observation_table().unwrap();
        analyze(&table, &[DENSITY, SEASON], EGG, config).unwrap()
    }

    #[test]
    fn test_egg_anova_table() {
        let result = egg_analysis(&FactorialConfig::default());
        let anova = &result.anova;

        assert_eq!(result.observations, 18);
        assert!((result.grand_mean - 1.948_388_9).abs() < 1e-6);
        assert_eq!(anova.total_df, 17);
        assert!((anova.total_ss - 24.557_998).abs() < 1e-5);

        let density = anova.entry("Density").unwrap();
        assert_eq!(density.degrees_of_freedom, 2);
        assert!((density.sum_of_squares - 4.001_910).abs() < 1e-5);
        assert!((density.f_ratio.unwrap() - 13.984).abs() < 1e-2);
        assert!(density.p_value.unwrap() < 0.001);

        let season = anova.entry("Season").unwrap();
        assert_eq!(season.degrees_of_freedom, 1);
        assert!((season.sum_of_squares - 17.148_320).abs() < 1e-5);
        assert!((season.f_ratio.unwrap() - 119.845).abs() < 1e-2);
        assert!(season.p_value.unwrap() < 1e-6);

        let interaction = anova.entry("Density:Season").unwrap();
        assert_eq!(interaction.degrees_of_freedom, 2);
        assert!((interaction.sum_of_squares - 1.690_723).abs() < 1e-5);
        let p = interaction.p_value.unwrap();
        assert!(p > 0.01 && p < 0.05, "interaction p = {p}");

        assert_eq!(anova.error_df, 12);
        assert!((anova.error_ss - 1.717_045).abs() < 1e-5);
    }

    #[test]
    fn test_egg_main_effects() {
        let result = egg_analysis(&FactorialConfig::default());

        let density = &result.effects[0];
        assert_eq!(density.levels, vec![Value::Int(6), Value::Int(12), Value::Int(24)]);
        assert_eq!(density.level_counts, vec![6, 6, 6]);
        assert!((density.level_means[0] - 2.499).abs() < 1e-9);
        assert!((density.level_means[2] - 1.347_333).abs() < 1e-6);

        let season = &result.effects[1];
        assert_eq!(season.levels, vec![Value::from("Spring"), Value::from("Summer")]);
        assert!((season.level_means[1] - 2.924_444).abs() < 1e-6);

        // season dominates
        assert_eq!(season.rank, 1);
        assert_eq!(density.rank, 2);

        let intervals = season.confidence_intervals.as_ref().unwrap();
        assert!(intervals[0].upper < intervals[1].lower);
        assert!(intervals[1].contains(season.level_means[1]));
    }

    #[test]
    fn test_egg_without_interactions() {
        let config = FactorialConfig {
            include_interactions: false,
            ..Default::default()
        };
        let result = egg_analysis(&config);

        assert_eq!(result.anova.entries.len(), 2);
        assert!(result.anova.entry("Density:Season").is_none());
        // interaction folds into error
        assert_eq!(result.anova.error_df, 14);
        assert!((result.anova.error_ss - (1.690_723 + 1.717_045)).abs() < 1e-5);
    }

    #[test]
    fn test_single_factor() {
        let result = analyze(
            &build_observation_table().unwrap(),
            &[SEASON],
            EGG,
            &FactorialConfig::default(),
        )
        .unwrap();
        assert_eq!(result.anova.entries.len(), 1);
        assert_eq!(result.anova.error_df, 16);
    }

    #[test]
    fn test_request_validation() {
        let table = build_observation_table().unwrap();
        let config = FactorialConfig::default();

        assert!(matches!(
            analyze(&table, &[], EGG, &config),
            Err(Error::InvalidParams { .. })
        ));
        assert!(matches!(
            analyze(&table, &[DENSITY, DENSITY], EGG, &config),
            Err(Error::InvalidParams { .. })
        ));
        assert!(matches!(
            analyze(&table, &[EGG], EGG, &config),
            Err(Error::InvalidParams { .. })
        ));
        assert_eq!(
            analyze(&table, &[DENSITY], "Weight", &config).unwrap_err(),
            Error::ColumnNotFound("Weight".into())
        );
        assert!(matches!(
            analyze(&table, &[DENSITY], SEASON, &config),
            Err(Error::TypeMismatch { .. })
        ));

        let bad_level = FactorialConfig {
            confidence_level: 1.5,
            ..Default::default()
        };
        assert!(analyze(&table, &[DENSITY], EGG, &bad_level).is_err());
    }

    #[test]
    fn test_single_level_factor() {
        let table = TableBuilder::new()
            .str_column("Season", ["Spring", "Spring", "Spring"])
            .float_column("Egg", vec![1.0, 2.0, 3.0])
            .build()
            .unwrap();
        let err = analyze(&table, &["Season"], "Egg", &FactorialConfig::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidParams { .. }));
    }

    #[test]
    fn test_unbalanced_rejected() {
        let table = Table::from_columns(vec![
            Column::int("Density", vec![6, 6, 6, 12]),
            Column::float("Egg", vec![1.0, 2.0, 3.0, 4.0]),
        ])
        .unwrap();
        let err = analyze(&table, &["Density"], "Egg", &FactorialConfig::default()).unwrap_err();
        assert!(matches!(err, Error::UnbalancedDesign { .. }));

        // balanced margins, unbalanced cells
        let table = TableBuilder::new()
            .int_column("A", vec![0, 0, 1, 1])
            .int_column("B", vec![0, 0, 1, 1])
            .float_column("Y", vec![1.0, 2.0, 3.0, 4.0])
            .build()
            .unwrap();
        let err = analyze(&table, &["A", "B"], "Y", &FactorialConfig::default()).unwrap_err();
        assert!(matches!(err, Error::UnbalancedDesign { .. }));

        let main_only = FactorialConfig {
            include_interactions: false,
            ..Default::default()
        };
        assert!(analyze(&table, &["A", "B"], "Y", &main_only).is_ok());
    }

    #[test]
    fn test_more_cells_than_observations() {
        // each factor balanced, but 3 × 3 cells cannot fit in 6 rows
        let table = TableBuilder::new()
            .int_column("A", vec![0, 1, 2, 0, 1, 2])
            .int_column("B", vec![0, 1, 2, 1, 2, 0])
            .float_column("Y", vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0])
            .build()
            .unwrap();
        let err = analyze(&table, &["A", "B"], "Y", &FactorialConfig::default()).unwrap_err();
        match err {
            Error::UnbalancedDesign { message } => {
                assert!(message.contains("9 cells"), "{message}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_integer_response() {
        let table = TableBuilder::new()
            .str_column("Feed", ["a", "b", "a", "b"])
            .int_column("Count", vec![3, 7, 5, 9])
            .build()
            .unwrap();
        let result = analyze(&table, &["Feed"], "Count", &FactorialConfig::default()).unwrap();
        assert!((result.grand_mean - 6.0).abs() < 1e-12);
        assert!((result.effects[0].range - 4.0).abs() < 1e-12);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_analysis_json_round_trip() {
        let result = egg_analysis(&FactorialConfig::default());
        let json = serde_json::to_string(&result).unwrap();
        let back: FactorialAnalysis = serde_json::from_str(&json).unwrap();

        assert_eq!(back.response, result.response);
        assert_eq!(back.observations, 18);
        assert!((back.grand_mean - result.grand_mean).abs() < 1e-12);
        assert_eq!(back.effects[0].levels, result.effects[0].levels);
        assert_eq!(back.anova.entries.len(), result.anova.entries.len());
        let season = back.anova.entry("Season").unwrap();
        assert!((season.sum_of_squares - 17.148_320).abs() < 1e-5);
        assert_eq!(back.anova.error_df, 12);
    }
}
