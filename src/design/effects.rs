//! Main effects for factorial analysis.
//!
//! Calculates the mean response at each factor level and ranks factors by
//! the spread of their level means.

use ndarray::Array2;

use super::stats::t_value;
use super::types::{ConfidenceInterval, FactorEffect};
use crate::table::Value;

/// Mean response per level of one column of the level matrix.
///
/// Returns `(counts, means)`; empty levels get the grand mean.
pub(crate) fn group_means(
    column: ndarray::ArrayView1<'_, u32>,
    num_levels: usize,
    responses: &[f64],
    grand_mean: f64,
) -> (Vec<usize>, Vec<f64>) {
    let mut sums = vec![0.0; num_levels];
    let mut counts = vec![0usize; num_levels];

    for (&level, &y) in column.iter().zip(responses) {
        sums[level as usize] += y;
        counts[level as usize] += 1;
    }

    let means = sums
        .iter()
        .zip(&counts)
        .map(|(&sum, &n)| if n > 0 { sum / n as f64 } else { grand_mean })
        .collect();

    (counts, means)
}

/// Calculate main effects for each factor.
///
/// # Arguments
/// * `level_matrix` - Level indices, shape (observations, factors)
/// * `levels` - Level labels per factor
/// * `factor_names` - Column names, one per factor
/// * `responses` - Response value per observation
/// * `grand_mean` - Mean of all responses
///
/// # Algorithm
/// For each factor:
/// 1. Group observations by level
/// 2. Level mean and effect (level_mean - grand_mean)
/// 3. Range = max(level_means) - min(level_means)
///
/// Factors are then ranked by range, descending.
pub fn calculate_main_effects(
    level_matrix: &Array2<u32>,
    levels: &[Vec<Value>],
    factor_names: &[&str],
    responses: &[f64],
    grand_mean: f64,
) -> Vec<FactorEffect> {
    let mut effects: Vec<FactorEffect> = factor_names
        .iter()
        .zip(levels)
        .enumerate()
        .map(|(j, (name, labels))| {
            let (level_counts, level_means) =
                group_means(level_matrix.column(j), labels.len(), responses, grand_mean);
            let level_effects = level_means.iter().map(|m| m - grand_mean).collect();

            let min = level_means.iter().copied().fold(f64::INFINITY, f64::min);
            let max = level_means.iter().copied().fold(f64::NEG_INFINITY, f64::max);

            FactorEffect {
                factor: (*name).to_owned(),
                levels: labels.clone(),
                level_counts,
                level_means,
                level_effects,
                range: max - min,
                rank: 0,
                confidence_intervals: None,
            }
        })
        .collect();

    let mut order: Vec<usize> = (0..effects.len()).collect();
    order.sort_by(|&a, &b| effects[b].range.total_cmp(&effects[a].range));
    for (rank, idx) in order.into_iter().enumerate() {
        effects[idx].rank = rank + 1;
    }

    effects
}

/// Attach `mean ± t * sqrt(MSE / n)` intervals to every level mean.
///
/// Leaves the effects untouched when the error term has no degrees of
/// freedom.
pub fn attach_confidence_intervals(
    effects: &mut [FactorEffect],
    error_ms: f64,
    error_df: usize,
    confidence_level: f64,
) {
    if error_df == 0 {
        return;
    }
    let t = t_value(confidence_level, error_df);

    for effect in effects {
        let intervals: Vec<ConfidenceInterval> = effect
            .level_means
            .iter()
            .zip(&effect.level_counts)
            .map(|(&mean, &n)| {
                let half_width = if n > 0 {
                    t * (error_ms / n as f64).sqrt()
                } else {
                    f64::INFINITY
                };
                ConfidenceInterval {
                    lower: mean - half_width,
                    upper: mean + half_width,
                    level: confidence_level,
                }
            })
            .collect();
        effect.confidence_intervals = Some(intervals);
    }
}
