//! ANOVA (Analysis of Variance) for balanced factorial designs.
//!
//! Partitions the total sum of squares into main effects, optional
//! two-factor interactions, and residual error, then tests each source
//! with an F-ratio.

use ndarray::{Array1, Array2};

use super::effects::group_means;
use super::stats::f_distribution_p_value;
use super::types::{AnovaEntry, AnovaTable};

/// Σ nⱼ(ȳⱼ - ȳ)² over the groups of one partition.
fn between_ss(counts: &[usize], means: &[f64], grand_mean: f64) -> f64 {
    counts
        .iter()
        .zip(means)
        .map(|(&n, &m)| n as f64 * (m - grand_mean).powi(2))
        .sum()
}

/// Calculate the ANOVA table.
///
/// # Arguments
/// * `level_matrix` - Level indices, shape (observations, factors)
/// * `num_levels` - Number of levels of each factor
/// * `factor_names` - Column names, one per factor
/// * `responses` - Response value per observation
/// * `grand_mean` - Mean of all responses
/// * `include_interactions` - Whether to fit every factor pair
///
/// # Algorithm
/// 1. Total SS = Σ(yᵢ - ȳ)², df = N - 1
/// 2. Main effect SS = Σ nⱼ(ȳⱼ - ȳ)², df = L - 1
/// 3. Interaction SS for A:B = SS(A×B cells) - SS_A - SS_B,
///    df = (L_A - 1)(L_B - 1)
/// 4. Error = Total - Σ sources; with replicates this is the within-cell
///    variation of a full two-factor model
/// 5. F = MS / MS_error and its upper-tail p-value
///
/// The decomposition assumes a balanced design.
pub fn calculate_anova(
    level_matrix: &Array2<u32>,
    num_levels: &[usize],
    factor_names: &[&str],
    responses: &[f64],
    grand_mean: f64,
    include_interactions: bool,
) -> AnovaTable {
    let total_ss: f64 = responses.iter().map(|y| (y - grand_mean).powi(2)).sum();
    let total_df = responses.len().saturating_sub(1);

    let mut entries: Vec<AnovaEntry> = Vec::new();
    let mut main_ss: Vec<f64> = Vec::with_capacity(num_levels.len());

    for (j, (&levels, name)) in num_levels.iter().zip(factor_names).enumerate() {
        let (counts, means) = group_means(level_matrix.column(j), levels, responses, grand_mean);
        let ss = between_ss(&counts, &means, grand_mean);
        main_ss.push(ss);
        entries.push(entry((*name).to_owned(), vec![j], ss, levels.saturating_sub(1)));
    }

    if include_interactions {
        for a in 0..num_levels.len() {
            for b in (a + 1)..num_levels.len() {
                let cells: Array1<u32> = level_matrix
                    .rows()
                    .into_iter()
                    .map(|row| row[a] * num_levels[b] as u32 + row[b])
                    .collect();
                let (counts, means) = group_means(
                    cells.view(),
                    num_levels[a] * num_levels[b],
                    responses,
                    grand_mean,
                );
                let cell_ss = between_ss(&counts, &means, grand_mean);
                let ss = (cell_ss - main_ss[a] - main_ss[b]).max(0.0);
                let df = num_levels[a].saturating_sub(1) * num_levels[b].saturating_sub(1);
                let source = format!("{}:{}", factor_names[a], factor_names[b]);
                entries.push(entry(source, vec![a, b], ss, df));
            }
        }
    }

    let model_ss: f64 = entries.iter().map(|e| e.sum_of_squares).sum();
    let model_df: usize = entries.iter().map(|e| e.degrees_of_freedom).sum();
    let error_ss = (total_ss - model_ss).max(0.0);
    let error_df = total_df.saturating_sub(model_df);
    let error_ms = if error_df > 0 {
        error_ss / error_df as f64
    } else {
        0.0
    };

    for e in &mut entries {
        if error_ms > 0.0 && e.degrees_of_freedom > 0 {
            let f_ratio = e.mean_square / error_ms;
            e.f_ratio = Some(f_ratio);
            e.p_value = Some(f_distribution_p_value(f_ratio, e.degrees_of_freedom, error_df));
        }
        e.contribution_percent = if total_ss > 0.0 {
            e.sum_of_squares / total_ss * 100.0
        } else {
            0.0
        };
    }

    AnovaTable {
        entries,
        error_ss,
        error_df,
        error_ms,
        total_ss,
        total_df,
    }
}

fn entry(source: String, factors: Vec<usize>, ss: f64, df: usize) -> AnovaEntry {
    AnovaEntry {
        source,
        factors,
        sum_of_squares: ss,
        degrees_of_freedom: df,
        mean_square: if df > 0 { ss / df as f64 } else { 0.0 },
        f_ratio: None,
        p_value: None,
        contribution_percent: 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_anova_main_effects_only() {
        let matrix: Array2<u32> = array![[0, 0], [0, 1], [1, 0], [1, 1]];
        let responses = vec![10.0, 20.0, 30.0, 40.0];

        let anova = calculate_anova(&matrix, &[2, 2], &["A", "B"], &responses, 25.0, false);

        assert_eq!(anova.entries.len(), 2);
        assert_eq!(anova.total_df, 3);
        // 225 + 25 + 25 + 225
        assert!((anova.total_ss - 500.0).abs() < 1e-10);
        // A: 4 * 10², B: 4 * 5²
        assert!((anova.entries[0].sum_of_squares - 400.0).abs() < 1e-10);
        assert!((anova.entries[1].sum_of_squares - 100.0).abs() < 1e-10);
        // purely additive data leaves no error
        assert_eq!(anova.error_df, 1);
        assert!(anova.error_ss.abs() < 1e-10);
        assert!(anova.entries[0].f_ratio.is_none());
    }

    #[test]
    fn test_anova_interaction_with_replicates() {
        // 2 × 2 cells, 2 replicates, pure interaction pattern
        let matrix: Array2<u32> = array![
            [0, 0],
            [0, 0],
            [0, 1],
            [0, 1],
            [1, 0],
            [1, 0],
            [1, 1],
            [1, 1],
        ];
        let responses = vec![11.0, 9.0, 1.0, -1.0, 1.0, -1.0, 11.0, 9.0];
        let grand_mean = 5.0;

        let anova = calculate_anova(&matrix, &[2, 2], &["A", "B"], &responses, grand_mean, true);

        assert_eq!(anova.entries.len(), 3);
        let ab = anova.entry("A:B").unwrap();
        assert_eq!(ab.factors, vec![0, 1]);
        assert_eq!(ab.degrees_of_freedom, 1);
        // cell means 10, 0, 0, 10 around 5
        assert!((ab.sum_of_squares - 200.0).abs() < 1e-10);
        assert!(anova.entry("A").unwrap().sum_of_squares.abs() < 1e-10);

        // within-cell: 8 × 1²
        assert_eq!(anova.error_df, 4);
        assert!((anova.error_ss - 8.0).abs() < 1e-10);
        assert!((ab.f_ratio.unwrap() - 100.0).abs() < 1e-9);
        assert!(ab.p_value.unwrap() < 0.001);
    }

    #[test]
    fn test_anova_contribution_percent() {
        let matrix: Array2<u32> = array![
            [0, 0],
            [0, 1],
            [1, 0],
            [1, 1],
            [0, 0],
            [0, 1],
            [1, 0],
            [1, 1],
        ];
        let responses = vec![10.0, 20.0, 30.0, 40.0, 12.0, 19.0, 33.0, 41.0];
        let grand_mean = responses.iter().sum::<f64>() / 8.0;

        let anova = calculate_anova(&matrix, &[2, 2], &["A", "B"], &responses, grand_mean, false);

        let model: f64 = anova.entries.iter().map(|e| e.contribution_percent).sum();
        let error = anova.error_ss / anova.total_ss * 100.0;
        assert!((model + error - 100.0).abs() < 1e-9);
        assert_eq!(anova.error_df, 5);
    }
}
