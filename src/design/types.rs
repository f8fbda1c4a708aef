//! Factorial analysis types.

use crate::table::Value;

/// Configuration for factorial analysis.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FactorialConfig {
    /// Fit every two-factor interaction (default: true).
    pub include_interactions: bool,
    /// Confidence level for level-mean intervals (default: 0.95).
    pub confidence_level: f64,
}

impl Default for FactorialConfig {
    fn default() -> Self {
        Self {
            include_interactions: true,
            confidence_level: 0.95,
        }
    }
}

/// Confidence interval.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConfidenceInterval {
    /// Lower bound.
    pub lower: f64,
    /// Upper bound.
    pub upper: f64,
    /// Confidence level (e.g., 0.95 for 95%).
    pub level: f64,
}

impl ConfidenceInterval {
    /// Whether `value` lies inside the interval, bounds included.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }
}

/// Main effect of one factor.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FactorEffect {
    /// Factor column name.
    pub factor: String,
    /// Level labels, in order of first appearance.
    pub levels: Vec<Value>,
    /// Observations at each level.
    pub level_counts: Vec<usize>,
    /// Mean response at each level.
    pub level_means: Vec<f64>,
    /// Effect at each level (level_mean - grand_mean).
    pub level_effects: Vec<f64>,
    /// Range of level means (max - min).
    pub range: f64,
    /// Rank by range (1 = most influential).
    pub rank: usize,
    /// Interval for each level mean, when the error term has degrees of freedom.
    pub confidence_intervals: Option<Vec<ConfidenceInterval>>,
}

/// One source row of the ANOVA table.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnovaEntry {
    /// Source label: a factor name, or `A:B` for an interaction.
    pub source: String,
    /// Indices (into the analysed factor list) this source covers.
    pub factors: Vec<usize>,
    /// Sum of squares.
    pub sum_of_squares: f64,
    /// Degrees of freedom.
    pub degrees_of_freedom: usize,
    /// Mean square (SS / df).
    pub mean_square: f64,
    /// F-ratio against the error mean square.
    pub f_ratio: Option<f64>,
    /// Upper-tail probability of the F-ratio.
    pub p_value: Option<f64>,
    /// Percent of the total sum of squares.
    pub contribution_percent: f64,
}

/// Complete ANOVA table.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnovaTable {
    /// Main effects first, then interactions.
    pub entries: Vec<AnovaEntry>,
    /// Error sum of squares.
    pub error_ss: f64,
    /// Error degrees of freedom.
    pub error_df: usize,
    /// Error mean square.
    pub error_ms: f64,
    /// Total sum of squares.
    pub total_ss: f64,
    /// Total degrees of freedom.
    pub total_df: usize,
}

impl AnovaTable {
    /// Find an entry by source label.
    #[must_use]
    pub fn entry(&self, source: &str) -> Option<&AnovaEntry> {
        self.entries.iter().find(|e| e.source == source)
    }
}

/// Complete factorial analysis result.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FactorialAnalysis {
    /// Response column name.
    pub response: String,
    /// Number of observations.
    pub observations: usize,
    /// Grand mean of the response.
    pub grand_mean: f64,
    /// Main effect per factor, in the order given.
    pub effects: Vec<FactorEffect>,
    /// ANOVA table.
    pub anova: AnovaTable,
}
