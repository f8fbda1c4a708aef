//! Egg production example for the yates library.
//!
//! Builds the density × season egg production table, prints it, and runs a
//! two-factor ANOVA with interaction.
//!
//! Run with `RUST_LOG=debug` to see the library's tracing output.

use tracing_subscriber::EnvFilter;
use yates::catalogue::{build_observation_table, DENSITY, EGG, SEASON};
use yates::design::{analyze, FactorialConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let table = build_observation_table()?;
    println!("Egg production ({} runs)\n", table.nrows());
    println!("{table}");

    let result = analyze(&table, &[DENSITY, SEASON], EGG, &FactorialConfig::default())?;

    println!("Grand mean: {:.4}\n", result.grand_mean);
    println!("Main effects:");
    for effect in &result.effects {
        println!("  {} (rank {}, range {:.4})", effect.factor, effect.rank, effect.range);
        let intervals = effect.confidence_intervals.as_deref().unwrap_or_default();
        for (i, level) in effect.levels.iter().enumerate() {
            print!("    {:>8}: {:.4}", level.to_string(), effect.level_means[i]);
            if let Some(ci) = intervals.get(i) {
                print!("  [{:.4}, {:.4}]", ci.lower, ci.upper);
            }
            println!();
        }
    }

    println!("\nANOVA:");
    println!(
        "  {:<16} {:>10} {:>4} {:>10} {:>10} {:>10}",
        "Source", "SS", "df", "MS", "F", "p"
    );
    for entry in &result.anova.entries {
        let f = entry.f_ratio.map_or_else(|| "-".into(), |f| format!("{f:.3}"));
        let p = entry.p_value.map_or_else(|| "-".into(), |p| format!("{p:.5}"));
        println!(
            "  {:<16} {:>10.4} {:>4} {:>10.4} {:>10} {:>10}",
            entry.source, entry.sum_of_squares, entry.degrees_of_freedom, entry.mean_square, f, p
        );
    }
    let anova = &result.anova;
    println!(
        "  {:<16} {:>10.4} {:>4} {:>10.4}",
        "Error", anova.error_ss, anova.error_df, anova.error_ms
    );
    println!("  {:<16} {:>10.4} {:>4}", "Total", anova.total_ss, anova.total_df);

    Ok(())
}
