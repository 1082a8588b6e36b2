// demos/src/bin/tail_risk.rs
//
// Tail risk of the spread versus limit order intensity.
//
// For each threshold k in {5, 10, 20} and each λ_limit in 1..=12, estimates
// P(spread > k) as the mean, over Monte Carlo runs, of the fraction of
// two-sided steps whose spread exceeds k.
//
// Run with:
//   cargo run --release --bin tail_risk

use orderbook_sim::prelude::*;
use serde::Serialize;
use tracing::info;

const THRESHOLDS: [i64; 3] = [5, 10, 20];
const RUNS: usize = 100;
const STEPS: usize = 500;
const SEED: u64 = 11;

#[derive(Debug, Serialize)]
struct TailPoint {
    threshold: i64,
    lambda_limit: f64,
    mean_probability: f64,
    std_probability: f64,
}

/// Fraction of `spreads` strictly above `threshold`, `None` if there are none
fn exceedance(spreads: &[i64], threshold: i64) -> Option<f64> {
    if spreads.is_empty() {
        return None;
    }
    let above = spreads.iter().filter(|&&s| s > threshold).count();
    Some(above as f64 / spreads.len() as f64)
}

/// Population mean and standard deviation. Runs that never reached a
/// two-sided book are already filtered out; if none are left both are NaN
/// (serialized as `null`).
fn mean_and_std(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (f64::NAN, f64::NAN);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    info!("Tail risk: {} runs x {} steps per point", RUNS, STEPS);

    let mut points = Vec::new();
    for lambda_limit in (1..=12).map(f64::from) {
        let config = SimulatorConfig::default().with_limit_rate(lambda_limit);
        let runner = BatchRunner::new(config, SEED)?;
        let spreads = runner.run_with(RUNS, STEPS, Trajectory::spreads)?;

        for threshold in THRESHOLDS {
            let probabilities: Vec<f64> = spreads
                .iter()
                .filter_map(|run| exceedance(run, threshold))
                .collect();
            let (mean, std) = mean_and_std(&probabilities);

            info!(
                "λ_limit {:>4.1} | P(spread > {:>2}) = {:.4} (std {:.4})",
                lambda_limit, threshold, mean, std
            );
            points.push(TailPoint {
                threshold,
                lambda_limit,
                mean_probability: mean,
                std_probability: std,
            });
        }
    }

    println!("{}", serde_json::to_string_pretty(&points)?);
    Ok(())
}
