// demos/src/bin/spread_sweep.rs
//
// Average spread as a function of the limit order arrival rate.
//
// For every λ_limit in 1..=12 (λ_market = 4, λ_cancel = 3) one long run is
// simulated and the mean and sample standard deviation of the spread are
// reported over the two-sided steps. The results are printed as a table and
// written to stdout as JSON for plotting.
//
// Run with:
//   cargo run --release --bin spread_sweep

use orderbook_sim::prelude::*;
use serde::Serialize;
use tracing::info;

const STEPS: usize = 100_000;
const SEED: u64 = 2024;

#[derive(Debug, Serialize)]
struct SweepPoint {
    lambda_limit: f64,
    avg_spread: f64,
    std_spread: f64,
    one_sided_steps: usize,
}

fn mean_and_std(values: &[i64]) -> (f64, f64) {
    if values.is_empty() {
        return (f64::NAN, f64::NAN);
    }
    let n = values.len() as f64;
    let mean = values.iter().map(|&v| v as f64).sum::<f64>() / n;
    if values.len() < 2 {
        return (mean, f64::NAN);
    }
    let variance = values
        .iter()
        .map(|&v| (v as f64 - mean).powi(2))
        .sum::<f64>()
        / (n - 1.0);
    (mean, variance.sqrt())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    info!("Spread sweep: {} steps per rate, seed {}", STEPS, SEED);

    let mut results = Vec::new();
    for (index, lambda_limit) in (1..=12).map(f64::from).enumerate() {
        let config = SimulatorConfig::default().with_limit_rate(lambda_limit);
        let mut sim = Simulator::with_stream(config, SEED, index as u64)?;
        let trajectory = sim.simulate(STEPS);

        let spreads = trajectory.spreads();
        let (avg_spread, std_spread) = mean_and_std(&spreads);
        info!(
            "λ_limit {:>4.1} | avg spread {:>8.3} | std {:>8.3}",
            lambda_limit, avg_spread, std_spread
        );

        results.push(SweepPoint {
            lambda_limit,
            avg_spread,
            std_spread,
            one_sided_steps: trajectory.len() - spreads.len(),
        });
    }

    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}
