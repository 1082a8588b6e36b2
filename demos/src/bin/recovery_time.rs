// demos/src/bin/recovery_time.rs
//
// How fast does the spread recover after a liquidity shock?
//
// A shock starts when the spread exceeds HIGH_SPREAD; it ends at the first
// later step whose spread is back at or below LOW_SPREAD. Only two-sided
// steps count. For each λ_limit in 1..=12 a Monte Carlo batch is simulated
// and the mean and standard deviation of the recovery times are reported.
//
// Run with:
//   cargo run --release --bin recovery_time

use orderbook_sim::prelude::*;
use tracing::info;

const LOW_SPREAD: i64 = 5;
const HIGH_SPREAD: i64 = 15;
const STEPS: usize = 2_000;
const RUNS: usize = 300;
const SEED: u64 = 7;

/// Lengths, in two-sided steps, of every shock in `spreads`. A shock still
/// open at the end of the run counts up to the last step.
fn recovery_times(spreads: &[i64], high: i64, low: i64) -> Vec<usize> {
    let mut times = Vec::new();
    let mut i = 0;
    while i < spreads.len() {
        if spreads[i] > high {
            let mut j = i + 1;
            while j < spreads.len() && spreads[j] > low {
                j += 1;
            }
            times.push(j - i);
            i = j;
        } else {
            i += 1;
        }
    }
    times
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    info!(
        "Recovery time: shock > {}, recovered <= {}, {} runs x {} steps",
        HIGH_SPREAD, LOW_SPREAD, RUNS, STEPS
    );

    println!("lambda_limit,avg_recovery_time,std_recovery_time,shocks");
    for lambda_limit in (1..=12).map(f64::from) {
        let config = SimulatorConfig::default().with_limit_rate(lambda_limit);
        let runner = BatchRunner::new(config, SEED)?;

        let times: Vec<usize> = runner
            .run_with(RUNS, STEPS, |trajectory| {
                recovery_times(&trajectory.spreads(), HIGH_SPREAD, LOW_SPREAD)
            })?
            .into_iter()
            .flatten()
            .collect();

        if times.is_empty() {
            info!("λ_limit {:>4.1} | no shocks", lambda_limit);
            println!("{lambda_limit},NaN,NaN,0");
            continue;
        }

        let n = times.len() as f64;
        let mean = times.iter().map(|&t| t as f64).sum::<f64>() / n;
        let std = (times.iter().map(|&t| (t as f64 - mean).powi(2)).sum::<f64>() / n).sqrt();
        info!(
            "λ_limit {:>4.1} | {:>6} shocks | avg recovery {:>7.2} | std {:>7.2}",
            lambda_limit,
            times.len(),
            mean,
            std
        );
        println!("{lambda_limit},{mean},{std},{}", times.len());
    }

    Ok(())
}
