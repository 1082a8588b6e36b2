// demos/src/bin/simulate_trajectory.rs
//
// Runs a short simulation with the default configuration and prints one line
// per step: the event, top of book, mid price, spread and imbalance.
//
// A numeric argument, if given, is used as the seed. `--trace` also logs
// every ledger mutation:
//   cargo run --bin simulate_trajectory -- 7 --trace

use orderbook_sim::prelude::*;
use tracing::{Level, info};

const STEPS: usize = 50;

fn fmt_price(price: Option<i64>) -> String {
    price.map_or_else(|| "-".to_string(), |p| p.to_string())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let level = if args.iter().any(|a| a == "--trace") {
        Level::TRACE
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let seed = args
        .iter()
        .rev()
        .find(|a| !a.starts_with("--"))
        .map(|a| a.parse::<u64>())
        .transpose()?
        .unwrap_or(42);

    let mut sim = Simulator::new(SimulatorConfig::default(), seed)?;
    info!(
        "Simulating {} steps (seed {}): bid {:?} / ask {:?}",
        STEPS,
        seed,
        sim.best_bid(),
        sim.best_ask()
    );

    let trajectory = sim.simulate(STEPS);
    for snapshot in &trajectory {
        let mid = snapshot
            .mid_price
            .map_or_else(|| "-".to_string(), |m| format!("{m:.2}"));
        println!(
            "Step {:4} | Event: {:<11} | Bid: {:>5} ({:>2}) | Ask: {:>5} ({:>2}) | Mid: {:>6} | Spr: {:>3} | Imb: {:>6.3}",
            snapshot.step,
            snapshot.event,
            fmt_price(snapshot.best_bid),
            snapshot.bid_depth,
            fmt_price(snapshot.best_ask),
            snapshot.ask_depth,
            mid,
            fmt_price(snapshot.spread),
            snapshot.imbalance,
        );
    }

    for (event, count) in trajectory.event_counts() {
        info!("{:<11} {}", event, count);
    }

    let package = TrajectoryPackage::new(seed, trajectory)?;
    info!("Trajectory checksum: {}", package.checksum);

    Ok(())
}
