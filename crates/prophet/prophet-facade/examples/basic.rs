//! Basic example: load a CSV and forecast it with Prophet
//!
//! Requires `python3` with `prophet` and `pandas` installed.
//! Run with: cargo run --example basic -p prophet-facade

use prophet_facade::{CsvDatasetLoader, ProphetConfig, Prophet};
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("examples/data/example.csv");
    let dataset = CsvDatasetLoader::new().load_file(&path)?;
    println!("Loaded {} points from {}", dataset.len(), path.display());

    let prophet = Prophet::new(
        ProphetConfig::new()
            .with_interval_width(0.95)
            .with_future_periods(6)
            .with_future_freq("10s"),
    );
    println!("Engine arguments: {:?}\n", prophet.args());

    let forecast = prophet.forecast(&dataset)?;
    for point in &forecast {
        println!(
            "  {:>14}  yhat={:8.3}  [{:8.3}, {:8.3}]",
            point.ds, point.yhat, point.yhat_lower, point.yhat_upper
        );
    }

    // The engine emits the history rows first, in input order.
    let covered = dataset
        .iter()
        .zip(&forecast)
        .filter(|(observed, point)| point.contains(observed.value()))
        .count();
    println!(
        "\n{} of {} observations inside the interval",
        covered,
        dataset.len()
    );

    Ok(())
}
