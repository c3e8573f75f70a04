//! Efficient frontier demo
//!
//! Sweeps target returns between the lowest and highest asset mean and prints
//! the minimum-variance portfolio for each, with and without short sales.
//!
//! Run with: cargo run -p frontier-optimizer --example efficient_frontier_demo

use frontier_optimizer::{MeanVarianceOptimizer, OptimizationOptions};
use frontier_risk::{Moments, price_matrix_from_rows, simple_returns};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let rows = vec![
        vec![100.0, 50.0, 200.0, 80.0],
        vec![102.0, 49.0, 204.0, 81.5],
        vec![101.0, 51.5, 203.0, 83.0],
        vec![104.0, 52.0, 207.0, 82.0],
        vec![106.5, 51.0, 206.0, 84.5],
        vec![105.0, 53.5, 210.0, 86.0],
        vec![108.0, 54.0, 212.0, 85.0],
    ];
    let assets = ["Equity", "Credit", "Rates", "Commodities"];

    let prices = price_matrix_from_rows(&rows)?;
    let moments = Moments::estimate(&simple_returns(&prices)?)?;

    println!("Mean returns per period:");
    for (asset, mean) in assets.iter().zip(moments.mean.iter()) {
        println!("  {:<12} {:>8.4}%", asset, mean * 100.0);
    }

    let lo = moments.mean.iter().cloned().fold(f64::INFINITY, f64::min);
    let hi = moments.mean.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    for (label, options) in [
        ("long-only (repaired)", OptimizationOptions::default()),
        (
            "unconstrained",
            OptimizationOptions::default().with_non_negativity(false),
        ),
    ] {
        let optimizer = MeanVarianceOptimizer::new(options)?;
        println!("\n{label}");
        println!("{:>10} {:>10} {:>10}   weights", "target", "return", "vol");

        for step in 0..=5 {
            let target = lo + (hi - lo) * step as f64 / 5.0;
            let result = optimizer.optimize_moments(&moments, target)?;
            let weights: Vec<String> = result
                .weights
                .iter()
                .map(|w| format!("{:>6.1}%", w * 100.0))
                .collect();
            println!(
                "{:>9.4}% {:>9.4}% {:>9.4}%   {}",
                target * 100.0,
                result.metrics.expected_return * 100.0,
                result.metrics.volatility * 100.0,
                weights.join(" ")
            );
        }
    }

    Ok(())
}
