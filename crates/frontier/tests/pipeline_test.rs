//! CSV-to-allocation pipeline tests.

use approx::assert_abs_diff_eq;
use frontier::{
    OptimizationOptions, PriceTable, generate_portfolio_summary, optimize_portfolio,
};
use rstest::rstest;

const PRICES: &str = "\
date,AAA,BBB,CCC
2024-01-01,100,50,200
2024-01-02,110,45,210
2024-01-03,105,55,205
";

#[test]
fn test_csv_to_summary() {
    let table = PriceTable::from_csv_str(PRICES).unwrap();
    let target = 0.0338;
    let result = optimize_portfolio(&table.to_rows(), target, &OptimizationOptions::default())
        .unwrap();
    let summary =
        generate_portfolio_summary("demo".to_string(), &table.asset_names, &result, 1e-6).unwrap();

    assert_eq!(summary.allocations[2].asset, "CCC");
    assert_abs_diff_eq!(summary.total_weight(), 1.0, epsilon = 1e-9);
    assert_abs_diff_eq!(summary.expected_return, target, epsilon = 1e-9);
}

#[test]
fn test_header_only_csv_cannot_be_optimized() {
    assert!(PriceTable::from_csv_str("date,A,B\n").is_err());
}

#[rstest]
#[case("date,A,B\n2024-01-01,1,2\n")]
#[case("date,A,B\n2024-01-01,1,2\n2024-01-02,3\n")]
fn test_single_usable_row_is_insufficient(#[case] csv: &str) {
    let table = PriceTable::from_csv_str(csv).unwrap();
    let err = optimize_portfolio(&table.to_rows(), 0.01, &OptimizationOptions::default())
        .unwrap_err();
    assert!(err.is_insufficient_data());
}

#[rstest]
#[case("date,A,B\nd1,100,n/a\nd2,101,20\nd3,103,21\nd4,102,22\n")]
#[case("date,A,B\nd1,100,NaN\nd2,101,20\nd3,103,21\nd4,102,22\n")]
#[case("date,A,B\nd1,100,20\nd2,inf,21\nd3,103,22\nd4,102,21\n")]
fn test_unusable_price_cell_is_tolerated(#[case] csv: &str) {
    let table = PriceTable::from_csv_str(csv).unwrap();
    let result = optimize_portfolio(&table.to_rows(), 0.01, &OptimizationOptions::default())
        .unwrap();

    assert!(result.weights.iter().all(|w| w.is_finite()));
    assert!(result.metrics.volatility.is_finite());
}
