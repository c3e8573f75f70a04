//! Price table parsing
//!
//! Reads a header row plus one row per period. The first column is the period
//! label and the remaining columns are per-asset prices. Malformed rows (wrong
//! field count) are skipped, and unparsable price cells become `0.0` so the
//! row keeps its position in the time series.

use crate::error::{DataError, Result};
use csv::{ReaderBuilder, Trim};
use ndarray::Array2;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Historical prices for a set of assets
#[derive(Debug, Clone, PartialEq)]
pub struct PriceTable {
    /// Asset names from the header, excluding the period column
    pub asset_names: Vec<String>,

    /// Period labels, one per retained row
    pub dates: Vec<String>,

    /// Prices (periods x assets)
    pub prices: Array2<f64>,

    /// Number of data rows dropped for having the wrong field count
    pub skipped_rows: usize,
}

impl PriceTable {
    /// Parse a price table from any reader
    ///
    /// # Errors
    /// * [`DataError::NoDataRows`] if there is no header or no data row
    /// * [`DataError::NoAssetColumns`] if the header has a single column
    /// * [`DataError::Csv`] on unreadable input
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        if headers.is_empty() {
            return Err(DataError::NoDataRows);
        }
        if headers.len() < 2 {
            return Err(DataError::NoAssetColumns);
        }

        let asset_names: Vec<String> = headers.iter().skip(1).map(str::to_string).collect();
        let n_assets = asset_names.len();

        let mut dates = Vec::new();
        let mut values = Vec::new();
        let mut n_records = 0;
        let mut skipped_rows = 0;

        for record in rdr.records() {
            let record = record?;
            n_records += 1;

            if record.len() != headers.len() {
                debug!(
                    line = record.position().map_or(0, csv::Position::line),
                    fields = record.len(),
                    expected = headers.len(),
                    "Skipping malformed price row"
                );
                skipped_rows += 1;
                continue;
            }

            dates.push(record[0].to_string());
            values.extend(record.iter().skip(1).map(parse_price));
        }

        if n_records == 0 {
            return Err(DataError::NoDataRows);
        }

        let prices = Array2::from_shape_vec((dates.len(), n_assets), values)
            .map_err(|_| DataError::NoDataRows)?;

        debug!(
            assets = n_assets,
            periods = dates.len(),
            skipped_rows,
            "Loaded price table"
        );

        Ok(Self {
            asset_names,
            dates,
            prices,
            skipped_rows,
        })
    }

    /// Parse a price table from a string
    ///
    /// # Errors
    /// See [`Self::from_reader`].
    pub fn from_csv_str(content: &str) -> Result<Self> {
        Self::from_reader(content.as_bytes())
    }

    /// Load a price table from a file
    ///
    /// # Errors
    /// Returns [`DataError::Io`] if the file cannot be opened, otherwise see
    /// [`Self::from_reader`].
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Number of assets
    pub fn n_assets(&self) -> usize {
        self.asset_names.len()
    }

    /// Number of retained periods
    pub fn n_periods(&self) -> usize {
        self.prices.nrows()
    }

    /// Prices as row-major vectors, one per period
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.prices.rows().into_iter().map(|row| row.to_vec()).collect()
    }
}

/// Non-numeric and non-finite cells read as 0.0.
fn parse_price(field: &str) -> f64 {
    field
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_basic_table() {
        let csv = "date,AAPL,MSFT\n2024-01-01,100.0,200.0\n2024-01-02,101.5,198.0\n";
        let table = PriceTable::from_csv_str(csv).unwrap();

        assert_eq!(table.asset_names, vec!["AAPL", "MSFT"]);
        assert_eq!(table.dates, vec!["2024-01-01", "2024-01-02"]);
        assert_eq!(table.n_assets(), 2);
        assert_eq!(table.n_periods(), 2);
        assert_relative_eq!(table.prices[[1, 0]], 101.5);
        assert_relative_eq!(table.prices[[1, 1]], 198.0);
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let csv = " date , A , B \n d1 , 1.0 , 2.0 \n";
        let table = PriceTable::from_csv_str(csv).unwrap();

        assert_eq!(table.asset_names, vec!["A", "B"]);
        assert_eq!(table.dates, vec!["d1"]);
        assert_eq!(table.prices[[0, 1]], 2.0);
    }

    #[test]
    fn test_unparsable_price_becomes_zero() {
        let csv = "date,A,B\nd1,1.0,n/a\nd2,,3.0\n";
        let table = PriceTable::from_csv_str(csv).unwrap();

        assert_eq!(table.prices[[0, 1]], 0.0);
        assert_eq!(table.prices[[1, 0]], 0.0);
        assert_eq!(table.prices[[1, 1]], 3.0);
    }

    #[test]
    fn test_to_rows() {
        let csv = "date,A,B\nd1,1,2\nd2,3,4\n";
        let table = PriceTable::from_csv_str(csv).unwrap();
        assert_eq!(table.to_rows(), vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            PriceTable::from_csv_str(""),
            Err(DataError::NoDataRows)
        ));
    }

    #[test]
    fn test_header_only() {
        assert!(matches!(
            PriceTable::from_csv_str("date,A,B\n"),
            Err(DataError::NoDataRows)
        ));
    }

    #[test]
    fn test_no_asset_columns() {
        assert!(matches!(
            PriceTable::from_csv_str("date\nd1\n"),
            Err(DataError::NoAssetColumns)
        ));
    }
}
