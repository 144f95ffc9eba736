//! Reshapes API rate maps into sorted tables.

use crate::core::{RangeRates, SingleRates};
use std::collections::BTreeSet;

/// Rounds to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn format_rate(value: f64) -> String {
    format!("{value:.2}")
}

#[derive(Debug, Clone, PartialEq)]
pub struct RateRow {
    pub currency: String,
    pub rate: f64,
}

impl RateRow {
    pub fn formatted_rate(&self) -> String {
        format_rate(self.rate)
    }
}

/// Rates on one date, sorted by currency code.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SingleDateTable {
    rows: Vec<RateRow>,
}

impl SingleDateTable {
    pub fn from_rates(rates: &SingleRates) -> Self {
        Self::from_rows(
            rates
                .iter()
                .map(|(currency, rate)| RateRow {
                    currency: currency.clone(),
                    rate: *rate,
                })
                .collect(),
        )
    }

    pub fn from_rows(mut rows: Vec<RateRow>) -> Self {
        rows.sort_by(|a, b| a.currency.cmp(&b.currency));
        Self { rows }
    }

    pub fn rows(&self) -> &[RateRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RangeRow {
    pub currency: String,
    /// One cell per date column. `None` where the API had no rate that day.
    pub cells: Vec<Option<f64>>,
}

/// Rates over a date range: one row per currency, one column per date.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RangeTable {
    dates: Vec<String>,
    rows: Vec<RangeRow>,
}

impl RangeTable {
    /// Builds the table with rows and columns sorted ascending and every
    /// cell rounded to two decimals.
    pub fn from_rates(rates: &RangeRates) -> Self {
        let dates: Vec<String> = rates.keys().cloned().collect();
        let currencies: BTreeSet<&String> = rates.values().flat_map(|day| day.keys()).collect();

        let rows = currencies
            .into_iter()
            .map(|currency| RangeRow {
                currency: currency.clone(),
                cells: dates
                    .iter()
                    .map(|date| {
                        rates
                            .get(date)
                            .and_then(|day| day.get(currency))
                            .map(|rate| round2(*rate))
                    })
                    .collect(),
            })
            .collect();

        Self { dates, rows }
    }

    /// Assembles a table from parts, sorting columns and rows by key.
    pub fn from_parts(dates: Vec<String>, rows: Vec<RangeRow>) -> Self {
        let mut order: Vec<usize> = (0..dates.len()).collect();
        order.sort_by(|a, b| dates[*a].cmp(&dates[*b]));

        let sorted_dates = order.iter().map(|i| dates[*i].clone()).collect();
        let mut sorted_rows: Vec<RangeRow> = rows
            .into_iter()
            .map(|row| RangeRow {
                cells: order
                    .iter()
                    .map(|i| row.cells.get(*i).copied().flatten())
                    .collect(),
                currency: row.currency,
            })
            .collect();
        sorted_rows.sort_by(|a, b| a.currency.cmp(&b.currency));

        Self {
            dates: sorted_dates,
            rows: sorted_rows,
        }
    }

    pub fn dates(&self) -> &[String] {
        &self.dates
    }

    pub fn rows(&self) -> &[RangeRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values down one date column, aligned with `rows()`.
    pub fn column(&self, index: usize) -> Vec<Option<f64>> {
        self.rows
            .iter()
            .map(|row| row.cells.get(index).copied().flatten())
            .collect()
    }

    /// Mean of each currency over the dates it has a rate for. Currencies
    /// with no rate at all are left out.
    pub fn means(&self) -> MeanTable {
        let rows = self
            .rows
            .iter()
            .filter_map(|row| {
                let values: Vec<f64> = row.cells.iter().flatten().copied().collect();
                if values.is_empty() {
                    return None;
                }
                Some(RateRow {
                    currency: row.currency.clone(),
                    rate: values.iter().sum::<f64>() / values.len() as f64,
                })
            })
            .collect();
        MeanTable { rows }
    }
}

/// Per-currency mean over a range, in the row order of the source table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeanTable {
    rows: Vec<RateRow>,
}

impl MeanTable {
    pub fn rows(&self) -> &[RateRow] {
        &self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn range_rates() -> RangeRates {
        let mut rates = RangeRates::new();
        rates.insert(
            "2020-01-03".to_string(),
            BTreeMap::from([("USD".to_string(), 1.1172), ("GBP".to_string(), 0.85183)]),
        );
        rates.insert(
            "2020-01-02".to_string(),
            BTreeMap::from([
                ("USD".to_string(), 1.1193),
                ("GBP".to_string(), 0.84828),
                ("JPY".to_string(), 121.75),
            ]),
        );
        rates
    }

    #[test]
    fn test_single_date_table_sorted_by_currency() {
        let rates = SingleRates::from([
            ("USD".to_string(), 1.1285),
            ("CAD".to_string(), 1.5281),
            ("JPY".to_string(), 121.0),
        ]);
        let table = SingleDateTable::from_rates(&rates);
        let currencies: Vec<&str> = table.rows().iter().map(|r| r.currency.as_str()).collect();
        assert_eq!(currencies, vec!["CAD", "JPY", "USD"]);

        let formatted: Vec<String> = table.rows().iter().map(RateRow::formatted_rate).collect();
        assert_eq!(formatted, vec!["1.53", "121.00", "1.13"]);
    }

    #[test]
    fn test_from_rows_sorts() {
        let table = SingleDateTable::from_rows(vec![
            RateRow {
                currency: "USD".to_string(),
                rate: 1.0,
            },
            RateRow {
                currency: "AUD".to_string(),
                rate: 2.0,
            },
        ]);
        assert_eq!(table.rows()[0].currency, "AUD");
        assert!(!table.is_empty());
        assert!(SingleDateTable::default().is_empty());
    }

    #[test]
    fn test_range_table_sorted_and_rounded() {
        let table = RangeTable::from_rates(&range_rates());
        assert_eq!(table.dates(), &["2020-01-02", "2020-01-03"]);

        let currencies: Vec<&str> = table.rows().iter().map(|r| r.currency.as_str()).collect();
        assert_eq!(currencies, vec!["GBP", "JPY", "USD"]);

        assert_eq!(table.rows()[0].cells, vec![Some(0.85), Some(0.85)]);
        assert_eq!(table.rows()[2].cells, vec![Some(1.12), Some(1.12)]);
    }

    #[test]
    fn test_range_table_missing_cells() {
        let table = RangeTable::from_rates(&range_rates());
        // JPY has no rate on the 3rd
        assert_eq!(table.rows()[1].cells, vec![Some(121.75), None]);
        assert_eq!(table.column(1), vec![Some(0.85), None, Some(1.12)]);
    }

    #[test]
    fn test_means_skip_missing_cells() {
        let mut rates = range_rates();
        rates
            .get_mut("2020-01-03")
            .unwrap()
            .insert("USD".to_string(), 1.2);
        let means = RangeTable::from_rates(&rates).means();

        let rows: Vec<(&str, f64)> = means
            .rows()
            .iter()
            .map(|r| (r.currency.as_str(), r.rate))
            .collect();
        assert_eq!(rows[0].0, "GBP");
        assert!((rows[0].1 - 0.85).abs() < 1e-9);
        assert_eq!(rows[1], ("JPY", 121.75));
        assert!((rows[2].1 - 1.16).abs() < 1e-9);
    }

    #[test]
    fn test_from_parts_sorts_columns_with_cells() {
        let table = RangeTable::from_parts(
            vec!["2020-01-03".to_string(), "2020-01-02".to_string()],
            vec![
                RangeRow {
                    currency: "USD".to_string(),
                    cells: vec![Some(1.0), Some(2.0)],
                },
                RangeRow {
                    currency: "EUR".to_string(),
                    cells: vec![None, Some(3.0)],
                },
            ],
        );
        assert_eq!(table.dates(), &["2020-01-02", "2020-01-03"]);
        assert_eq!(table.rows()[0].currency, "EUR");
        assert_eq!(table.rows()[0].cells, vec![Some(3.0), None]);
        assert_eq!(table.rows()[1].cells, vec![Some(2.0), Some(1.0)]);
    }

    #[test]
    fn test_empty_range() {
        let table = RangeTable::from_rates(&RangeRates::new());
        assert!(table.is_empty());
        assert!(table.means().rows().is_empty());
    }
}
