use super::ui;
use crate::table::{MeanTable, RangeTable, SingleDateTable};
use comfy_table::Cell;

impl SingleDateTable {
    pub fn display_as_table(&self) -> String {
        let mut table = ui::new_styled_table();
        table.set_header(vec![ui::header_cell("Currency"), ui::header_cell("Exchange")]);

        for row in self.rows() {
            table.add_row(vec![Cell::new(&row.currency), ui::rate_cell(row.rate)]);
        }

        table.to_string()
    }
}

impl RangeTable {
    pub fn display_as_table(&self) -> String {
        let mut table = ui::new_styled_table();

        let mut header = vec![ui::header_cell("Currency Code")];
        for date in self.dates() {
            header.push(ui::header_cell(date));
        }
        table.set_header(header);

        for row in self.rows() {
            let mut cells = vec![Cell::new(&row.currency)];
            cells.extend(
                row.cells
                    .iter()
                    .map(|cell| ui::format_optional_cell(*cell, |v| format!("{v:.2}"))),
            );
            table.add_row(cells);
        }

        table.to_string()
    }
}

impl MeanTable {
    pub fn display_as_table(&self) -> String {
        let mut table = ui::new_styled_table();
        table.set_header(vec![ui::header_cell("Currency Code"), ui::header_cell("Mean")]);
        for row in self.rows() {
            table.add_row(vec![Cell::new(&row.currency), ui::rate_cell(row.rate)]);
        }
        table.to_string()
    }
}

#[cfg(test)]
mod tests {
    use crate::core::{RangeRates, SingleRates};
    use crate::table::{RangeTable, SingleDateTable};
    use std::collections::BTreeMap;

    #[test]
    fn test_single_display_contains_sorted_rows() {
        let rates = SingleRates::from([("USD".to_string(), 1.1285), ("CAD".to_string(), 1.5281)]);
        let text = SingleDateTable::from_rates(&rates).display_as_table();
        assert!(text.contains("Exchange"));
        let cad = text.find("CAD").unwrap();
        let usd = text.find("USD").unwrap();
        assert!(cad < usd);
        assert!(text.contains("1.53"));
        assert!(text.contains("1.13"));
    }

    #[test]
    fn test_range_display_marks_missing_cells() {
        let mut rates = RangeRates::new();
        rates.insert(
            "2020-01-02".to_string(),
            BTreeMap::from([("USD".to_string(), 1.1193), ("JPY".to_string(), 121.75)]),
        );
        rates.insert(
            "2020-01-03".to_string(),
            BTreeMap::from([("USD".to_string(), 1.1172)]),
        );
        let table = RangeTable::from_rates(&rates);
        let text = table.display_as_table();
        assert!(text.contains("2020-01-02"));
        assert!(text.contains("N/A"));
        assert!(text.contains("121.75"));

        let means = table.means().display_as_table();
        assert!(means.contains("Mean"));
        assert!(means.contains("1.12"));
    }
}
