//! Rate queries and the API request strings built from them

use super::currency::CurrencyCode;
use super::date::DateComponents;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Symbols always requested next to the ones the user typed.
pub const FALLBACK_SYMBOLS: [&str; 6] = ["JPY", "USD", "CAD", "GBP", "NZD", "INR"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateSpec {
    On(DateComponents),
    Between {
        start: DateComponents,
        end: DateComponents,
    },
}

impl Display for DateSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateSpec::On(date) => write!(f, "{date}"),
            DateSpec::Between { start, end } => write!(f, "{start} - {end}"),
        }
    }
}

/// One lookup built from the prompts. Lives for a single menu action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateQuery {
    pub base: CurrencyCode,
    /// Empty means every currency the API knows about.
    pub symbols: Vec<CurrencyCode>,
    pub date: DateSpec,
}

impl RateQuery {
    pub fn on(base: CurrencyCode, symbols: Vec<CurrencyCode>, date: DateComponents) -> Self {
        Self {
            base,
            symbols,
            date: DateSpec::On(date),
        }
    }

    pub fn between(
        base: CurrencyCode,
        symbols: Vec<CurrencyCode>,
        start: DateComponents,
        end: DateComponents,
    ) -> Self {
        Self {
            base,
            symbols,
            date: DateSpec::Between { start, end },
        }
    }

    pub fn is_range(&self) -> bool {
        matches!(self.date, DateSpec::Between { .. })
    }
}

/// Percent-encodes each symbol, keeping the separating commas literal.
fn encode_list<'a>(symbols: impl Iterator<Item = &'a str>) -> String {
    symbols
        .map(|s| urlencoding::encode(s).into_owned())
        .collect::<Vec<_>>()
        .join(",")
}

/// Turns a [`RateQuery`] into the path and query string of an API request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestBuilder {
    fallback_symbols: Vec<String>,
    append_fallback: bool,
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new(FALLBACK_SYMBOLS.iter().map(|s| s.to_string()).collect(), true)
    }
}

impl RequestBuilder {
    pub fn new(fallback_symbols: Vec<String>, append_fallback: bool) -> Self {
        Self {
            fallback_symbols,
            append_fallback,
        }
    }

    /// Builds `/{date}?...` for a single date or `/history?...` for a range.
    ///
    /// The fallback list goes into a second `symbols` parameter even when the
    /// user typed symbols of their own, unless it has been switched off.
    pub fn path_and_query(&self, query: &RateQuery) -> String {
        let mut params = Vec::new();
        let path = match &query.date {
            DateSpec::On(date) => format!("/{date}"),
            DateSpec::Between { start, end } => {
                params.push(format!("start_at={start}"));
                params.push(format!("end_at={end}"));
                "/history".to_string()
            }
        };

        params.push(format!("base={}", urlencoding::encode(query.base.as_str())));
        params.push(format!(
            "symbols={}",
            encode_list(query.symbols.iter().map(CurrencyCode::as_str))
        ));
        if self.append_fallback && !self.fallback_symbols.is_empty() {
            params.push(format!(
                "symbols={}",
                encode_list(self.fallback_symbols.iter().map(String::as_str))
            ));
        }

        format!("{path}?{}", params.join("&"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usd() -> CurrencyCode {
        CurrencyCode::new("USD").unwrap()
    }

    #[test]
    fn test_single_date_without_symbols() {
        let query = RateQuery::on(usd(), vec![], DateComponents::new(2020, 6, 15));
        assert_eq!(
            RequestBuilder::default().path_and_query(&query),
            "/2020-06-15?base=USD&symbols=&symbols=JPY,USD,CAD,GBP,NZD,INR"
        );
    }

    #[test]
    fn test_single_date_keeps_user_symbols_before_fallback() {
        let symbols = vec![CurrencyCode::from_symbol("eur"), CurrencyCode::from_symbol("chf")];
        let query = RateQuery::on(usd(), symbols, DateComponents::new(2021, 1, 4));
        assert_eq!(
            RequestBuilder::default().path_and_query(&query),
            "/2021-01-04?base=USD&symbols=EUR,CHF&symbols=JPY,USD,CAD,GBP,NZD,INR"
        );
    }

    #[test]
    fn test_range_query() {
        let query = RateQuery::between(
            CurrencyCode::new("eur").unwrap(),
            vec![CurrencyCode::from_symbol("GBP")],
            DateComponents::new(2019, 1, 1),
            DateComponents::new(2019, 1, 31),
        );
        assert!(query.is_range());
        assert_eq!(
            RequestBuilder::default().path_and_query(&query),
            "/history?start_at=2019-01-01&end_at=2019-01-31&base=EUR&symbols=GBP&symbols=JPY,USD,CAD,GBP,NZD,INR"
        );
    }

    #[test]
    fn test_fallback_can_be_disabled_or_replaced() {
        let query = RateQuery::on(usd(), vec![], DateComponents::new(2020, 6, 15));

        let builder = RequestBuilder::new(vec![], true);
        assert_eq!(builder.path_and_query(&query), "/2020-06-15?base=USD&symbols=");

        let builder = RequestBuilder::new(vec!["AUD".to_string()], false);
        assert_eq!(builder.path_and_query(&query), "/2020-06-15?base=USD&symbols=");

        let builder = RequestBuilder::new(vec!["AUD".to_string(), "SEK".to_string()], true);
        assert_eq!(
            builder.path_and_query(&query),
            "/2020-06-15?base=USD&symbols=&symbols=AUD,SEK"
        );
    }

    #[test]
    fn test_calendar_invalid_date_is_sent_as_is() {
        let query = RateQuery::on(usd(), vec![], DateComponents::new(2020, 2, 31));
        assert!(
            RequestBuilder::default()
                .path_and_query(&query)
                .starts_with("/2020-02-31?")
        );
    }

    #[test]
    fn test_symbols_cannot_break_out_of_their_parameter() {
        let symbols = crate::core::currency::parse_symbol_list("jpy#x, a&base=eur, b c?");
        let query = RateQuery::on(usd(), symbols, DateComponents::new(2020, 6, 15));
        let built = RequestBuilder::default().path_and_query(&query);
        assert_eq!(
            built,
            "/2020-06-15?base=USD&symbols=JPY%23X,A%26BASE%3DEUR,B%20C%3F&symbols=JPY,USD,CAD,GBP,NZD,INR"
        );
        assert!(!built.contains('#'));
        assert_eq!(built.matches("base=").count(), 1);

        let query = RateQuery::on(
            CurrencyCode::new("a&b").unwrap(),
            vec![],
            DateComponents::new(2020, 6, 15),
        );
        assert!(
            RequestBuilder::default()
                .path_and_query(&query)
                .starts_with("/2020-06-15?base=A%26B&symbols=&")
        );
    }

    #[test]
    fn test_date_spec_display() {
        let on = DateSpec::On(DateComponents::new(2020, 6, 15));
        assert_eq!(on.to_string(), "2020-06-15");

        let between = DateSpec::Between {
            start: DateComponents::new(2020, 1, 1),
            end: DateComponents::new(2020, 2, 1),
        };
        assert_eq!(between.to_string(), "2020-01-01 - 2020-02-01");
    }
}
