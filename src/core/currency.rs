//! Currency code type

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// A three character currency code such as `EUR` or `JPY`.
///
/// Only the length is checked. The code is never looked up against the
/// ISO-4217 list, so the API decides whether it actually exists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub const LEN: usize = 3;

    pub fn new(input: &str) -> Result<Self> {
        let code = input.trim().to_uppercase();
        let len = code.chars().count();
        if len > Self::LEN {
            bail!("That's too long! Please enter a three character string and try again!");
        }
        if len < Self::LEN {
            bail!("That's too short! Please enter a three character string and try again!");
        }
        Ok(Self(code))
    }

    /// Uppercases a symbol from a comparison list without checking its length.
    pub fn from_symbol(input: &str) -> Self {
        Self(input.trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CurrencyCode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Splits a comma separated list of symbols. Blank input means "all currencies".
pub fn parse_symbol_list(input: &str) -> Vec<CurrencyCode> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(CurrencyCode::from_symbol)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uppercases_three_letter_code() {
        let code = CurrencyCode::new("usd").unwrap();
        assert_eq!(code.as_str(), "USD");
        assert_eq!(code.to_string().len(), 3);

        let code: CurrencyCode = " gbp ".parse().unwrap();
        assert_eq!(code.as_str(), "GBP");
    }

    #[test]
    fn test_new_accepts_any_characters() {
        // No charset check, only length
        assert_eq!(CurrencyCode::new("1$x").unwrap().as_str(), "1$X");
    }

    #[test]
    fn test_new_rejects_wrong_length() {
        let err = CurrencyCode::new("EURO").unwrap_err();
        assert!(err.to_string().contains("too long"));

        let err = CurrencyCode::new("EU").unwrap_err();
        assert!(err.to_string().contains("too short"));

        assert!(CurrencyCode::new("").is_err());
    }

    #[test]
    fn test_parse_symbol_list() {
        let symbols = parse_symbol_list("jpy, gbp,,usd ");
        let symbols: Vec<&str> = symbols.iter().map(CurrencyCode::as_str).collect();
        assert_eq!(symbols, vec!["JPY", "GBP", "USD"]);

        assert!(parse_symbol_list("").is_empty());
        assert!(parse_symbol_list("  ").is_empty());
    }
}
