//! Line based prompts that keep asking until the answer is usable.

use super::ui::{self, StyleType};
use crate::core::currency::parse_symbol_list;
use crate::core::{CurrencyCode, DateComponents};
use anyhow::Result;
use std::fmt::Display;
use std::io::{BufRead, Write};
use std::ops::RangeInclusive;

/// Raised when the input stream ends while a prompt is waiting.
#[derive(Debug)]
pub struct InputClosed;

impl Display for InputClosed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("input closed")
    }
}

impl std::error::Error for InputClosed {}

pub struct Prompter<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Prints one line.
    pub fn say(&mut self, text: impl Display) -> Result<()> {
        writeln!(self.writer, "{text}")?;
        Ok(())
    }

    pub fn say_error(&mut self, text: impl Display) -> Result<()> {
        self.say(ui::style_text(&text.to_string(), StyleType::Error))
    }

    /// Shows `prompt` and returns the next line, trimmed.
    pub fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.writer, "{prompt}")?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(InputClosed.into());
        }
        Ok(line.trim().to_string())
    }

    pub fn read_choice(&mut self) -> Result<String> {
        Ok(self.ask("Enter your choice - ")?.to_uppercase())
    }

    pub fn read_base_currency(&mut self) -> Result<CurrencyCode> {
        loop {
            self.say(
                "Please enter the currency you wish to use as the base currency in the form of a three character string (i.e. EUR, JPY, USD)",
            )?;
            let input = self.ask("Input base currency - ")?;
            match CurrencyCode::new(&input) {
                Ok(code) => {
                    self.say(format!("You have selected - {code}"))?;
                    return Ok(code);
                }
                Err(e) => self.say_error(e)?,
            }
        }
    }

    /// Single read, no retry. Blank input selects every currency.
    pub fn read_compare_currencies(&mut self) -> Result<Vec<CurrencyCode>> {
        self.say(
            "Please enter the currency you wish to compare against in the form of a three character string (i.e. EUR, JPY, USD)",
        )?;
        self.say("You can enter several currencies separated by commas (i.e. JPY,GBP,USD)")?;
        self.say("Or leave this blank and hit enter to return ALL currencies")?;
        let input = self.ask("Input currency - ")?;
        Ok(parse_symbol_list(&input))
    }

    pub fn read_year(&mut self, min_year: i32) -> Result<i32> {
        loop {
            self.say("Please enter the year (as a numerical value)")?;
            match self.ask("Enter the year - ")?.parse::<i32>() {
                Ok(year) if year >= min_year => return Ok(year),
                Ok(_) => self.say_error(format!(
                    "Please enter a valid year! The furthest you can go back to is {min_year}"
                ))?,
                Err(_) => self.say_error("Incorrect value detected! Please try again!")?,
            }
        }
    }

    pub fn read_month(&mut self) -> Result<u32> {
        self.read_number_in("month", 1..=12)
    }

    /// Any day from 1 to 31, whatever the month.
    pub fn read_day(&mut self) -> Result<u32> {
        self.read_number_in("day", 1..=31)
    }

    pub fn read_date(&mut self, min_year: i32) -> Result<DateComponents> {
        let year = self.read_year(min_year)?;
        let month = self.read_month()?;
        let day = self.read_day()?;
        Ok(DateComponents::new(year, month, day))
    }

    pub fn read_yes_no(&mut self) -> Result<bool> {
        loop {
            self.say("Type 'Y' for yes or 'N' for no")?;
            match self.read_choice()?.as_str() {
                "Y" => return Ok(true),
                "N" => return Ok(false),
                other => self.say_error(format!("{other} - is invalid, please try again!"))?,
            }
        }
    }

    fn read_number_in(&mut self, what: &str, range: RangeInclusive<u32>) -> Result<u32> {
        loop {
            self.say(format!("Please enter the {what} (as a numerical value)"))?;
            match self.ask(&format!("Enter the {what} - "))?.parse::<u32>() {
                Ok(value) if range.contains(&value) => return Ok(value),
                Ok(_) => self.say_error(format!("Please enter a valid {what}!"))?,
                Err(_) => self.say_error("Incorrect value detected! Please try again!")?,
            }
        }
    }
}
