//! Interactive menu driving the lookups.

use super::prompt::{InputClosed, Prompter};
use super::ui::{self, StyleType};
use crate::core::date::{RANGE_MIN_YEAR, SINGLE_DATE_MIN_YEAR};
use crate::core::{RateProvider, RateQuery};
use crate::output::OutputWriter;
use crate::table::{RangeTable, SingleDateTable};
use anyhow::Result;
use std::io::{BufRead, Write};
use std::path::Path;
use tracing::{debug, error, info, warn};

pub const FETCH_ERROR_MESSAGE: &str = "An error has occurred - please try again!";

const ABOUT: &str = "\
fxhist looks up historical foreign exchange rates, either on one date or
for every date between two dates, and saves them as CSV and as an HTML chart.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Main,
    Fetch,
    Terminated,
}

/// Opens a written chart, usually in the default browser.
pub type ChartOpener<'a> = Box<dyn Fn(&Path) -> std::io::Result<()> + 'a>;

pub struct Menu<'a, R, W> {
    prompter: Prompter<R, W>,
    provider: &'a dyn RateProvider,
    output: OutputWriter,
    chart_opener: Option<ChartOpener<'a>>,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(
        prompter: Prompter<R, W>,
        provider: &'a dyn RateProvider,
        output: OutputWriter,
    ) -> Self {
        Self {
            prompter,
            provider,
            output,
            chart_opener: None,
        }
    }

    /// Hands every HTML file written to `opener` once it is saved.
    pub fn with_chart_opener(mut self, opener: ChartOpener<'a>) -> Self {
        self.chart_opener = Some(opener);
        self
    }

    pub fn into_prompter(self) -> Prompter<R, W> {
        self.prompter
    }

    /// Runs until the user quits or the input ends.
    pub async fn run(&mut self) -> Result<()> {
        let mut state = MenuState::Main;
        while state != MenuState::Terminated {
            state = match self.step(state).await {
                Ok(next) => next,
                Err(e) if e.is::<InputClosed>() => {
                    debug!("Input closed, leaving the menu");
                    MenuState::Terminated
                }
                Err(e) => return Err(e),
            };
        }
        Ok(())
    }

    pub async fn step(&mut self, state: MenuState) -> Result<MenuState> {
        match state {
            MenuState::Main => self.main_menu(),
            MenuState::Fetch => self.fetch_menu().await,
            MenuState::Terminated => Ok(MenuState::Terminated),
        }
    }

    fn main_menu(&mut self) -> Result<MenuState> {
        let p = &mut self.prompter;
        p.say(ui::style_text(
            "Welcome to the Currency Exchange Program!",
            StyleType::Title,
        ))?;
        p.say("Enter the character in between the parentheses")?;
        p.say("(F)etch rates")?;
        p.say("(A)bout")?;
        p.say("(Q)uit")?;

        let choice = p.read_choice()?;
        match choice.as_str() {
            "F" => Ok(MenuState::Fetch),
            "A" => {
                p.say(ABOUT)?;
                Ok(MenuState::Main)
            }
            "Q" => {
                p.say("Goodbye!")?;
                Ok(MenuState::Terminated)
            }
            _ => {
                p.say_error(format!("{choice} is invalid! Please try again!"))?;
                Ok(MenuState::Main)
            }
        }
    }

    async fn fetch_menu(&mut self) -> Result<MenuState> {
        let p = &mut self.prompter;
        p.say("Please enter which rates you would like to fetch")?;
        p.say("2 - historical rates (set date)")?;
        p.say("3 - historical rates (time period between two dates)")?;
        p.say("5 - return to main menu")?;

        let choice = p.read_choice()?;
        match choice.parse::<i64>() {
            Ok(2) => self.single_date_flow().await?,
            Ok(3) => self.range_flow().await?,
            Ok(5) => {
                p.say("Returning to main menu")?;
                return Ok(MenuState::Main);
            }
            Ok(other) => p.say_error(format!("{other} is invalid, please try again!"))?,
            Err(_) => p.say_error("That's not a number - please try again!")?,
        }
        Ok(MenuState::Fetch)
    }

    async fn single_date_flow(&mut self) -> Result<()> {
        let p = &mut self.prompter;
        p.say(format!(
            "NOTE: The furthest you can go back to is {SINGLE_DATE_MIN_YEAR}!"
        ))?;
        let date = p.read_date(SINGLE_DATE_MIN_YEAR)?;
        if !date.is_calendar_date() {
            warn!(%date, "Date is not on the calendar, sending it as entered");
        }
        let base = p.read_base_currency()?;
        let symbols = p.read_compare_currencies()?;
        let query = RateQuery::on(base, symbols, date);

        if let Err(e) = self.fetch_single(&query).await {
            self.report_failure(e)?;
        }
        Ok(())
    }

    async fn range_flow(&mut self) -> Result<()> {
        let p = &mut self.prompter;
        p.say("NOTE: Creating start date")?;
        p.say(format!("NOTE: The furthest you can go back to is {RANGE_MIN_YEAR}!"))?;
        let start = p.read_date(RANGE_MIN_YEAR)?;
        p.say("NOTE: Creating end date")?;
        p.say(format!("NOTE: The furthest you can go back to is {RANGE_MIN_YEAR}!"))?;
        let end = p.read_date(RANGE_MIN_YEAR)?;
        if start > end {
            warn!(%start, %end, "Start date is after end date");
        }
        let base = p.read_base_currency()?;
        let symbols = p.read_compare_currencies()?;
        let query = RateQuery::between(base, symbols, start, end);

        match self.fetch_range(&query).await {
            Err(e) if e.is::<InputClosed>() => Err(e),
            Err(e) => self.report_failure(e),
            Ok(()) => Ok(()),
        }
    }

    async fn fetch_single(&mut self, query: &RateQuery) -> Result<()> {
        self.prompter.say(format!(
            "Now fetching exchange rates for {} on the following date: {}",
            query.base, query.date
        ))?;

        let spinner = ui::new_spinner("Fetching rates");
        let rates = self.provider.fetch_single(query).await;
        spinner.finish_and_clear();
        let table = SingleDateTable::from_rates(&rates?);
        info!(base = %query.base, rows = table.rows().len(), "Fetched single date rates");

        let p = &mut self.prompter;
        p.say(ui::style_text("Complete!", StyleType::Success))?;
        p.say(format!("Exchange rate for {} on {}", query.base, query.date))?;
        p.say(table.display_as_table())?;

        p.say("Printing results to CSV file...")?;
        let csv = self.output.single_csv(query, &table)?;
        p.say(format!("CSV created! Written to {}", csv.display()))?;

        p.say("Now creating table - please wait...")?;
        let html = self.output.single_html(query, &table)?;
        p.say(format!(
            "Table has been saved as a HTML file called - {}",
            html.display()
        ))?;
        self.open_chart(&html)
    }

    async fn fetch_range(&mut self, query: &RateQuery) -> Result<()> {
        self.prompter.say(format!(
            "Now fetching exchange rates for {} between the following dates: {}",
            query.base, query.date
        ))?;

        let spinner = ui::new_spinner("Fetching rates");
        let rates = self.provider.fetch_range(query).await;
        spinner.finish_and_clear();
        let table = RangeTable::from_rates(&rates?);
        info!(
            base = %query.base,
            rows = table.rows().len(),
            dates = table.dates().len(),
            "Fetched range rates"
        );

        let p = &mut self.prompter;
        p.say(ui::style_text("Complete!", StyleType::Success))?;
        p.say(table.display_as_table())?;

        p.say("Printing results to CSV file...")?;
        let csv = self.output.range_csv(query, &table)?;
        p.say(format!("CSV created! Written to {}", csv.display()))?;

        p.say("Do you want to print the mean (average) of each currency to a separate CSV file?")?;
        if p.read_yes_no()? {
            let means = table.means();
            p.say(means.display_as_table())?;
            let mean_csv = self.output.mean_csv(query, &means)?;
            p.say(format!("Mean written to {}", mean_csv.display()))?;
        } else {
            p.say("Not printing the mean of currencies")?;
        }

        p.say("Now creating scatter plot - please wait...")?;
        let html = self.output.range_html(query, &table)?;
        p.say(format!(
            "Scatter plot has been saved as a HTML file called - {}",
            html.display()
        ))?;
        self.open_chart(&html)
    }

    /// A chart that fails to open is still on disk, so this only warns.
    fn open_chart(&mut self, html: &Path) -> Result<()> {
        let Some(opener) = &self.chart_opener else {
            return Ok(());
        };
        match opener(html) {
            Ok(()) => {
                debug!(path = %html.display(), "Opened chart");
                Ok(())
            }
            Err(e) => {
                warn!(path = %html.display(), error = %e, "Could not open chart");
                self.prompter
                    .say(format!("Could not open {} automatically", html.display()))
            }
        }
    }

    /// Logs the detail and shows the user one generic message.
    fn report_failure(&mut self, e: anyhow::Error) -> Result<()> {
        error!(error = %e, "Lookup failed: {e:?}");
        self.prompter.say_error(FETCH_ERROR_MESSAGE)
    }
}
