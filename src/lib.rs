pub mod cli;
pub mod core;
pub mod output;
pub mod providers;
pub mod table;

use crate::cli::menu::Menu;
use crate::cli::prompt::Prompter;
use crate::core::config::AppConfig;
use crate::output::OutputWriter;
use crate::providers::ExchangeRatesProvider;
use anyhow::Result;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use tracing::{debug, info};

/// Loads the config and runs the interactive menu on the terminal.
pub async fn run(config_path: Option<&str>) -> Result<()> {
    let stdin = BufReader::new(std::io::stdin());
    run_with_io(config_path, stdin, std::io::stdout()).await
}

pub async fn run_with_io<R: BufRead, W: Write>(
    config_path: Option<&str>,
    reader: R,
    writer: W,
) -> Result<()> {
    info!("fxhist starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let provider = ExchangeRatesProvider::new(&config.provider.base_url, config.request_builder());
    let output = OutputWriter::new(config.output_dir()?);
    debug!("Writing results to {}", output.dir().display());

    let mut menu = Menu::new(Prompter::new(reader, writer), &provider, output);
    if config.open_chart {
        menu = menu.with_chart_opener(Box::new(|path: &Path| open::that(path)));
    }
    menu.run().await
}
