//! CSV and HTML files produced for each lookup.

use crate::core::{DateSpec, RateQuery};
use crate::table::{MeanTable, RangeRow, RangeTable, RateRow, SingleDateTable, format_rate};
use anyhow::{Context, Result, anyhow};
use serde_json::{Value, json};
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";
const MARKER_SIZE: u32 = 15;
const MARKER_BORDER_WIDTH: u32 = 2;
const MARKER_BORDER_COLOR: &str = "DarkSlateGrey";

const SINGLE_HEADER: [&str; 2] = ["Currency", "Exchange"];
const ROW_LABEL: &str = "Currency Code";

/// `historical-{date}-{base}` or `historical-{start}-{end}-{base}`.
pub fn file_stem(query: &RateQuery) -> String {
    match &query.date {
        DateSpec::On(date) => format!("historical-{date}-{}", query.base),
        DateSpec::Between { start, end } => format!("historical-{start}-{end}-{}", query.base),
    }
}

pub fn range_title(query: &RateQuery) -> String {
    match &query.date {
        DateSpec::Between { start, end } => {
            format!("Historical rates between {start} - {end} for {}", query.base)
        }
        DateSpec::On(date) => format!("Historical rates on {date} for {}", query.base),
    }
}

pub fn write_single_csv<W: Write>(table: &SingleDateTable, writer: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(SINGLE_HEADER)?;
    for row in table.rows() {
        writer.write_record([row.currency.clone(), row.formatted_rate()])?;
    }
    writer.flush()?;
    Ok(())
}

pub fn read_single_csv<R: Read>(reader: R) -> Result<SingleDateTable> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let currency = record
            .get(0)
            .ok_or_else(|| anyhow!("Missing currency in CSV record"))?;
        let rate = record
            .get(1)
            .ok_or_else(|| anyhow!("Missing rate for {currency}"))?
            .parse::<f64>()
            .with_context(|| format!("Invalid rate for {currency}"))?;
        rows.push(RateRow {
            currency: currency.to_string(),
            rate,
        });
    }
    Ok(SingleDateTable::from_rows(rows))
}

pub fn write_range_csv<W: Write>(table: &RangeTable, writer: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);

    let mut header = vec![ROW_LABEL.to_string()];
    header.extend(table.dates().iter().cloned());
    writer.write_record(&header)?;

    for row in table.rows() {
        let mut record = vec![row.currency.clone()];
        record.extend(row.cells.iter().map(|cell| cell.map(format_rate).unwrap_or_default()));
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn read_range_csv<R: Read>(reader: R) -> Result<RangeTable> {
    let mut reader = csv::Reader::from_reader(reader);
    let dates: Vec<String> = reader.headers()?.iter().skip(1).map(String::from).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let mut fields = record.iter();
        let currency = fields
            .next()
            .ok_or_else(|| anyhow!("Missing currency in CSV record"))?
            .to_string();
        let cells = fields
            .map(|field| {
                if field.is_empty() {
                    Ok(None)
                } else {
                    field
                        .parse::<f64>()
                        .map(Some)
                        .with_context(|| format!("Invalid rate '{field}' for {currency}"))
                }
            })
            .collect::<Result<Vec<_>>>()?;
        rows.push(RangeRow { currency, cells });
    }
    Ok(RangeTable::from_parts(dates, rows))
}

pub fn write_mean_csv<W: Write>(table: &MeanTable, writer: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record([ROW_LABEL, "Mean"])?;
    for row in table.rows() {
        writer.write_record([row.currency.clone(), row.rate.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}

/// Plotly table of a single date lookup.
pub fn single_figure(table: &SingleDateTable) -> Value {
    let currencies: Vec<&str> = table.rows().iter().map(|r| r.currency.as_str()).collect();
    let rates: Vec<String> = table.rows().iter().map(RateRow::formatted_rate).collect();
    json!({
        "data": [{
            "type": "table",
            "header": { "values": SINGLE_HEADER },
            "cells": { "values": [currencies, rates] },
        }],
        "layout": {},
    })
}

/// Plotly scatter of a range lookup, one trace per date.
pub fn range_figure(title: &str, table: &RangeTable) -> Value {
    let currencies: Vec<&str> = table.rows().iter().map(|r| r.currency.as_str()).collect();
    let traces: Vec<Value> = table
        .dates()
        .iter()
        .enumerate()
        .map(|(index, date)| {
            json!({
                "type": "scatter",
                "mode": "markers",
                "name": date,
                "x": currencies,
                "y": table.column(index),
                "marker": {
                    "size": MARKER_SIZE,
                    "line": { "width": MARKER_BORDER_WIDTH, "color": MARKER_BORDER_COLOR },
                },
            })
        })
        .collect();

    json!({
        "data": traces,
        "layout": {
            "title": { "text": title },
            "xaxis": { "title": { "text": ROW_LABEL } },
            "yaxis": { "title": { "text": "value" } },
            "legend": { "title": { "text": "Dates" } },
        },
    })
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Wraps a figure into a standalone page.
pub fn render_html(title: &str, figure: &Value) -> String {
    // Keep a stray "</script>" inside the data from closing the tag
    let figure = figure.to_string().replace("</", "<\\/");
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="{PLOTLY_CDN}"></script>
</head>
<body>
<div id="chart" style="width:100%;height:90vh;"></div>
<script>
var figure = {figure};
Plotly.newPlot("chart", figure.data, figure.layout);
</script>
</body>
</html>
"#,
        title = escape_html(title),
    )
}

/// Writes lookup results into one directory.
#[derive(Debug, Clone)]
pub struct OutputWriter {
    dir: PathBuf,
}

impl OutputWriter {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn create(&self, file_name: &str) -> Result<(PathBuf, File)> {
        let path = self.dir.join(file_name);
        let file = File::create(&path)
            .with_context(|| format!("Failed to create file: {}", path.display()))?;
        debug!("Writing {}", path.display());
        Ok((path, file))
    }

    pub fn single_csv(&self, query: &RateQuery, table: &SingleDateTable) -> Result<PathBuf> {
        let (path, file) = self.create(&format!("{}.csv", file_stem(query)))?;
        write_single_csv(table, file)
            .with_context(|| format!("Failed to write CSV: {}", path.display()))?;
        Ok(path)
    }

    pub fn single_html(&self, query: &RateQuery, table: &SingleDateTable) -> Result<PathBuf> {
        let stem = file_stem(query);
        let (path, mut file) = self.create(&format!("{stem}.html"))?;
        file.write_all(render_html(&stem, &single_figure(table)).as_bytes())
            .with_context(|| format!("Failed to write HTML: {}", path.display()))?;
        Ok(path)
    }

    pub fn range_csv(&self, query: &RateQuery, table: &RangeTable) -> Result<PathBuf> {
        let (path, file) = self.create(&format!("{}.csv", file_stem(query)))?;
        write_range_csv(table, file)
            .with_context(|| format!("Failed to write CSV: {}", path.display()))?;
        Ok(path)
    }

    pub fn mean_csv(&self, query: &RateQuery, table: &MeanTable) -> Result<PathBuf> {
        let (path, file) = self.create(&format!("{}-Mean.csv", file_stem(query)))?;
        write_mean_csv(table, file)
            .with_context(|| format!("Failed to write CSV: {}", path.display()))?;
        Ok(path)
    }

    pub fn range_html(&self, query: &RateQuery, table: &RangeTable) -> Result<PathBuf> {
        let title = range_title(query);
        let (path, mut file) = self.create(&format!("{}.html", file_stem(query)))?;
        file.write_all(render_html(&title, &range_figure(&title, table)).as_bytes())
            .with_context(|| format!("Failed to write HTML: {}", path.display()))?;
        Ok(path)
    }
}
