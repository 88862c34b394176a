use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use jiff::Zoned;
use owo_colors::OwoColorize;
use serde_json::json;
use tracing::{info, warn};

use crate::charts::{self, ChartKey};
use crate::cli::OutputOptions;
use crate::commands::{load_table, print_json};
use crate::display::render_chart;
use crate::error::Result;
use crate::report::{ChartCapture, ReportDeck};

/// Print the dashboard chart series, plus the live zone/status breakdown.
pub fn cmd_charts(output: OutputOptions) -> Result<()> {
    let (_config, state) = load_table()?;
    let breakdown = charts::zone_status_breakdown(state.tickets());

    if output.json {
        let mut series = serde_json::Map::new();
        for key in ChartKey::ALL {
            series.insert(key.to_string(), serde_json::to_value(key.data())?);
        }
        series.insert("zone-status".to_string(), serde_json::to_value(&breakdown)?);
        return print_json(&serde_json::Value::Object(series));
    }

    for key in ChartKey::ALL {
        println!("{}", render_chart(key.title(), &key.data()));
        println!();
    }
    println!("{}", render_chart("Open tickets by zone and status", &breakdown));
    Ok(())
}

/// A capture whose file is missing or empty has nothing drawn on it.
fn checked_capture(key: ChartKey, capture: ChartCapture) -> ChartCapture {
    match fs::metadata(&capture.source) {
        Ok(meta) if meta.len() > 0 => capture,
        Ok(_) => {
            warn!(chart = %key, source = %capture.source.display(), "chart capture is empty");
            ChartCapture::new(capture.source, 0, 0)
        }
        Err(e) => {
            warn!(chart = %key, source = %capture.source.display(), error = %e, "chart capture unreadable");
            ChartCapture::new(capture.source, 0, 0)
        }
    }
}

/// Plan the slide deck from captured chart images and write it as JSON.
pub fn cmd_report(
    captures: Vec<(ChartKey, ChartCapture)>,
    output_path: Option<&Path>,
    output: OutputOptions,
) -> Result<()> {
    let captures: BTreeMap<ChartKey, ChartCapture> = captures
        .into_iter()
        .map(|(key, capture)| (key, checked_capture(key, capture)))
        .collect();

    let deck = ReportDeck::build(&captures, Zoned::now().date())?;

    match output_path {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, deck.to_json()?)?;
            info!(path = %path.display(), slides = deck.slides.len(), "report plan written");
            if output.json {
                print_json(&json!({
                    "path": path.to_string_lossy(),
                    "exportedCount": deck.exported_count,
                }))?;
            } else {
                println!(
                    "{} {} / {} charts exported to {}",
                    "Report planned:".green(),
                    deck.exported_count,
                    ChartKey::ALL.len(),
                    path.display().cyan()
                );
            }
        }
        None => println!("{}", deck.to_json()?),
    }
    Ok(())
}
