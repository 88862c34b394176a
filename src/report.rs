//! Slide deck plan for the weekly analytics export.
//!
//! The dashboard captures each chart as an image; this module turns those
//! captures into a [`ReportDeck`]: a title slide, one slide per captured
//! chart in dashboard order, and a summary slide. Writing the actual slide
//! document is left to the exporter that consumes the JSON form of the deck.

use std::collections::BTreeMap;
use std::path::PathBuf;

use jiff::civil::Date;
use serde::Serialize;
use tracing::{debug, warn};

use crate::charts::ChartKey;
use crate::error::{Result, TicketDeskError};

pub const REPORT_TITLE: &str = "FSASS Task Analytics Report";
pub const REPORT_PERIOD: &str = "From Oct 27 - Nov 2, 2025 (Week 43)";
pub const FOOTER_TEXT: &str = "Ethio Telecom | FSAS&S Section";
pub const REPORT_FILE_NAME: &str = "FSASS_Task_Analytics_Report.pptx";

/// Slide geometry, in inches.
pub const SLIDE_WIDTH: f64 = 10.0;
const FOOTER_TOP: f64 = 5.06;
const CHART_TITLE_Y: f64 = 1.0;
const CHART_GAP: f64 = 1.2;
const FOOTER_MARGIN: f64 = 0.2;
const CHART_ASPECT: f64 = 16.0 / 9.0;

/// Default pixel size assumed for a capture given without dimensions.
pub const DEFAULT_CAPTURE_SIZE: (u32, u32) = (1600, 900);

/// A rendered chart image handed over by the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartCapture {
    pub source: PathBuf,
    pub width: u32,
    pub height: u32,
}

impl ChartCapture {
    pub fn new(source: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            source: source.into(),
            width,
            height,
        }
    }

    /// A canvas that was never drawn has no area.
    pub fn has_data(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Parse a `KEY=PATH` or `KEY=PATH@WIDTHxHEIGHT` capture argument.
///
/// Without explicit dimensions the capture gets [`DEFAULT_CAPTURE_SIZE`].
pub fn parse_capture(arg: &str) -> Result<(ChartKey, ChartCapture)> {
    let invalid = || TicketDeskError::InvalidCapture(arg.to_string());

    let (key, rest) = arg.split_once('=').ok_or_else(invalid)?;
    let key: ChartKey = key.parse()?;

    let (path, (width, height)) = match rest.rsplit_once('@') {
        Some((path, dims)) => {
            let (w, h) = dims.split_once(['x', 'X']).ok_or_else(invalid)?;
            let w: u32 = w.trim().parse().map_err(|_| invalid())?;
            let h: u32 = h.trim().parse().map_err(|_| invalid())?;
            (path, (w, h))
        }
        None => (rest, DEFAULT_CAPTURE_SIZE),
    };

    if path.trim().is_empty() {
        return Err(invalid());
    }
    Ok((key, ChartCapture::new(path.trim(), width, height)))
}

/// Placement of a chart image on its slide.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Placement {
    /// The largest 16:9 box between the chart heading and the footer band,
    /// centred horizontally.
    pub fn chart_area() -> Self {
        let y = CHART_TITLE_Y + CHART_GAP;
        let h = FOOTER_TOP - y - FOOTER_MARGIN;
        let w = h * CHART_ASPECT;
        Self {
            x: (SLIDE_WIDTH - w) / 2.0,
            y,
            w,
            h,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Slide {
    Title {
        title: String,
        period: String,
    },
    #[serde(rename_all = "camelCase")]
    Chart {
        key: ChartKey,
        title: String,
        description: String,
        title_y: f64,
        image: PathBuf,
        placement: Placement,
    },
    Summary {
        heading: String,
        body: String,
        closing: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDeck {
    pub file_name: String,
    pub footer: String,
    pub generated_on: String,
    pub exported_count: usize,
    pub slides: Vec<Slide>,
}

impl ReportDeck {
    /// Plan the deck from the captured charts.
    ///
    /// Captures without data are skipped; when none remain there is nothing
    /// to export.
    pub fn build(captures: &BTreeMap<ChartKey, ChartCapture>, date: Date) -> Result<Self> {
        let mut slides = vec![Slide::Title {
            title: REPORT_TITLE.to_string(),
            period: REPORT_PERIOD.to_string(),
        }];

        for key in ChartKey::ALL {
            let Some(capture) = captures.get(&key) else {
                debug!(chart = %key, "no capture for chart");
                continue;
            };
            if !capture.has_data() {
                warn!(chart = %key, source = %capture.source.display(), "skipping empty chart capture");
                continue;
            }
            slides.push(Slide::Chart {
                key,
                title: key.title().to_string(),
                description: key.description().to_string(),
                title_y: CHART_TITLE_Y,
                image: capture.source.clone(),
                placement: Placement::chart_area(),
            });
        }

        let exported_count = slides.len() - 1;
        if exported_count == 0 {
            return Err(TicketDeskError::NothingToExport);
        }

        slides.push(Slide::Summary {
            heading: "Summary & Insights".to_string(),
            body: summary_body(exported_count),
            closing: "Thank You!".to_string(),
        });

        Ok(Self {
            file_name: REPORT_FILE_NAME.to_string(),
            footer: FOOTER_TEXT.to_string(),
            generated_on: date.strftime("%Y-%m-%d").to_string(),
            exported_count,
            slides,
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn summary_body(exported: usize) -> String {
    format!(
        "Charts Exported: {exported} / {}\n\n\
         - Please review each slide for detailed visuals.\n\
         - Suggested next steps: share with stakeholders and include action items.",
        ChartKey::ALL.len()
    )
}
