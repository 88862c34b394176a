//! Series data for the analytics dashboard.
//!
//! Each builder produces a [`ChartData`] value (`labels` plus `datasets`)
//! shaped for the charting collaborator; nothing here draws anything.

use serde::Serialize;

use crate::error::{Result, TicketDeskError};
use crate::seed::{DAILY_TASK_HISTORY, HANDLER_PERFORMANCE, TASK_COUNTS, ZONAL_TASKS, ZonalTasks};
use crate::types::{Ticket, TicketStatus, Zone};

pub const BRAND_BLUE: &str = "#0078D4";
pub const BRAND_NAVY: &str = "#21304A";
pub const NEUTRAL_GREY: &str = "#7F7F7F";
const HISTORY_FILL: &str = "rgba(0, 120, 212, 0.1)";
const ZONAL_STACK: &str = "Stack 1";

/// Single colour or one colour per data point.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Color {
    Single(String),
    PerPoint(Vec<String>),
}

impl From<&str> for Color {
    fn from(value: &str) -> Self {
        Color::Single(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub data: Vec<u32>,
    pub background_color: Color,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tension: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
}

impl Dataset {
    fn new(label: Option<&str>, data: Vec<u32>, background: Color) -> Self {
        Self {
            label: label.map(str::to_string),
            data,
            background_color: background,
            border_color: None,
            border_width: None,
            stack: None,
            tension: None,
            fill: None,
        }
    }

    pub fn total(&self) -> u32 {
        self.data.iter().sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

/// Charts on the analytics dashboard, in export order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartKey {
    HistoryLine,
    HandlerBar,
    TaskDoughnut,
    ZonalBar,
}

impl ChartKey {
    pub const ALL: [ChartKey; 4] = [
        ChartKey::HistoryLine,
        ChartKey::HandlerBar,
        ChartKey::TaskDoughnut,
        ChartKey::ZonalBar,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ChartKey::HistoryLine => "1. Historical Daily Task Volume",
            ChartKey::HandlerBar => "2. Handler Performance: Total Tasks",
            ChartKey::TaskDoughnut => "3. Task Classification Distribution",
            ChartKey::ZonalBar => "4. Task Volume by Zone/Region",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ChartKey::HistoryLine => "Shows daily task volumes and trends over the week.",
            ChartKey::HandlerBar => "Displays each handler's total tasks completed in the week.",
            ChartKey::TaskDoughnut => "Illustrates the proportion of task types in the week.",
            ChartKey::ZonalBar => "Compares task counts across different zones/regions.",
        }
    }

    /// Series data backing this chart.
    pub fn data(self) -> ChartData {
        match self {
            ChartKey::HistoryLine => task_history(),
            ChartKey::HandlerBar => handler_performance(),
            ChartKey::TaskDoughnut => task_distribution(),
            ChartKey::ZonalBar => zonal_task_volume(),
        }
    }
}

impl std::fmt::Display for ChartKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let key = match self {
            ChartKey::HistoryLine => "history-line",
            ChartKey::HandlerBar => "handler-bar",
            ChartKey::TaskDoughnut => "task-doughnut",
            ChartKey::ZonalBar => "zonal-bar",
        };
        f.write_str(key)
    }
}

impl std::str::FromStr for ChartKey {
    type Err = TicketDeskError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_'))
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "historyline" | "history" => Ok(ChartKey::HistoryLine),
            "handlerbar" | "handler" => Ok(ChartKey::HandlerBar),
            "taskdoughnut" | "doughnut" => Ok(ChartKey::TaskDoughnut),
            "zonalbar" | "zonal" => Ok(ChartKey::ZonalBar),
            _ => Err(TicketDeskError::InvalidChartKey(s.to_string())),
        }
    }
}

/// Total tasks per handler, busiest first.
pub fn handler_performance() -> ChartData {
    let mut rows = HANDLER_PERFORMANCE.to_vec();
    rows.sort_by(|a, b| b.1.cmp(&a.1));
    ChartData {
        labels: rows.iter().map(|(h, _)| h.to_string()).collect(),
        datasets: vec![Dataset::new(
            Some("Total Tasks Handled"),
            rows.iter().map(|(_, n)| *n).collect(),
            BRAND_BLUE.into(),
        )],
    }
}

/// Share of each task classification.
pub fn task_distribution() -> ChartData {
    let mut dataset = Dataset::new(
        None,
        TASK_COUNTS.iter().map(|(_, n)| *n).collect(),
        Color::PerPoint(
            [BRAND_BLUE, BRAND_NAVY, NEUTRAL_GREY]
                .iter()
                .map(|c| c.to_string())
                .collect(),
        ),
    );
    dataset.border_width = Some(0);
    ChartData {
        labels: TASK_COUNTS.iter().map(|(k, _)| k.to_string()).collect(),
        datasets: vec![dataset],
    }
}

/// Stacked task volume per zone/region.
pub fn zonal_task_volume() -> ChartData {
    let series: [(&str, fn(&ZonalTasks) -> u32, &str); 3] = [
        ("Provisioning", |z: &ZonalTasks| z.provisioning, BRAND_BLUE),
        ("Maintenance", |z: &ZonalTasks| z.maintenance, BRAND_NAVY),
        ("Others", |z: &ZonalTasks| z.others, NEUTRAL_GREY),
    ];
    ChartData {
        labels: ZONAL_TASKS.iter().map(|z| z.region.to_string()).collect(),
        datasets: series
            .iter()
            .map(|&(label, pick, color)| {
                let mut dataset = Dataset::new(
                    Some(label),
                    ZONAL_TASKS.iter().map(pick).collect(),
                    color.into(),
                );
                dataset.stack = Some(ZONAL_STACK.to_string());
                dataset
            })
            .collect(),
    }
}

/// Daily task volume over the week as a filled line.
pub fn task_history() -> ChartData {
    let mut dataset = Dataset::new(
        Some("Daily Task Volume"),
        DAILY_TASK_HISTORY.iter().map(|(_, n)| *n).collect(),
        HISTORY_FILL.into(),
    );
    dataset.border_color = Some(BRAND_BLUE.into());
    dataset.tension = Some(0.3);
    dataset.fill = Some(true);
    ChartData {
        labels: DAILY_TASK_HISTORY.iter().map(|(d, _)| d.to_string()).collect(),
        datasets: vec![dataset],
    }
}

/// Live ticket counts per zone, stacked by status. Zones without tickets
/// are left out.
pub fn zone_status_breakdown(tickets: &[Ticket]) -> ChartData {
    let zones: Vec<Zone> = Zone::ALL
        .iter()
        .copied()
        .filter(|z| tickets.iter().any(|t| t.zone == *z))
        .collect();

    let colors = [NEUTRAL_GREY, BRAND_BLUE, BRAND_NAVY];
    let datasets = TicketStatus::ALL
        .iter()
        .zip(colors)
        .map(|(status, color)| {
            let data = zones
                .iter()
                .map(|zone| {
                    tickets
                        .iter()
                        .filter(|t| t.zone == *zone && t.status == *status)
                        .count() as u32
                })
                .collect();
            let label = status.to_string();
            let mut dataset = Dataset::new(Some(label.as_str()), data, color.into());
            dataset.stack = Some(ZONAL_STACK.to_string());
            dataset
        })
        .collect();

    ChartData {
        labels: zones.iter().map(|z| z.label().to_string()).collect(),
        datasets,
    }
}
