use thiserror::Error;

use crate::workflow::backend::BackendError;

#[derive(Error, Debug)]
pub enum TicketDeskError {
    #[error("ticket '{0}' not found")]
    TicketNotFound(String),

    #[error("invalid ticket id '{0}'")]
    InvalidTicketId(String),

    #[error("invalid zone '{0}'")]
    InvalidZone(String),

    #[error("invalid status '{0}'")]
    InvalidStatus(String),

    #[error("invalid sort column '{0}'")]
    InvalidSortColumn(String),

    #[error("invalid sort direction '{0}'")]
    InvalidSortDirection(String),

    #[error("invalid batch target '{0}', expected 'start' or 'resolve'")]
    InvalidBatchTarget(String),

    #[error("invalid task classification '{0}'")]
    InvalidClassification(String),

    #[error("invalid request type '{0}'")]
    InvalidRequestType(String),

    #[error("invalid priority '{0}'")]
    InvalidPriority(String),

    #[error("invalid chart key '{0}'")]
    InvalidChartKey(String),

    #[error("invalid chart capture '{0}', expected KEY=PATH")]
    InvalidCapture(String),

    #[error("missing mandatory fields: {}", .0.join(", "))]
    IncompleteDraft(Vec<&'static str>),

    #[error("no chart canvases with valid data were found")]
    NothingToExport,

    #[error("backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TicketDeskError>;
