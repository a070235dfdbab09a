//! Errors for structurally invalid task payloads.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PayloadError {
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("JSON must be an array of tasks or {{ \"tasks\": [...] }}")]
    UnexpectedShape,

    #[error("task #{index} is not an object")]
    NotAnObject { index: usize },

    #[error("task #{index} is not a valid task record: {source}")]
    InvalidTask {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
