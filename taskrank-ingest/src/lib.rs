//! taskrank-ingest: boundary parsing of task lists (JSON payloads, CSV exports).

pub mod errors;
pub mod parsers;
pub mod payload;

pub use errors::PayloadError;
pub use parsers::csv_tasks::{parse_tasks_csv, parse_tasks_csv_reader};
pub use payload::{parse_payload, tasks_from_value};
