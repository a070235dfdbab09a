//! Reading task lists from files or stdin.

use anyhow::{Context, Result};
use clap::ValueEnum;
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use taskrank_core::Task;
use taskrank_ingest::{parse_payload, parse_tasks_csv, parse_tasks_csv_reader};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    Json,
    Csv,
}

impl InputFormat {
    /// `.csv` files are CSV; everything else is JSON.
    pub fn infer(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => InputFormat::Csv,
            _ => InputFormat::Json,
        }
    }
}

fn is_stdin(path: Option<&Path>) -> bool {
    path.is_none_or(|p| p.as_os_str() == "-")
}

/// Load tasks from `path` (or stdin when absent or `-`).
pub fn load_tasks(path: Option<&Path>, format: Option<InputFormat>) -> Result<Vec<Task>> {
    let tasks = match path {
        Some(p) if !is_stdin(Some(p)) => {
            match format.unwrap_or_else(|| InputFormat::infer(p)) {
                InputFormat::Json => {
                    let body = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
                    parse_payload(&body).with_context(|| format!("parsing {}", p.display()))?
                }
                InputFormat::Csv => {
                    parse_tasks_csv(p).with_context(|| format!("parsing {}", p.display()))?
                }
            }
        }
        _ => match format.unwrap_or(InputFormat::Json) {
            InputFormat::Json => {
                let mut body = String::new();
                io::stdin().read_to_string(&mut body).context("read stdin")?;
                parse_payload(&body).context("parsing stdin")?
            }
            InputFormat::Csv => parse_tasks_csv_reader(io::stdin()).context("parsing stdin")?,
        },
    };

    tracing::info!(count = tasks.len(), "loaded tasks");
    Ok(tasks)
}
