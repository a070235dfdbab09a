//! CSV task lists.
//!
//! Header row required; columns are matched by name (case-insensitive) and
//! may appear in any order:
//!   id,title,due_date,importance,estimated_hours,dependencies
//! Unknown columns are ignored and missing ones are treated as empty.
//! Dependencies are `;`-separated ids. All ids are read as text.

use std::collections::HashMap;
use std::io;
use std::path::Path;

use csv::StringRecord;
use taskrank_core::task::parse_lenient_int;
use taskrank_core::{Task, TaskId};

use crate::errors::PayloadError;

const DEPENDENCY_SEPARATOR: char = ';';

/// Parse a CSV file of tasks.
pub fn parse_tasks_csv(path: impl AsRef<Path>) -> Result<Vec<Task>, PayloadError> {
    let rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path.as_ref())?;
    read_tasks(rdr)
}

/// Parse CSV tasks from any reader (stdin, an in-memory buffer).
pub fn parse_tasks_csv_reader<R: io::Read>(reader: R) -> Result<Vec<Task>, PayloadError> {
    let rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    read_tasks(rdr)
}

fn read_tasks<R: io::Read>(mut rdr: csv::Reader<R>) -> Result<Vec<Task>, PayloadError> {
    let columns: HashMap<String, usize> = rdr
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, name)| (name.to_lowercase(), i))
        .collect();

    let mut tasks = Vec::new();
    for result in rdr.records() {
        let record = result?;
        if record.iter().all(str::is_empty) {
            continue;
        }

        let get = |name: &str| cell(&record, &columns, name);

        tasks.push(Task {
            id: get("id").map(TaskId::from),
            title: get("title").map(str::to_string),
            due_date: get("due_date").map(str::to_string),
            importance: get("importance").and_then(parse_lenient_int),
            estimated_hours: get("estimated_hours").and_then(parse_lenient_int),
            dependencies: get("dependencies").map(split_dependencies).unwrap_or_default(),
        });
    }

    Ok(tasks)
}

fn split_dependencies(raw: &str) -> Vec<TaskId> {
    raw.split(DEPENDENCY_SEPARATOR)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(TaskId::from)
        .collect()
}

/// Non-empty cell under `name`, if the column exists.
fn cell<'r>(record: &'r StringRecord, columns: &HashMap<String, usize>, name: &str) -> Option<&'r str> {
    columns
        .get(name)
        .and_then(|&i| record.get(i))
        .filter(|s| !s.is_empty())
}
