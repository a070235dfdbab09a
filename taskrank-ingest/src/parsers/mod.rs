//! File-format parsers that produce core tasks.

pub mod csv_tasks;
