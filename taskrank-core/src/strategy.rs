//! Alternative orderings for an already-ranked list.
//!
//! Analysis always ranks by score. These strategies re-order the result for
//! display: all sorts are stable, so the score order breaks remaining ties.

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::analysis::ScoredTask;
use crate::task::effective_hours;
use crate::time::parse_due_date;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortStrategy {
    /// Keep the score order.
    #[default]
    Smart,
    /// Least effort first.
    Fastest,
    /// Most important first.
    Impact,
    /// Earliest due date first; undated tasks last.
    Deadline,
}

impl SortStrategy {
    pub fn apply(&self, tasks: &mut [ScoredTask]) {
        match self {
            SortStrategy::Smart => {}
            SortStrategy::Fastest => tasks.sort_by(|a, b| {
                effective_hours(a.estimated_hours)
                    .cmp(&effective_hours(b.estimated_hours))
                    .then_with(|| by_score_desc(a, b))
            }),
            SortStrategy::Impact => tasks.sort_by(|a, b| {
                b.importance
                    .cmp(&a.importance)
                    .then_with(|| by_score_desc(a, b))
            }),
            SortStrategy::Deadline => tasks.sort_by_key(|t| {
                match t.due_date.as_deref().and_then(parse_due_date) {
                    Some(d) => (0, Some(d)),
                    None => (1, None),
                }
            }),
        }
    }
}

fn by_score_desc(a: &ScoredTask, b: &ScoredTask) -> Ordering {
    b.score.total_cmp(&a.score)
}

impl fmt::Display for SortStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortStrategy::Smart => "smart",
            SortStrategy::Fastest => "fastest",
            SortStrategy::Impact => "impact",
            SortStrategy::Deadline => "deadline",
        })
    }
}

impl FromStr for SortStrategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "smart" | "smart-balance" | "balanced" => Ok(SortStrategy::Smart),
            "fastest" | "fastest-wins" => Ok(SortStrategy::Fastest),
            "impact" | "high-impact" => Ok(SortStrategy::Impact),
            "deadline" | "deadline-driven" => Ok(SortStrategy::Deadline),
            other => bail!("unknown sort strategy: {other} (expected smart, fastest, impact or deadline)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::task::Task;
    use chrono::NaiveDate;

    fn ranked() -> Vec<ScoredTask> {
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let tasks = vec![
            Task::new("urgent").with_due_date("2026-03-09").with_hours(6).with_importance(4),
            Task::new("small").with_hours(1).with_importance(2),
            Task::new("big-deal").with_due_date("2026-04-30").with_hours(12).with_importance(10),
            Task::new("soon").with_due_date("2026-03-12").with_hours(2).with_importance(6),
        ];
        analyze(&tasks, Some(today)).sorted
    }

    fn order(tasks: &[ScoredTask]) -> Vec<String> {
        tasks.iter().map(|t| t.id.to_string()).collect()
    }

    #[test]
    fn test_smart_keeps_score_order() {
        let mut tasks = ranked();
        let before = order(&tasks);
        SortStrategy::Smart.apply(&mut tasks);
        assert_eq!(order(&tasks), before);
        assert_eq!(before[0], "urgent");
    }

    #[test]
    fn test_fastest() {
        let mut tasks = ranked();
        SortStrategy::Fastest.apply(&mut tasks);
        assert_eq!(order(&tasks), vec!["small", "soon", "urgent", "big-deal"]);
    }

    #[test]
    fn test_impact() {
        let mut tasks = ranked();
        SortStrategy::Impact.apply(&mut tasks);
        assert_eq!(order(&tasks), vec!["big-deal", "soon", "urgent", "small"]);
    }

    #[test]
    fn test_deadline_puts_undated_last() {
        let mut tasks = ranked();
        SortStrategy::Deadline.apply(&mut tasks);
        assert_eq!(order(&tasks), vec!["urgent", "soon", "big-deal", "small"]);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("Fastest".parse::<SortStrategy>().unwrap(), SortStrategy::Fastest);
        assert_eq!("smart".parse::<SortStrategy>().unwrap(), SortStrategy::Smart);
        assert!("random".parse::<SortStrategy>().is_err());
        assert_eq!(SortStrategy::Deadline.to_string(), "deadline");
    }
}
