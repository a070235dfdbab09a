//! Top-N suggestions: the head of an analysis, each with an explanation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::analysis::{Analyzer, ScoredTask};
use crate::explain::explain;
use crate::graph::Cycle;
use crate::task::Task;

pub const DEFAULT_SUGGESTIONS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(flatten)]
    pub task: ScoredTask,
    pub explanation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Suggestions {
    pub top: Vec<Suggestion>,
    pub cycles: Vec<Cycle>,
}

impl Analyzer {
    /// Analyze the batch and explain the `limit` highest-ranked tasks.
    pub fn suggest(&self, tasks: &[Task], today: Option<NaiveDate>, limit: usize) -> Suggestions {
        let analysis = self.analyze(tasks, today);
        let top = analysis
            .sorted
            .into_iter()
            .take(limit)
            .map(|task| Suggestion {
                explanation: explain(&task.score_breakdown),
                task,
            })
            .collect();

        Suggestions {
            top,
            cycles: analysis.cycles,
        }
    }
}

/// Top three with default weights.
pub fn suggest(tasks: &[Task], today: Option<NaiveDate>) -> Suggestions {
    Analyzer::default().suggest(tasks, today, DEFAULT_SUGGESTIONS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
    }

    #[test]
    fn test_takes_top_three_in_rank_order() {
        let tasks: Vec<Task> = (1..=5).map(|i: i64| Task::new(i).with_importance(i)).collect();
        let s = suggest(&tasks, Some(today()));
        let ids: Vec<String> = s.top.iter().map(|t| t.task.id.to_string()).collect();
        assert_eq!(ids, vec!["5", "4", "3"]);
        assert!(s.top.iter().all(|t| !t.explanation.is_empty()));
    }

    #[test]
    fn test_fewer_tasks_than_limit() {
        let s = suggest(&[Task::new("only").with_due_date("2026-03-12")], Some(today()));
        assert_eq!(s.top.len(), 1);
        assert!(s.top[0].explanation.starts_with("Due in 2 day(s)."));
    }

    #[test]
    fn test_cycles_pass_through() {
        let tasks = vec![
            Task::new("a").with_dependencies(["b"]),
            Task::new("b").with_dependencies(["a"]),
        ];
        let s = Analyzer::default().suggest(&tasks, Some(today()), 1);
        assert_eq!(s.top.len(), 1);
        assert_eq!(s.cycles.len(), 1);
    }

    #[test]
    fn test_explanation_is_flattened_next_to_task_fields() {
        let s = suggest(&[Task::new("x")], Some(today()));
        let v = serde_json::to_value(&s).unwrap();
        assert_eq!(v["top"][0]["id"], "x");
        assert!(v["top"][0]["explanation"].is_string());
        assert!(v["top"][0]["score_breakdown"].is_object());
    }
}
