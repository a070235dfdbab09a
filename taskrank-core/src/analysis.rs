//! Batch analysis: assign ids, analyze the dependency graph once, score every
//! task, rank.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::graph::{Cycle, DEFAULT_MAX_DEPTH, DependencyGraph};
use crate::score::{ScoreBreakdown, ScoringWeights, score_task};
use crate::task::{Task, TaskId};
use crate::time::today_local;

/// One ranked output record: the input task's fields plus its score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredTask {
    pub id: TaskId,
    pub title: Option<String>,
    pub due_date: Option<String>,
    /// Defaulted to 5 when the input had none.
    pub importance: i64,
    pub estimated_hours: Option<i64>,
    pub dependencies: Vec<TaskId>,
    pub score: f64,
    pub score_breakdown: ScoreBreakdown,
}

/// Per-task validation diagnostic. Nothing emits these yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDiagnostic {
    pub task_id: TaskId,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    /// Highest score first; equal scores keep input order.
    pub sorted: Vec<ScoredTask>,
    pub cycles: Vec<Cycle>,
    pub errors: Vec<TaskDiagnostic>,
}

/// Give every task an id: its own, else its title, else `__idx_<position>`.
pub fn assign_ids(tasks: &[Task]) -> Vec<Task> {
    tasks
        .iter()
        .enumerate()
        .map(|(i, t)| Task {
            id: Some(batch_id(t, i)),
            ..t.clone()
        })
        .collect()
}

fn batch_id(task: &Task, position: usize) -> TaskId {
    task.id
        .clone()
        .or_else(|| task.title.clone().map(TaskId::Text))
        .unwrap_or_else(|| TaskId::Text(format!("__idx_{position}")))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Analyzer {
    weights: ScoringWeights,
    max_depth: usize,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(ScoringWeights::default())
    }
}

impl Analyzer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self {
            weights,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Override the cycle-detection depth limit.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Rank a batch. `today` defaults to the host's current date.
    pub fn analyze(&self, tasks: &[Task], today: Option<NaiveDate>) -> Analysis {
        let today = today.unwrap_or_else(today_local);
        let tasks = assign_ids(tasks);

        let graph = DependencyGraph::build(&tasks);
        let cycles = graph.detect_cycles(self.max_depth).cycles;
        let blockers = graph.blocker_counts();

        let mut sorted: Vec<ScoredTask> = tasks
            .into_iter()
            .enumerate()
            .map(|(i, task)| {
                let (score, score_breakdown) = score_task(&task, today, &blockers, &self.weights);
                let importance = task.effective_importance();
                ScoredTask {
                    id: batch_id(&task, i),
                    title: task.title,
                    due_date: task.due_date,
                    importance,
                    estimated_hours: task.estimated_hours,
                    dependencies: task.dependencies,
                    score,
                    score_breakdown,
                }
            })
            .collect();

        // `sort_by` is stable: ties keep input order.
        sorted.sort_by(|a, b| b.score.total_cmp(&a.score));

        tracing::debug!(
            tasks = sorted.len(),
            cycles = cycles.len(),
            %today,
            "analyzed task batch"
        );

        Analysis {
            sorted,
            cycles,
            errors: Vec::new(),
        }
    }
}

/// [`Analyzer::analyze`] with default weights.
pub fn analyze(tasks: &[Task], today: Option<NaiveDate>) -> Analysis {
    Analyzer::default().analyze(tasks, today)
}
