//! taskrank-core: task prioritization and dependency-cycle detection

pub mod analysis;
pub mod explain;
pub mod graph;
pub mod score;
pub mod strategy;
pub mod suggest;
pub mod task;
pub mod time;

pub use analysis::{analyze, assign_ids, Analysis, Analyzer, ScoredTask, TaskDiagnostic};
pub use explain::explain;
pub use graph::{
    count_blockers, detect_cycles, detect_cycles_with_limit, BlockerCounts, Cycle, CycleReport,
    DependencyGraph, DEFAULT_MAX_DEPTH,
};
pub use score::{
    score_task, DependencyBoost, Effort, PriorityBand, ScoreBreakdown, ScoringWeights, Urgency,
};
pub use strategy::SortStrategy;
pub use suggest::{suggest, Suggestion, Suggestions, DEFAULT_SUGGESTIONS};
pub use task::{Task, TaskId, DEFAULT_ESTIMATED_HOURS, DEFAULT_IMPORTANCE};
pub use time::{parse_due_date, today_in, today_local};
