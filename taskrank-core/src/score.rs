//! Per-task priority scoring.
//!
//! A score is the sum of four independent contributions, evaluated in a
//! fixed order: urgency, importance, effort, dependency blocking. Each one is
//! recorded in a [`ScoreBreakdown`] so callers can explain the ranking.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::graph::BlockerCounts;
use crate::task::Task;
use crate::time::parse_due_date;

/// Tunable weights. Defaults reproduce the stock ranking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Urgency for a task due today; decays linearly to 0 at `max_days_decay`.
    pub urgency_close: f64,
    /// Days over which upcoming urgency decays.
    pub max_days_decay: i64,
    /// Flat urgency for overdue tasks.
    pub overdue_base: f64,
    pub overdue_per_day: f64,
    /// Cap on the per-day overdue increment.
    pub overdue_cap: f64,
    pub no_due_date_bonus: f64,
    /// Multiplied by importance (1-10).
    pub importance: f64,
    pub quick_win_bonus: f64,
    /// Tasks at or under this many hours are quick wins.
    pub quick_win_max_hours: i64,
    pub effort_penalty_per_hour: f64,
    pub effort_penalty_cap: f64,
    /// Multiplied by ln(1 + blocker count).
    pub dependency_blocker: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            urgency_close: 40.0,
            max_days_decay: 30,
            overdue_base: 100.0,
            overdue_per_day: 5.0,
            overdue_cap: 100.0,
            no_due_date_bonus: 5.0,
            importance: 6.0,
            quick_win_bonus: 12.0,
            quick_win_max_hours: 2,
            effort_penalty_per_hour: 1.5,
            effort_penalty_cap: 20.0,
            dependency_blocker: 20.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Urgency {
    NoDueDate { bonus: f64 },
    Overdue { days_overdue: i64, boost: f64 },
    Upcoming { days_until_due: i64, boost: f64 },
}

impl Urgency {
    pub fn contribution(&self) -> f64 {
        match *self {
            Urgency::NoDueDate { bonus } => bonus,
            Urgency::Overdue { boost, .. } | Urgency::Upcoming { boost, .. } => boost,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Effort {
    QuickWin { hours: i64, bonus: f64 },
    Penalty { hours: i64, penalty: f64 },
}

impl Effort {
    /// Signed: penalties are negative.
    pub fn contribution(&self) -> f64 {
        match *self {
            Effort::QuickWin { bonus, .. } => bonus,
            Effort::Penalty { penalty, .. } => -penalty,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DependencyBoost {
    NoBlocks,
    Blocks { count: u32, boost: f64 },
}

impl DependencyBoost {
    pub fn contribution(&self) -> f64 {
        match *self {
            DependencyBoost::NoBlocks => 0.0,
            DependencyBoost::Blocks { boost, .. } => boost,
        }
    }
}

/// How a task's score was assembled. Decimal values are rounded to 2 places.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub days_until_due: Option<i64>,
    pub urgency: Urgency,
    pub importance: f64,
    pub effort: Effort,
    pub dependency: DependencyBoost,
    pub raw_score: f64,
}

/// Display band for a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityBand {
    High,
    Medium,
    Low,
}

impl PriorityBand {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            PriorityBand::High
        } else if score >= 40.0 {
            PriorityBand::Medium
        } else {
            PriorityBand::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PriorityBand::High => "high",
            PriorityBand::Medium => "medium",
            PriorityBand::Low => "low",
        }
    }
}

pub(crate) fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Score one task against `today`.
/// Returns (score, breakdown); higher score = higher priority.
pub fn score_task(
    task: &Task,
    today: NaiveDate,
    blockers: &BlockerCounts,
    weights: &ScoringWeights,
) -> (f64, ScoreBreakdown) {
    let due = task.due_date.as_deref().and_then(parse_due_date);
    let days_until_due = due.map(|d| (d - today).num_days());

    let urgency = urgency(days_until_due, weights);
    let importance = task.effective_importance() as f64 * weights.importance;
    let effort = effort(task.effective_hours(), weights);

    let count = task.id.as_ref().map_or(0, |id| blockers.get(id));
    let dependency = if count > 0 {
        DependencyBoost::Blocks {
            count,
            boost: weights.dependency_blocker * f64::from(count).ln_1p(),
        }
    } else {
        DependencyBoost::NoBlocks
    };

    let score = round2(
        urgency.contribution() + importance + effort.contribution() + dependency.contribution(),
    );

    let breakdown = ScoreBreakdown {
        days_until_due,
        urgency: rounded_urgency(urgency),
        importance: round2(importance),
        effort: rounded_effort(effort),
        dependency: rounded_dependency(dependency),
        raw_score: score,
    };

    (score, breakdown)
}

fn urgency(days_until_due: Option<i64>, w: &ScoringWeights) -> Urgency {
    match days_until_due {
        None => Urgency::NoDueDate {
            bonus: w.no_due_date_bonus,
        },
        Some(days) if days < 0 => {
            let days_overdue = days.saturating_abs();
            let extra = (days_overdue as f64 * w.overdue_per_day).min(w.overdue_cap);
            Urgency::Overdue {
                days_overdue,
                boost: w.overdue_base + extra,
            }
        }
        Some(days) => {
            let horizon = w.max_days_decay.max(1);
            let closeness = (horizon - days).max(0) as f64 / horizon as f64;
            Urgency::Upcoming {
                days_until_due: days,
                boost: w.urgency_close * closeness,
            }
        }
    }
}

fn effort(hours: i64, w: &ScoringWeights) -> Effort {
    if hours <= w.quick_win_max_hours {
        Effort::QuickWin {
            hours,
            bonus: w.quick_win_bonus,
        }
    } else {
        let excess = hours.saturating_sub(w.quick_win_max_hours) as f64;
        Effort::Penalty {
            hours,
            penalty: (excess * w.effort_penalty_per_hour).min(w.effort_penalty_cap),
        }
    }
}

fn rounded_urgency(u: Urgency) -> Urgency {
    match u {
        Urgency::NoDueDate { bonus } => Urgency::NoDueDate { bonus: round2(bonus) },
        Urgency::Overdue { days_overdue, boost } => Urgency::Overdue {
            days_overdue,
            boost: round2(boost),
        },
        Urgency::Upcoming { days_until_due, boost } => Urgency::Upcoming {
            days_until_due,
            boost: round2(boost),
        },
    }
}

fn rounded_effort(e: Effort) -> Effort {
    match e {
        Effort::QuickWin { hours, bonus } => Effort::QuickWin {
            hours,
            bonus: round2(bonus),
        },
        Effort::Penalty { hours, penalty } => Effort::Penalty {
            hours,
            penalty: round2(penalty),
        },
    }
}

fn rounded_dependency(d: DependencyBoost) -> DependencyBoost {
    match d {
        DependencyBoost::NoBlocks => DependencyBoost::NoBlocks,
        DependencyBoost::Blocks { count, boost } => DependencyBoost::Blocks {
            count,
            boost: round2(boost),
        },
    }
}
