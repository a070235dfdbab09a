//! Human-readable, one-line explanations rendered from a score breakdown.

use crate::score::{DependencyBoost, Effort, ScoreBreakdown};

/// Render a breakdown as a sentence per contribution, joined by spaces.
///
/// The due-date sentence is omitted when the task has no due date.
pub fn explain(breakdown: &ScoreBreakdown) -> String {
    let mut lines: Vec<String> = Vec::new();

    if let Some(days) = breakdown.days_until_due {
        lines.push(match days {
            d if d < 0 => format!("Overdue by {} day(s).", d.saturating_abs()),
            0 => "Due today.".to_string(),
            d => format!("Due in {d} day(s)."),
        });
    }

    lines.push(format!(
        "Importance contributed {}.",
        fmt_amount(breakdown.importance)
    ));

    lines.push(match breakdown.effort {
        Effort::QuickWin { bonus, .. } => {
            format!("Effort adjustment: quick win +{}.", fmt_amount(bonus))
        }
        Effort::Penalty { penalty, .. } => {
            format!("Effort adjustment: penalty -{}.", fmt_amount(penalty))
        }
    });

    lines.push(match breakdown.dependency {
        DependencyBoost::NoBlocks => "no blocks.".to_string(),
        DependencyBoost::Blocks { count, boost } => {
            format!("blocks {count} tasks +{}.", fmt_amount(boost))
        }
    });

    lines.join(" ")
}

/// Two decimals at most; whole numbers print without a fraction.
fn fmt_amount(v: f64) -> String {
    let r = crate::score::round2(v);
    if r.fract() == 0.0 {
        format!("{r:.0}")
    } else {
        format!("{r}")
    }
}
