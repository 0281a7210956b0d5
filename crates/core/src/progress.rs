//! Derived progress aggregates and overdue computation.
//!
//! Everything here is a pure function over values passed in by the caller.
//! Progress is recomputed on every request and never persisted; "today" is
//! always an argument so tests can pin the clock.

use chrono::NaiveDate;
use serde::Serialize;

/// Categorical completion status derived from a project's task counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    NoTasks,
    Completed,
    AlmostDone,
    InProgress,
    Started,
    NotStarted,
}

/// Completion statistics for a project's task set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgressSummary {
    pub total_tasks: i64,
    pub completed_tasks: i64,
    pub pending_tasks: i64,
    /// 100 * completed / total, rounded to 2 decimals. 0.0 when there are no tasks.
    pub progress_percentage: f64,
    pub status: ProjectStatus,
}

impl ProgressSummary {
    /// Compute the five aggregate fields from task counts.
    ///
    /// `COMPLETED` is keyed on `completed == total` rather than a float
    /// comparison against 100.0.
    pub fn from_counts(total: i64, completed: i64) -> Self {
        debug_assert!(completed <= total);

        let percentage = progress_percentage(total, completed);
        let status = if total == 0 {
            ProjectStatus::NoTasks
        } else if completed == total {
            ProjectStatus::Completed
        } else if percentage >= 75.0 {
            ProjectStatus::AlmostDone
        } else if percentage >= 50.0 {
            ProjectStatus::InProgress
        } else if completed > 0 {
            ProjectStatus::Started
        } else {
            ProjectStatus::NotStarted
        };

        Self {
            total_tasks: total,
            completed_tasks: completed,
            pending_tasks: total - completed,
            progress_percentage: percentage,
            status,
        }
    }
}

/// 100 * completed / total, rounded to 2 decimals. 0.0 when `total` is 0.
pub fn progress_percentage(total: i64, completed: i64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let raw = completed as f64 * 100.0 / total as f64;
    (raw * 100.0).round() / 100.0
}

/// Whether a task is overdue: it has a due date, is not completed, and the
/// due date is strictly before `today`.
pub fn is_overdue(due_date: Option<NaiveDate>, completed: bool, today: NaiveDate) -> bool {
    match due_date {
        Some(due) => !completed && due < today,
        None => false,
    }
}
