//! Search filters over flattened views.

use taskboard_core::{TaskFilter, TaskView};

use crate::errors::{Invalid, TaskError};

/// Reject an inverted priority range. Only ranges with both ends set and
/// positive take part in filtering, so only those are checked.
pub fn validate(filter: &TaskFilter) -> Result<(), TaskError> {
    if let Some((from, to)) = priority_range(filter) {
        if from > to {
            return Err(TaskError::Validation(Invalid::PriorityRange { from, to }));
        }
    }
    Ok(())
}

/// Keep the views that satisfy every set criterion of `filter`.
pub fn apply(filter: &TaskFilter, views: Vec<TaskView>) -> Vec<TaskView> {
    let name = non_blank(filter.task.as_deref());
    let parent_name = non_blank(filter.parent_task.as_deref());
    let range = priority_range(filter);

    views
        .into_iter()
        .filter(|view| name.as_deref().map_or(true, |n| same_text(n, view.task.as_deref())))
        .filter(|view| {
            parent_name
                .as_deref()
                .map_or(true, |n| same_text(n, view.parent_task.as_deref()))
        })
        .filter(|view| {
            range.map_or(true, |(from, to)| {
                view.priority.is_some_and(|p| (from..=to).contains(&p))
            })
        })
        .filter(|view| filter.start_date.map_or(true, |d| view.start_date == Some(d)))
        .filter(|view| filter.end_date.map_or(true, |d| view.end_date == Some(d)))
        .collect()
}

fn priority_range(filter: &TaskFilter) -> Option<(i32, i32)> {
    match (filter.priority_from, filter.priority_to) {
        (Some(from), Some(to)) if from > 0 && to > 0 => Some((from, to)),
        _ => None,
    }
}

/// Lowercased, trimmed criterion, `None` when blank.
fn non_blank(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
}

fn same_text(wanted: &str, actual: Option<&str>) -> bool {
    actual.is_some_and(|a| a.to_lowercase() == wanted)
}
