//! Flattening of tasks into [`TaskView`]s.
//!
//! Each task carries a [`ParentRef`]; the view needs the parent's display
//! name. Lookups are linear scans over already-fetched lists and the first
//! match wins, so the functions here never touch the store.

use taskboard_core::{ParentRef, ParentTask, Task, TaskView};

/// One view per task, parent names resolved against `parents` and `tasks`.
pub fn join(parents: &[ParentTask], tasks: &[Task]) -> Vec<TaskView> {
    join_subset(parents, tasks, tasks)
}

/// Views for `selected`, resolving task-parents against `universe`.
///
/// Filtered reads pass the full task list as `universe` so a task whose
/// parent is another task keeps its parent name even when that parent is
/// not part of the selection.
pub fn join_subset(parents: &[ParentTask], universe: &[Task], selected: &[Task]) -> Vec<TaskView> {
    selected
        .iter()
        .map(|task| {
            let view = TaskView::from_task(task);
            match parent_name(parents, universe, task.parent) {
                Some(name) => view.with_parent_name(name),
                None => view,
            }
        })
        .collect()
}

/// Display name of the record `parent` points at.
pub fn parent_name<'a>(
    parents: &'a [ParentTask],
    tasks: &'a [Task],
    parent: ParentRef,
) -> Option<&'a str> {
    match parent {
        ParentRef::Parent(id) => parents
            .iter()
            .find(|p| p.parent_id == id)
            .map(|p| p.parent_task.as_str()),
        ParentRef::Task(id) => tasks
            .iter()
            .find(|t| t.task_id == id)
            .map(|t| t.task.as_str()),
    }
}
