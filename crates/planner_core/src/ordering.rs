use crate::model::Task;
use std::cmp::Ordering;
use time::Date;

/// Ascending priority, then ascending due date. Tasks without a usable due
/// date go after every dated task of the same priority.
pub fn schedule_order(a: &Task, b: &Task) -> Ordering {
    a.priority
        .cmp(&b.priority)
        .then_with(|| compare_due(a.due(), b.due()))
}

pub fn compare_due(a: Option<Date>, b: Option<Date>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Stable copy of `tasks` in schedule order.
pub fn sort_tasks(tasks: &[Task]) -> Vec<Task> {
    let mut sorted = tasks.to_vec();
    sorted.sort_by(schedule_order);
    sorted
}
