//! Deterministic task suggestions.
//!
//! The engine holds no task state. It is built once by the caller and handed
//! to whatever needs a recommendation.

use crate::clock::{Clock, SystemClock};
use crate::model::Task;
use crate::ordering::{compare_due, sort_tasks};

#[derive(Debug, Clone, Default)]
pub struct SuggestionEngine<C = SystemClock> {
    clock: C,
}

impl SuggestionEngine<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<C: Clock> SuggestionEngine<C> {
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    /// Every task, in the same order as the store's sorted view.
    pub fn suggest_schedule(&self, tasks: &[Task]) -> Vec<Task> {
        sort_tasks(tasks)
    }

    /// Tasks due today or earlier win over everything else; among them the
    /// lowest priority number, then the earliest due date. With nothing
    /// urgent, the lowest priority number overall, first in input order.
    pub fn suggest_next_task(&self, tasks: &[Task]) -> Option<Task> {
        let today = self.clock.today();

        let urgent = tasks
            .iter()
            .filter_map(|task| task.due().map(|due| (task, due)))
            .filter(|(_, due)| *due <= today)
            .min_by(|(a, a_due), (b, b_due)| {
                a.priority
                    .cmp(&b.priority)
                    .then_with(|| compare_due(Some(*a_due), Some(*b_due)))
            })
            .map(|(task, _)| task);

        let picked = match urgent {
            Some(task) => {
                tracing::debug!(task_id = %task.id, "suggesting urgent task");
                Some(task)
            }
            None => tasks.iter().min_by_key(|task| task.priority),
        };

        picked.cloned()
    }
}
