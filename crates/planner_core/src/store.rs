use crate::error::AppError;
use crate::model::{Task, generate_id};
use crate::ordering::sort_tasks;
use crate::storage::json_store;
use std::collections::HashSet;
use std::path::PathBuf;

/// Owns the task collection and its file. Every mutation rewrites the file
/// before returning; a failed write leaves the collection as it was.
#[derive(Debug)]
pub struct TaskStore {
    path: PathBuf,
    tasks: Vec<Task>,
}

impl TaskStore {
    /// Opens the store at `path`, starting empty when the file is missing
    /// or unreadable.
    pub fn open<P: Into<PathBuf>>(path: P) -> Self {
        let mut store = Self {
            path: path.into(),
            tasks: Vec::new(),
        };
        store.load();
        store
    }

    /// Repeated ids get a fresh one, written back on the next mutation.
    pub fn load(&mut self) {
        self.tasks = match json_store::load_tasks(&self.path) {
            Ok(tasks) => {
                tracing::debug!(path = %self.path.display(), count = tasks.len(), "loaded tasks");
                dedupe_ids(tasks)
            }
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "task store unreadable, starting empty"
                );
                Vec::new()
            }
        };
    }

    /// Insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn add(&mut self, task: Task) -> Result<(), AppError> {
        self.tasks.push(task);
        if let Err(err) = self.persist() {
            self.tasks.pop();
            return Err(err);
        }

        if let Some(task) = self.tasks.last() {
            tracing::debug!(task_id = %task.id, "added task");
        }
        Ok(())
    }

    /// Removes the task at `index` in insertion order. Out-of-range indexes
    /// are ignored and yield `None`.
    pub fn delete(&mut self, index: usize) -> Result<Option<Task>, AppError> {
        if index >= self.tasks.len() {
            tracing::debug!(index, len = self.tasks.len(), "delete index out of range");
            return Ok(None);
        }

        self.remove_at(index).map(Some)
    }

    pub fn delete_by_id(&mut self, id: &str) -> Result<Task, AppError> {
        let trimmed_id = id.trim();
        if trimmed_id.is_empty() {
            return Err(AppError::invalid_input("id is required"));
        }

        let index = self
            .tasks
            .iter()
            .position(|task| task.id == trimmed_id)
            .ok_or_else(|| AppError::invalid_input("task not found"))?;

        self.remove_at(index)
    }

    /// Priority, then due date, undated last. Never touches stored order.
    pub fn sorted_view(&self) -> Vec<Task> {
        sort_tasks(&self.tasks)
    }

    fn remove_at(&mut self, index: usize) -> Result<Task, AppError> {
        let removed = self.tasks.remove(index);
        if let Err(err) = self.persist() {
            self.tasks.insert(index, removed);
            return Err(err);
        }

        tracing::debug!(task_id = %removed.id, "deleted task");
        Ok(removed)
    }

    fn persist(&self) -> Result<(), AppError> {
        json_store::save_tasks(&self.path, &self.tasks)
    }
}

fn dedupe_ids(mut tasks: Vec<Task>) -> Vec<Task> {
    let mut seen = HashSet::new();
    for task in &mut tasks {
        if !seen.insert(task.id.clone()) {
            let fresh = generate_id();
            tracing::warn!(duplicate = %task.id, replacement = %fresh, "reassigning repeated task id");
            task.id = fresh.clone();
            seen.insert(fresh);
        }
    }
    tasks
}
