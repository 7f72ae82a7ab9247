use planner_core::model::Task;
use planner_core::validate::format_date;
use tabled::settings::Style;
use tabled::{Table, Tabled};

pub const NO_SUGGESTION: &str = "No tasks available to suggest.";

#[derive(Tabled)]
struct TaskRow<'a> {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "Description")]
    title: &'a str,
    #[tabled(rename = "Priority")]
    priority: i64,
    #[tabled(rename = "Due Date")]
    due: &'a str,
    #[tabled(rename = "ID")]
    id: &'a str,
}

/// Rows are numbered from 1 in the order given; `delete <n>` uses the same
/// numbering.
pub fn task_table(tasks: &[Task]) -> String {
    let rows = tasks.iter().enumerate().map(|(index, task)| TaskRow {
        position: index + 1,
        title: &task.title,
        priority: task.priority,
        due: task.due_label(),
        id: &task.id,
    });

    let mut table = Table::new(rows);
    table.with(Style::sharp());
    table.to_string()
}

pub fn suggestion_line(task: Option<&Task>) -> String {
    match task {
        Some(task) => format!(
            "Next task to do: {} (Priority: {}, Due: {})",
            task.title,
            task.priority,
            task.due_label()
        ),
        None => NO_SUGGESTION.to_string(),
    }
}

pub fn task_details(task: &Task) -> String {
    let due = task
        .due_date
        .as_deref()
        .map(format_date)
        .unwrap_or_else(|| "None".to_string());

    format!(
        "ID: {}\nDescription: {}\nPriority: {}\nDue: {}\nCreated: {}",
        task.id, task.title, task.priority, due, task.created_at
    )
}

pub fn task_json(task: &Task) -> serde_json::Value {
    serde_json::json!({
        "id": task.id,
        "title": task.title,
        "priority": task.priority,
        "due_date": task.due_date,
        "created_at": task.created_at,
    })
}

pub fn tasks_json(tasks: &[Task]) -> serde_json::Value {
    serde_json::Value::Array(tasks.iter().map(task_json).collect())
}
