//! Checks applied to raw user input before anything reaches the store.

use crate::error::AppError;
use crate::model::{Task, parse_date};
use time::Date;
use time::macros::format_description;

pub const ALLOWED_PRIORITIES: [i64; 3] = [1, 2, 3];

/// Empty text means "no date" and is accepted.
pub fn validate_date(text: &str) -> bool {
    text.is_empty() || parse_date(text).is_some()
}

/// `2025-07-21` becomes `July 21, 2025`; anything else comes back unchanged.
pub fn format_date(text: &str) -> String {
    parse_date(text)
        .and_then(|date| {
            date.format(format_description!("[month repr:long] [day], [year]"))
                .ok()
        })
        .unwrap_or_else(|| text.to_string())
}

pub fn parse_priority(text: &str) -> Result<i64, AppError> {
    text.trim()
        .parse::<i64>()
        .ok()
        .filter(|priority| ALLOWED_PRIORITIES.contains(priority))
        .ok_or_else(|| AppError::invalid_input("Priority must be 1, 2, or 3."))
}

pub fn parse_due_date(text: &str) -> Result<Option<Date>, AppError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    if !validate_date(trimmed) {
        return Err(AppError::invalid_input(
            "Due date must be in YYYY-MM-DD format.",
        ));
    }

    Ok(parse_date(trimmed))
}

/// Raw add-task form values.
#[derive(Debug, Clone, Copy)]
pub struct TaskInput<'a> {
    pub title: &'a str,
    pub priority: &'a str,
    pub due_date: &'a str,
}

impl TaskInput<'_> {
    pub fn parse(&self) -> Result<Task, AppError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(AppError::invalid_input("Please enter a task description."));
        }

        let priority = parse_priority(self.priority)?;
        let due_date = parse_due_date(self.due_date)?;
        Task::new(title, priority, due_date)
    }
}

#[cfg(test)]
mod tests {
    use super::{TaskInput, format_date, parse_due_date, parse_priority, validate_date};

    #[test]
    fn validate_date_accepts_empty_and_real_dates() {
        assert!(validate_date(""));
        assert!(validate_date("2024-12-01"));
        assert!(!validate_date("2025-02-30"));
        assert!(!validate_date("invalid"));
    }

    #[test]
    fn signed_years_are_rejected() {
        for text in ["-2025-01-01", "+2025-01-01"] {
            assert!(!validate_date(text), "{text} should be rejected");
            assert_eq!(parse_due_date(text).unwrap_err().code(), "invalid_input");
        }
        assert_eq!(format_date("-2025-01-01"), "-2025-01-01");
    }

    #[test]
    fn format_date_is_readable() {
        assert_eq!(format_date("2025-07-21"), "July 21, 2025");
        assert_eq!(format_date("invalid"), "invalid");
        assert_eq!(format_date(""), "");
    }

    #[test]
    fn parse_priority_only_accepts_one_to_three() {
        assert_eq!(parse_priority("1").unwrap(), 1);
        assert_eq!(parse_priority(" 3 ").unwrap(), 3);
        assert_eq!(parse_priority("4").unwrap_err().code(), "invalid_input");
        assert!(parse_priority("high").is_err());
    }

    #[test]
    fn task_input_builds_trimmed_task() {
        let task = TaskInput {
            title: "  Write report ",
            priority: "1",
            due_date: " 2025-01-01 ",
        }
        .parse()
        .unwrap();

        assert_eq!(task.title, "Write report");
        assert_eq!(task.priority, 1);
        assert_eq!(task.due_date.as_deref(), Some("2025-01-01"));
    }

    #[test]
    fn task_input_without_date_has_no_deadline() {
        let task = TaskInput {
            title: "Someday",
            priority: "2",
            due_date: "",
        }
        .parse()
        .unwrap();

        assert_eq!(task.due_date, None);
    }

    #[test]
    fn task_input_reports_each_problem() {
        let blank = TaskInput {
            title: "   ",
            priority: "1",
            due_date: "",
        };
        assert_eq!(
            blank.parse().unwrap_err().message(),
            "Please enter a task description."
        );

        let bad_priority = TaskInput {
            title: "demo",
            priority: "7",
            due_date: "",
        };
        assert_eq!(
            bad_priority.parse().unwrap_err().message(),
            "Priority must be 1, 2, or 3."
        );

        let bad_date = TaskInput {
            title: "demo",
            priority: "2",
            due_date: "01/02/2025",
        };
        assert_eq!(
            bad_date.parse().unwrap_err().message(),
            "Due date must be in YYYY-MM-DD format."
        );
    }
}
