use crate::clock::now_local;
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// Priority assigned to persisted entries that do not carry one.
pub const DEFAULT_PRIORITY: i64 = 3;

pub const DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

pub const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default = "generate_id")]
    pub id: String,
    pub title: String,
    /// `YYYY-MM-DD`, kept as written so that a bad value survives a rewrite.
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default = "default_priority")]
    pub priority: i64,
    #[serde(default = "created_now")]
    pub created_at: String,
}

impl Task {
    pub fn new(title: &str, priority: i64, due_date: Option<Date>) -> Result<Self, AppError> {
        let due_date = due_date
            .map(|date| date.format(DATE_FORMAT))
            .transpose()
            .map_err(|err| AppError::invalid_data(err.to_string()))?;

        Ok(Self {
            id: generate_id(),
            title: title.to_string(),
            due_date,
            priority,
            created_at: current_timestamp()?,
        })
    }

    /// Parsed due date. Missing and unparsable values both read as `None`.
    pub fn due(&self) -> Option<Date> {
        self.due_date.as_deref().and_then(parse_date)
    }

    pub fn due_label(&self) -> &str {
        self.due_date.as_deref().unwrap_or("None")
    }
}

pub fn current_timestamp() -> Result<String, AppError> {
    now_local()
        .format(TIMESTAMP_FORMAT)
        .map_err(|err| AppError::invalid_data(err.to_string()))
}

/// Strict `YYYY-MM-DD`: the year must start with a digit, so signed
/// years such as `-2025-01-01` are rejected.
pub fn parse_date(text: &str) -> Option<Date> {
    if !text.starts_with(|ch: char| ch.is_ascii_digit()) {
        return None;
    }

    Date::parse(text, DATE_FORMAT).ok()
}

pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn default_priority() -> i64 {
    DEFAULT_PRIORITY
}

fn created_now() -> String {
    current_timestamp().unwrap_or_default()
}
