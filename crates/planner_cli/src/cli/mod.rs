use clap::{Parser, Subcommand};
use planner_core::config::ConfigOverrides;
use planner_core::error::AppError;
use planner_core::validate::parse_priority;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "planner", author, version, about = "Daily task planner", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Override configuration values (format KEY=VALUE)
    #[arg(long = "config-override", value_name = "KEY=VALUE", global = true)]
    pub config_override: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a new task
    ///
    /// Example: planner add "Write report" -p 1 -d 2025-01-01
    Add {
        title: Option<String>,
        /// 1 (highest) to 3
        #[arg(short, long)]
        priority: Option<String>,
        /// Due date, YYYY-MM-DD
        #[arg(short, long = "due", value_name = "YYYY-MM-DD")]
        due: Option<String>,
    },
    /// List tasks by priority and due date
    ///
    /// Example: planner list
    List,
    /// Delete a task by id or by its position in `list`
    ///
    /// Example: planner delete 2
    Delete { selector: String },
    /// Show details of a task
    ///
    /// Example: planner show 5f0c...
    Show { id: String },
    /// Suggest an order to work through every task
    ///
    /// Example: planner suggest
    Suggest,
    /// Suggest the single next task, preferring anything due today or overdue
    ///
    /// Example: planner next
    Next,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOverrideTarget {
    Theme,
    StorePath,
    DefaultPriority,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedConfigOverride {
    pub target: ConfigOverrideTarget,
    pub value: String,
}

/// Parse a raw `KEY=VALUE` override string into a structured target.
pub fn parse_config_override(raw: &str) -> Result<ParsedConfigOverride, String> {
    let (key_raw, value_raw) = raw
        .trim()
        .split_once('=')
        .ok_or_else(|| "override must be in KEY=VALUE format".to_string())?;

    let value = value_raw.trim().to_string();
    let key = canonicalize_flag_name(key_raw).ok_or_else(|| "override key cannot be empty".to_string())?;

    let target = match key.as_str() {
        "theme" => ConfigOverrideTarget::Theme,
        "store_path" | "store" => ConfigOverrideTarget::StorePath,
        "default_priority" | "priority" => ConfigOverrideTarget::DefaultPriority,
        other => return Err(format!("unknown config field '{other}'")),
    };

    if value.is_empty() {
        return Err(format!("override '{key}' needs a value"));
    }

    Ok(ParsedConfigOverride { target, value })
}

/// Folds every `--config-override` flag into one set of overrides; later
/// flags win.
pub fn collect_overrides(raw: &[String]) -> Result<ConfigOverrides, AppError> {
    let mut overrides = ConfigOverrides::default();

    for entry in raw {
        let parsed = parse_config_override(entry).map_err(AppError::invalid_input)?;
        match parsed.target {
            ConfigOverrideTarget::Theme => overrides.theme = Some(parsed.value),
            ConfigOverrideTarget::StorePath => {
                overrides.store_path = Some(PathBuf::from(parsed.value))
            }
            ConfigOverrideTarget::DefaultPriority => {
                overrides.default_priority = Some(parse_priority(&parsed.value)?)
            }
        }
    }

    Ok(overrides)
}

fn canonicalize_flag_name(name: &str) -> Option<String> {
    let mut cleaned = String::new();
    let mut previous_underscore = false;

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            cleaned.push(ch.to_ascii_lowercase());
            previous_underscore = false;
        } else if !previous_underscore && !cleaned.is_empty() {
            cleaned.push('_');
            previous_underscore = true;
        }
    }

    let trimmed = cleaned.trim_matches('_');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command, ConfigOverrideTarget, collect_overrides, parse_config_override};
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn parse_config_override_canonicalizes_field_names() {
        let parsed = parse_config_override(" Default-Priority = 1 ").unwrap();

        assert_eq!(parsed.target, ConfigOverrideTarget::DefaultPriority);
        assert_eq!(parsed.value, "1");
    }

    #[test]
    fn parse_config_override_rejects_unknown_fields() {
        let err = parse_config_override("colour=blue").unwrap_err();
        assert!(err.contains("unknown config field"));
    }

    #[test]
    fn parse_config_override_rejects_missing_equals() {
        let err = parse_config_override("themenoir").unwrap_err();
        assert!(err.contains("KEY=VALUE"));
    }

    #[test]
    fn parse_config_override_rejects_empty_value() {
        let err = parse_config_override("store_path= ").unwrap_err();
        assert!(err.contains("needs a value"));
    }

    #[test]
    fn collect_overrides_applies_in_order() {
        let raw = vec![
            "theme=light".to_string(),
            "store=/tmp/a.json".to_string(),
            "theme=noir".to_string(),
        ];

        let overrides = collect_overrides(&raw).unwrap();

        assert_eq!(overrides.theme.as_deref(), Some("noir"));
        assert_eq!(overrides.store_path, Some(PathBuf::from("/tmp/a.json")));
        assert_eq!(overrides.default_priority, None);
    }

    #[test]
    fn collect_overrides_validates_priority() {
        let err = collect_overrides(&["priority=9".to_string()]).unwrap_err();
        assert_eq!(err.code(), "invalid_input");
    }

    #[test]
    fn add_accepts_short_flags() {
        let cli = Cli::try_parse_from(["planner", "add", "Write report", "-p", "1", "-d", "2025-01-01"])
            .unwrap();

        match cli.command {
            Command::Add {
                title,
                priority,
                due,
            } => {
                assert_eq!(title.as_deref(), Some("Write report"));
                assert_eq!(priority.as_deref(), Some("1"));
                assert_eq!(due.as_deref(), Some("2025-01-01"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn json_flag_is_global() {
        let cli = Cli::try_parse_from(["planner", "list", "--json"]).unwrap();
        assert!(cli.json);
    }
}
