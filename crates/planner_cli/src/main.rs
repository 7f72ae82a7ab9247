use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use planner_cli::cli::{Cli, Command, collect_overrides};
use planner_cli::render;
use planner_core::config::{self, Config, merge_overrides};
use planner_core::error::AppError;
use planner_core::model::Task;
use planner_core::storage::json_store;
use planner_core::suggest::SuggestionEngine;
use planner_core::validate::TaskInput;
use planner_core::{Clock, TaskStore};
use std::io::{self, BufRead};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const LOG_ENV_VAR: &str = "PLANNER_LOG";

fn print_task_json(task: &Task) {
    println!("{}", render::task_json(task));
}

fn print_suggestion(task: Option<&Task>, schedule: Option<&[Task]>, config: &Config, json: bool) {
    if json {
        let payload = match schedule {
            Some(tasks) => render::tasks_json(tasks),
            None => task.map(render::task_json).unwrap_or(serde_json::Value::Null),
        };
        println!("{payload}");
        return;
    }

    let palette = config.palette();
    let line = render::suggestion_line(task);
    if task.is_some() {
        println!("{}", palette.accentize(&line));
    } else {
        println!("{}", palette.mutedize(&line));
    }

    if let Some(tasks) = schedule
        && !tasks.is_empty()
    {
        println!("{}", render::task_table(tasks));
    }
}

fn normalize_parse_error(err: clap::Error) -> AppError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    let message = first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string();
    AppError::invalid_input(message)
}

fn is_informational(err: &clap::Error) -> bool {
    matches!(
        err.kind(),
        ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
    )
}

fn split_command_line(line: &str) -> Result<Vec<String>, AppError> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut escape = false;

    for ch in line.chars() {
        if escape {
            if ch != '"' && ch != '\\' {
                current.push('\\');
            }
            current.push(ch);
            escape = false;
            continue;
        }

        match ch {
            '\\' if in_quotes => escape = true,
            '"' => in_quotes = !in_quotes,
            ch if ch.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    args.push(std::mem::take(&mut current));
                }
            }
            ch => current.push(ch),
        }
    }

    if in_quotes {
        return Err(AppError::invalid_input("unterminated quote in command"));
    }

    if !current.is_empty() {
        args.push(current);
    }

    Ok(args)
}

fn print_help() {
    let mut cmd = Cli::command();
    let help = cmd.render_help();
    println!("{help}");
}

/// A number picks a row of the sorted listing; anything else is an id.
fn resolve_selector(store: &TaskStore, selector: &str) -> Result<String, AppError> {
    let trimmed = selector.trim();
    let Ok(position) = trimmed.parse::<usize>() else {
        return Ok(trimmed.to_string());
    };

    position
        .checked_sub(1)
        .and_then(|index| store.sorted_view().into_iter().nth(index))
        .map(|task| task.id)
        .ok_or_else(|| AppError::invalid_input(format!("no task at position {position}")))
}

fn run_command<C: Clock>(
    cli: Cli,
    base: &Config,
    engine: &SuggestionEngine<C>,
) -> Result<(), AppError> {
    let config = merge_overrides(base, &collect_overrides(&cli.config_override)?);
    let mut store = TaskStore::open(json_store::store_path(config.store_path.as_deref()));

    match cli.command {
        Command::Add {
            title,
            priority,
            due,
        } => {
            let default_priority = config.default_priority().to_string();
            let task = TaskInput {
                title: title.as_deref().unwrap_or_default(),
                priority: priority.as_deref().unwrap_or(default_priority.as_str()),
                due_date: due.as_deref().unwrap_or_default(),
            }
            .parse()?;

            store.add(task.clone())?;
            if cli.json {
                print_task_json(&task);
            } else {
                println!("Added task: {} ({})", task.title, task.id);
            }
        }
        Command::List => {
            let tasks = store.sorted_view();
            if cli.json {
                println!("{}", render::tasks_json(&tasks));
            } else if tasks.is_empty() {
                println!("{}", config.palette().mutedize("No tasks."));
            } else {
                println!("{}", render::task_table(&tasks));
            }
        }
        Command::Delete { selector } => {
            let id = resolve_selector(&store, &selector)?;
            let task = store.delete_by_id(&id)?;
            if cli.json {
                print_task_json(&task);
            } else {
                println!("Deleted task: {} ({})", task.title, task.id);
            }
        }
        Command::Show { id } => {
            let task = store
                .get(id.trim())
                .ok_or_else(|| AppError::invalid_input("task not found"))?;
            if cli.json {
                print_task_json(task);
            } else {
                println!("{}", render::task_details(task));
            }
        }
        Command::Suggest => {
            let schedule = engine.suggest_schedule(store.tasks());
            print_suggestion(schedule.first(), Some(schedule.as_slice()), &config, cli.json);
        }
        Command::Next => {
            let next = engine.suggest_next_task(store.tasks());
            print_suggestion(next.as_ref(), None, &config, cli.json);
        }
    }

    Ok(())
}

fn run_interactive<C: Clock>(base: &Config, engine: &SuggestionEngine<C>) -> Result<(), AppError> {
    let mut input = String::new();
    let stdin = io::stdin();
    let mut stdin_lock = stdin.lock();

    loop {
        input.clear();
        let bytes = stdin_lock
            .read_line(&mut input)
            .map_err(|err| AppError::io(err.to_string()))?;

        if bytes == 0 {
            break;
        }

        let line = input.trim();
        if line.is_empty() {
            continue;
        }

        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        if line == "help" || line == "?" {
            print_help();
            continue;
        }

        let args = match split_command_line(line) {
            Ok(args) if args.is_empty() => continue,
            Ok(args) => args,
            Err(err) => {
                eprintln!("ERROR: {}", err);
                continue;
            }
        };

        let argv = std::iter::once("planner".to_string()).chain(args);
        let cli = match Cli::try_parse_from(argv) {
            Ok(cli) => cli,
            Err(err) if is_informational(&err) => {
                println!("{err}");
                continue;
            }
            Err(err) => {
                eprintln!("ERROR: {}", normalize_parse_error(err));
                continue;
            }
        };

        if let Err(err) = run_command(cli, base, engine) {
            eprintln!("ERROR: {}", err);
        }
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn load_config() -> Config {
    let loaded = config::load_config_with_fallback();
    if let Some(err) = loaded.error {
        tracing::warn!(error = %err, "using default configuration");
    }
    loaded.config
}

fn main() {
    init_tracing();
    let base = load_config();
    let engine = SuggestionEngine::new();

    if std::env::args_os().len() <= 1 {
        if let Err(err) = run_interactive(&base, &engine) {
            eprintln!("ERROR: {}", err);
            std::process::exit(1);
        }
        return;
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if is_informational(&err) => err.exit(),
        Err(err) => {
            eprintln!("ERROR: {}", normalize_parse_error(err));
            std::process::exit(1);
        }
    };

    if let Err(err) = run_command(cli, &base, &engine) {
        eprintln!("ERROR: {}", err);
        std::process::exit(1);
    }
}
