use crate::error::AppError;
use crate::model::Task;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const STORE_ENV_VAR: &str = "PLANNER_STORE_PATH";
const DEFAULT_STORE_PATH: &str = "data/tasks.json";

/// Where the task document lives: the environment override, then the
/// configured path, then `data/tasks.json` under the working directory.
pub fn store_path(configured: Option<&Path>) -> PathBuf {
    if let Ok(path) = std::env::var(STORE_ENV_VAR)
        && !path.trim().is_empty()
    {
        return PathBuf::from(path);
    }

    configured
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_PATH))
}

/// Reads the document as written. A missing file is an empty collection;
/// anything unreadable or unparsable is an error.
pub fn load_tasks(path: &Path) -> Result<Vec<Task>, AppError> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|err| AppError::io(format!("{}: {}", path.display(), err)))?;
    serde_json::from_str(&content).map_err(|err| {
        AppError::invalid_data(format!("invalid JSON in {}: {}", path.display(), err))
    })
}

/// Replaces the whole document with `tasks`, pretty-printed, via a temp file
/// and rename.
pub fn save_tasks(path: &Path, tasks: &[Task]) -> Result<(), AppError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|err| AppError::io(err.to_string()))?;
    }

    let content =
        serde_json::to_string_pretty(tasks).map_err(|err| AppError::invalid_data(err.to_string()))?;

    let tmp_path = path.with_extension("json.tmp");
    let mut file = std::fs::File::create(&tmp_path)
        .map_err(|err| AppError::io(format!("{}: {}", tmp_path.display(), err)))?;
    file.write_all(content.as_bytes())
        .map_err(|err| AppError::io(err.to_string()))?;
    file.sync_all().map_err(|err| AppError::io(err.to_string()))?;
    drop(file);

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let permissions = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(&tmp_path, permissions)
            .map_err(|err| AppError::io(err.to_string()))?;
    }

    std::fs::rename(&tmp_path, path).map_err(|err| {
        std::fs::remove_file(&tmp_path).ok();
        AppError::io(format!(
            "failed to move {} to {}: {}",
            tmp_path.display(),
            path.display(),
            err
        ))
    })?;

    tracing::debug!(path = %path.display(), count = tasks.len(), "saved tasks");
    Ok(())
}
