use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Database file used when no configuration names one.
pub const DEFAULT_DATABASE: &str = "questions.db";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ForumConfig {
    pub database: Option<String>,
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("questions.toml")
}

pub fn load_config(path: Option<&Path>) -> crate::Result<Option<ForumConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: ForumConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

/// Resolve the database file from an optional config, falling back to
/// [`DEFAULT_DATABASE`].
pub fn database_path(config: Option<&ForumConfig>) -> PathBuf {
    config
        .and_then(|c| c.database.as_deref())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE))
}
