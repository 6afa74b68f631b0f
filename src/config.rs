use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::DEFAULT_MODEL_FILE;
use crate::profile::ProfileOverrides;

/// Root configuration structure, deserialized from `.hr-attrition/config.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Where the classifier artifact lives.
    #[serde(default)]
    pub model: ModelConfig,
    /// Profile values that replace the form defaults.
    #[serde(default)]
    pub profile: ProfileOverrides,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelConfig {
    /// Model artifact path. Defaults to `modele_xgboost_attrition.json`.
    #[serde(default = "default_model_path")]
    pub path: PathBuf,
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig {
            path: default_model_path(),
        }
    }
}

fn default_model_path() -> PathBuf {
    PathBuf::from(DEFAULT_MODEL_FILE)
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<base_dir>/.hr-attrition/config.toml`
/// 3. `~/.config/hr-attrition/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(base_dir: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let local_config = base_dir.join(".hr-attrition").join("config.toml");
    if local_config.exists() {
        return read_config(&local_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home.join(".config").join("hr-attrition").join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config: Config =
        toml::from_str(&content).with_context(|| format!("Invalid config {}", path.display()))?;
    tracing::debug!(path = %path.display(), "config loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Department, JobRole};

    #[test]
    fn test_default_points_at_fixed_model_file() {
        let cfg = Config::default();
        assert_eq!(cfg.model.path, PathBuf::from("modele_xgboost_attrition.json"));
        assert_eq!(cfg.profile, ProfileOverrides::default());
    }

    #[test]
    fn test_local_config_is_found() {
        let dir = tempfile::tempdir().unwrap();
        let cfg_dir = dir.path().join(".hr-attrition");
        std::fs::create_dir_all(&cfg_dir).unwrap();
        std::fs::write(
            cfg_dir.join("config.toml"),
            r#"
[model]
path = "/srv/models/attrition.json"

[profile]
department = "Human Resources"
job_role = "Human Resources"
"#,
        )
        .unwrap();

        let cfg = load_config(dir.path(), None).unwrap();
        assert_eq!(cfg.model.path, PathBuf::from("/srv/models/attrition.json"));
        assert_eq!(cfg.profile.department, Some(Department::HumanResources));
        assert_eq!(cfg.profile.job_role, Some(JobRole::HumanResources));
    }

    #[test]
    fn test_override_wins_and_partial_tables_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[profile]\nage = 58\n").unwrap();

        let cfg = load_config(dir.path(), Some(&path)).unwrap();
        assert_eq!(cfg.model.path, PathBuf::from(DEFAULT_MODEL_FILE));
        assert_eq!(cfg.profile.age, Some(58));
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[model]\nthreshold = 0.7\n").unwrap();
        assert!(load_config(dir.path(), Some(&path)).is_err());
    }
}
