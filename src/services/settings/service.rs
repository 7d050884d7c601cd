use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;

use crate::models::settings::PlannerConfig;

const CONFIG_FILE: &str = "config.toml";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "KenBoyle", "DailyPlanner")
}

/// Loads and saves `config.toml`.
pub struct SettingsService {
    path: PathBuf,
}

impl SettingsService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Service for the platform config directory, or the working directory
    /// when no home directory can be resolved.
    pub fn from_default_location() -> Self {
        let path = project_dirs()
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the configuration; a missing file yields defaults.
    pub fn get(&self) -> Result<PlannerConfig> {
        if !self.path.exists() {
            return Ok(PlannerConfig::default());
        }

        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        let config: PlannerConfig = toml::from_str(&data)
            .with_context(|| format!("failed to parse {}", self.path.display()))?;
        config
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;

        Ok(config)
    }

    /// Read the configuration, falling back to defaults on any error.
    pub fn get_or_default(&self) -> PlannerConfig {
        match self.get() {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Failed to load settings: {:#}, using defaults", e);
                PlannerConfig::default()
            }
        }
    }

    pub fn update(&self, config: &PlannerConfig) -> Result<()> {
        config
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create dir {}", parent.display()))?;
            }
        }

        let data = toml::to_string_pretty(config).context("failed to serialize settings")?;
        fs::write(&self.path, data)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        Ok(())
    }
}

/// Directory holding planner data, honouring the config override.
pub fn resolve_data_dir(config: &PlannerConfig) -> PathBuf {
    if let Some(dir) = &config.data_dir {
        return dir.clone();
    }

    #[cfg(debug_assertions)]
    {
        PathBuf::from("planner-data")
    }

    #[cfg(not(debug_assertions))]
    {
        project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("planner-data"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ui::{DisplayMode, ViewType};
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = SettingsService::new(temp_dir.path().join("config.toml"));
        assert_eq!(service.get().unwrap(), PlannerConfig::default());
    }

    #[test]
    fn test_update_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let service = SettingsService::new(temp_dir.path().join("nested").join("config.toml"));

        let config = PlannerConfig {
            default_view: ViewType::Week,
            display_mode: DisplayMode::Both,
            first_day_of_week: 1,
            ..Default::default()
        };
        service.update(&config).unwrap();

        assert_eq!(service.get().unwrap(), config);
    }

    #[test]
    fn test_update_rejects_invalid_config() {
        let temp_dir = TempDir::new().unwrap();
        let service = SettingsService::new(temp_dir.path().join("config.toml"));
        let config = PlannerConfig {
            first_day_of_week: 9,
            ..Default::default()
        };

        assert!(service.update(&config).is_err());
        assert!(!service.path().exists());
    }

    #[test]
    fn test_invalid_file_falls_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "first_day_of_week = \"monday\"").unwrap();
        let service = SettingsService::new(path);

        assert!(service.get().is_err());
        assert_eq!(service.get_or_default(), PlannerConfig::default());
    }

    #[test]
    fn test_data_dir_override() {
        let config = PlannerConfig {
            data_dir: Some(PathBuf::from("/tmp/planner")),
            ..Default::default()
        };
        assert_eq!(resolve_data_dir(&config), PathBuf::from("/tmp/planner"));
    }
}
