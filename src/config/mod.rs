//! Application Configuration
//!
//! User settings and preferences stored in TOML format.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::shared::state::{DEFAULT_WATER_GOAL_ML, DEFAULT_WATER_INTAKE_ML};

/// Application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// General settings
    pub general: GeneralConfig,
    /// Water tracker settings
    pub water: WaterSettings,
    /// Toast notification settings
    pub toasts: ToastSettings,
}

impl AppConfig {
    /// Reject settings the store and toast queue cannot honor
    pub fn validate(&self) -> Result<()> {
        if self.water.goal_ml == 0 {
            bail!("water.goal_ml must be greater than zero");
        }
        if self.water.quick_add_ml.iter().any(|ml| *ml == 0) {
            bail!("water.quick_add_ml entries must be greater than zero");
        }
        if self.toasts.display_ms < self.toasts.appear_ms {
            bail!(
                "toasts.display_ms ({}) must not be shorter than toasts.appear_ms ({})",
                self.toasts.display_ms,
                self.toasts.appear_ms
            );
        }
        Ok(())
    }
}

/// Display language for food names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Tr,
}

/// General application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Which food name to show (English or localized)
    pub locale: Locale,
}

/// Water tracker settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterSettings {
    /// Intake the tracker starts the day with
    pub initial_intake_ml: u32,
    /// Daily target
    pub goal_ml: u32,
    /// Amounts offered as quick-add buttons
    pub quick_add_ml: Vec<u32>,
}

impl Default for WaterSettings {
    fn default() -> Self {
        Self {
            initial_intake_ml: DEFAULT_WATER_INTAKE_ML,
            goal_ml: DEFAULT_WATER_GOAL_ML,
            quick_add_ml: vec![200, 350, 500],
        }
    }
}

/// Toast lifecycle timings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToastSettings {
    /// Fade-in duration
    pub appear_ms: u64,
    /// Time from creation until fade-out starts
    pub display_ms: u64,
    /// Fade-out duration
    pub disappear_ms: u64,
}

impl Default for ToastSettings {
    fn default() -> Self {
        Self {
            appear_ms: 300,
            display_ms: 2400,
            disappear_ms: 300,
        }
    }
}

impl ToastSettings {
    pub fn appear(&self) -> Duration {
        Duration::from_millis(self.appear_ms)
    }

    pub fn display(&self) -> Duration {
        Duration::from_millis(self.display_ms)
    }

    pub fn disappear(&self) -> Duration {
        Duration::from_millis(self.disappear_ms)
    }
}

/// Get the configuration directory
pub fn get_config_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "fitpulse", "FitPulse")
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

    Ok(proj_dirs.config_dir().to_path_buf())
}

/// Load configuration from file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Save configuration to file
pub fn save_config(config: &AppConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load the explicit config file, or the default location, or fall back to defaults
pub fn load_or_default(explicit: Option<&Path>) -> Result<AppConfig> {
    if let Some(path) = explicit {
        let config = load_config(path)?;
        info!("Loaded configuration from {:?}", path);
        return Ok(config);
    }

    if let Ok(config_dir) = get_config_dir() {
        let config_path = config_dir.join("config.toml");
        if config_path.exists() {
            let config = load_config(&config_path)?;
            info!("Loaded configuration from {:?}", config_path);
            return Ok(config);
        }
    }

    info!("Using default configuration");
    Ok(AppConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_app_config() {
        let config = AppConfig::default();

        assert_eq!(config.general.locale, Locale::En);

        assert_eq!(config.water.initial_intake_ml, 1200);
        assert_eq!(config.water.goal_ml, 3400);
        assert_eq!(config.water.quick_add_ml, vec![200, 350, 500]);

        assert_eq!(config.toasts.appear_ms, 300);
        assert_eq!(config.toasts.display_ms, 2400);
        assert_eq!(config.toasts.disappear_ms, 300);

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let mut config = AppConfig::default();
        config.general.locale = Locale::Tr;
        config.water.goal_ml = 2500;

        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();

        assert_eq!(parsed.general.locale, Locale::Tr);
        assert_eq!(parsed.water.goal_ml, 2500);
        assert_eq!(parsed.toasts.display_ms, config.toasts.display_ms);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let parsed: AppConfig = toml::from_str("[water]\ngoal_ml = 2000\n").unwrap();

        assert_eq!(parsed.water.goal_ml, 2000);
        assert_eq!(parsed.water.initial_intake_ml, 1200);
        assert_eq!(parsed.toasts.appear_ms, 300);
    }

    #[test]
    fn test_save_and_load_config() {
        let config = AppConfig::default();
        let temp_file = NamedTempFile::new().unwrap();

        save_config(&config, temp_file.path()).unwrap();
        let loaded = load_config(temp_file.path()).unwrap();

        assert_eq!(config.water.goal_ml, loaded.water.goal_ml);
        assert_eq!(config.toasts.disappear_ms, loaded.toasts.disappear_ms);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Path::new("/nonexistent/path/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "this is not valid toml {{{{").unwrap();

        let result = load_config(temp_file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_goal_is_rejected() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[water]\ngoal_ml = 0").unwrap();

        let err = load_config(temp_file.path()).unwrap_err();
        assert!(err.to_string().contains("goal_ml"));
    }

    #[test]
    fn test_display_shorter_than_appear_is_rejected() {
        let mut config = AppConfig::default();
        config.toasts.appear_ms = 500;
        config.toasts.display_ms = 400;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_explicit_path_is_used() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[general]\nlocale = \"tr\"").unwrap();

        let config = load_or_default(Some(temp_file.path())).unwrap();
        assert_eq!(config.general.locale, Locale::Tr);
    }
}
