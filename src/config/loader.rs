//! Configuration Loader (Figment-based)
//!
//! Loads and merges configuration from multiple sources using Figment:
//! 1. Built-in defaults (Serialized)
//! 2. Global config (~/.config/rivalscope/config.toml)
//! 3. Project config (.rivalscope/config.toml)
//! 4. Environment variables (RIVALSCOPE_* prefix, `__` between levels)

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::env;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::types::Config;
use crate::types::{IntelError, Result};

const ENV_PREFIX: &str = "RIVALSCOPE_";

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with full resolution chain:
    /// defaults → global → project → env vars
    pub fn load() -> Result<Config> {
        Self::load_from(
            Self::global_config_path().as_deref(),
            &Self::project_config_path(),
        )
    }

    /// Load with explicit global and project file locations.
    /// Missing files are skipped.
    pub fn load_from(global: Option<&Path>, project: &Path) -> Result<Config> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        if let Some(global_path) = global
            && global_path.exists()
        {
            debug!("Loading global config from: {}", global_path.display());
            figment = figment.merge(Toml::file(global_path));
        }

        if project.exists() {
            debug!("Loading project config from: {}", project.display());
            figment = figment.merge(Toml::file(project));
        }

        // RIVALSCOPE_LLM__TIMEOUT_SECS -> llm.timeout_secs
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__").lowercase(true));

        Self::extract(figment)
    }

    /// Load configuration from a specific file only
    pub fn load_from_file(path: &Path) -> Result<Config> {
        Self::extract(
            Figment::new()
                .merge(Serialized::defaults(Config::default()))
                .merge(Toml::file(path)),
        )
    }

    fn extract(figment: Figment) -> Result<Config> {
        let config: Config = figment
            .extract()
            .map_err(|e| IntelError::Config(format!("Configuration error: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    // =========================================================================
    // Path Management
    // =========================================================================

    /// Get path to global config directory (~/.config/rivalscope/)
    pub fn global_dir() -> Option<PathBuf> {
        env::var("XDG_CONFIG_HOME")
            .ok()
            .map(PathBuf::from)
            .or_else(|| {
                env::var("HOME")
                    .ok()
                    .map(|home| PathBuf::from(home).join(".config"))
            })
            .map(|p| p.join("rivalscope"))
    }

    /// Get path to global config file
    pub fn global_config_path() -> Option<PathBuf> {
        Self::global_dir().map(|dir| dir.join("config.toml"))
    }

    /// Get path to project config file
    pub fn project_config_path() -> PathBuf {
        PathBuf::from(".rivalscope/config.toml")
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Effective configuration as TOML or pretty JSON. API keys are omitted.
    pub fn render(config: &Config, as_json: bool) -> Result<String> {
        if as_json {
            Ok(serde_json::to_string_pretty(config)?)
        } else {
            toml::to_string_pretty(config).map_err(|e| IntelError::Config(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_files_use_defaults() {
        let temp = TempDir::new().unwrap();
        let config = ConfigLoader::load_from(
            Some(&temp.path().join("absent.toml")),
            &temp.path().join("also-absent.toml"),
        )
        .unwrap();
        assert_eq!(config.discovery.competitor_count, 5);
    }

    #[test]
    fn test_project_overrides_global() {
        let temp = TempDir::new().unwrap();
        let global = temp.path().join("global.toml");
        let project = temp.path().join("project.toml");

        fs::write(
            &global,
            "[llm]\nprovider = \"anthropic\"\ntimeout_secs = 90\n\n[discovery]\ncompetitor_count = 3\n",
        )
        .unwrap();
        fs::write(&project, "[discovery]\ncompetitor_count = 4\nconcurrency = 2\n").unwrap();

        let config = ConfigLoader::load_from(Some(&global), &project).unwrap();
        assert_eq!(config.llm.provider, "anthropic");
        assert_eq!(config.llm.timeout_secs, 90);
        assert_eq!(config.discovery.competitor_count, 4);
        assert_eq!(config.discovery.concurrency, 2);
        assert_eq!(config.report.truncate_chars, 100);
    }

    #[test]
    fn test_invalid_file_value_is_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[llm]\ntemperature = 3.5\n").unwrap();

        assert!(matches!(
            ConfigLoader::load_from_file(&path),
            Err(IntelError::Config(_))
        ));
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[llm\nprovider = ").unwrap();

        assert!(matches!(
            ConfigLoader::load_from_file(&path),
            Err(IntelError::Config(_))
        ));
    }

    #[test]
    fn test_render_omits_api_key() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[llm]\napi_key = \"sk-in-file\"\nmodel = \"gpt-4-turbo\"\n").unwrap();

        let config = ConfigLoader::load_from_file(&path).unwrap();
        assert_eq!(config.llm.api_key.as_deref(), Some("sk-in-file"));

        let toml = ConfigLoader::render(&config, false).unwrap();
        assert!(toml.contains("gpt-4-turbo"));
        assert!(!toml.contains("sk-in-file"));

        let json = ConfigLoader::render(&config, true).unwrap();
        assert!(!json.contains("sk-in-file"));
    }
}
