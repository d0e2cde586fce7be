use crate::core::profile::StartupProfile;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

fn default_timeout_secs() -> u64 {
    30
}

fn default_retries() -> usize {
    2
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BackendConfig {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_retries")]
    pub retries: usize,
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: default_timeout_secs(),
            retries: default_retries(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    pub data_path: Option<String>,
    pub profile: Option<StartupProfile>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "raisekit", "raisekit")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn default_data_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.data_path {
            return Ok(PathBuf::from(custom_path));
        }
        let proj_dirs = ProjectDirs::from("dev", "raisekit", "raisekit")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    /// The startup profile, or an error telling the user where to add one.
    pub fn require_profile(&self) -> Result<&StartupProfile> {
        self.profile.as_ref().context(
            "No startup profile configured. Add a `profile` section to the config file",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
backend:
  base_url: "http://example.com/api"
  timeout_secs: 5
data_path: "/tmp/raisekit"
profile:
  company_name: "Ledgerly"
  stage: "Seed"
  industry: "Fintech"
  location: "New York"
  founded_date: "2021-04-01"
  description: "Bookkeeping for freelancers"
  team_size: 4
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.backend.base_url, "http://example.com/api");
        assert_eq!(config.backend.timeout_secs, 5);
        assert_eq!(config.backend.retries, 2);
        assert_eq!(config.data_path.as_deref(), Some("/tmp/raisekit"));
        assert_eq!(
            config.default_data_path().unwrap(),
            PathBuf::from("/tmp/raisekit")
        );

        let profile = config.require_profile().unwrap();
        assert_eq!(profile.company_name, "Ledgerly");
        assert_eq!(profile.team_size, Some(4));
        assert!(profile.funding_target.is_none());
    }

    #[test]
    fn test_config_defaults() {
        let config: AppConfig = serde_yaml::from_str("data_path: null\n").unwrap();
        assert_eq!(config.backend.base_url, "http://localhost:8000");
        assert_eq!(config.backend.timeout_secs, 30);
        assert!(config.profile.is_none());

        let err = config.require_profile().unwrap_err();
        assert!(err.to_string().contains("No startup profile configured"));
    }

    #[test]
    fn test_load_from_path_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.yaml");
        let err = AppConfig::load_from_path(&missing).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
