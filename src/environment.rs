// src/environment.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::upload::DEFAULT_MAX_UPLOAD_BYTES;

pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    pub port: u16,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: u64,
    /// Where uploads are staged; the system temp dir when unset
    #[serde(default)]
    pub temp_dir: Option<PathBuf>,
}

fn default_max_upload_bytes() -> u64 {
    DEFAULT_MAX_UPLOAD_BYTES
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            temp_dir: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    local: EnvironmentConfig,
    production: EnvironmentConfig,
}

impl EnvironmentConfig {
    /// Load configuration for the current environment from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        Self::load_for(path, &Self::get_environment())
    }

    pub fn load_for(path: &Path, environment: &str) -> Result<Self> {
        info!("Loading configuration for environment: {}", environment);

        if !path.exists() {
            anyhow::bail!(
                "{} not found. Server cannot start without configuration.",
                path.display()
            );
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::from_yaml(&content, environment)
    }

    pub fn get_environment() -> String {
        std::env::var("LINKEDIN_IMPORT_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string())
    }

    pub fn from_yaml(content: &str, environment: &str) -> Result<Self> {
        let config_file: ConfigFile =
            serde_yaml::from_str(content).context("Failed to parse configuration")?;

        let env_config = match environment {
            "production" => config_file.production,
            _ => config_file.local,
        };

        let temp_dir = env_config
            .temp_dir
            .as_deref()
            .map(Self::resolve_path)
            .transpose()?;

        Ok(Self {
            temp_dir,
            ..env_config
        })
    }

    pub fn temp_dir(&self) -> PathBuf {
        self.temp_dir.clone().unwrap_or_else(std::env::temp_dir)
    }

    fn resolve_path(path: &Path) -> Result<PathBuf> {
        if path.is_absolute() {
            Ok(path.to_path_buf())
        } else {
            let current_dir = std::env::current_dir().context("Failed to get current directory")?;
            Ok(current_dir.join(path))
        }
    }

    /// Ensure the upload staging directory exists
    pub async fn ensure_directories(&self) -> Result<()> {
        let dir = self.temp_dir();
        tokio::fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

        info!("Upload directory ready: {}", dir.display());
        Ok(())
    }
}
