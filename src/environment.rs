// src/environment.rs
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::core::ClientConfig;

pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

pub const ENV_API_URL: &str = "RECRUITER_API_URL";
pub const ENV_SESSION_COOKIE: &str = "RECRUITER_SESSION_COOKIE";
pub const ENV_CONFIG_PATH: &str = "RECRUITER_CONFIG";

#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub client: ClientConfig,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    local: ClientConfig,
    #[serde(default)]
    production: ClientConfig,
}

impl EnvironmentConfig {
    /// Load configuration based on environment.
    ///
    /// An explicit `path` (or `RECRUITER_CONFIG`) must exist; the default
    /// `config.yaml` is optional and built-in defaults apply without it.
    /// Environment variables are applied last.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let environment = Self::get_environment();
        info!("Loading configuration for environment: {}", environment);

        let explicit = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var(ENV_CONFIG_PATH).ok().map(PathBuf::from));

        let client = match explicit {
            Some(path) => Self::load_from_file(&path, &environment)?,
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::load_from_file(&default_path, &environment)?
                } else {
                    info!("No {} found, using built-in defaults", DEFAULT_CONFIG_FILE);
                    ClientConfig::default()
                }
            }
        };

        let client = apply_overrides(client, |key| std::env::var(key).ok());
        info!("Backend: {}", client.base_url);

        Ok(Self {
            environment,
            client,
        })
    }

    fn get_environment() -> String {
        std::env::var("RECRUITER_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string())
    }

    fn load_from_file(path: &Path, environment: &str) -> Result<ClientConfig> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml_str(&content, environment)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Pick the section for `environment` out of a YAML document.
    pub fn from_yaml_str(content: &str, environment: &str) -> Result<ClientConfig> {
        let config_file: ConfigFile =
            serde_yaml::from_str(content).context("Invalid configuration YAML")?;

        Ok(match environment {
            "production" | "prod" => config_file.production,
            _ => config_file.local,
        })
    }
}

/// Apply `RECRUITER_API_URL` / `RECRUITER_SESSION_COOKIE` style overrides.
/// Empty values are ignored.
pub fn apply_overrides<F>(mut config: ClientConfig, lookup: F) -> ClientConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
        config.base_url = url;
    }
    if let Some(cookie) = lookup(ENV_SESSION_COOKIE).filter(|v| !v.trim().is_empty()) {
        config.session_cookie = Some(cookie);
    }
    config
}
