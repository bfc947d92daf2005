use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

const MASK: &str = "********";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub tmdb: TmdbConfig,

    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub log_level: String,

    /// Emit log lines as JSON objects instead of the human readable format
    pub log_json: bool,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_json: false,
            worker_threads: 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,

    /// Overridden by the `PORT` environment variable.
    pub port: u16,

    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            cors_allowed_origins: vec!["*".to_string()],
        }
    }
}

/// How listing and search responses are shaped before they reach the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseMode {
    /// Project each result onto the reduced item shape.
    #[default]
    Filtered,
    /// Return the upstream JSON untouched.
    Passthrough,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TmdbConfig {
    pub base_url: String,

    /// Bearer credential. Read from `API_KEY`; never written back to disk.
    #[serde(skip_serializing)]
    pub api_key: String,

    pub language: String,

    pub response_mode: ResponseMode,

    /// Upstream request timeout in seconds. Unset means no timeout.
    pub request_timeout_seconds: Option<u64>,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.themoviedb.org/3".to_string(),
            api_key: String::new(),
            language: "en-US".to_string(),
            response_mode: ResponseMode::Filtered,
            request_timeout_seconds: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            server: ServerConfig::default(),
            tmdb: TmdbConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl Config {
    /// Loads `path` (or the first config file found), then layers `.env` and
    /// the process environment on top.
    pub fn load_with_path(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_from_path(path)?,
            None => Self::load_file()?,
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    fn load_file() -> Result<Self> {
        for path in &Self::config_paths() {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        dotenvy::dotenv().ok();
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Applies `PORT` and `API_KEY` from `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT").filter(|p| !p.trim().is_empty()) {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("Invalid PORT value: {port}"))?;
        }

        if let Some(key) = lookup("API_KEY") {
            self.tmdb.api_key = key.trim().to_string();
        }

        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.toml")];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("cinerelay").join("config.toml"));
        }

        paths
    }

    pub fn validate(&self) -> Result<()> {
        if self.tmdb.api_key.is_empty() {
            anyhow::bail!("API key not found: set the API_KEY environment variable");
        }

        if self.tmdb.base_url.is_empty() {
            anyhow::bail!("TMDB base URL cannot be empty");
        }

        if self.tmdb.request_timeout_seconds == Some(0) {
            anyhow::bail!("TMDB request timeout must be > 0 when set");
        }

        Ok(())
    }

    /// Renders the effective configuration with the credential hidden.
    pub fn masked_toml(&self) -> Result<String> {
        let mut rendered = toml::to_string_pretty(self)?;
        let credential = if self.tmdb.api_key.is_empty() {
            "<missing>"
        } else {
            MASK
        };
        rendered.push_str(&format!("\n# tmdb.api_key = \"{credential}\"\n"));
        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.tmdb.base_url, "https://api.themoviedb.org/3");
        assert_eq!(config.tmdb.language, "en-US");
        assert_eq!(config.tmdb.response_mode, ResponseMode::Filtered);
        assert!(config.tmdb.request_timeout_seconds.is_none());
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [general]
            log_level = "debug"

            [tmdb]
            response_mode = "passthrough"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.tmdb.response_mode, ResponseMode::Passthrough);

        assert_eq!(config.server.port, 3001);
    }

    #[test]
    fn test_api_key_never_serialized() {
        let mut config = Config::default();
        config.tmdb.api_key = "secret-token".to_string();

        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(!toml_str.contains("secret-token"));

        let masked = config.masked_toml().unwrap();
        assert!(!masked.contains("secret-token"));
        assert!(masked.contains(MASK));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config
            .apply_overrides(|key| match key {
                "PORT" => Some("8080".to_string()),
                "API_KEY" => Some(" token ".to_string()),
                _ => None,
            })
            .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.tmdb.api_key, "token");
    }

    #[test]
    fn test_invalid_port_rejected() {
        let mut config = Config::default();
        let result = config.apply_overrides(|key| (key == "PORT").then(|| "abc".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_api_key_is_fatal() {
        let config = Config::default();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("API key not found"));

        let mut config = Config::default();
        config.tmdb.api_key = "token".to_string();
        assert!(config.validate().is_ok());
    }
}
