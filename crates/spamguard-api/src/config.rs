//! Service configuration

use crate::cli::ServeArgs;
use serde::{Deserialize, Serialize};
use spamguard_classifiers::ArtifactConfig;
use std::path::Path;

/// Service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Listen address
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Path prefix for the prediction routes
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,

    /// Maximum accepted request body in bytes
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    /// Model artifacts
    #[serde(default)]
    pub model: ModelConfig,

    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ServiceConfig {
    /// Load configuration from file and CLI overrides
    pub fn load(config_path: &str, args: &ServeArgs) -> anyhow::Result<Self> {
        let mut config = Self::from_file(config_path)?;

        if let Some(listen) = &args.listen {
            config.listen = listen.clone();
        }
        if let Some(port) = args.port {
            config.port = port;
        }
        if let Some(models_dir) = &args.models_dir {
            config.model.artifacts.models_dir = models_dir.clone();
        }

        config.validate()?;
        Ok(config)
    }

    /// Read a YAML file, or use defaults when it does not exist
    pub fn from_file(config_path: &str) -> anyhow::Result<Self> {
        if Path::new(config_path).exists() {
            let content = std::fs::read_to_string(config_path)?;
            Ok(serde_yaml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    fn validate(&mut self) -> anyhow::Result<()> {
        if !self.api_prefix.starts_with('/') {
            anyhow::bail!("api_prefix must start with '/', got '{}'", self.api_prefix);
        }
        let trimmed = self.api_prefix.trim_end_matches('/');
        self.api_prefix = trimmed.to_string();

        if self.max_body_bytes == 0 {
            anyhow::bail!("max_body_bytes must be greater than zero");
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.listen, self.port)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            port: default_port(),
            api_prefix: default_api_prefix(),
            max_body_bytes: default_max_body_bytes(),
            model: ModelConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Model loading configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(flatten)]
    pub artifacts: ArtifactConfig,

    /// Refuse to start when the artifacts cannot be loaded
    #[serde(default = "default_true")]
    pub require_loaded: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            artifacts: ArtifactConfig::default(),
            require_loaded: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

fn default_listen() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_api_prefix() -> String {
    "/api/v1".to_string()
}

fn default_max_body_bytes() -> usize {
    64 * 1024
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_defaults_when_file_missing() {
        let config = ServiceConfig::load("/nonexistent/config.yaml", &ServeArgs::default()).unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:8000");
        assert_eq!(config.api_prefix, "/api/v1");
        assert!(config.model.require_loaded);
        assert_eq!(config.model.artifacts.models_dir, PathBuf::from("models"));
    }

    #[test]
    fn test_yaml_with_cli_overrides() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(
            file.path(),
            r#"
port: 9000
api_prefix: /v2/
model:
  models_dir: /srv/spam
  model_file: linear_svc.json
  require_loaded: false
logging:
  format: json
"#,
        )
        .unwrap();

        let args = ServeArgs {
            port: Some(9100),
            models_dir: Some(PathBuf::from("/opt/models")),
            ..Default::default()
        };
        let config = ServiceConfig::load(file.path().to_str().unwrap(), &args).unwrap();

        assert_eq!(config.port, 9100);
        assert_eq!(config.api_prefix, "/v2");
        assert_eq!(config.model.artifacts.models_dir, PathBuf::from("/opt/models"));
        assert_eq!(config.model.artifacts.model_file, "linear_svc.json");
        assert!(!config.model.require_loaded);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_prefix_rejected() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "api_prefix: api\n").unwrap();
        assert!(ServiceConfig::load(file.path().to_str().unwrap(), &ServeArgs::default()).is_err());
    }
}
