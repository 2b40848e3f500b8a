//! Dashboard settings: service endpoints and the report filename.
//!
//! Defaults cover the usual local setup. On desktop an optional
//! `dashboard.toml` in the platform config directory overrides any subset
//! of the fields:
//!
//! ```toml
//! chat_endpoint = "http://analysis.local:8000/api/chatbot/response"
//! report_filename = "weekly-report.pdf"
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

pub const CONFIG_FILENAME: &str = "dashboard.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid dashboard config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub chat_endpoint: String,
    pub quick_chat_endpoint: String,
    pub report_filename: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            chat_endpoint: "http://localhost:8000/api/chatbot/response".into(),
            quick_chat_endpoint: "/api/clu/route".into(),
            report_filename: "insight-report.pdf".into(),
        }
    }
}

impl DashboardConfig {
    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Missing file means defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(raw) => Self::from_toml(&raw),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Read {
                path: path.display().to_string(),
                source,
            }),
        }
    }

    /// Settings for this platform; problems are logged and defaults used.
    pub fn load() -> Self {
        tracing::info!(platform = ?super::platform::Platform::current(), "loading dashboard config");

        #[cfg(not(target_arch = "wasm32"))]
        {
            let Some(dirs) = super::platform::project_dirs() else {
                return Self::default();
            };
            let path = dirs.config_dir().join(CONFIG_FILENAME);
            match Self::from_file(&path) {
                Ok(config) => {
                    tracing::debug!(path = %path.display(), "dashboard config loaded");
                    config
                }
                Err(err) => {
                    tracing::warn!(%err, "falling back to default dashboard config");
                    Self::default()
                }
            }
        }

        #[cfg(target_arch = "wasm32")]
        {
            Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = DashboardConfig::from_toml("report_filename = \"weekly.pdf\"").unwrap();
        assert_eq!(config.report_filename, "weekly.pdf");
        assert_eq!(config.chat_endpoint, DashboardConfig::default().chat_endpoint);
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        assert!(matches!(
            DashboardConfig::from_toml("chat_endpoint = [1,"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_means_defaults() {
        let path = std::env::temp_dir().join("decisionmate-missing").join(CONFIG_FILENAME);
        let config = DashboardConfig::from_file(&path).unwrap();
        assert_eq!(config, DashboardConfig::default());
    }
}
