use anyhow::{Context, Result};
use clap::ValueEnum;
use formbuilder_components::{full_registry, layout_registry};
use formbuilder_renderer::{DefinitionError, Registry};
use formbuilder_server::DEFAULT_SUBMISSION_LIMIT;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "formbuilder.config.json";

/// Which component set documents are rendered and edited against
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RegistryKind {
    /// Layout and form-input components
    #[default]
    Full,
    /// Layout components only
    Layout,
}

impl RegistryKind {
    pub fn build(self) -> Result<Registry, DefinitionError> {
        match self {
            RegistryKind::Full => full_registry(),
            RegistryKind::Layout => layout_registry(),
        }
    }
}

/// Formbuilder configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding one JSON file per document
    #[serde(default = "default_storage_dir")]
    pub storage_dir: String,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub registry: RegistryKind,

    /// Submissions the server keeps per form; older ones are dropped but still counted
    #[serde(default = "default_submission_limit")]
    pub submission_limit: usize,
}

fn default_storage_dir() -> String {
    "data".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3030
}

fn default_submission_limit() -> usize {
    DEFAULT_SUBMISSION_LIMIT
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Cannot read {}", config_path.display()))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Invalid config in {}", config_path.display()))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Get absolute path to the storage directory
    pub fn get_storage_dir(&self, cwd: &str) -> PathBuf {
        Path::new(cwd).join(&self.storage_dir)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .host
            .parse()
            .with_context(|| format!("Invalid host address: {}", self.host))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_dir: default_storage_dir(),
            host: default_host(),
            port: default_port(),
            registry: RegistryKind::default(),
            submission_limit: default_submission_limit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "storageDir": "pages",
            "host": "0.0.0.0",
            "port": 8080,
            "registry": "layout",
            "submissionLimit": 50
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.storage_dir, "pages");
        assert_eq!(config.port, 8080);
        assert_eq!(config.registry, RegistryKind::Layout);
        assert_eq!(config.submission_limit, 50);
        assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{ "port": 4000 }"#).unwrap();
        assert_eq!(config.storage_dir, "data");
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 4000);
        assert_eq!(config.registry, RegistryKind::Full);
        assert_eq!(config.submission_limit, 1000);
    }

    #[test]
    fn test_missing_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path().to_str().unwrap()).unwrap();
        assert_eq!(config.port, 3030);
        assert_eq!(config.get_storage_dir("/srv"), PathBuf::from("/srv/data"));
    }

    #[test]
    fn test_invalid_host() {
        let config = Config {
            host: "localhost:80".to_string(),
            ..Config::default()
        };
        assert!(config.socket_addr().is_err());
    }

    #[test]
    fn test_registry_kinds() {
        assert_eq!(RegistryKind::Full.build().unwrap().len(), 16);
        assert_eq!(RegistryKind::Layout.build().unwrap().len(), 8);
    }
}
