use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

/// Bootstrap settings for the listener. The protocol core reads none of these.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub listen_addr: String,
    /// Pending-connection backlog passed to `listen(2)`.
    pub backlog: u32,
    /// Responses slower than this are logged at warn level.
    pub slow_response_threshold_us: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8000".to_string(),
            backlog: 10,
            slow_response_threshold_us: 7000,
        }
    }
}

impl Config {
    /// Defaults, then the optional YAML file, then the `LISTEN` override.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let cfg = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(cfg.with_env_overrides())
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_yaml_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    pub fn from_yaml_str(content: &str) -> anyhow::Result<Self> {
        let cfg: Config = serde_yaml::from_str(content)?;
        anyhow::ensure!(!cfg.listen_addr.is_empty(), "listen_addr must not be empty");
        Ok(cfg)
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(addr) = std::env::var("LISTEN") {
            self.listen_addr = addr;
        }
        self
    }
}
