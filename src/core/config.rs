use anyhow::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Deserialize)]
pub struct RosterConfig {
    #[serde(default = "default_api_host")]
    pub api_host: String,

    #[serde(default = "default_api_port")]
    pub api_port: u16,

    /// Directory holding catalog.db. Created on first open.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default)]
    pub gateway: GatewayConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_gateway_url")]
    pub base_url: String,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

fn default_api_host() -> String {
    "127.0.0.1".to_string()
}
fn default_api_port() -> u16 {
    7410
}
fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}
fn default_gateway_url() -> String {
    "http://127.0.0.1:7400".to_string()
}
fn default_connect_timeout() -> u64 {
    10
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            api_host: default_api_host(),
            api_port: default_api_port(),
            data_dir: default_data_dir(),
            gateway: GatewayConfig::default(),
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: default_gateway_url(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

impl RosterConfig {
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!("No {} found, using default configuration.", path.display());
            return Ok(Self::default());
        }
        let content = tokio::fs::read_to_string(path).await?;
        let config: RosterConfig = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_falls_back_to_defaults() {
        let config = RosterConfig::load("/nonexistent/roster.toml").await.unwrap();
        assert_eq!(config.api_host, "127.0.0.1");
        assert_eq!(config.api_port, 7410);
        assert_eq!(config.gateway.base_url, "http://127.0.0.1:7400");
    }

    #[test]
    fn partial_file_fills_remaining_defaults() {
        let config: RosterConfig = toml::from_str(
            r#"
            api_port = 9999

            [gateway]
            base_url = "http://10.0.0.5:7400"
            "#,
        )
        .unwrap();
        assert_eq!(config.api_port, 9999);
        assert_eq!(config.api_host, "127.0.0.1");
        assert_eq!(config.gateway.base_url, "http://10.0.0.5:7400");
        assert_eq!(config.gateway.connect_timeout_secs, 10);
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let config: RosterConfig = toml::from_str("").unwrap();
        assert_eq!(config.data_dir, PathBuf::from("./data"));
    }
}
