use async_trait::async_trait;
use reqwest::Client;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::debug;

use super::{GatewayClient, GatewayClientError, RemoteAgentDescriptor};
use crate::core::config::GatewayConfig;

/// Gateway registry over HTTP. Holds no session state beyond a connectivity
/// flag set by the last successful health probe.
pub struct HttpGatewayClient {
    base_url: String,
    client: Client,
    connected: AtomicBool,
}

impl HttpGatewayClient {
    pub fn new(config: &GatewayConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            connected: AtomicBool::new(false),
        })
    }
}

#[async_trait]
impl GatewayClient for HttpGatewayClient {
    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Relaxed)
    }

    async fn connect(&self) -> Result<(), GatewayClientError> {
        let url = format!("{}/api/health", self.base_url);
        let res = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| GatewayClientError::Connect(e.to_string()))?;

        if !res.status().is_success() {
            return Err(GatewayClientError::Connect(format!(
                "health check returned {}",
                res.status()
            )));
        }

        debug!("Gateway reachable at {}", self.base_url);
        self.connected.store(true, Ordering::Relaxed);
        Ok(())
    }

    async fn list_agents(&self) -> Result<Vec<RemoteAgentDescriptor>, GatewayClientError> {
        let url = format!("{}/api/agents", self.base_url);
        let res = self.client.get(&url).send().await.map_err(|e| {
            self.connected.store(false, Ordering::Relaxed);
            GatewayClientError::Request(e.to_string())
        })?;

        if !res.status().is_success() {
            return Err(GatewayClientError::Request(format!(
                "agent listing returned {}",
                res.status()
            )));
        }

        let body: serde_json::Value = res
            .json()
            .await
            .map_err(|e| GatewayClientError::Malformed(e.to_string()))?;
        parse_agent_listing(&body)
    }
}

/// A well-formed listing is a JSON array of objects, either bare or under an
/// "agents" key. Anything else is a contract violation by the gateway.
fn parse_agent_listing(
    body: &serde_json::Value,
) -> Result<Vec<RemoteAgentDescriptor>, GatewayClientError> {
    let items = match body {
        serde_json::Value::Array(items) => items,
        serde_json::Value::Object(map) => match map.get("agents") {
            Some(serde_json::Value::Array(items)) => items,
            _ => {
                return Err(GatewayClientError::Malformed(
                    "expected an array of agent descriptors".to_string(),
                ));
            }
        },
        _ => {
            return Err(GatewayClientError::Malformed(
                "expected an array of agent descriptors".to_string(),
            ));
        }
    };

    items
        .iter()
        .map(|item| {
            serde_json::from_value(item.clone())
                .map_err(|e| GatewayClientError::Malformed(e.to_string()))
        })
        .collect()
}
