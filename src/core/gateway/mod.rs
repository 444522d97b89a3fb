mod http;

pub use http::HttpGatewayClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Agent descriptor as the gateway registry reports it. Nothing about the
/// shape is guaranteed beyond "JSON object": every field is optional and
/// unknown fields are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemoteAgentDescriptor {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Failure classes a gateway client can produce. Callers translate these
/// into their own taxonomy at the call site instead of propagating raw.
#[derive(Debug, Error)]
pub enum GatewayClientError {
    #[error("could not connect to gateway: {0}")]
    Connect(String),
    #[error("gateway request failed: {0}")]
    Request(String),
    #[error("gateway returned a malformed response: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait GatewayClient: Send + Sync {
    fn is_connected(&self) -> bool;
    async fn connect(&self) -> Result<(), GatewayClientError>;
    async fn list_agents(&self) -> Result<Vec<RemoteAgentDescriptor>, GatewayClientError>;
}

/// Scripted in-process gateway for tests.
#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    pub(crate) enum GatewayScript {
        Agents(Vec<RemoteAgentDescriptor>),
        ConnectRefused,
        ListFails,
        MalformedListing,
    }

    pub(crate) struct TestGateway {
        script: GatewayScript,
        connected: AtomicBool,
        pub(crate) connect_calls: AtomicUsize,
    }

    impl TestGateway {
        pub(crate) fn new(script: GatewayScript) -> Arc<Self> {
            Arc::new(Self {
                script,
                connected: AtomicBool::new(false),
                connect_calls: AtomicUsize::new(0),
            })
        }

        pub(crate) fn with_agents(agents: Vec<RemoteAgentDescriptor>) -> Arc<Self> {
            Self::new(GatewayScript::Agents(agents))
        }
    }

    #[async_trait]
    impl GatewayClient for TestGateway {
        fn is_connected(&self) -> bool {
            self.connected.load(Ordering::Relaxed)
        }

        async fn connect(&self) -> Result<(), GatewayClientError> {
            self.connect_calls.fetch_add(1, Ordering::Relaxed);
            match self.script {
                GatewayScript::ConnectRefused => {
                    Err(GatewayClientError::Connect("connection refused".to_string()))
                }
                _ => {
                    self.connected.store(true, Ordering::Relaxed);
                    Ok(())
                }
            }
        }

        async fn list_agents(&self) -> Result<Vec<RemoteAgentDescriptor>, GatewayClientError> {
            match &self.script {
                GatewayScript::Agents(agents) => Ok(agents.clone()),
                GatewayScript::ConnectRefused => {
                    Err(GatewayClientError::Request("not connected".to_string()))
                }
                GatewayScript::ListFails => {
                    Err(GatewayClientError::Request("listing call errored".to_string()))
                }
                GatewayScript::MalformedListing => Err(GatewayClientError::Malformed(
                    "expected an array of agent descriptors".to_string(),
                )),
            }
        }
    }

    pub(crate) fn descriptor(id: Option<&str>, name: Option<&str>) -> RemoteAgentDescriptor {
        RemoteAgentDescriptor {
            id: id.map(str::to_string),
            name: name.map(str::to_string),
            ..Default::default()
        }
    }
}
