use std::sync::Arc;

use serde::Serialize;
use tracing::warn;

use super::error::SyncError;
use super::identity::{display_name, resolve_identity};
use crate::core::catalog::CatalogStore;
use crate::core::gateway::{GatewayClient, GatewayClientError};

/// A gateway agent annotated with local import state. View-model only,
/// never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct DiscoveredAgent {
    pub identity: String,
    pub display_name: String,
    pub model: Option<String>,
    pub channel: Option<String>,
    pub status: Option<String>,
    pub already_imported: bool,
    pub existing_local_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DiscoverOutcome {
    pub agents: Vec<DiscoveredAgent>,
    pub total: usize,
    pub already_imported: usize,
}

impl DiscoverOutcome {
    /// Counts are projections of the list, computed once here so they cannot
    /// drift from the agents actually returned.
    fn from_agents(agents: Vec<DiscoveredAgent>) -> Self {
        let total = agents.len();
        let already_imported = agents.iter().filter(|a| a.already_imported).count();
        Self {
            agents,
            total,
            already_imported,
        }
    }
}

pub struct DiscoveryResolver {
    gateway: Arc<dyn GatewayClient>,
    catalog: CatalogStore,
}

impl DiscoveryResolver {
    pub fn new(gateway: Arc<dyn GatewayClient>, catalog: CatalogStore) -> Self {
        Self { gateway, catalog }
    }

    /// List the gateway's agents, each annotated with whether its resolved
    /// identity already maps to a catalog row. No retries here; transient
    /// gateway failures surface typed and the caller decides.
    pub async fn discover(&self) -> Result<DiscoverOutcome, SyncError> {
        if !self.gateway.is_connected() {
            self.gateway
                .connect()
                .await
                .map_err(|e| SyncError::GatewayUnavailable(e.to_string()))?;
        }

        let descriptors = self.gateway.list_agents().await.map_err(|e| match e {
            GatewayClientError::Malformed(detail) => SyncError::GatewayMalformedResponse(detail),
            other => SyncError::GatewayListFailed(other.to_string()),
        })?;

        let index = self
            .catalog
            .gateway_agent_index()
            .await
            .map_err(|e| SyncError::PersistenceFailure(e.to_string()))?;

        let mut agents = Vec::with_capacity(descriptors.len());
        for descriptor in descriptors {
            let identity = resolve_identity(descriptor.id.as_deref(), descriptor.name.as_deref());
            if identity.is_empty() {
                // Neither id nor name: unmatchable, would collide with every
                // other identity-less descriptor. Drop it from the listing.
                warn!("Gateway agent has neither id nor name, dropping from discovery");
                continue;
            }

            let existing_local_id = index.get(&identity).cloned();
            agents.push(DiscoveredAgent {
                display_name: display_name(
                    descriptor.name.as_deref(),
                    descriptor.label.as_deref(),
                    &identity,
                ),
                model: descriptor.model,
                channel: descriptor.channel,
                status: descriptor.status,
                already_imported: existing_local_id.is_some(),
                existing_local_id,
                identity,
            });
        }

        Ok(DiscoverOutcome::from_agents(agents))
    }
}
