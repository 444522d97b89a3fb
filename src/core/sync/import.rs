use serde::{Deserialize, Serialize};
use tracing::info;

use super::error::SyncError;
use super::identity::resolve_identity;
use crate::core::catalog::CatalogStore;
use crate::core::catalog::types::{AgentRecord, NewGatewayAgent};

pub const REASON_ALREADY_IMPORTED: &str = "Already imported";

const DEFAULT_WORKSPACE: &str = "default";

/// One remote agent selected for import. Missing fields deserialize to
/// empty/None and are caught by validation rather than rejected at the
/// transport layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportRequest {
    #[serde(default)]
    pub remote_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub workspace_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkippedImport {
    pub remote_id: String,
    pub reason: String,
}

#[derive(Debug, Serialize)]
pub struct ImportOutcome {
    pub imported: Vec<AgentRecord>,
    pub skipped: Vec<SkippedImport>,
}

pub struct ImportReconciler {
    catalog: CatalogStore,
}

impl ImportReconciler {
    pub fn new(catalog: CatalogStore) -> Self {
        Self { catalog }
    }

    /// Import a batch of remote agents exactly once each. Every request ends
    /// up in either `imported` or `skipped`; nothing is silently dropped.
    pub async fn import(&self, batch: Vec<ImportRequest>) -> Result<ImportOutcome, SyncError> {
        validate_batch(&batch)?;

        let index = self
            .catalog
            .gateway_agent_index()
            .await
            .map_err(|e| SyncError::PersistenceFailure(e.to_string()))?;

        let mut skipped = Vec::new();
        let mut eligible = Vec::new();
        for request in batch {
            let identity = resolve_identity(Some(&request.remote_id), Some(&request.name));
            if index.contains_key(&identity) {
                skipped.push(SkippedImport {
                    remote_id: request.remote_id,
                    reason: REASON_ALREADY_IMPORTED.to_string(),
                });
            } else {
                eligible.push(NewGatewayAgent {
                    gateway_agent_id: identity,
                    name: request.name,
                    model: request.model,
                    workspace_id: request
                        .workspace_id
                        .filter(|w| !w.is_empty())
                        .unwrap_or_else(|| DEFAULT_WORKSPACE.to_string()),
                });
            }
        }

        let result = self
            .catalog
            .import_gateway_agents(&eligible)
            .await
            .map_err(|e| SyncError::PersistenceFailure(e.to_string()))?;

        // Items that raced past the snapshot and hit the uniqueness
        // constraint are skips, not failures.
        for remote_id in result.already_present {
            skipped.push(SkippedImport {
                remote_id,
                reason: REASON_ALREADY_IMPORTED.to_string(),
            });
        }

        info!(
            "Imported {} gateway agent(s), skipped {}",
            result.imported.len(),
            skipped.len()
        );
        Ok(ImportOutcome {
            imported: result.imported,
            skipped,
        })
    }
}

fn validate_batch(batch: &[ImportRequest]) -> Result<(), SyncError> {
    if batch.is_empty() {
        return Err(SyncError::InvalidRequest(
            "import batch is empty".to_string(),
        ));
    }
    for (i, request) in batch.iter().enumerate() {
        if request.remote_id.is_empty() {
            return Err(SyncError::InvalidRequest(format!(
                "request #{}: remote_id is required",
                i + 1
            )));
        }
        if request.name.is_empty() {
            return Err(SyncError::InvalidRequest(format!(
                "request #{}: name is required",
                i + 1
            )));
        }
    }
    Ok(())
}
