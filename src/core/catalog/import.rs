use anyhow::Result;
use rusqlite::{ErrorCode, params};
use tracing::debug;

use super::agents::map_agent_row;
use super::types::{AgentRecord, NewGatewayAgent};
use super::{
    CatalogStore, EVENT_AGENT_JOINED, IMPORT_AVATAR, IMPORT_DESCRIPTION, IMPORT_ROLE,
    SOURCE_GATEWAY,
};

/// Outcome of one transactional import batch.
#[derive(Debug, Default)]
pub struct GatewayImportResult {
    pub imported: Vec<AgentRecord>,
    /// Remote identities that hit the uniqueness constraint inside the
    /// transaction: another writer (or an earlier item of the same batch)
    /// already owns that `gateway_agent_id`.
    pub already_present: Vec<String>,
}

impl CatalogStore {
    /// Insert one agent row plus its paired audit event per batch item,
    /// all inside a single transaction. The UNIQUE constraint on
    /// `gateway_agent_id` is the source of truth for "already imported":
    /// a violation moves the item to `already_present` and the batch
    /// continues. Any other storage error rolls the whole batch back.
    pub async fn import_gateway_agents(
        &self,
        batch: &[NewGatewayAgent],
    ) -> Result<GatewayImportResult> {
        let mut db = self.db.lock().await;
        let tx = db.transaction()?;

        // One clock read per batch so each agent row and its event share an
        // exact timestamp.
        let now: String = tx.query_row("SELECT datetime('now')", [], |row| row.get(0))?;

        let mut result = GatewayImportResult::default();
        for item in batch {
            let id = uuid::Uuid::new_v4().to_string();
            let inserted = tx.execute(
                "INSERT INTO agents (id, name, role, description, avatar, is_master, \
                 workspace_id, model, source, gateway_agent_id, created_at, updated_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, 0, ?6, ?7, ?8, ?9, ?10, ?10)",
                params![
                    id,
                    item.name,
                    IMPORT_ROLE,
                    IMPORT_DESCRIPTION,
                    IMPORT_AVATAR,
                    item.workspace_id,
                    item.model,
                    SOURCE_GATEWAY,
                    item.gateway_agent_id,
                    now
                ],
            );

            match inserted {
                Ok(_) => {}
                Err(err) if is_unique_violation(&err) => {
                    debug!(
                        "Gateway agent {} already in catalog, skipping insert",
                        item.gateway_agent_id
                    );
                    result.already_present.push(item.gateway_agent_id.clone());
                    continue;
                }
                Err(err) => return Err(err.into()),
            }

            tx.execute(
                "INSERT INTO events (id, event_type, agent_id, message, created_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    uuid::Uuid::new_v4().to_string(),
                    EVENT_AGENT_JOINED,
                    id,
                    format!("Agent '{}' joined from the gateway", item.name),
                    now
                ],
            )?;

            let record = tx.query_row(
                "SELECT id, name, role, description, avatar, is_master, workspace_id, \
                 model, source, gateway_agent_id, created_at, updated_at \
                 FROM agents WHERE id = ?1",
                params![id],
                map_agent_row,
            )?;
            result.imported.push(record);
        }

        tx.commit()?;
        Ok(result)
    }
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation
    )
}
