use anyhow::Result;
use rusqlite::params;
use std::collections::HashMap;

use super::CatalogStore;
use super::types::AgentRecord;

pub(super) fn map_agent_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<AgentRecord> {
    Ok(AgentRecord {
        id: row.get(0)?,
        name: row.get(1)?,
        role: row.get(2)?,
        description: row.get(3)?,
        avatar: row.get(4)?,
        is_master: row.get::<_, i32>(5)? != 0,
        workspace_id: row.get(6)?,
        model: row.get(7)?,
        source: row.get(8)?,
        gateway_agent_id: row.get(9)?,
        created_at: row.get(10)?,
        updated_at: row.get(11)?,
    })
}

impl CatalogStore {
    pub async fn list_agents(&self) -> Result<Vec<AgentRecord>> {
        let db = self.db.lock().await;
        let mut stmt = db.prepare(
            "SELECT id, name, role, description, avatar, is_master, workspace_id, \
             model, source, gateway_agent_id, created_at, updated_at \
             FROM agents ORDER BY created_at ASC, id ASC",
        )?;

        let rows = stmt.query_map([], map_agent_row)?;
        let mut results = Vec::new();
        for row in rows {
            results.push(row?);
        }
        Ok(results)
    }

    pub async fn get_agent(&self, id: &str) -> Result<Option<AgentRecord>> {
        let db = self.db.lock().await;
        let mut stmt = db.prepare(
            "SELECT id, name, role, description, avatar, is_master, workspace_id, \
             model, source, gateway_agent_id, created_at, updated_at \
             FROM agents WHERE id = ?1",
        )?;

        let mut rows = stmt.query_map(params![id], map_agent_row)?;
        match rows.next() {
            Some(row) => Ok(Some(row?)),
            None => Ok(None),
        }
    }

    /// Map of `gateway_agent_id` to local agent id for every imported row.
    /// Rows created locally carry NULL and are not part of the index.
    pub async fn gateway_agent_index(&self) -> Result<HashMap<String, String>> {
        let db = self.db.lock().await;
        let mut stmt = db.prepare(
            "SELECT gateway_agent_id, id FROM agents WHERE gateway_agent_id IS NOT NULL",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut index = HashMap::new();
        for row in rows {
            let (gateway_id, local_id) = row?;
            index.insert(gateway_id, local_id);
        }
        Ok(index)
    }
}
