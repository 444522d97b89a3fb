use anyhow::Result;
use rusqlite::params;

use super::CatalogStore;
use super::types::EventRecord;

fn map_event_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<EventRecord> {
    Ok(EventRecord {
        id: row.get(0)?,
        event_type: row.get(1)?,
        agent_id: row.get(2)?,
        message: row.get(3)?,
        created_at: row.get(4)?,
    })
}

impl CatalogStore {
    /// Most recent events first.
    pub async fn list_events(&self, limit: usize) -> Result<Vec<EventRecord>> {
        let db = self.db.lock().await;
        let mut stmt = db.prepare(
            "SELECT id, event_type, agent_id, message, created_at FROM events \
             ORDER BY created_at DESC, id DESC LIMIT ?1",
        )?;

        let rows = stmt.query_map(params![limit as i64], map_event_row)?;
        let mut results = Vec::new();
        for row in rows {
            results.push(row?);
        }
        Ok(results)
    }

    pub async fn events_for_agent(&self, agent_id: &str) -> Result<Vec<EventRecord>> {
        let db = self.db.lock().await;
        let mut stmt = db.prepare(
            "SELECT id, event_type, agent_id, message, created_at FROM events \
             WHERE agent_id = ?1 ORDER BY created_at ASC, id ASC",
        )?;

        let rows = stmt.query_map(params![agent_id], map_event_row)?;
        let mut results = Vec::new();
        for row in rows {
            results.push(row?);
        }
        Ok(results)
    }
}
