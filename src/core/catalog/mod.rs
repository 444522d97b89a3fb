mod agents;
mod events;
mod import;
pub mod types;

pub use import::GatewayImportResult;

use anyhow::Result;
use rusqlite::Connection;
use std::path::Path;
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Mutex;

/// Source tag for rows created by the import reconciler.
pub const SOURCE_GATEWAY: &str = "gateway";

/// Audit event type written alongside every successful import.
pub const EVENT_AGENT_JOINED: &str = "agent_joined";

/// Placeholder profile for imported agents until catalog management edits them.
pub(crate) const IMPORT_ROLE: &str = "agent";
pub(crate) const IMPORT_DESCRIPTION: &str = "Imported from the gateway registry";
pub(crate) const IMPORT_AVATAR: &str = "gateway";

#[derive(Clone)]
pub struct CatalogStore {
    db: Arc<Mutex<Connection>>,
}

impl CatalogStore {
    pub async fn open<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        if !data_dir.exists() {
            fs::create_dir_all(&data_dir).await?;
        }

        let db_path = data_dir.join("catalog.db");
        let db = Connection::open(&db_path)?;
        Self::init_schema(&db)?;

        Ok(Self {
            db: Arc::new(Mutex::new(db)),
        })
    }

    fn init_schema(db: &Connection) -> Result<()> {
        // gateway_agent_id is UNIQUE but nullable: SQLite permits any number
        // of NULLs in a UNIQUE column, so only imported rows are constrained.
        db.execute(
            "CREATE TABLE IF NOT EXISTS agents (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                role TEXT NOT NULL,
                description TEXT NOT NULL,
                avatar TEXT NOT NULL,
                is_master INTEGER NOT NULL DEFAULT 0,
                workspace_id TEXT NOT NULL,
                model TEXT,
                source TEXT NOT NULL,
                gateway_agent_id TEXT UNIQUE,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )",
            [],
        )?;

        db.execute(
            "CREATE TABLE IF NOT EXISTS events (
                id TEXT PRIMARY KEY,
                event_type TEXT NOT NULL,
                agent_id TEXT NOT NULL,
                message TEXT NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )",
            [],
        )?;

        db.execute(
            "CREATE INDEX IF NOT EXISTS idx_events_agent_id ON events(agent_id)",
            [],
        )?;

        Ok(())
    }
}

/// Create a CatalogStore in a fresh temp directory. Avoids touching ./data.
#[cfg(test)]
pub async fn test_catalog_store() -> CatalogStore {
    let tmpdir = std::env::temp_dir().join(format!("roster-test-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&tmpdir).expect("create temp dir");

    let db = Connection::open(tmpdir.join("catalog.db")).expect("open test db");
    CatalogStore::init_schema(&db).expect("init schema");

    CatalogStore {
        db: Arc::new(Mutex::new(db)),
    }
}
