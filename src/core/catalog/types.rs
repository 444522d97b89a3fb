/// A persisted catalog agent row.
#[derive(Debug, Clone, serde::Serialize)]
pub struct AgentRecord {
    pub id: String,
    pub name: String,
    pub role: String,
    pub description: String,
    pub avatar: String,
    pub is_master: bool,
    pub workspace_id: String,
    pub model: Option<String>,
    pub source: String,
    pub gateway_agent_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// An append-only audit event. `agent_id` is a weak reference by identity;
/// events survive whatever later happens to the agent row.
#[derive(Debug, Clone, serde::Serialize)]
pub struct EventRecord {
    pub id: String,
    pub event_type: String,
    pub agent_id: String,
    pub message: String,
    pub created_at: String,
}

/// Column values for one gateway import, prepared by the reconciler.
#[derive(Debug, Clone)]
pub struct NewGatewayAgent {
    pub gateway_agent_id: String,
    pub name: String,
    pub model: Option<String>,
    pub workspace_id: String,
}
