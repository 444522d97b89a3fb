mod handlers;
mod router;

pub use router::build_api_router;

use std::sync::Arc;

use crate::core::catalog::CatalogStore;
use crate::core::gateway::GatewayClient;

#[derive(Clone)]
pub struct AppState {
    pub(crate) catalog: CatalogStore,
    pub(crate) gateway: Arc<dyn GatewayClient>,
    pub(crate) api_port: u16,
}

impl AppState {
    pub fn new(catalog: CatalogStore, gateway: Arc<dyn GatewayClient>, api_port: u16) -> Self {
        Self {
            catalog,
            gateway,
            api_port,
        }
    }
}
