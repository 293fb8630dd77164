//! Archetype read endpoints

use crate::error::ArchetypeResult;
use crate::transport::SignedTransport;
use archetype_types::{Archetype, StrategyArchetypes};
use reqwest::Method;
use tracing::{debug, instrument};

/// Path listing the archetypes of a strategy
pub fn strategy_path(strategy_id: &str) -> String {
    format!("/internal/archetype/strategy/{}", strategy_id)
}

/// Path of a single archetype
pub fn archetype_path(archetype_id: &str) -> String {
    format!("/internal/archetype/{}", archetype_id)
}

/// Archetype endpoints
pub struct ArchetypeEndpoints<'a> {
    transport: &'a SignedTransport,
}

impl<'a> ArchetypeEndpoints<'a> {
    pub fn new(transport: &'a SignedTransport) -> Self {
        Self { transport }
    }

    /// Get all archetype IDs for a strategy
    #[instrument(skip(self))]
    pub async fn get_strategy_archetypes(
        &self,
        strategy_id: &str,
    ) -> ArchetypeResult<StrategyArchetypes> {
        debug!("Fetching strategy archetypes");
        self.transport
            .request_as(Method::GET, &strategy_path(strategy_id), None, None)
            .await
    }

    /// Get the portfolio allocation of an archetype
    #[instrument(skip(self))]
    pub async fn get_archetype(&self, archetype_id: &str) -> ArchetypeResult<Archetype> {
        debug!("Fetching archetype");
        self.transport
            .request_as(Method::GET, &archetype_path(archetype_id), None, None)
            .await
    }
}
