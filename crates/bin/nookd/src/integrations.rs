//! Wrapper enum over the concrete integrations wired by this daemon.
//!
//! The hub is generic over one [`Integration`] type; this enum lets it
//! hold the vacuum and lock integrations side by side.

use nook_adapter_lock::{LockIntegration, sim::SimulatedLock};
use nook_adapter_vacuum::{VacuumIntegration, sim::SimulatedVacuum};
use nook_app::ports::{DiscoveredDevice, Integration};
use nook_domain::entity::Entity;
use nook_domain::error::NookError;

/// One of the integrations this daemon knows how to wire.
pub enum IntegrationKind {
    Vacuum(VacuumIntegration<SimulatedVacuum>),
    Lock(LockIntegration<SimulatedLock>),
}

impl Integration for IntegrationKind {
    fn name(&self) -> &'static str {
        match self {
            Self::Vacuum(integration) => integration.name(),
            Self::Lock(integration) => integration.name(),
        }
    }

    async fn setup(&mut self) -> Result<Vec<DiscoveredDevice>, NookError> {
        match self {
            Self::Vacuum(integration) => integration.setup().await,
            Self::Lock(integration) => integration.setup().await,
        }
    }

    async fn refresh(&self) -> Result<Vec<Entity>, NookError> {
        match self {
            Self::Vacuum(integration) => integration.refresh().await,
            Self::Lock(integration) => integration.refresh().await,
        }
    }

    async fn handle_service_call(
        &self,
        entity_id: &str,
        service: &str,
        data: serde_json::Value,
    ) -> Result<Entity, NookError> {
        match self {
            Self::Vacuum(integration) => {
                integration.handle_service_call(entity_id, service, data).await
            }
            Self::Lock(integration) => {
                integration.handle_service_call(entity_id, service, data).await
            }
        }
    }

    async fn teardown(&mut self) -> Result<(), NookError> {
        match self {
            Self::Vacuum(integration) => integration.teardown().await,
            Self::Lock(integration) => integration.teardown().await,
        }
    }
}
