//! # nook-adapter-lock
//!
//! Door lock integration — wraps a blocking vendor lock SDK behind the
//! nook integration port.
//!
//! The vendor SDK is consumed through the [`LockClient`] trait; blocking
//! calls run on tokio's blocking worker pool. [`DoorLock`] caches the last
//! readings: `lock`/`unlock` update the locked flag optimistically, the
//! periodic poll re-reads it authoritatively.
//!
//! ## Dependency rule
//!
//! Depends on `nook-app` (port traits) and `nook-domain` only.

mod adapter;
mod client;
mod config;
mod error;
pub mod sim;

#[cfg(test)]
pub(crate) mod test_support;

pub use adapter::DoorLock;
pub use client::{ClientError, LockClient};
pub use config::LockConfig;
pub use error::LockError;

use std::sync::Arc;

use nook_app::ports::{DiscoveredDevice, Integration};
use nook_domain::device::Device;
use nook_domain::entity::Entity;
use nook_domain::error::{NookError, NotFoundError, NotReadyError};

pub(crate) const INTEGRATION_NAME: &str = "lock";

/// Door lock integration over a shared vendor client.
pub struct LockIntegration<C> {
    config: LockConfig,
    client: Arc<C>,
    door: Option<DoorLock<C>>,
}

impl<C: LockClient> LockIntegration<C> {
    /// Create the integration; nothing is contacted until setup.
    pub fn new(config: LockConfig, client: C) -> Self {
        Self {
            config,
            client: Arc::new(client),
            door: None,
        }
    }
}

impl<C: LockClient> Integration for LockIntegration<C> {
    fn name(&self) -> &'static str {
        INTEGRATION_NAME
    }

    async fn setup(&mut self) -> Result<Vec<DiscoveredDevice>, NookError> {
        tracing::debug!(username = %self.config.username, "fetching lock state from the vendor");
        let door = DoorLock::new(Arc::clone(&self.client));
        // Initial authoritative poll; vendor failures propagate as-is.
        door.update().await.map_err(LockError::into_domain)?;

        let device = Device::builder()
            .id(door.device_id())
            .name(door.name())
            .integration(INTEGRATION_NAME)
            .model(self.client.device_kind())
            .serial(self.client.vendor_device_id())
            .build()?;
        let entity = door.snapshot()?;
        tracing::info!(entity_id = %door.entity_id(), "door lock discovered");

        self.door = Some(door);
        Ok(vec![DiscoveredDevice {
            device,
            entities: vec![entity],
        }])
    }

    async fn refresh(&self) -> Result<Vec<Entity>, NookError> {
        let Some(door) = &self.door else {
            return Ok(Vec::new());
        };
        door.update().await.map_err(LockError::into_domain)?;
        Ok(vec![door.snapshot()?])
    }

    async fn handle_service_call(
        &self,
        entity_id: &str,
        service: &str,
        _data: serde_json::Value,
    ) -> Result<Entity, NookError> {
        let door = self.door.as_ref().ok_or(NotReadyError {
            integration: INTEGRATION_NAME,
        })?;
        if entity_id != door.entity_id() {
            return Err(NotFoundError {
                entity: "Entity",
                id: entity_id.to_string(),
            }
            .into());
        }

        match service {
            "lock" => door.lock().await,
            "unlock" => door.unlock().await,
            _ => {
                return Err(NotFoundError {
                    entity: "Service",
                    id: service.to_string(),
                }
                .into());
            }
        }
        .map_err(LockError::into_domain)?;

        door.snapshot()
    }

    async fn teardown(&mut self) -> Result<(), NookError> {
        self.door = None;
        Ok(())
    }
}
