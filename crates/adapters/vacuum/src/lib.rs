//! # nook-adapter-vacuum
//!
//! Wi-Fi robot vacuum integration — wraps a blocking vendor vacuum SDK
//! behind the nook integration port.
//!
//! ## How it works
//!
//! The vendor SDK is consumed through the [`VacuumClient`] trait; its
//! blocking calls are dispatched onto tokio's blocking worker pool so the
//! hub's control loop never blocks. [`RobotVacuum`] keeps a cache of the
//! last readings: commands update it optimistically, the periodic poll
//! overwrites it authoritatively, and the poll is skipped entirely while
//! the client reports no live connection.
//!
//! Setup performs one connect attempt bounded by a configurable timeout;
//! on timeout the integration answers "not ready" so the hub retries
//! later instead of registering a broken entity.
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

pub use adapter::RobotVacuum;
pub use client::{BinState, ClientError, MissionState, Position, VacuumClient};
pub use config::VacuumConfig;
pub use error::VacuumError;

use std::sync::Arc;
use std::time::Duration;

use nook_app::ports::{DiscoveredDevice, Integration};
use nook_domain::device::Device;
use nook_domain::entity::Entity;
use nook_domain::error::{NookError, NotFoundError, NotReadyError, ValidationError};

pub(crate) const INTEGRATION_NAME: &str = "vacuum";

/// Robot vacuum integration over a shared vendor client.
pub struct VacuumIntegration<C> {
    config: VacuumConfig,
    client: Arc<C>,
    vacuum: Option<RobotVacuum<C>>,
}

impl<C: VacuumClient> VacuumIntegration<C> {
    /// Create the integration; nothing is contacted until setup.
    pub fn new(config: VacuumConfig, client: C) -> Self {
        Self {
            config,
            client: Arc::new(client),
            vacuum: None,
        }
    }

    /// One connect attempt, bounded by the configured timeout.
    ///
    /// On expiry we only stop waiting — the blocking connect keeps running
    /// on its worker thread and is abandoned, not cancelled.
    async fn connect_with_timeout(&self) -> Result<(), VacuumError> {
        let bound = Duration::from_secs(self.config.connect_timeout_secs);
        let client = Arc::clone(&self.client);
        let connect = tokio::task::spawn_blocking(move || client.connect());
        match tokio::time::timeout(bound, connect).await {
            Err(_elapsed) => Err(VacuumError::ConnectTimeout {
                host: self.config.host.clone(),
                timeout_secs: self.config.connect_timeout_secs,
            }),
            Ok(joined) => joined
                .map_err(VacuumError::Worker)?
                .map_err(VacuumError::from),
        }
    }
}

impl<C: VacuumClient> Integration for VacuumIntegration<C> {
    fn name(&self) -> &'static str {
        INTEGRATION_NAME
    }

    async fn setup(&mut self) -> Result<Vec<DiscoveredDevice>, NookError> {
        tracing::debug!(host = %self.config.host, "initializing communication with the robot");
        self.connect_with_timeout()
            .await
            .map_err(VacuumError::into_domain)?;

        if let Some(map_path) = self.config.map.clone() {
            let floorplan = self.config.floorplan.clone();
            client::dispatch(&self.client, move |c: &C| {
                c.enable_mapping(&map_path, floorplan.as_deref())
            })
            .await
            .map_err(VacuumError::into_domain)?;
        }

        let vacuum = RobotVacuum::new(self.config.name.clone(), Arc::clone(&self.client));
        // Initial authoritative poll, so the entity registers with real
        // readings instead of an empty cache.
        vacuum.update().await.map_err(VacuumError::into_domain)?;

        let device = Device::builder()
            .id(vacuum.device_id())
            .name(self.config.name.clone())
            .integration(INTEGRATION_NAME)
            .serial(self.config.username.clone())
            .build()?;
        let entity = vacuum.snapshot()?;
        tracing::info!(entity_id = %vacuum.entity_id(), "robot vacuum discovered");

        self.vacuum = Some(vacuum);
        Ok(vec![DiscoveredDevice {
            device,
            entities: vec![entity],
        }])
    }

    async fn refresh(&self) -> Result<Vec<Entity>, NookError> {
        let Some(vacuum) = &self.vacuum else {
            return Ok(Vec::new());
        };
        vacuum.update().await.map_err(VacuumError::into_domain)?;
        Ok(vec![vacuum.snapshot()?])
    }

    async fn handle_service_call(
        &self,
        entity_id: &str,
        service: &str,
        data: serde_json::Value,
    ) -> Result<Entity, NookError> {
        let vacuum = self.vacuum.as_ref().ok_or(NotReadyError {
            integration: INTEGRATION_NAME,
        })?;
        if entity_id != vacuum.entity_id() {
            return Err(NotFoundError {
                entity: "Entity",
                id: entity_id.to_string(),
            }
            .into());
        }

        match service {
            "start" => vacuum.start().await,
            "turn_on" => vacuum.turn_on().await,
            "turn_off" => vacuum.turn_off().await,
            "stop" => vacuum.stop().await,
            "pause" => vacuum.pause().await,
            "resume" => vacuum.resume().await,
            "return_to_base" => vacuum.return_to_base().await,
            "quick_clean" => vacuum.quick_clean().await,
            "spot_clean" => vacuum.spot_clean().await,
            "start_training" => vacuum.start_training().await,
            "locate" => vacuum.locate().await,
            "start_pause" => vacuum.start_pause().await,
            "set_stop_on_full_bin" => vacuum.set_stop_on_full_bin(enabled_flag(&data)?).await,
            "set_two_passes" => vacuum.set_two_passes(enabled_flag(&data)?).await,
            _ => {
                return Err(NotFoundError {
                    entity: "Service",
                    id: service.to_string(),
                }
                .into());
            }
        }
        .map_err(VacuumError::into_domain)?;

        vacuum.snapshot()
    }

    async fn teardown(&mut self) -> Result<(), NookError> {
        // The vendor client owns the connection lifecycle; releasing the
        // adapter is all there is to do.
        self.vacuum = None;
        Ok(())
    }
}

/// Pull the required `enabled` flag out of service-call data.
fn enabled_flag(data: &serde_json::Value) -> Result<bool, NookError> {
    data.get("enabled")
        .and_then(serde_json::Value::as_bool)
        .ok_or_else(|| ValidationError::MissingField { field: "enabled" }.into())
}
