//! Integration port — lifecycle and service-call handling for device
//! integrations.
//!
//! An integration bridges a vendor device SDK (robot vacuum, door lock, …)
//! into the nook system. The hub calls the lifecycle methods in order:
//!
//! 1. [`setup`](Integration::setup) — connect and report discoveries
//! 2. (the hub runs, forwarding service calls via
//!    [`handle_service_call`](Integration::handle_service_call) and polling
//!    via [`refresh`](Integration::refresh))
//! 3. [`teardown`](Integration::teardown) — release resources

use std::future::Future;

use nook_domain::device::Device;
use nook_domain::entity::Entity;
use nook_domain::error::NookError;

/// A pluggable device integration.
///
/// Implementations live in adapter crates (e.g. `nook-adapter-vacuum`).
/// The hub drives each instance from a single task, so implementations
/// never see concurrent calls; interior mutability only exists to satisfy
/// the `&self` service-call surface.
pub trait Integration {
    /// Unique name identifying this integration (e.g. `"vacuum"`).
    fn name(&self) -> &'static str;

    /// Establish vendor connectivity and report discovered devices.
    ///
    /// An integration that cannot confirm connectivity within its bounds
    /// returns [`NookError::NotReady`]; the hub parks it and retries setup
    /// later instead of registering a broken entity. Any other error is a
    /// hard failure.
    fn setup(&mut self) -> impl Future<Output = Result<Vec<DiscoveredDevice>, NookError>> + Send;

    /// Periodic authoritative poll.
    ///
    /// Returns fresh entity snapshots for the hub to persist. The default
    /// implementation reports nothing (suitable for push-only or static
    /// integrations).
    fn refresh(&self) -> impl Future<Output = Result<Vec<Entity>, NookError>> + Send {
        async { Ok(Vec::new()) }
    }

    /// Handle a service call (e.g. `turn_on`, `lock`) for an entity owned
    /// by this integration, addressed by its host-facing entity id.
    ///
    /// Returns the new [`Entity`] snapshot after handling the call.
    fn handle_service_call(
        &self,
        entity_id: &str,
        service: &str,
        data: serde_json::Value,
    ) -> impl Future<Output = Result<Entity, NookError>> + Send;

    /// Called on graceful shutdown. Release vendor handles and tasks.
    fn teardown(&mut self) -> impl Future<Output = Result<(), NookError>> + Send;
}

/// A device and its associated entities discovered during integration setup.
#[derive(Debug, Clone)]
pub struct DiscoveredDevice {
    pub device: Device,
    pub entities: Vec<Entity>,
}
