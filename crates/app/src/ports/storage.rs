//! Storage port — registry traits for entities and devices.

use std::future::Future;

use nook_domain::device::Device;
use nook_domain::entity::Entity;
use nook_domain::error::NookError;
use nook_domain::id::{DeviceId, EntityId};

/// Registry of entities, keyed by internal id and host-facing entity id.
pub trait EntityRepository: Send + Sync {
    /// Insert a new entity.
    fn create(&self, entity: Entity) -> impl Future<Output = Result<Entity, NookError>> + Send;

    /// Replace a stored entity (matched by internal id).
    fn update(&self, entity: Entity) -> impl Future<Output = Result<Entity, NookError>> + Send;

    /// Fetch by internal id.
    fn get_by_id(
        &self,
        id: EntityId,
    ) -> impl Future<Output = Result<Option<Entity>, NookError>> + Send;

    /// Fetch by host-facing entity id string (`vacuum.kitchen`).
    fn find_by_entity_id(
        &self,
        entity_id: &str,
    ) -> impl Future<Output = Result<Option<Entity>, NookError>> + Send;

    /// List every stored entity.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Entity>, NookError>> + Send;

    /// Remove an entity; removing a missing entity is not an error.
    fn delete(&self, id: EntityId) -> impl Future<Output = Result<(), NookError>> + Send;
}

/// Registry of devices.
pub trait DeviceRepository: Send + Sync {
    /// Insert or replace a device (matched by internal id).
    fn upsert(&self, device: Device) -> impl Future<Output = Result<Device, NookError>> + Send;

    /// Fetch by internal id.
    fn get_by_id(
        &self,
        id: DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, NookError>> + Send;

    /// List every stored device.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Device>, NookError>> + Send;

    /// Remove a device; removing a missing device is not an error.
    fn delete(&self, id: DeviceId) -> impl Future<Output = Result<(), NookError>> + Send;
}
