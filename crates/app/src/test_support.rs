//! In-memory port implementations shared by this crate's unit tests.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;

use nook_domain::device::Device;
use nook_domain::entity::Entity;
use nook_domain::error::NookError;
use nook_domain::event::Event;
use nook_domain::id::{DeviceId, EntityId};

use crate::ports::{DeviceRepository, EntityRepository, EventPublisher};

#[derive(Default)]
pub struct InMemoryEntityRepo {
    store: Mutex<HashMap<EntityId, Entity>>,
}

impl EntityRepository for InMemoryEntityRepo {
    fn create(&self, entity: Entity) -> impl Future<Output = Result<Entity, NookError>> + Send {
        self.store.lock().unwrap().insert(entity.id, entity.clone());
        async { Ok(entity) }
    }

    fn update(&self, entity: Entity) -> impl Future<Output = Result<Entity, NookError>> + Send {
        self.store.lock().unwrap().insert(entity.id, entity.clone());
        async { Ok(entity) }
    }

    fn get_by_id(
        &self,
        id: EntityId,
    ) -> impl Future<Output = Result<Option<Entity>, NookError>> + Send {
        let result = self.store.lock().unwrap().get(&id).cloned();
        async { Ok(result) }
    }

    fn find_by_entity_id(
        &self,
        entity_id: &str,
    ) -> impl Future<Output = Result<Option<Entity>, NookError>> + Send {
        let result = self
            .store
            .lock()
            .unwrap()
            .values()
            .find(|ent| ent.entity_id == entity_id)
            .cloned();
        async { Ok(result) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Entity>, NookError>> + Send {
        let result: Vec<Entity> = self.store.lock().unwrap().values().cloned().collect();
        async { Ok(result) }
    }

    fn delete(&self, id: EntityId) -> impl Future<Output = Result<(), NookError>> + Send {
        self.store.lock().unwrap().remove(&id);
        async { Ok(()) }
    }
}

#[derive(Default)]
pub struct InMemoryDeviceRepo {
    store: Mutex<HashMap<DeviceId, Device>>,
}

impl DeviceRepository for InMemoryDeviceRepo {
    fn upsert(&self, device: Device) -> impl Future<Output = Result<Device, NookError>> + Send {
        self.store.lock().unwrap().insert(device.id, device.clone());
        async { Ok(device) }
    }

    fn get_by_id(
        &self,
        id: DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, NookError>> + Send {
        let result = self.store.lock().unwrap().get(&id).cloned();
        async { Ok(result) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Device>, NookError>> + Send {
        let result: Vec<Device> = self.store.lock().unwrap().values().cloned().collect();
        async { Ok(result) }
    }

    fn delete(&self, id: DeviceId) -> impl Future<Output = Result<(), NookError>> + Send {
        self.store.lock().unwrap().remove(&id);
        async { Ok(()) }
    }
}

/// Captures every published event for later assertions.
#[derive(Default)]
pub struct RecordingPublisher {
    events: Mutex<Vec<Event>>,
}

impl RecordingPublisher {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }
}

impl EventPublisher for RecordingPublisher {
    fn publish(&self, event: Event) -> impl Future<Output = Result<(), NookError>> + Send {
        self.events.lock().unwrap().push(event);
        async { Ok(()) }
    }
}
