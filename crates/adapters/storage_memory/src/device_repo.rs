//! In-memory [`DeviceRepository`] implementation.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{PoisonError, RwLock};

use nook_app::ports::DeviceRepository;
use nook_domain::device::Device;
use nook_domain::error::NookError;
use nook_domain::id::DeviceId;

/// Device registry over a process-local map.
#[derive(Default)]
pub struct MemoryDeviceRepository {
    store: RwLock<HashMap<DeviceId, Device>>,
}

impl MemoryDeviceRepository {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<DeviceId, Device>> {
        self.store.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<DeviceId, Device>> {
        self.store.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DeviceRepository for MemoryDeviceRepository {
    fn upsert(&self, device: Device) -> impl Future<Output = Result<Device, NookError>> + Send {
        self.write().insert(device.id, device.clone());
        async { Ok(device) }
    }

    fn get_by_id(
        &self,
        id: DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, NookError>> + Send {
        let result = self.read().get(&id).cloned();
        async { Ok(result) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Device>, NookError>> + Send {
        let result: Vec<Device> = self.read().values().cloned().collect();
        async { Ok(result) }
    }

    fn delete(&self, id: DeviceId) -> impl Future<Output = Result<(), NookError>> + Send {
        self.write().remove(&id);
        async { Ok(()) }
    }
}
