//! Device service — use-cases for managing devices.

use nook_domain::device::Device;
use nook_domain::error::{NookError, NotFoundError};
use nook_domain::id::DeviceId;

use crate::ports::DeviceRepository;

/// Application service for device registration and lookup.
pub struct DeviceService<R> {
    repo: R,
}

impl<R: DeviceRepository> DeviceService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Insert or replace a device.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn upsert_device(&self, device: Device) -> Result<Device, NookError> {
        self.repo.upsert(device).await
    }

    /// Look up a device by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`NookError::NotFound`] when no device with `id` exists,
    /// or a storage error from the repository.
    pub async fn get_device(&self, id: DeviceId) -> Result<Device, NookError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Device",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List all devices.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_devices(&self) -> Result<Vec<Device>, NookError> {
        self.repo.get_all().await
    }
}
