//! Device — a physical thing that exposes one or more entities.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::DeviceId;

/// A registered device, provided by exactly one integration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    pub name: String,
    /// Name of the integration that provides this device.
    pub integration: String,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub serial: Option<String>,
}

impl Device {
    /// Start building a device.
    #[must_use]
    pub fn builder() -> DeviceBuilder {
        DeviceBuilder::default()
    }
}

/// Builder for [`Device`].
#[derive(Debug, Default)]
pub struct DeviceBuilder {
    id: Option<DeviceId>,
    name: String,
    integration: String,
    manufacturer: Option<String>,
    model: Option<String>,
    serial: Option<String>,
}

impl DeviceBuilder {
    /// Use an existing identity instead of generating a fresh one.
    #[must_use]
    pub fn id(mut self, id: DeviceId) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the display name (required).
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the providing integration's name.
    #[must_use]
    pub fn integration(mut self, integration: impl Into<String>) -> Self {
        self.integration = integration.into();
        self
    }

    /// Set the manufacturer.
    #[must_use]
    pub fn manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = Some(manufacturer.into());
        self
    }

    /// Set the model.
    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the vendor serial / hardware identifier.
    #[must_use]
    pub fn serial(mut self, serial: impl Into<String>) -> Self {
        self.serial = Some(serial.into());
        self
    }

    /// Validate and build the device.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyName`] when no name was provided.
    pub fn build(self) -> Result<Device, ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        Ok(Device {
            id: self.id.unwrap_or_default(),
            name: self.name,
            integration: self.integration,
            manufacturer: self.manufacturer,
            model: self.model,
            serial: self.serial,
        })
    }
}
