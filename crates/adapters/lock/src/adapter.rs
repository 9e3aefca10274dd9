//! Cached-state device adapter for one door lock.
//!
//! `lock`/`unlock` apply an optimistic locked flag; the periodic
//! [`update`](DoorLock::update) re-reads the authoritative state from the
//! vendor and wins on conflict.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use nook_domain::entity::{Entity, EntityState, slugify};
use nook_domain::error::NookError;
use nook_domain::id::{DeviceId, EntityId};

use crate::client::{LockClient, dispatch};
use crate::error::LockError;

#[derive(Debug, Clone, Default)]
struct Cache {
    available: bool,
    locked: Option<bool>,
    battery_low: bool,
    no_response: bool,
}

/// One door lock behind a shared vendor client handle.
pub struct DoorLock<C> {
    id: EntityId,
    device_id: DeviceId,
    name: String,
    entity_id: String,
    client: Arc<C>,
    cache: Mutex<Cache>,
}

impl<C: LockClient> DoorLock<C> {
    /// Create an adapter for the given client.
    ///
    /// The cache starts empty and unavailable until the first poll.
    pub fn new(client: Arc<C>) -> Self {
        let name = client.name();
        let entity_id = format!("lock.{}", slugify(&name));
        Self {
            id: EntityId::new(),
            device_id: DeviceId::new(),
            name,
            entity_id,
            client,
            cache: Mutex::new(Cache::default()),
        }
    }

    /// Display name of the lock.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Host-facing entity id (`lock.<slug>`).
    #[must_use]
    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }

    /// Stable internal device identity.
    #[must_use]
    pub fn device_id(&self) -> DeviceId {
        self.device_id
    }

    /// Locked flag from the last poll or command.
    #[must_use]
    pub fn is_locked(&self) -> Option<bool> {
        self.lock_cache().locked
    }

    /// Engage the lock and optimistically mark it locked.
    ///
    /// # Errors
    ///
    /// Propagates the vendor call failure unchanged.
    pub async fn lock(&self) -> Result<(), LockError> {
        dispatch(&self.client, C::lock).await?;
        self.lock_cache().locked = Some(true);
        Ok(())
    }

    /// Release the lock and optimistically mark it unlocked.
    ///
    /// # Errors
    ///
    /// Propagates the vendor call failure unchanged.
    pub async fn unlock(&self) -> Result<(), LockError> {
        dispatch(&self.client, C::unlock).await?;
        self.lock_cache().locked = Some(false);
        Ok(())
    }

    /// Authoritative poll: re-read locked state and health flags.
    ///
    /// # Errors
    ///
    /// Propagates the first vendor getter failure unchanged; the cache is
    /// only written after all getters succeeded.
    pub async fn update(&self) -> Result<(), LockError> {
        let locked = dispatch(&self.client, C::is_locked).await?;
        let battery_low = dispatch(&self.client, C::battery_low).await?;
        let no_response = dispatch(&self.client, C::no_response).await?;

        let mut cache = self.lock_cache();
        cache.available = true;
        cache.locked = Some(locked);
        cache.battery_low = battery_low;
        cache.no_response = no_response;
        Ok(())
    }

    /// Build an entity snapshot from the cache.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the vendor name produced an invalid
    /// entity id.
    pub fn snapshot(&self) -> Result<Entity, NookError> {
        let cache = self.lock_cache().clone();
        let state = if !cache.available {
            EntityState::Unavailable
        } else {
            match cache.locked {
                Some(true) => EntityState::Locked,
                Some(false) => EntityState::Unlocked,
                None => EntityState::Unknown,
            }
        };

        Entity::builder()
            .id(self.id)
            .device_id(self.device_id)
            .entity_id(self.entity_id.clone())
            .friendly_name(self.name.clone())
            .state(state)
            .attribute("device_id", self.client.vendor_device_id())
            .attribute("device_type", self.client.device_kind())
            .attribute("battery_low", cache.battery_low)
            .attribute("no_response", cache.no_response)
            .build()
            .map_err(NookError::from)
    }

    fn lock_cache(&self) -> MutexGuard<'_, Cache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
