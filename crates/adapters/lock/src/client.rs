//! Vendor client contract — the blocking door-lock SDK surface the
//! adapter consumes.
//!
//! `lock`/`unlock`/`is_locked` and the health getters may block on network
//! IO and are dispatched onto tokio's blocking worker pool. The metadata
//! getters (`name`, `vendor_device_id`, `device_kind`) return values the
//! SDK already holds locally and must not block.

use std::sync::Arc;

use crate::error::LockError;

/// Error surfaced by a vendor client implementation.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The vendor account session is gone.
    #[error("no session with the vendor service")]
    NoSession,

    /// The lock refused or failed the operation.
    #[error("lock rejected the command")]
    Rejected,

    /// The underlying transport failed.
    #[error("transport failure")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Blocking vendor SDK operations for a door lock.
pub trait LockClient: Send + Sync + 'static {
    /// Display name of the lock as configured at the vendor.
    fn name(&self) -> String;

    /// Vendor-side hardware identifier (e.g. a Z-Wave node id).
    fn vendor_device_id(&self) -> String;

    /// Vendor device category (e.g. `"Door Lock"`).
    fn device_kind(&self) -> String;

    fn lock(&self) -> Result<(), ClientError>;
    fn unlock(&self) -> Result<(), ClientError>;
    fn is_locked(&self) -> Result<bool, ClientError>;

    /// Whether the lock reports its battery as low.
    fn battery_low(&self) -> Result<bool, ClientError>;

    /// Whether the vendor service lost contact with the lock.
    fn no_response(&self) -> Result<bool, ClientError>;
}

/// Run one blocking vendor call on the blocking worker pool and await it.
pub(crate) async fn dispatch<C, F, T>(client: &Arc<C>, op: F) -> Result<T, LockError>
where
    C: LockClient,
    F: FnOnce(&C) -> Result<T, ClientError> + Send + 'static,
    T: Send + 'static,
{
    let client = Arc::clone(client);
    tokio::task::spawn_blocking(move || op(&client))
        .await
        .map_err(LockError::Worker)?
        .map_err(LockError::from)
}
