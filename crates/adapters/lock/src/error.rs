//! Lock adapter error types.

use nook_domain::error::NookError;

use crate::client::ClientError;

/// Errors specific to the lock adapter.
#[derive(Debug, thiserror::Error)]
pub enum LockError {
    /// A vendor client call failed.
    #[error("lock client error")]
    Client(#[from] ClientError),

    /// The blocking worker running the vendor call died.
    #[error("blocking worker failed")]
    Worker(#[source] tokio::task::JoinError),
}

impl LockError {
    /// Convert into a [`NookError`] for propagation across the port
    /// boundary.
    #[must_use]
    pub fn into_domain(self) -> NookError {
        NookError::Integration(Box::new(self))
    }
}

impl From<LockError> for NookError {
    fn from(err: LockError) -> Self {
        err.into_domain()
    }
}
