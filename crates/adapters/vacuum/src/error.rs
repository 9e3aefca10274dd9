//! Vacuum adapter error types.

use nook_domain::error::{NookError, NotReadyError};

use crate::INTEGRATION_NAME;
use crate::client::ClientError;

/// Errors specific to the vacuum adapter.
#[derive(Debug, thiserror::Error)]
pub enum VacuumError {
    /// The initial connect attempt exceeded its bound.
    #[error("connecting to {host} timed out after {timeout_secs}s")]
    ConnectTimeout {
        /// Host/IP the connect was aimed at.
        host: String,
        /// The bound that was exceeded, in seconds.
        timeout_secs: u64,
    },

    /// A vendor client call failed.
    #[error("vacuum client error")]
    Client(#[from] ClientError),

    /// The blocking worker running the vendor call died.
    #[error("blocking worker failed")]
    Worker(#[source] tokio::task::JoinError),
}

impl VacuumError {
    /// Convert into a [`NookError`] for propagation across the port
    /// boundary. A connect timeout becomes the not-ready signal so the
    /// hub retries setup later; everything else is an integration error.
    #[must_use]
    pub fn into_domain(self) -> NookError {
        match self {
            Self::ConnectTimeout { .. } => NookError::NotReady(NotReadyError {
                integration: INTEGRATION_NAME,
            }),
            other => NookError::Integration(Box::new(other)),
        }
    }
}

impl From<VacuumError> for NookError {
    fn from(err: VacuumError) -> Self {
        err.into_domain()
    }
}
