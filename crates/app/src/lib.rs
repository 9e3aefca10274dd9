//! # nook-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement:
//!   - [`ports::Integration`] — lifecycle of a device integration
//!   - [`ports::EntityRepository`] / [`ports::DeviceRepository`] — registries
//!   - [`ports::EventPublisher`] — event fan-out
//! - Provide **use-case services** (`EntityService`, `DeviceService`)
//! - Provide **in-process infrastructure** (event bus) that doesn't need IO
//! - Provide the [`hub::Hub`] — the service-call router that owns the
//!   entity → integration ownership map
//!
//! ## Dependency rule
//! Depends on `nook-domain` only (plus `tokio::sync` for channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the
//! reverse.

pub mod event_bus;
pub mod hub;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod test_support;
