//! # nook-adapter-storage-memory
//!
//! Process-local storage adapter. The hub's registries live in plain
//! `RwLock<HashMap>` maps owned by whoever constructs the repositories —
//! there is no durable persistence and no global singleton.
//!
//! ## Dependency rule
//!
//! Depends on `nook-app` (port traits) and `nook-domain` only.

mod device_repo;
mod entity_repo;

pub use device_repo::MemoryDeviceRepository;
pub use entity_repo::MemoryEntityRepository;
