//! # nookd — nook daemon
//!
//! Composition root that wires the storage, event bus, and device
//! integrations together and drives the hub.
//!
//! ## Responsibilities
//! - Load configuration (`nook.toml` + env overrides)
//! - Initialize tracing
//! - Construct repositories, services, event bus, and the hub
//! - Register the configured integrations (simulated vendor clients —
//!   real SDK bindings plug in behind the same client traits)
//! - Run the poll loop: periodic refresh plus retry of not-ready setups
//! - Handle graceful shutdown (ctrl-c) with integration teardown
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;
mod integrations;

use std::time::Duration;

use nook_adapter_lock::{LockIntegration, sim::SimulatedLock};
use nook_adapter_storage_memory::{MemoryDeviceRepository, MemoryEntityRepository};
use nook_adapter_vacuum::{VacuumIntegration, sim::SimulatedVacuum};
use nook_app::event_bus::LocalEventBus;
use nook_app::hub::Hub;
use nook_app::services::device_service::DeviceService;
use nook_app::services::entity_service::EntityService;

use config::Config;
use integrations::IntegrationKind;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&config.logging.filter))
        .init();

    let bus = LocalEventBus::new(256);
    let entity_service = EntityService::new(MemoryEntityRepository::new(), bus.clone());
    let device_service = DeviceService::new(MemoryDeviceRepository::new());
    let mut hub = Hub::new(entity_service, device_service, bus.clone());

    if config.integrations.vacuum.enabled {
        hub.register(IntegrationKind::Vacuum(VacuumIntegration::new(
            config.integrations.vacuum.settings.clone(),
            SimulatedVacuum::new(),
        )));
    }
    if config.integrations.lock.enabled {
        hub.register(IntegrationKind::Lock(LockIntegration::new(
            config.integrations.lock.settings.clone(),
            SimulatedLock::new(config.integrations.lock.name.clone()),
        )));
    }

    hub.setup().await?;

    // Mirror every domain event into the log.
    let mut events = bus.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            tracing::info!(event_type = ?event.event_type, data = %event.data, "event");
        }
    });

    let mut poll = tokio::time::interval(Duration::from_secs(config.hub.poll_interval_secs));
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    tracing::info!(
        poll_interval_secs = config.hub.poll_interval_secs,
        "nookd running"
    );
    loop {
        tokio::select! {
            _ = poll.tick() => {
                if hub.has_pending() {
                    hub.setup().await?;
                }
                hub.refresh().await?;
            }
            _ = &mut shutdown => break,
        }
    }

    hub.teardown().await?;
    tracing::info!("nookd stopped");
    Ok(())
}
