//! Hub — routes host service calls and polls into the integrations.
//!
//! The hub owns the integrations and an explicit entity → integration
//! ownership map; the composition root constructs one hub instance and
//! drives it from a single task, so integrations never see concurrent
//! calls.

use std::collections::HashMap;

use nook_domain::device::Device;
use nook_domain::entity::Entity;
use nook_domain::error::{NookError, NotFoundError, ValidationError};
use nook_domain::event::{Event, EventType};

use crate::ports::{DeviceRepository, EntityRepository, EventPublisher, Integration};
use crate::services::device_service::DeviceService;
use crate::services::entity_service::EntityService;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IntegrationStatus {
    /// Setup has not succeeded yet; eligible for (re)try.
    Pending,
    /// Setup succeeded; eligible for refresh and service calls.
    Ready,
}

/// The host surface: registry, service-call router, and poll driver.
pub struct Hub<R, D, P, I> {
    entity_service: EntityService<R, P>,
    device_service: DeviceService<D>,
    publisher: P,
    integrations: Vec<I>,
    status: Vec<IntegrationStatus>,
    /// Maps host-facing entity ids to the owning integration's index.
    owners: HashMap<String, usize>,
}

impl<R, D, P, I> Hub<R, D, P, I>
where
    R: EntityRepository,
    D: DeviceRepository,
    P: EventPublisher,
    I: Integration,
{
    /// Create an empty hub over the given services and event publisher.
    pub fn new(
        entity_service: EntityService<R, P>,
        device_service: DeviceService<D>,
        publisher: P,
    ) -> Self {
        Self {
            entity_service,
            device_service,
            publisher,
            integrations: Vec::new(),
            status: Vec::new(),
            owners: HashMap::new(),
        }
    }

    /// Add an integration. It stays pending until [`setup`](Self::setup)
    /// succeeds for it.
    pub fn register(&mut self, integration: I) {
        self.integrations.push(integration);
        self.status.push(IntegrationStatus::Pending);
    }

    /// Run setup for every pending integration and persist discoveries.
    ///
    /// An integration answering [`NookError::NotReady`] is left pending
    /// (nothing of it is registered) and retried on the next call; calling
    /// this repeatedly is the host's retry-on-not-ready mechanism. Any
    /// other setup error aborts and propagates.
    ///
    /// # Errors
    ///
    /// Returns the first hard setup or storage error encountered.
    pub async fn setup(&mut self) -> Result<(), NookError> {
        for idx in 0..self.integrations.len() {
            if self.status[idx] == IntegrationStatus::Ready {
                continue;
            }
            let name = self.integrations[idx].name();
            match self.integrations[idx].setup().await {
                Ok(discovered) => {
                    let mut entity_count = 0;
                    for dd in discovered {
                        self.device_service.upsert_device(dd.device).await?;
                        for entity in dd.entities {
                            let stored = self.entity_service.upsert_entity(entity).await?;
                            self.owners.insert(stored.entity_id.clone(), idx);
                            entity_count += 1;
                        }
                    }
                    self.status[idx] = IntegrationStatus::Ready;
                    tracing::info!(integration = name, entities = entity_count, "integration ready");
                }
                Err(NookError::NotReady(err)) => {
                    tracing::warn!(integration = name, error = %err, "setup deferred, will retry");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }

    /// Whether any integration is still waiting for a successful setup.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.status.contains(&IntegrationStatus::Pending)
    }

    /// Dispatch a service call to the integration owning `entity_id`,
    /// persist the returned snapshot, and publish a
    /// [`EventType::ServiceCalled`] event.
    ///
    /// # Errors
    ///
    /// Returns [`NookError::Validation`] when `entity_id` is outside
    /// `domain`, [`NookError::NotFound`] when no integration owns it, and
    /// otherwise whatever the integration's vendor call produced.
    pub async fn call_service(
        &self,
        domain: &str,
        service: &str,
        entity_id: &str,
        data: serde_json::Value,
    ) -> Result<Entity, NookError> {
        if entity_id.split_once('.').map(|(prefix, _)| prefix) != Some(domain) {
            return Err(ValidationError::DomainMismatch {
                domain: domain.to_string(),
                entity_id: entity_id.to_string(),
            }
            .into());
        }
        let idx = *self.owners.get(entity_id).ok_or_else(|| NotFoundError {
            entity: "Entity",
            id: entity_id.to_string(),
        })?;

        tracing::debug!(domain, service, entity_id, "dispatching service call");
        let snapshot = self.integrations[idx]
            .handle_service_call(entity_id, service, data)
            .await?;
        let stored = self.entity_service.upsert_entity(snapshot).await?;
        self.publisher
            .publish(Event::new(
                EventType::ServiceCalled,
                Some(stored.id),
                serde_json::json!({
                    "domain": domain,
                    "service": service,
                    "entity_id": stored.entity_id,
                }),
            ))
            .await?;
        Ok(stored)
    }

    /// Poll every ready integration and persist the returned snapshots.
    ///
    /// A failing vendor poll is surfaced through logging and does not stop
    /// the other integrations from refreshing.
    ///
    /// # Errors
    ///
    /// Returns a storage error if persisting a snapshot fails.
    pub async fn refresh(&self) -> Result<(), NookError> {
        for (idx, integration) in self.integrations.iter().enumerate() {
            if self.status[idx] != IntegrationStatus::Ready {
                continue;
            }
            match integration.refresh().await {
                Ok(snapshots) => {
                    for entity in snapshots {
                        self.entity_service.upsert_entity(entity).await?;
                    }
                }
                Err(err) => {
                    tracing::error!(integration = integration.name(), error = ?err, "refresh failed");
                }
            }
        }
        Ok(())
    }

    /// Tear down every integration.
    ///
    /// # Errors
    ///
    /// Returns the first teardown error encountered.
    pub async fn teardown(&mut self) -> Result<(), NookError> {
        for integration in &mut self.integrations {
            integration.teardown().await?;
        }
        Ok(())
    }

    /// Look up an entity by its host-facing entity id.
    ///
    /// # Errors
    ///
    /// Returns [`NookError::NotFound`] when no such entity exists.
    pub async fn entity(&self, entity_id: &str) -> Result<Entity, NookError> {
        self.entity_service.get_by_entity_id(entity_id).await
    }

    /// List all registered entities.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn entities(&self) -> Result<Vec<Entity>, NookError> {
        self.entity_service.list_entities().await
    }

    /// List all registered devices.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn devices(&self) -> Result<Vec<Device>, NookError> {
        self.device_service.list_devices().await
    }
}
