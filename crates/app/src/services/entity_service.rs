//! Entity service — use-cases for managing entities.

use nook_domain::entity::Entity;
use nook_domain::error::{NookError, NotFoundError};
use nook_domain::event::{Event, EventType};
use nook_domain::id::EntityId;

use crate::ports::{EntityRepository, EventPublisher};

/// Application service for entity registration and state tracking.
///
/// Integrations report entity snapshots; this service keys them by their
/// host-facing entity id, preserves the stored identity across updates,
/// and publishes [`EventType::EntityCreated`] / [`EventType::StateChanged`]
/// events as appropriate.
pub struct EntityService<R, P> {
    repo: R,
    publisher: P,
}

impl<R: EntityRepository, P: EventPublisher> EntityService<R, P> {
    /// Create a new service backed by the given repository and publisher.
    pub fn new(repo: R, publisher: P) -> Self {
        Self { repo, publisher }
    }

    /// Insert or update an entity, keyed by its entity-id string.
    ///
    /// When a stored entity with the same entity id exists, the stored
    /// internal identity wins and `last_changed` is preserved unless the
    /// state actually moved.
    ///
    /// # Errors
    ///
    /// Returns [`NookError::Validation`] if invariants fail, or a storage
    /// error propagated from the repository.
    pub async fn upsert_entity(&self, entity: Entity) -> Result<Entity, NookError> {
        entity.validate()?;
        let Some(existing) = self.repo.find_by_entity_id(&entity.entity_id).await? else {
            let stored = self.repo.create(entity).await?;
            self.publisher
                .publish(Event::new(
                    EventType::EntityCreated,
                    Some(stored.id),
                    serde_json::json!({"entity_id": stored.entity_id}),
                ))
                .await?;
            return Ok(stored);
        };

        let state_changed = existing.state != entity.state;
        let mut merged = entity;
        merged.id = existing.id;
        if !state_changed {
            merged.last_changed = existing.last_changed;
        }
        let stored = self.repo.update(merged).await?;
        if state_changed {
            self.publisher
                .publish(Event::new(
                    EventType::StateChanged,
                    Some(stored.id),
                    serde_json::json!({
                        "entity_id": stored.entity_id,
                        "from": existing.state.to_string(),
                        "to": stored.state.to_string(),
                    }),
                ))
                .await?;
        }
        Ok(stored)
    }

    /// Look up an entity by internal id.
    ///
    /// # Errors
    ///
    /// Returns [`NookError::NotFound`] when no entity with `id` exists,
    /// or a storage error from the repository.
    pub async fn get_entity(&self, id: EntityId) -> Result<Entity, NookError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Entity",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// Look up an entity by its host-facing entity id (`lock.test_lock`).
    ///
    /// # Errors
    ///
    /// Returns [`NookError::NotFound`] when no such entity exists, or a
    /// storage error from the repository.
    pub async fn get_by_entity_id(&self, entity_id: &str) -> Result<Entity, NookError> {
        self.repo.find_by_entity_id(entity_id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Entity",
                id: entity_id.to_string(),
            }
            .into()
        })
    }

    /// List all entities.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_entities(&self) -> Result<Vec<Entity>, NookError> {
        self.repo.get_all().await
    }

    /// Delete an entity by internal id.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn delete_entity(&self, id: EntityId) -> Result<(), NookError> {
        self.repo.delete(id).await
    }
}
