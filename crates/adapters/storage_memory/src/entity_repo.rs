//! In-memory [`EntityRepository`] implementation.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{PoisonError, RwLock};

use nook_app::ports::EntityRepository;
use nook_domain::entity::Entity;
use nook_domain::error::NookError;
use nook_domain::id::EntityId;

/// Entity registry over a process-local map.
#[derive(Default)]
pub struct MemoryEntityRepository {
    store: RwLock<HashMap<EntityId, Entity>>,
}

impl MemoryEntityRepository {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<EntityId, Entity>> {
        self.store.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<EntityId, Entity>> {
        self.store.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl EntityRepository for MemoryEntityRepository {
    fn create(&self, entity: Entity) -> impl Future<Output = Result<Entity, NookError>> + Send {
        self.write().insert(entity.id, entity.clone());
        async { Ok(entity) }
    }

    fn update(&self, entity: Entity) -> impl Future<Output = Result<Entity, NookError>> + Send {
        self.write().insert(entity.id, entity.clone());
        async { Ok(entity) }
    }

    fn get_by_id(
        &self,
        id: EntityId,
    ) -> impl Future<Output = Result<Option<Entity>, NookError>> + Send {
        let result = self.read().get(&id).cloned();
        async { Ok(result) }
    }

    fn find_by_entity_id(
        &self,
        entity_id: &str,
    ) -> impl Future<Output = Result<Option<Entity>, NookError>> + Send {
        let result = self
            .read()
            .values()
            .find(|ent| ent.entity_id == entity_id)
            .cloned();
        async { Ok(result) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Entity>, NookError>> + Send {
        let result: Vec<Entity> = self.read().values().cloned().collect();
        async { Ok(result) }
    }

    fn delete(&self, id: EntityId) -> impl Future<Output = Result<(), NookError>> + Send {
        self.write().remove(&id);
        async { Ok(()) }
    }
}
