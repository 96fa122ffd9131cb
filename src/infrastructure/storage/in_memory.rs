//! In-memory storage implementation

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::storage::{EntityUpdate, Storage, StorageEntity};
use crate::domain::DomainError;

/// Thread-safe in-memory storage
///
/// Data is lost when the process terminates.
#[derive(Debug)]
pub struct InMemoryStorage<E>
where
    E: StorageEntity,
{
    entities: RwLock<HashMap<String, E>>,
}

impl<E> Default for InMemoryStorage<E>
where
    E: StorageEntity,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E> InMemoryStorage<E>
where
    E: StorageEntity,
{
    pub fn new() -> Self {
        Self {
            entities: RwLock::new(HashMap::new()),
        }
    }
}

fn lock_error(e: impl std::fmt::Display) -> DomainError {
    DomainError::storage(format!("Failed to acquire storage lock: {}", e))
}

#[async_trait]
impl<E> Storage<E> for InMemoryStorage<E>
where
    E: StorageEntity + 'static,
{
    async fn get(&self, key: &str) -> Result<Option<E>, DomainError> {
        let entities = self.entities.read().map_err(lock_error)?;
        Ok(entities.get(key).cloned())
    }

    async fn list(&self) -> Result<Vec<E>, DomainError> {
        let entities = self.entities.read().map_err(lock_error)?;
        Ok(entities.values().cloned().collect())
    }

    async fn create(&self, entity: E) -> Result<E, DomainError> {
        let mut entities = self.entities.write().map_err(lock_error)?;

        if entities.contains_key(entity.key()) {
            return Err(DomainError::conflict(format!(
                "{} record '{}' already exists",
                E::COLLECTION,
                entity.key()
            )));
        }

        entities.insert(entity.key().to_string(), entity.clone());
        Ok(entity)
    }

    async fn save(&self, entity: E) -> Result<E, DomainError> {
        let mut entities = self.entities.write().map_err(lock_error)?;
        entities.insert(entity.key().to_string(), entity.clone());
        Ok(entity)
    }

    async fn update(&self, key: &str, change: EntityUpdate<E>) -> Result<Option<E>, DomainError> {
        let mut entities = self.entities.write().map_err(lock_error)?;

        Ok(entities.get_mut(key).map(|entity| {
            change(entity);
            entity.clone()
        }))
    }

    async fn delete(&self, key: &str) -> Result<bool, DomainError> {
        let mut entities = self.entities.write().map_err(lock_error)?;
        Ok(entities.remove(key).is_some())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let entities = self.entities.read().map_err(lock_error)?;
        Ok(entities.len())
    }
}
