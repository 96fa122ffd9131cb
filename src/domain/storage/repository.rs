//! Storage trait definition

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::DomainError;

use super::entity::StorageEntity;

/// In-place change applied by [`Storage::update`]
pub type EntityUpdate<E> = Box<dyn FnOnce(&mut E) + Send>;

/// Generic keyed storage for persisted records
#[async_trait]
pub trait Storage<E>: Send + Sync + Debug
where
    E: StorageEntity + 'static,
{
    /// Retrieves a record by its key
    async fn get(&self, key: &str) -> Result<Option<E>, DomainError>;

    /// Retrieves all records
    async fn list(&self) -> Result<Vec<E>, DomainError>;

    /// Inserts a new record, returns a conflict error if the key is taken
    async fn create(&self, entity: E) -> Result<E, DomainError>;

    /// Inserts or replaces a record
    async fn save(&self, entity: E) -> Result<E, DomainError>;

    /// Applies `change` to a stored record as one atomic read-modify-write
    ///
    /// Returns the updated record, or `None` when no record has the key.
    async fn update(&self, key: &str, change: EntityUpdate<E>) -> Result<Option<E>, DomainError>;

    /// Deletes a record by its key, returns true if deleted
    async fn delete(&self, key: &str) -> Result<bool, DomainError>;

    /// Returns the number of stored records
    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.list().await?.len())
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Mock storage that can be switched into a failing mode
    #[derive(Debug)]
    pub struct MockStorage<E>
    where
        E: StorageEntity,
    {
        entities: Mutex<HashMap<String, E>>,
        error: Option<String>,
    }

    impl<E> Default for MockStorage<E>
    where
        E: StorageEntity,
    {
        fn default() -> Self {
            Self::new()
        }
    }

    impl<E> MockStorage<E>
    where
        E: StorageEntity,
    {
        pub fn new() -> Self {
            Self {
                entities: Mutex::new(HashMap::new()),
                error: None,
            }
        }

        pub fn with_error(mut self, error: impl Into<String>) -> Self {
            self.error = Some(error.into());
            self
        }

        fn check_error(&self) -> Result<(), DomainError> {
            match self.error {
                Some(ref error) => Err(DomainError::storage(error)),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl<E> Storage<E> for MockStorage<E>
    where
        E: StorageEntity + 'static,
    {
        async fn get(&self, key: &str) -> Result<Option<E>, DomainError> {
            self.check_error()?;
            Ok(self.entities.lock().unwrap().get(key).cloned())
        }

        async fn list(&self) -> Result<Vec<E>, DomainError> {
            self.check_error()?;
            Ok(self.entities.lock().unwrap().values().cloned().collect())
        }

        async fn create(&self, entity: E) -> Result<E, DomainError> {
            self.check_error()?;
            let mut entities = self.entities.lock().unwrap();

            if entities.contains_key(entity.key()) {
                return Err(DomainError::conflict(format!(
                    "Record '{}' already exists",
                    entity.key()
                )));
            }

            entities.insert(entity.key().to_string(), entity.clone());
            Ok(entity)
        }

        async fn save(&self, entity: E) -> Result<E, DomainError> {
            self.check_error()?;
            self.entities
                .lock()
                .unwrap()
                .insert(entity.key().to_string(), entity.clone());
            Ok(entity)
        }

        async fn update(
            &self,
            key: &str,
            change: EntityUpdate<E>,
        ) -> Result<Option<E>, DomainError> {
            self.check_error()?;
            let mut entities = self.entities.lock().unwrap();

            Ok(entities.get_mut(key).map(|entity| {
                change(entity);
                entity.clone()
            }))
        }

        async fn delete(&self, key: &str) -> Result<bool, DomainError> {
            self.check_error()?;
            Ok(self.entities.lock().unwrap().remove(key).is_some())
        }
    }
}
