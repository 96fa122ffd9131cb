//! Storage factory for runtime backend selection

use std::str::FromStr;
use std::sync::Arc;

use sqlx::postgres::PgPool;
use tracing::info;

use crate::domain::storage::{Storage, StorageEntity};
use crate::domain::DomainError;

use super::in_memory::InMemoryStorage;
use super::postgres::{PostgresConfig, PostgresStorage};

/// Supported storage backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageType {
    InMemory,
    Postgres,
}

impl FromStr for StorageType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Ok(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            other => Err(DomainError::configuration(format!(
                "Unknown storage backend '{}'",
                other
            ))),
        }
    }
}

/// Storage backend configuration
#[derive(Debug, Clone)]
pub enum StorageConfig {
    InMemory,
    Postgres(PostgresConfig),
}

impl StorageConfig {
    /// Builds the configuration from a backend name and optional database URL
    pub fn from_backend(backend: &str, database_url: Option<&str>) -> Result<Self, DomainError> {
        match backend.parse::<StorageType>()? {
            StorageType::InMemory => Ok(Self::InMemory),
            StorageType::Postgres => {
                let url = database_url.filter(|u| !u.is_empty()).ok_or_else(|| {
                    DomainError::configuration("PostgreSQL storage requires a database URL")
                })?;
                Ok(Self::Postgres(PostgresConfig::new(url)))
            }
        }
    }

    pub fn storage_type(&self) -> StorageType {
        match self {
            Self::InMemory => StorageType::InMemory,
            Self::Postgres(_) => StorageType::Postgres,
        }
    }
}

/// Creates record stores sharing one backend connection
#[derive(Debug, Clone)]
pub struct StorageFactory {
    pool: Option<PgPool>,
}

impl StorageFactory {
    pub async fn connect(config: &StorageConfig) -> Result<Self, DomainError> {
        let pool = match config {
            StorageConfig::InMemory => None,
            StorageConfig::Postgres(pg) => Some(pg.connect().await?),
        };

        info!(backend = ?config.storage_type(), "Storage backend ready");

        Ok(Self { pool })
    }

    pub fn in_memory() -> Self {
        Self { pool: None }
    }

    /// Creates the store for one record type, creating its table when needed
    pub async fn create<E>(&self) -> Result<Arc<dyn Storage<E>>, DomainError>
    where
        E: StorageEntity + 'static,
    {
        match self.pool {
            None => Ok(Arc::new(InMemoryStorage::<E>::new())),
            Some(ref pool) => {
                let storage = PostgresStorage::<E>::new(pool.clone());
                storage.ensure_table().await?;
                Ok(Arc::new(storage))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::session::ChatSession;

    #[test]
    fn test_storage_type_from_str() {
        assert_eq!("memory".parse::<StorageType>().unwrap(), StorageType::InMemory);
        assert_eq!("In-Memory".parse::<StorageType>().unwrap(), StorageType::InMemory);
        assert_eq!("postgres".parse::<StorageType>().unwrap(), StorageType::Postgres);
        assert_eq!("pg".parse::<StorageType>().unwrap(), StorageType::Postgres);
        assert!("redis".parse::<StorageType>().is_err());
    }

    #[test]
    fn test_postgres_requires_url() {
        assert!(StorageConfig::from_backend("postgres", None).is_err());
        assert!(StorageConfig::from_backend("postgres", Some("")).is_err());

        let config = StorageConfig::from_backend("postgres", Some("postgres://db/rag")).unwrap();
        assert_eq!(config.storage_type(), StorageType::Postgres);
    }

    #[tokio::test]
    async fn test_in_memory_factory_creates_independent_stores() {
        let factory = StorageFactory::connect(&StorageConfig::InMemory).await.unwrap();

        let a = factory.create::<ChatSession>().await.unwrap();
        let b = factory.create::<ChatSession>().await.unwrap();
        a.create(ChatSession::new(None)).await.unwrap();

        assert_eq!(a.count().await.unwrap(), 1);
        assert_eq!(b.count().await.unwrap(), 0);
    }
}
