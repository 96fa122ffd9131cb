//! Storage entity trait

use std::fmt::Debug;

use serde::{de::DeserializeOwned, Serialize};

/// Trait for records that can be persisted in a keyed JSON store
pub trait StorageEntity: Clone + Debug + Send + Sync + Serialize + DeserializeOwned {
    /// Collection (table) the records live in
    const COLLECTION: &'static str;

    /// Returns the record's key
    fn key(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
    struct Note {
        id: String,
        body: String,
    }

    impl StorageEntity for Note {
        const COLLECTION: &'static str = "notes";

        fn key(&self) -> &str {
            &self.id
        }
    }

    #[test]
    fn test_storage_entity_key_and_collection() {
        let note = Note {
            id: "note-1".to_string(),
            body: "hello".to_string(),
        };

        assert_eq!(note.key(), "note-1");
        assert_eq!(Note::COLLECTION, "notes");
    }
}
