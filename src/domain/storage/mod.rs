//! Storage domain - Generic keyed JSON record store

mod entity;
mod repository;

pub use entity::StorageEntity;
pub use repository::{EntityUpdate, Storage};

#[cfg(test)]
pub use repository::mock;
