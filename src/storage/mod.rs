//! Storage backend implementations

pub mod in_memory;
pub mod mongodb;

pub use in_memory::InMemoryMenuStore;
pub use mongodb::{MongoConnection, MongoMenuStore};
