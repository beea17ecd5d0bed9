//! Infrastructure layer - Store adapters

pub mod memory;

pub use memory::{InMemoryRelationStore, RelationIndex};
