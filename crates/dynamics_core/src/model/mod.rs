//! Entity model for iteration/story/task objects managed by the factory.
//!
//! # Responsibility
//! - Define the closed set of entity types and their constructors.
//! - Define the shared entity contract (`Model`) and listener wiring.
//!
//! # Invariants
//! - Every entity reports a persisted class name; only names listed in
//!   `EntityType` are admitted into the object store.
//! - Identity is numeric and unique per entity type.

pub mod common;
pub mod entity_type;
pub mod iteration;
pub mod story;
pub mod task;
