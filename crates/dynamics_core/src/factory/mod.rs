//! Model factory: validation, identity-preserving storage and listener wiring.
//!
//! # Responsibility
//! - Validate caller input before touching the object store.
//! - Guarantee one live instance per (type, id).
//! - Register the factory as listener on every entity it constructs.
//!
//! # Invariants
//! - Failed calls never mutate the store or delegate to collaborators.
//! - Lookups return the stored `Rc`, never a copy.

pub mod error;
pub mod global;
pub mod listener;
pub mod model_factory;
pub mod request;
pub mod store;
