//! Data-fetch seam used by `ModelFactory::initialize_for`.

pub mod data_source;
