//! Core model registry for the dynamics client.
//! Owns entity identity: one live object per (type, id) per runtime.

pub mod config;
pub mod factory;
pub mod logging;
pub mod model;
pub mod source;

pub use config::LogConfig;
pub use factory::error::{FactoryError, FactoryResult};
pub use factory::model_factory::{FactoryStats, ModelFactory};
pub use factory::request::UpdateRequest;
pub use factory::store::ObjectStore;
pub use config::default_log_level;
pub use logging::{init_logging, logging_status};
pub use model::common::{
    share, CommonModel, EntityId, EntityKey, Model, ModelData, ModelEvent, ModelEventKind, ModelListener,
    ModelRef,
};
pub use model::entity_type::{EntityType, TypeArg};
pub use model::iteration::IterationModel;
pub use model::story::StoryModel;
pub use model::task::TaskModel;
pub use source::data_source::{
    DataCallback, DataSource, FetchError, FetchResult, NoopDataSource, StaticDataSource,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
