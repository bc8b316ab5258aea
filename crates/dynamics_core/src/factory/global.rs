//! Free functions delegating to the runtime-wide `ModelFactory::instance()`.
//!
//! Call sites that cannot thread a factory reference through use these;
//! everything else should hold an explicit `ModelFactory`.

use crate::factory::error::FactoryResult;
use crate::factory::model_factory::ModelFactory;
use crate::model::common::{EntityId, ModelRef};
use crate::model::entity_type::TypeArg;
use crate::source::data_source::DataCallback;
use serde_json::Value;

pub fn initialize_for(
    kind: impl TypeArg,
    id: impl Into<Option<EntityId>>,
    callback: DataCallback,
) -> FactoryResult<()> {
    ModelFactory::instance().initialize_for(kind, id, callback)
}

pub fn add_object<'a>(object: impl Into<Option<&'a ModelRef>>) -> FactoryResult<()> {
    ModelFactory::instance().add_object(object)
}

pub fn get_object(kind: impl TypeArg, id: impl Into<Option<EntityId>>) -> FactoryResult<ModelRef> {
    ModelFactory::instance().get_object(kind, id)
}

pub fn get_object_if_exists(
    kind: impl TypeArg,
    id: impl Into<Option<EntityId>>,
) -> FactoryResult<Option<ModelRef>> {
    ModelFactory::instance().get_object_if_exists(kind, id)
}

pub fn create_object(kind: impl TypeArg) -> FactoryResult<ModelRef> {
    ModelFactory::instance().create_object(kind)
}

pub fn update_object<'a>(
    kind: impl TypeArg,
    data: impl Into<Option<&'a Value>>,
) -> FactoryResult<ModelRef> {
    ModelFactory::instance().update_object(kind, data)
}
