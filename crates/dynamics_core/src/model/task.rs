//! Task entity.

use crate::model::common::{CommonModel, Model};
use crate::model::entity_type::ENTITY_TYPE_TASK;
use std::any::Any;

/// Unit of work inside a story or iteration.
#[derive(Debug, Default)]
pub struct TaskModel {
    common: CommonModel,
}

impl TaskModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> Option<&str> {
        self.common.str_field("name")
    }

    pub fn state(&self) -> Option<&str> {
        self.common.str_field("state")
    }

    /// Remaining effort in minutes.
    pub fn effort_left(&self) -> Option<f64> {
        self.common.f64_field("effortLeft")
    }
}

impl Model for TaskModel {
    fn persisted_class_name(&self) -> &str {
        ENTITY_TYPE_TASK
    }

    fn common(&self) -> &CommonModel {
        &self.common
    }

    fn common_mut(&mut self) -> &mut CommonModel {
        &mut self.common
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
