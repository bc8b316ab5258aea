//! Iteration entity.

use crate::model::common::{CommonModel, Model};
use crate::model::entity_type::ENTITY_TYPE_ITERATION;
use std::any::Any;

/// Time-boxed container for stories.
#[derive(Debug, Default)]
pub struct IterationModel {
    common: CommonModel,
}

impl IterationModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> Option<&str> {
        self.common.str_field("name")
    }

    /// Start date as delivered by the backend (ISO-8601 string).
    pub fn start_date(&self) -> Option<&str> {
        self.common.str_field("startDate")
    }

    pub fn end_date(&self) -> Option<&str> {
        self.common.str_field("endDate")
    }
}

impl Model for IterationModel {
    fn persisted_class_name(&self) -> &str {
        ENTITY_TYPE_ITERATION
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
