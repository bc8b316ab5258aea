//! Story entity.

use crate::model::common::{CommonModel, Model};
use crate::model::entity_type::ENTITY_TYPE_STORY;
use std::any::Any;

/// Backlog item that groups tasks.
#[derive(Debug, Default)]
pub struct StoryModel {
    common: CommonModel,
}

impl StoryModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> Option<&str> {
        self.common.str_field("name")
    }

    /// Workflow state tag, e.g. `NOT_STARTED` or `DONE`.
    pub fn state(&self) -> Option<&str> {
        self.common.str_field("state")
    }

    pub fn story_points(&self) -> Option<f64> {
        self.common.f64_field("storyPoints")
    }
}

impl Model for StoryModel {
    fn persisted_class_name(&self) -> &str {
        ENTITY_TYPE_STORY
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
