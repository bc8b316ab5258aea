//! Closed type registry for managed entities.
//!
//! # Responsibility
//! - Map symbolic type names to entity variants.
//! - Resolve loosely-typed caller input (`&str`, `Option<_>`) to a variant.
//!
//! # Invariants
//! - Tag matching is exact; no trimming or case folding.
//! - Every variant has exactly one constructor in `EntityType::construct`.

use crate::model::common::{share, ModelRef};
use crate::model::iteration::IterationModel;
use crate::model::story::StoryModel;
use crate::model::task::TaskModel;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Type tag for iteration entities.
pub const ENTITY_TYPE_ITERATION: &str = "iteration";
/// Type tag for story entities.
pub const ENTITY_TYPE_STORY: &str = "story";
/// Type tag for task entities.
pub const ENTITY_TYPE_TASK: &str = "task";

/// Closed set of entity kinds the factory knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Iteration,
    Story,
    Task,
}

impl EntityType {
    /// All registered entity types in declaration order.
    pub const ALL: [EntityType; 3] = [Self::Iteration, Self::Story, Self::Task];

    /// Stable type tag string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Iteration => ENTITY_TYPE_ITERATION,
            Self::Story => ENTITY_TYPE_STORY,
            Self::Task => ENTITY_TYPE_TASK,
        }
    }

    /// Parses one exact type tag. Returns `None` for anything unregistered.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            ENTITY_TYPE_ITERATION => Some(Self::Iteration),
            ENTITY_TYPE_STORY => Some(Self::Story),
            ENTITY_TYPE_TASK => Some(Self::Task),
            _ => None,
        }
    }

    /// Builds a fresh, id-less instance of this variant.
    ///
    /// Listener registration is the caller's job; constructors never wire
    /// observers on their own.
    pub fn construct(self) -> ModelRef {
        match self {
            Self::Iteration => share(IterationModel::new()),
            Self::Story => share(StoryModel::new()),
            Self::Task => share(TaskModel::new()),
        }
    }
}

impl Display for EntityType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller-supplied type argument that may or may not name a registered type.
///
/// Implemented for `EntityType`, string tags and `Option` of either, so a
/// missing argument (`None`) goes through the same validation path as an
/// unknown tag.
pub trait TypeArg {
    fn resolve_type(&self) -> Option<EntityType>;
}

impl TypeArg for EntityType {
    fn resolve_type(&self) -> Option<EntityType> {
        Some(*self)
    }
}

impl TypeArg for str {
    fn resolve_type(&self) -> Option<EntityType> {
        EntityType::parse(self)
    }
}

impl TypeArg for String {
    fn resolve_type(&self) -> Option<EntityType> {
        EntityType::parse(self.as_str())
    }
}

impl<T: TypeArg + ?Sized> TypeArg for &T {
    fn resolve_type(&self) -> Option<EntityType> {
        (**self).resolve_type()
    }
}

impl<T: TypeArg> TypeArg for Option<T> {
    fn resolve_type(&self) -> Option<EntityType> {
        self.as_ref().and_then(|kind| kind.resolve_type())
    }
}

#[cfg(test)]
mod tests {
    use super::{EntityType, TypeArg};
    use crate::model::iteration::IterationModel;
    use crate::model::story::StoryModel;
    use crate::model::task::TaskModel;

    #[test]
    fn parse_matches_tags_exactly() {
        assert_eq!(EntityType::parse("task"), Some(EntityType::Task));
        assert_eq!(EntityType::parse("story"), Some(EntityType::Story));
        assert_eq!(EntityType::parse("iteration"), Some(EntityType::Iteration));
        assert_eq!(EntityType::parse(" task"), None);
        assert_eq!(EntityType::parse("Task"), None);
        assert_eq!(EntityType::parse(""), None);
    }

    #[test]
    fn tags_round_trip_through_as_str() {
        for kind in EntityType::ALL {
            assert_eq!(EntityType::parse(kind.as_str()), Some(kind));
            assert_eq!(kind.to_string(), kind.as_str());
        }
    }

    #[test]
    fn type_arg_resolves_options_and_strings() {
        assert_eq!("story".resolve_type(), Some(EntityType::Story));
        assert_eq!(String::from("task").resolve_type(), Some(EntityType::Task));
        assert_eq!(Some("iteration").resolve_type(), Some(EntityType::Iteration));
        assert_eq!(None::<&str>.resolve_type(), None);
        assert_eq!(Some("bogus").resolve_type(), None);
        assert_eq!(Some(EntityType::Task).resolve_type(), Some(EntityType::Task));
    }

    #[test]
    fn construct_builds_matching_variant_without_listeners() {
        let iteration = EntityType::Iteration.construct();
        let story = EntityType::Story.construct();
        let task = EntityType::Task.construct();

        assert!(iteration.borrow().is::<IterationModel>());
        assert!(story.borrow().is::<StoryModel>());
        assert!(task.borrow().is::<TaskModel>());
        for object in [iteration, story, task] {
            assert!(object.borrow().listeners().is_empty());
            assert_eq!(object.borrow().id(), None);
        }
    }
}
