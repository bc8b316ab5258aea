//! Object store partitioned by entity type, then by id.

use crate::model::common::{EntityId, EntityKey, ModelRef};
use crate::model::entity_type::EntityType;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Live entity handles keyed by `(type, id)`.
#[derive(Debug, Default)]
pub struct ObjectStore {
    partitions: BTreeMap<EntityType, BTreeMap<EntityId, ModelRef>>,
}

impl ObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `object` at `(kind, id)`, returning the handle it replaced.
    pub fn insert(&mut self, kind: EntityType, id: EntityId, object: ModelRef) -> Option<ModelRef> {
        self.partitions.entry(kind).or_default().insert(id, object)
    }

    pub fn get(&self, kind: EntityType, id: EntityId) -> Option<ModelRef> {
        self.partitions
            .get(&kind)
            .and_then(|partition| partition.get(&id))
            .map(Rc::clone)
    }

    pub fn contains(&self, kind: EntityType, id: EntityId) -> bool {
        self.partitions
            .get(&kind)
            .is_some_and(|partition| partition.contains_key(&id))
    }

    pub fn remove(&mut self, kind: EntityType, id: EntityId) -> Option<ModelRef> {
        let partition = self.partitions.get_mut(&kind)?;
        let removed = partition.remove(&id);
        if partition.is_empty() {
            self.partitions.remove(&kind);
        }
        removed
    }

    /// Removes `(kind, id)` only while it still holds the entity `key`.
    pub fn remove_entity(
        &mut self,
        kind: EntityType,
        id: EntityId,
        key: EntityKey,
    ) -> Option<ModelRef> {
        let current = self.partitions.get(&kind)?.get(&id)?;
        if EntityKey::of_cell(current) != key {
            return None;
        }
        self.remove(kind, id)
    }

    /// Handles stored for one type, ordered by id.
    pub fn objects_of(&self, kind: EntityType) -> Vec<ModelRef> {
        self.partitions
            .get(&kind)
            .map(|partition| partition.values().map(Rc::clone).collect())
            .unwrap_or_default()
    }

    /// Total number of stored entities across all types.
    pub fn len(&self) -> usize {
        self.partitions.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.partitions.is_empty()
    }

    pub fn clear(&mut self) {
        self.partitions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::ObjectStore;
    use crate::model::common::{share, EntityKey, ModelRef};
    use crate::model::entity_type::EntityType;
    use crate::model::task::TaskModel;
    use std::rc::Rc;

    #[test]
    fn insert_replaces_and_returns_previous_handle() {
        let mut store = ObjectStore::new();
        let first: ModelRef = share(TaskModel::new());
        let second: ModelRef = share(TaskModel::new());

        assert!(store.insert(EntityType::Task, 3, Rc::clone(&first)).is_none());
        let replaced = store
            .insert(EntityType::Task, 3, Rc::clone(&second))
            .expect("previous handle");
        assert!(Rc::ptr_eq(&replaced, &first));
        assert!(Rc::ptr_eq(&store.get(EntityType::Task, 3).unwrap(), &second));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn partitions_are_independent_and_pruned_on_remove() {
        let mut store = ObjectStore::new();
        store.insert(EntityType::Task, 1, share(TaskModel::new()));
        store.insert(EntityType::Task, 2, share(TaskModel::new()));
        store.insert(EntityType::Story, 1, share(TaskModel::new()));

        assert_eq!(store.objects_of(EntityType::Task).len(), 2);
        assert!(store.get(EntityType::Iteration, 1).is_none());

        store.remove(EntityType::Story, 1).expect("story removed");
        assert!(store.objects_of(EntityType::Story).is_empty());
        assert_eq!(store.len(), 2);

        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn remove_entity_skips_replaced_slot() {
        let mut store = ObjectStore::new();
        let old: ModelRef = share(TaskModel::new());
        let replacement: ModelRef = share(TaskModel::new());
        store.insert(EntityType::Task, 5, Rc::clone(&old));
        store.insert(EntityType::Task, 5, Rc::clone(&replacement));

        assert!(store
            .remove_entity(EntityType::Task, 5, EntityKey::of_cell(&old))
            .is_none());
        assert!(Rc::ptr_eq(&store.get(EntityType::Task, 5).unwrap(), &replacement));

        let removed = store
            .remove_entity(EntityType::Task, 5, EntityKey::of_cell(&replacement))
            .expect("current entity removed");
        assert!(Rc::ptr_eq(&removed, &replacement));
        assert!(store.is_empty());
    }
}
