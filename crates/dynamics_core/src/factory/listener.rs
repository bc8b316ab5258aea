//! Listener the factory registers on every entity it constructs.

use crate::factory::store::ObjectStore;
use crate::model::common::{ModelEvent, ModelEventKind, ModelListener};
use crate::model::entity_type::EntityType;
use log::{debug, warn};
use std::cell::RefCell;
use std::rc::Weak;

/// Keeps the object store in step with entity lifecycle events.
///
/// Holds the store weakly: entities outliving a reset factory must not keep
/// its store alive.
pub struct FactoryListener {
    store: Weak<RefCell<ObjectStore>>,
}

impl FactoryListener {
    pub fn new(store: Weak<RefCell<ObjectStore>>) -> Self {
        Self { store }
    }

    fn evict(&self, kind: EntityType, event: &ModelEvent) {
        let Some(id) = event.id else {
            return;
        };
        let Some(store) = self.store.upgrade() else {
            return;
        };
        let Ok(mut store) = store.try_borrow_mut() else {
            warn!(
                "event=evict module=factory status=skipped reason=store_busy type={} id={}",
                kind, id
            );
            return;
        };
        // The slot may already belong to a replacement entity.
        let removed = store.remove_entity(kind, id, event.source).is_some();
        debug!(
            "event=evict module=factory status=ok type={} id={} removed={}",
            kind, id, removed
        );
    }
}

impl ModelListener for FactoryListener {
    fn on_event(&self, event: &ModelEvent) {
        let Some(kind) = EntityType::parse(&event.class_name) else {
            return;
        };
        match event.kind {
            ModelEventKind::Edited => debug!(
                "event=model_edited module=factory type={} id={:?}",
                kind, event.id
            ),
            ModelEventKind::Destroyed => self.evict(kind, event),
        }
    }
}
