//! `ModelFactory` orchestration and the runtime-wide accessor.
//!
//! # Responsibility
//! - Validate type/id/object arguments for every public operation.
//! - Own the object store and the factory listener.
//! - Forward hydration requests to the configured `DataSource`.
//!
//! # Invariants
//! - Validation runs before any lookup, construction or delegation.
//! - At most one handle is stored per (type, id).
//! - Store borrows are never held while entity code runs.

use crate::factory::error::{FactoryError, FactoryResult};
use crate::factory::listener::FactoryListener;
use crate::factory::request::UpdateRequest;
use crate::factory::store::ObjectStore;
use crate::model::common::{EntityId, ModelListener, ModelRef};
use crate::model::entity_type::{EntityType, TypeArg};
use crate::source::data_source::{DataCallback, DataSource, NoopDataSource};
use log::{debug, info, warn};
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

thread_local! {
    static INSTANCE: RefCell<Option<Rc<ModelFactory>>> = const { RefCell::new(None) };
}

/// Counters for internal routines, exposed for diagnostics and tests.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FactoryStats {
    /// Store lookups performed after validation.
    pub lookups: u64,
    /// Entities constructed through the type registry.
    pub constructions: u64,
    /// Requests forwarded to the data source.
    pub fetches: u64,
}

/// Typed object registry for iteration/story/task entities.
pub struct ModelFactory {
    store: Rc<RefCell<ObjectStore>>,
    listener: Rc<dyn ModelListener>,
    data_source: RefCell<Rc<dyn DataSource>>,
    stats: Cell<FactoryStats>,
}

impl Default for ModelFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelFactory {
    /// Creates a factory with an empty store and a no-op data source.
    pub fn new() -> Self {
        Self::with_data_source(Rc::new(NoopDataSource))
    }

    pub fn with_data_source(data_source: Rc<dyn DataSource>) -> Self {
        let store = Rc::new(RefCell::new(ObjectStore::new()));
        let listener: Rc<dyn ModelListener> =
            Rc::new(FactoryListener::new(Rc::downgrade(&store)));
        Self {
            store,
            listener,
            data_source: RefCell::new(data_source),
            stats: Cell::new(FactoryStats::default()),
        }
    }

    /// Returns the runtime-wide factory, creating it on first access.
    ///
    /// The handle lives in thread-local storage, so each thread gets its own
    /// factory and store. Entity handles are `Rc`-based and cannot cross
    /// threads; drive the registry from one thread.
    pub fn instance() -> Rc<ModelFactory> {
        INSTANCE.with(|slot| {
            let mut slot = slot.borrow_mut();
            let factory = slot.get_or_insert_with(|| {
                info!("event=factory_init module=factory status=ok");
                Rc::new(ModelFactory::new())
            });
            Rc::clone(factory)
        })
    }

    /// Drops the runtime-wide factory and empties its store. The next
    /// `instance()` builds a new one.
    pub fn reset_instance() {
        let dropped = INSTANCE.with(|slot| slot.borrow_mut().take());
        if let Some(factory) = dropped {
            factory.store.borrow_mut().clear();
            info!("event=factory_reset module=factory status=ok");
        }
    }

    /// Returns whether `instance()` currently holds a factory.
    pub fn has_instance() -> bool {
        INSTANCE.with(|slot| slot.borrow().is_some())
    }

    /// Registered entity types.
    pub fn types() -> &'static [EntityType] {
        &EntityType::ALL
    }

    /// Replaces the data-fetch seam.
    pub fn set_data_source(&self, data_source: Rc<dyn DataSource>) {
        *self.data_source.borrow_mut() = data_source;
    }

    /// Listener handle this factory registers on constructed entities.
    pub fn listener(&self) -> Rc<dyn ModelListener> {
        Rc::clone(&self.listener)
    }

    pub fn stats(&self) -> FactoryStats {
        self.stats.get()
    }

    /// Requests server data for `(kind, id)` from the data source.
    ///
    /// `callback` is forwarded unchanged; this call returns without waiting
    /// for it.
    ///
    /// # Errors
    /// - `TypeNotRecognized` when the type is absent or unregistered, or when
    ///   no id is given.
    pub fn initialize_for(
        &self,
        kind: impl TypeArg,
        id: impl Into<Option<EntityId>>,
        callback: DataCallback,
    ) -> FactoryResult<()> {
        let kind = self.require_type("initialize_for", &kind)?;
        let Some(id) = id.into() else {
            return Err(self.reject("initialize_for", FactoryError::TypeNotRecognized));
        };

        self.bump(|stats| stats.fetches += 1);
        // Clone out of the cell so the source may call back into this factory.
        let data_source = Rc::clone(&self.data_source.borrow());
        debug!(
            "event=initialize_for module=factory status=delegated type={} id={}",
            kind, id
        );
        data_source.get_data(kind, id, callback);
        Ok(())
    }

    /// Registers an already-constructed entity in the store.
    ///
    /// An entity without an id is accepted but not stored, since it has no
    /// key yet.
    ///
    /// # Errors
    /// - `InvalidArgument` when `object` is absent or its class name is not a
    ///   registered type.
    pub fn add_object<'a>(&self, object: impl Into<Option<&'a ModelRef>>) -> FactoryResult<()> {
        let Some(object) = object.into() else {
            return Err(self.reject("add_object", FactoryError::InvalidArgument));
        };
        let (kind, id) = {
            let model = object.borrow();
            let Some(kind) = EntityType::parse(model.persisted_class_name()) else {
                return Err(self.reject("add_object", FactoryError::InvalidArgument));
            };
            (kind, model.id())
        };
        let Some(id) = id else {
            debug!(
                "event=add_object module=factory status=unstored reason=no_id type={}",
                kind
            );
            return Ok(());
        };

        self.store
            .borrow_mut()
            .insert(kind, id, Rc::clone(object));
        debug!(
            "event=add_object module=factory status=ok type={} id={}",
            kind, id
        );
        Ok(())
    }

    /// Returns the stored entity for `(kind, id)`.
    ///
    /// # Errors
    /// - `TypeNotRecognized` for an absent or unregistered type.
    /// - `NotFound` when nothing is stored under `id`.
    pub fn get_object(
        &self,
        kind: impl TypeArg,
        id: impl Into<Option<EntityId>>,
    ) -> FactoryResult<ModelRef> {
        let kind = self.require_type("get_object", &kind)?;
        self.lookup(kind, id.into())
            .ok_or_else(|| self.reject("get_object", FactoryError::NotFound))
    }

    /// Like `get_object`, but a missing entity yields `Ok(None)`.
    ///
    /// # Errors
    /// - `TypeNotRecognized` for an absent or unregistered type.
    pub fn get_object_if_exists(
        &self,
        kind: impl TypeArg,
        id: impl Into<Option<EntityId>>,
    ) -> FactoryResult<Option<ModelRef>> {
        let kind = self.require_type("get_object_if_exists", &kind)?;
        Ok(self.lookup(kind, id.into()))
    }

    /// Builds a fresh entity with this factory registered as its listener.
    ///
    /// The entity is not stored; use `add_object` or `update_object` for that.
    ///
    /// # Errors
    /// - `TypeNotRecognized` for an absent or unregistered type.
    pub fn create_object(&self, kind: impl TypeArg) -> FactoryResult<ModelRef> {
        let kind = self.require_type("create_object", &kind)?;
        Ok(self.construct(kind))
    }

    /// Creates or updates the entity addressed by `data.id`.
    ///
    /// An existing stored entity keeps its identity and receives `data`
    /// through `set_data`. Otherwise a new entity is constructed, assigned
    /// and stored under its resulting id. Entities that end up without an id
    /// are returned but not stored.
    ///
    /// # Errors
    /// - `IllegalUpdateArgument` for any malformed type or payload.
    pub fn update_object<'a>(
        &self,
        kind: impl TypeArg,
        data: impl Into<Option<&'a Value>>,
    ) -> FactoryResult<ModelRef> {
        let request = UpdateRequest::parse(kind, data.into())
            .map_err(|err| self.reject("update_object", err))?;
        Ok(self.apply_update(&request))
    }

    /// Applies an already validated update request.
    pub fn apply_update(&self, request: &UpdateRequest) -> ModelRef {
        let kind = request.kind();
        let existing = request.id().and_then(|id| self.lookup(kind, Some(id)));
        let created = existing.is_none();
        let object = existing.unwrap_or_else(|| self.construct(kind));

        object.borrow_mut().set_data(request.data());

        let resolved_id = object.borrow().id();
        match resolved_id {
            Some(id) => {
                self.store
                    .borrow_mut()
                    .insert(kind, id, Rc::clone(&object));
            }
            None => debug!(
                "event=update_object module=factory status=unstored reason=no_id type={}",
                kind
            ),
        }
        debug!(
            "event=update_object module=factory status=ok type={} id={:?} created={}",
            kind, resolved_id, created
        );
        object
    }

    pub fn contains(&self, kind: EntityType, id: EntityId) -> bool {
        self.store.borrow().contains(kind, id)
    }

    /// Number of stored entities across all types.
    pub fn object_count(&self) -> usize {
        self.store.borrow().len()
    }

    /// Stored entities of one type, ordered by id.
    pub fn objects_of(&self, kind: EntityType) -> Vec<ModelRef> {
        self.store.borrow().objects_of(kind)
    }

    /// Evicts one entity from the store and returns it.
    pub fn remove_object(&self, kind: EntityType, id: EntityId) -> Option<ModelRef> {
        self.store.borrow_mut().remove(kind, id)
    }

    fn require_type(&self, operation: &str, kind: &impl TypeArg) -> FactoryResult<EntityType> {
        kind.resolve_type()
            .ok_or_else(|| self.reject(operation, FactoryError::TypeNotRecognized))
    }

    fn lookup(&self, kind: EntityType, id: Option<EntityId>) -> Option<ModelRef> {
        self.bump(|stats| stats.lookups += 1);
        let id = id?;
        self.store.borrow().get(kind, id)
    }

    fn construct(&self, kind: EntityType) -> ModelRef {
        self.bump(|stats| stats.constructions += 1);
        let object = kind.construct();
        object.borrow_mut().add_listener(self.listener());
        object
    }

    fn bump(&self, update: impl FnOnce(&mut FactoryStats)) {
        let mut stats = self.stats.get();
        update(&mut stats);
        self.stats.set(stats);
    }

    fn reject(&self, operation: &str, err: FactoryError) -> FactoryError {
        warn!(
            "event={} module=factory status=error error_code={}",
            operation,
            err.code()
        );
        err
    }
}
