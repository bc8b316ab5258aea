//! Shared entity contract.
//!
//! # Responsibility
//! - Define the `Model` trait every managed entity implements.
//! - Hold identity, field payloads and listeners in `CommonModel`.
//! - Notify registered listeners after mutations.
//!
//! # Invariants
//! - `set_data` adopts a numeric `id` field and ignores non-numeric ones.
//! - Listeners receive events by value and never borrow the entity back.
//! - `EntityKey` distinguishes live entities that share a (type, id).

use serde_json::{Map, Value};
use std::any::Any;
use std::cell::RefCell;
use std::fmt::{Debug, Formatter};
use std::rc::Rc;

/// Numeric identity, unique inside one entity type partition.
pub type EntityId = i64;

/// Field payload applied through bulk assignment.
pub type ModelData = Map<String, Value>;

/// Shared handle to one live entity. Identity is `Rc` identity.
pub type ModelRef = Rc<RefCell<dyn Model>>;

/// Wraps a concrete model into a shared handle.
pub fn share<M: Model>(model: M) -> ModelRef {
    Rc::new(RefCell::new(model))
}

/// Reads a numeric identity out of a JSON value.
///
/// Accepts integer numbers and decimal integer strings (`"42"`).
pub fn entity_id_from_value(value: &Value) -> Option<EntityId> {
    match value {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.parse::<EntityId>().ok(),
        _ => None,
    }
}

/// Address identity of one live entity.
///
/// Two live entities never share a key; keys may be reused after drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityKey(usize);

impl EntityKey {
    pub fn of_model<M: Model + ?Sized>(model: &M) -> Self {
        Self((model as *const M).cast::<()>() as usize)
    }

    /// Key of the entity inside `cell`, read without borrowing it.
    pub fn of_cell(cell: &RefCell<dyn Model>) -> Self {
        Self(cell.as_ptr().cast::<()>() as usize)
    }
}

/// Lifecycle notification kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelEventKind {
    Edited,
    Destroyed,
}

/// Event delivered to listeners after an entity changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelEvent {
    pub kind: ModelEventKind,
    /// Persisted class name of the emitting entity.
    pub class_name: String,
    pub id: Option<EntityId>,
    /// Emitting entity.
    pub source: EntityKey,
}

/// Observer registered on an entity.
pub trait ModelListener {
    fn on_event(&self, event: &ModelEvent);
}

/// State shared by every entity variant.
#[derive(Default)]
pub struct CommonModel {
    id: Option<EntityId>,
    current_data: ModelData,
    persisted_data: ModelData,
    listeners: Vec<Rc<dyn ModelListener>>,
}

impl CommonModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> Option<EntityId> {
        self.id
    }

    pub fn set_id(&mut self, id: EntityId) {
        self.id = Some(id);
    }

    /// Working copy of fields, including local edits.
    pub fn current_data(&self) -> &ModelData {
        &self.current_data
    }

    pub fn current_data_mut(&mut self) -> &mut ModelData {
        &mut self.current_data
    }

    /// Last field set received through `set_data`.
    pub fn persisted_data(&self) -> &ModelData {
        &self.persisted_data
    }

    /// Merges `data` into both payloads and adopts a numeric `id`.
    pub fn set_data(&mut self, data: &ModelData) {
        if let Some(id) = data.get("id").and_then(entity_id_from_value) {
            self.id = Some(id);
        }
        for (key, value) in data {
            self.current_data.insert(key.clone(), value.clone());
            self.persisted_data.insert(key.clone(), value.clone());
        }
    }

    /// Reads a string field from the working copy.
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.current_data.get(key).and_then(Value::as_str)
    }

    /// Reads a numeric field from the working copy.
    pub fn f64_field(&self, key: &str) -> Option<f64> {
        self.current_data.get(key).and_then(Value::as_f64)
    }

    pub fn listeners(&self) -> &[Rc<dyn ModelListener>] {
        &self.listeners
    }

    pub fn add_listener(&mut self, listener: Rc<dyn ModelListener>) {
        self.listeners.push(listener);
    }

    /// Returns whether this exact listener handle is registered.
    pub fn has_listener(&self, listener: &Rc<dyn ModelListener>) -> bool {
        self.listeners
            .iter()
            .any(|registered| Rc::ptr_eq(registered, listener))
    }

    pub fn notify(&self, event: &ModelEvent) {
        for listener in &self.listeners {
            listener.on_event(event);
        }
    }
}

impl Debug for CommonModel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommonModel")
            .field("id", &self.id)
            .field("current_data", &self.current_data)
            .field("persisted_data", &self.persisted_data)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Contract every managed entity satisfies.
///
/// Variants only provide their class name and access to `CommonModel`; the
/// remaining behavior is shared through default methods.
pub trait Model: Any + Debug {
    /// Type classification checked against the type registry.
    fn persisted_class_name(&self) -> &str;
    fn common(&self) -> &CommonModel;
    fn common_mut(&mut self) -> &mut CommonModel;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn id(&self) -> Option<EntityId> {
        self.common().id()
    }

    fn set_id(&mut self, id: EntityId) {
        self.common_mut().set_id(id);
    }

    /// Bulk-assigns fields, then emits `Edited`.
    fn set_data(&mut self, data: &ModelData) {
        self.common_mut().set_data(data);
        self.notify(ModelEventKind::Edited);
    }

    /// Announces removal to listeners. The entity itself stays usable.
    fn destroy(&mut self) {
        self.notify(ModelEventKind::Destroyed);
    }

    fn notify(&self, kind: ModelEventKind) {
        let event = ModelEvent {
            kind,
            class_name: self.persisted_class_name().to_string(),
            id: self.id(),
            source: EntityKey::of_model(self),
        };
        self.common().notify(&event);
    }

    fn listeners(&self) -> &[Rc<dyn ModelListener>] {
        self.common().listeners()
    }

    fn add_listener(&mut self, listener: Rc<dyn ModelListener>) {
        self.common_mut().add_listener(listener);
    }

    fn has_listener(&self, listener: &Rc<dyn ModelListener>) -> bool {
        self.common().has_listener(listener)
    }
}

impl dyn Model {
    pub fn is<T: Model>(&self) -> bool {
        self.as_any().is::<T>()
    }

    pub fn downcast_ref<T: Model>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Model>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}
