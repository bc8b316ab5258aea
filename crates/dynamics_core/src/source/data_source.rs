//! Data source contract and in-process implementations.
//!
//! # Responsibility
//! - Define the `(type, id, callback)` fetch seam.
//! - Provide a no-op default and an in-memory fixture source.
//!
//! # Invariants
//! - A source invokes each callback at most once.
//! - The factory never wraps or inspects callbacks it forwards.

use crate::model::common::{EntityId, ModelData};
use crate::model::entity_type::EntityType;
use log::{debug, warn};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type FetchResult = Result<ModelData, FetchError>;

/// Completion handler for one fetch request.
pub type DataCallback = Box<dyn FnOnce(FetchResult)>;

/// Fetch failure reported to callbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    NotFound { kind: EntityType, id: EntityId },
    Unavailable(String),
}

impl Display for FetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { kind, id } => write!(f, "no {kind} data for id {id}"),
            Self::Unavailable(reason) => write!(f, "data source unavailable: {reason}"),
        }
    }
}

impl Error for FetchError {}

/// Supplies server data for one entity.
///
/// Completion may be synchronous or deferred; callers must not assume the
/// callback has run when `get_data` returns.
pub trait DataSource {
    fn get_data(&self, kind: EntityType, id: EntityId, callback: DataCallback);
}

/// Default source for factories without a transport. Drops every request.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopDataSource;

impl DataSource for NoopDataSource {
    fn get_data(&self, kind: EntityType, id: EntityId, _callback: DataCallback) {
        warn!(
            "event=fetch_dropped module=source status=skipped type={} id={}",
            kind, id
        );
    }
}

/// In-memory fixture source that answers synchronously.
#[derive(Debug, Default)]
pub struct StaticDataSource {
    fixtures: RefCell<BTreeMap<(EntityType, EntityId), ModelData>>,
}

impl StaticDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers or replaces the payload served for `(kind, id)`.
    pub fn insert(&self, kind: EntityType, id: EntityId, data: ModelData) {
        self.fixtures.borrow_mut().insert((kind, id), data);
    }

    pub fn len(&self) -> usize {
        self.fixtures.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixtures.borrow().is_empty()
    }
}

impl DataSource for StaticDataSource {
    fn get_data(&self, kind: EntityType, id: EntityId, callback: DataCallback) {
        // Borrow released before the callback so it may insert new fixtures.
        let found = self.fixtures.borrow().get(&(kind, id)).cloned();
        debug!(
            "event=fetch module=source status={} type={} id={}",
            if found.is_some() { "ok" } else { "not_found" },
            kind,
            id
        );
        match found {
            Some(data) => callback(Ok(data)),
            None => callback(Err(FetchError::NotFound { kind, id })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DataSource, FetchError, FetchResult, StaticDataSource};
    use crate::model::entity_type::EntityType;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn static_source_delivers_fixture_and_not_found() {
        let source = StaticDataSource::new();
        source.insert(
            EntityType::Iteration,
            222,
            json!({"id": 222, "name": "Sprint 4"}).as_object().unwrap().clone(),
        );
        assert_eq!(source.len(), 1);

        let received: Rc<RefCell<Vec<FetchResult>>> = Rc::default();
        let sink = Rc::clone(&received);
        source.get_data(
            EntityType::Iteration,
            222,
            Box::new(move |result| sink.borrow_mut().push(result)),
        );
        let sink = Rc::clone(&received);
        source.get_data(
            EntityType::Story,
            222,
            Box::new(move |result| sink.borrow_mut().push(result)),
        );

        let received = received.borrow();
        assert_eq!(received.len(), 2);
        let data = received[0].as_ref().expect("fixture should be served");
        assert_eq!(data["name"], "Sprint 4");
        assert_eq!(
            received[1],
            Err(FetchError::NotFound {
                kind: EntityType::Story,
                id: 222
            })
        );
    }
}
