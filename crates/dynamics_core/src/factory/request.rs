//! Validated input for create-or-update calls.

use crate::factory::error::{FactoryError, FactoryResult};
use crate::model::common::{entity_id_from_value, EntityId, ModelData};
use crate::model::entity_type::{EntityType, TypeArg};
use serde_json::Value;

/// Parsed `update_object` arguments.
///
/// Construction is the only validation step: a value of this type always
/// names a registered type and carries an object payload whose `id`, when
/// present, is numeric.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateRequest {
    kind: EntityType,
    id: Option<EntityId>,
    data: ModelData,
}

impl UpdateRequest {
    /// Validates raw caller input.
    ///
    /// # Errors
    /// - `IllegalUpdateArgument` when the type is absent or unregistered.
    /// - `IllegalUpdateArgument` when `data` is absent or not a JSON object.
    /// - `IllegalUpdateArgument` when `data.id` is null or non-numeric.
    pub fn parse(kind: impl TypeArg, data: Option<&Value>) -> FactoryResult<Self> {
        let kind = kind
            .resolve_type()
            .ok_or(FactoryError::IllegalUpdateArgument)?;
        let Some(Value::Object(fields)) = data else {
            return Err(FactoryError::IllegalUpdateArgument);
        };

        let id = match fields.get("id") {
            None => None,
            Some(value) => Some(
                entity_id_from_value(value).ok_or(FactoryError::IllegalUpdateArgument)?,
            ),
        };

        let mut data = fields.clone();
        if let Some(id) = id {
            // Normalize `"123"` to `123` so entities always see a numeric id.
            data.insert("id".to_string(), Value::from(id));
        }

        Ok(Self { kind, id, data })
    }

    pub fn kind(&self) -> EntityType {
        self.kind
    }

    /// `None` signals a brand-new object.
    pub fn id(&self) -> Option<EntityId> {
        self.id
    }

    pub fn data(&self) -> &ModelData {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::UpdateRequest;
    use crate::factory::error::FactoryError;
    use crate::model::entity_type::EntityType;
    use serde_json::{json, Value};

    #[test]
    fn parse_rejects_every_malformed_shape() {
        let cases: Vec<(Option<&str>, Option<Value>)> = vec![
            (None, None),
            (None, Some(json!({}))),
            (Some("iteration"), Some(json!({"id": null}))),
            (Some("iteration"), None),
            (Some("iteration"), Some(json!("Invalid string"))),
            (Some("iteration"), Some(json!({"id": "Jeejee"}))),
            (Some("bogus"), Some(json!({"id": 1}))),
            (Some("task"), Some(json!([1, 2, 3]))),
        ];

        for (kind, data) in cases {
            let err = UpdateRequest::parse(kind, data.as_ref())
                .expect_err("malformed update input must be rejected");
            assert_eq!(err, FactoryError::IllegalUpdateArgument);
        }
    }

    #[test]
    fn parse_accepts_missing_id_and_normalizes_numeric_strings() {
        let fresh = UpdateRequest::parse("story", Some(&json!({"name": "New"})))
            .expect("missing id is a new object");
        assert_eq!(fresh.kind(), EntityType::Story);
        assert_eq!(fresh.id(), None);

        let keyed = UpdateRequest::parse(EntityType::Task, Some(&json!({"id": "42"})))
            .expect("numeric string id");
        assert_eq!(keyed.id(), Some(42));
        assert_eq!(keyed.data()["id"], json!(42));
    }
}
