use crate::error::{SessionError, ValidationError};
use crate::form::{FieldValues, missing_fields};
use crate::registry::{OperationSpec, Registry};
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;

mod shape;

use shape::{apply_shape, normalize_field};

/// The JSON body of one solver request: `{"operation": ..., ...operation-specific keys}`.
///
/// Built fresh for every submission and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestPayload {
    pub operation: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl RequestPayload {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// All top-level keys, `operation` first.
    pub fn keys(&self) -> Vec<String> {
        std::iter::once("operation".to_string())
            .chain(self.fields.keys().cloned())
            .collect()
    }

    pub fn to_json(&self) -> Value {
        let mut body = Map::with_capacity(self.fields.len() + 1);
        body.insert("operation".to_string(), Value::from(self.operation.as_str()));
        body.extend(self.fields.clone());
        Value::Object(body)
    }
}

/// Maps semantic field values onto the payload shape each operation declares.
pub struct RequestBuilder {
    registry: Arc<Registry>,
}

impl RequestBuilder {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    pub fn build(
        &self,
        operation_id: &str,
        values: &FieldValues,
    ) -> Result<RequestPayload, SessionError> {
        let operation = self.registry.get(operation_id)?;
        Ok(build_payload(operation, values)?)
    }
}

/// Builds the payload for `operation` from values that already passed validation.
///
/// The field consumed by the operation's shape rule is expanded into the rule's keys;
/// every other field is normalized by kind and stored under its own id.
pub fn build_payload(
    operation: &OperationSpec,
    values: &FieldValues,
) -> Result<RequestPayload, ValidationError> {
    let missing = missing_fields(operation, values);
    if !missing.is_empty() {
        return Err(ValidationError::Missing {
            operation: operation.id.clone(),
            fields: missing.iter().map(|f| f.id.clone()).collect(),
        });
    }

    let source = operation.shape.source();
    let mut fields = Map::new();
    for field in &operation.fields {
        // A blank never-blank field means "use the default", same as an absent one.
        let raw = values
            .get(&field.id)
            .map(String::as_str)
            .filter(|v| !(field.never_blank && v.trim().is_empty()))
            .unwrap_or(field.placeholder.as_str());
        if Some(field.id.as_str()) == source {
            apply_shape(&operation.shape, field, raw, &mut fields)?;
        } else {
            fields.insert(field.id.clone(), normalize_field(field, raw)?);
        }
    }

    Ok(RequestPayload {
        operation: operation.id.clone(),
        fields,
    })
}
