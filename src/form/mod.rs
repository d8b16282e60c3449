use crate::error::FormError;
use crate::registry::{FieldSpec, OperationSpec, Registry};
use crate::store::KeyValueStore;
use ahash::AHashMap;
use std::sync::Arc;
use tracing::debug;

mod field;

pub use field::{FieldMachine, FieldPhase};

/// Semantic field values keyed by field id.
pub type FieldValues = AHashMap<String, String>;

/// The form currently on screen: one operation and its live fields.
#[derive(Debug, Clone)]
struct ActiveForm {
    operation_id: String,
    fields: Vec<FieldMachine>,
}

/// Materializes the fields an operation declares and keeps them in sync with storage.
///
/// Field state lives only as long as its operation is displayed; switching operations
/// discards it without touching storage, and the next render restores from storage.
pub struct FormEngine<S: KeyValueStore> {
    registry: Arc<Registry>,
    store: S,
    active: Option<ActiveForm>,
}

impl<S: KeyValueStore> FormEngine<S> {
    pub fn new(registry: Arc<Registry>, store: S) -> Self {
        Self {
            registry,
            store,
            active: None,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Tears down the current field set and rebuilds it for `operation_id`.
    pub fn render_form(&mut self, operation_id: &str) -> Result<&[FieldMachine], FormError> {
        let operation = self.registry.get(operation_id)?;
        let fields = load_fields(operation, &self.store);
        debug!(
            operation = operation_id,
            restored = fields.iter().filter(|f| !f.is_placeholder()).count(),
            "Rendered form"
        );
        let active = self.active.insert(ActiveForm {
            operation_id: operation.id.clone(),
            fields,
        });
        Ok(&active.fields)
    }

    pub fn current_operation(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.operation_id.as_str())
    }

    pub fn fields(&self) -> &[FieldMachine] {
        self.active.as_ref().map_or(&[], |a| a.fields.as_slice())
    }

    pub fn field(&self, field_id: &str) -> Option<&FieldMachine> {
        self.fields().iter().find(|f| f.id() == field_id)
    }

    pub fn focus(&mut self, field_id: &str) -> Result<(), FormError> {
        self.field_mut(field_id)?.focus();
        Ok(())
    }

    pub fn input(&mut self, field_id: &str, text: &str) -> Result<(), FormError> {
        let (active, store) = self.active_parts()?;
        find_field(active, field_id)?.input(text, store);
        Ok(())
    }

    pub fn blur(&mut self, field_id: &str) -> Result<(), FormError> {
        let (active, store) = self.active_parts()?;
        find_field(active, field_id)?.blur(store);
        Ok(())
    }

    /// Focus, type and blur in one step, as a user filling a field would.
    pub fn fill(&mut self, field_id: &str, text: &str) -> Result<(), FormError> {
        let (active, store) = self.active_parts()?;
        let field = find_field(active, field_id)?;
        field.focus();
        field.input(text, store);
        field.blur(store);
        Ok(())
    }

    /// Semantic values for every field of `operation_id`.
    ///
    /// Reads the live fields when that operation is on screen, otherwise what a fresh
    /// render would restore from storage.
    pub fn collect_values(&self, operation_id: &str) -> Result<FieldValues, FormError> {
        let fields = match &self.active {
            Some(active) if active.operation_id == operation_id => active.fields.clone(),
            _ => load_fields(self.registry.get(operation_id)?, &self.store),
        };
        Ok(fields
            .iter()
            .map(|f| (f.id().to_string(), f.semantic_value()))
            .collect())
    }

    /// Every required field whose collected value is empty. Never-blank fields are
    /// never missing. A non-empty result must block submission.
    pub fn validate(
        &self,
        operation_id: &str,
        values: &FieldValues,
    ) -> Result<Vec<&FieldSpec>, FormError> {
        let operation = self.registry.get(operation_id)?;
        Ok(missing_fields(operation, values))
    }

    fn field_mut(&mut self, field_id: &str) -> Result<&mut FieldMachine, FormError> {
        let active = self.active.as_mut().ok_or(FormError::NoActiveForm)?;
        find_field(active, field_id)
    }

    fn active_parts(&mut self) -> Result<(&mut ActiveForm, &mut S), FormError> {
        let active = self.active.as_mut().ok_or(FormError::NoActiveForm)?;
        Ok((active, &mut self.store))
    }
}

/// Fields of `operation` whose value in `values` is absent or blank.
pub fn missing_fields<'a>(operation: &'a OperationSpec, values: &FieldValues) -> Vec<&'a FieldSpec> {
    operation
        .fields
        .iter()
        .filter(|f| !f.never_blank)
        .filter(|f| values.get(&f.id).is_none_or(|v| v.trim().is_empty()))
        .collect()
}

fn load_fields<S: KeyValueStore + ?Sized>(operation: &OperationSpec, store: &S) -> Vec<FieldMachine> {
    operation
        .fields
        .iter()
        .map(|spec| FieldMachine::load(&operation.id, spec, store))
        .collect()
}

fn find_field<'a>(active: &'a mut ActiveForm, field_id: &str) -> Result<&'a mut FieldMachine, FormError> {
    let ActiveForm {
        operation_id,
        fields,
    } = active;
    fields
        .iter_mut()
        .find(|f| f.id() == field_id)
        .ok_or_else(|| FormError::UnknownField {
            operation: operation_id.clone(),
            field: field_id.to_string(),
        })
}
