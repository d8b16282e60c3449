use crate::error::RegistryError;
use ahash::AHashMap;

mod definition;
mod operations;

pub use definition::*;
pub use operations::{STANDARD_OPERATION_IDS, standard_operations};

/// Immutable lookup of every operation the client can submit.
///
/// The registry is the single source of truth for both the fields the form engine
/// renders and the keys the request builder fills in.
#[derive(Debug, Clone)]
pub struct Registry {
    operations: Vec<OperationSpec>,
    index: AHashMap<String, usize>,
}

/// Collects operations before freezing them into a `Registry`.
pub struct RegistryBuilder {
    operations: Vec<OperationSpec>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self {
            operations: standard_operations(),
        }
    }

    /// Starts from an empty table instead of the built-in operations.
    pub fn empty() -> Self {
        Self {
            operations: Vec::new(),
        }
    }

    pub fn with_operation(mut self, operation: OperationSpec) -> Self {
        self.operations.push(operation);
        self
    }

    /// Checks ids are unique and every shape reads a declared field.
    pub fn build(self) -> Result<Registry, RegistryError> {
        let mut index = AHashMap::with_capacity(self.operations.len());
        for (position, operation) in self.operations.iter().enumerate() {
            if index.insert(operation.id.clone(), position).is_some() {
                return Err(RegistryError::Duplicate(operation.id.clone()));
            }
            if let Some(source) = operation.shape.source() {
                if operation.field(source).is_none() {
                    return Err(RegistryError::UndeclaredShapeField {
                        operation: operation.id.clone(),
                        field: source.to_string(),
                    });
                }
            }
        }
        Ok(Registry {
            operations: self.operations,
            index,
        })
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// The built-in operation table.
    pub fn standard() -> Self {
        let operations = standard_operations();
        let index = operations
            .iter()
            .enumerate()
            .map(|(position, op)| (op.id.clone(), position))
            .collect();
        Self { operations, index }
    }

    pub fn get(&self, operation_id: &str) -> Result<&OperationSpec, RegistryError> {
        self.index
            .get(operation_id)
            .map(|&position| &self.operations[position])
            .ok_or_else(|| RegistryError::NotFound(operation_id.to_string()))
    }

    pub fn contains(&self, operation_id: &str) -> bool {
        self.index.contains_key(operation_id)
    }

    /// Operations in registration order.
    pub fn operations(&self) -> impl Iterator<Item = &OperationSpec> {
        self.operations.iter()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::standard()
    }
}
