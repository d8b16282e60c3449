use ahash::AHashMap;

mod file;

pub use file::FileStore;

/// Process-wide key holding the last selected operation id.
pub const SELECTED_OPERATION_KEY: &str = "selected_operation";
/// Process-wide key holding the last submitted free-text expression.
pub const LAST_EXPRESSION_KEY: &str = "last_expression";

/// Durable key for one field of one operation.
pub fn field_key(operation_id: &str, field_id: &str) -> String {
    format!("{}_{}", operation_id, field_id)
}

/// Namespaced string storage the form engine persists field values into.
///
/// Access is synchronous and last-write-wins. Each field key is owned by exactly
/// one `(operation, field)` pair, so no transactions are needed.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: AHashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) {
        (**self).remove(key)
    }
}
