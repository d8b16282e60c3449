use crate::registry::FieldSpec;
use crate::store::{KeyValueStore, field_key};
use tracing::debug;

/// Lifecycle phase of one rendered field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPhase {
    /// Showing the placeholder hint; the field has no user value.
    Placeholder,
    /// Focused or being typed into. Transient: a blur always leaves this phase.
    Editing,
    /// Holding a committed, trimmed, non-empty user value.
    Edited,
}

/// State machine for one field of the current form.
///
/// Invariant: in `Placeholder` the displayed value is exactly the placeholder text,
/// and in `Edited` it is non-empty and trimmed.
#[derive(Debug, Clone)]
pub struct FieldMachine {
    spec: FieldSpec,
    key: String,
    phase: FieldPhase,
    value: String,
}

impl FieldMachine {
    /// Builds the field and restores its persisted value, if any.
    pub fn load<S: KeyValueStore + ?Sized>(operation_id: &str, spec: &FieldSpec, store: &S) -> Self {
        let key = field_key(operation_id, &spec.id);
        let restored = store
            .get(&key)
            .filter(|value| !value.trim().is_empty())
            .filter(|value| spec.never_blank || *value != spec.placeholder);

        let (phase, value) = match restored {
            Some(value) => (FieldPhase::Edited, value.trim().to_string()),
            None => (FieldPhase::Placeholder, spec.placeholder.clone()),
        };
        Self {
            spec: spec.clone(),
            key,
            phase,
            value,
        }
    }

    pub fn spec(&self) -> &FieldSpec {
        &self.spec
    }

    pub fn id(&self) -> &str {
        &self.spec.id
    }

    pub fn phase(&self) -> FieldPhase {
        self.phase
    }

    pub fn is_placeholder(&self) -> bool {
        self.phase == FieldPhase::Placeholder
    }

    /// What the widget currently shows.
    pub fn displayed(&self) -> &str {
        &self.value
    }

    /// Focus gain clears a placeholder so the user starts from a blank input.
    /// Storage is untouched.
    pub fn focus(&mut self) {
        match self.phase {
            FieldPhase::Placeholder => {
                self.value.clear();
                self.phase = FieldPhase::Editing;
            }
            FieldPhase::Edited => self.phase = FieldPhase::Editing,
            FieldPhase::Editing => {}
        }
    }

    /// Replaces the displayed text and persists it right away, so leaving without
    /// a blur does not lose data. Never-blank fields only persist on blur.
    pub fn input<S: KeyValueStore + ?Sized>(&mut self, text: &str, store: &mut S) {
        self.phase = FieldPhase::Editing;
        self.value = text.to_string();

        let trimmed = text.trim();
        if !self.spec.never_blank && !trimmed.is_empty() && trimmed != self.spec.placeholder {
            store.set(&self.key, trimmed);
        }
    }

    /// Commit point: blank input reverts to the placeholder and drops the stored key,
    /// anything else is trimmed and stored.
    pub fn blur<S: KeyValueStore + ?Sized>(&mut self, store: &mut S) {
        let trimmed = self.value.trim().to_string();
        if trimmed.is_empty() {
            self.phase = FieldPhase::Placeholder;
            self.value = self.spec.placeholder.clone();
            store.remove(&self.key);
            debug!(key = %self.key, "Field reverted to placeholder");
        } else {
            self.phase = FieldPhase::Edited;
            store.set(&self.key, &trimmed);
            self.value = trimmed;
            debug!(key = %self.key, "Field committed");
        }
    }

    /// The value the request builder sees: empty for a placeholder, except that
    /// never-blank fields fall back to their placeholder default.
    pub fn semantic_value(&self) -> String {
        let current = match self.phase {
            FieldPhase::Placeholder => "",
            FieldPhase::Editing | FieldPhase::Edited => self.value.trim(),
        };
        if current.is_empty() && self.spec.never_blank {
            self.spec.placeholder.clone()
        } else {
            current.to_string()
        }
    }
}
