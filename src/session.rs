use crate::error::{FormError, SessionError, ValidationError};
use crate::form::{FieldMachine, FormEngine};
use crate::registry::Registry;
use crate::render::{DisplayModel, ResultRenderer};
use crate::request::{RequestBuilder, RequestPayload};
use crate::solver::SolverClient;
use crate::store::{KeyValueStore, LAST_EXPRESSION_KEY, SELECTED_OPERATION_KEY};
use std::sync::Arc;
use tracing::{debug, info};

/// One calculator window: the selected operation's form, the solver and the renderer.
///
/// Submissions take `&mut self`, so a second submission cannot start while one
/// is still waiting on the solver.
pub struct Session<S: KeyValueStore, C: SolverClient> {
    form: FormEngine<S>,
    builder: RequestBuilder,
    renderer: ResultRenderer,
    client: C,
}

impl<S: KeyValueStore, C: SolverClient> Session<S, C> {
    pub fn new(registry: Arc<Registry>, store: S, client: C) -> Self {
        Self {
            form: FormEngine::new(Arc::clone(&registry), store),
            builder: RequestBuilder::new(Arc::clone(&registry)),
            renderer: ResultRenderer::new(registry),
            client,
        }
    }

    pub fn form(&self) -> &FormEngine<S> {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormEngine<S> {
        &mut self.form
    }

    pub fn registry(&self) -> &Registry {
        self.form.registry()
    }

    /// Switches to `operation_id`, remembering the choice across restarts.
    pub fn select(&mut self, operation_id: &str) -> Result<&[FieldMachine], SessionError> {
        self.form.registry().get(operation_id)?;
        self.form
            .store_mut()
            .set(SELECTED_OPERATION_KEY, operation_id);
        Ok(self.form.render_form(operation_id)?)
    }

    /// Re-selects the remembered operation. Returns its id, or `None` if nothing
    /// usable was stored.
    pub fn restore(&mut self) -> Option<String> {
        let stored = self.form.store().get(SELECTED_OPERATION_KEY)?;
        if !self.form.registry().contains(&stored) {
            debug!(operation = %stored, "Ignoring unregistered stored operation");
            return None;
        }
        self.form.render_form(&stored).ok()?;
        Some(stored)
    }

    /// The last free-text expression submitted in any operation.
    pub fn last_expression(&self) -> Option<String> {
        self.form.store().get(LAST_EXPRESSION_KEY)
    }

    /// Collects, validates and builds the payload for the current form without sending it.
    pub fn prepare(&self) -> Result<RequestPayload, SessionError> {
        let operation_id = self
            .form
            .current_operation()
            .ok_or(FormError::NoActiveForm)?;
        let values = self.form.collect_values(operation_id)?;

        let missing = self.form.validate(operation_id, &values)?;
        if !missing.is_empty() {
            return Err(ValidationError::Missing {
                operation: operation_id.to_string(),
                fields: missing.iter().map(|f| f.id.clone()).collect(),
            }
            .into());
        }

        self.builder.build(operation_id, &values)
    }

    /// Submits the current form and renders the solver's answer.
    ///
    /// Validation problems are returned as errors and never reach the solver.
    /// Transport and solver failures come back as an error display model.
    pub fn submit(&mut self) -> Result<DisplayModel, SessionError> {
        let payload = self.prepare()?;
        if let Some(expression) = payload.get("expression").and_then(|v| v.as_str()) {
            self.form.store_mut().set(LAST_EXPRESSION_KEY, expression);
        }

        info!(operation = %payload.operation, "Submitting calculation");
        let outcome = self.client.submit(&payload);
        Ok(self.renderer.render_outcome(&outcome, &payload.operation))
    }

    pub fn builder(&self) -> &RequestBuilder {
        &self.builder
    }

    pub fn renderer(&self) -> &ResultRenderer {
        &self.renderer
    }
}
