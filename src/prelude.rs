//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the keisan crate.
//!
//! # Example
//!
//! ```rust
//! use keisan::prelude::*;
//! use std::sync::Arc;
//!
//! let registry = Arc::new(Registry::standard());
//! let mut form = FormEngine::new(registry, MemoryStore::new());
//! form.render_form("partial_derivative").unwrap();
//! form.fill("expression", "x^2 y").unwrap();
//!
//! let values = form.collect_values("partial_derivative").unwrap();
//! let missing = form.validate("partial_derivative", &values).unwrap();
//! assert_eq!(missing.len(), 1); // "variables" is still a placeholder
//! ```

// Registry and forms
pub use crate::form::{FieldMachine, FieldPhase, FieldValues, FormEngine};
pub use crate::registry::{
    FieldKind, FieldSpec, OperationSpec, PayloadShape, Registry, RegistryBuilder, RenderHint,
};

// Normalization
pub use crate::normalize::{
    Interval, clean_math_notation, normalize_latex_input, parse_interval_list,
    parse_numeric_vector, parse_variable_list,
};

// Requests, solving and rendering
pub use crate::render::{Block, DisplayKind, DisplayModel, ResultRenderer, ResultValue};
pub use crate::request::{RequestBuilder, RequestPayload};
pub use crate::session::Session;
pub use crate::solver::{DEFAULT_ENDPOINT, HttpSolverClient, SolverClient, SolverOutcome};

// Storage and configuration
pub use crate::config::Config;
pub use crate::store::{FileStore, KeyValueStore, MemoryStore};

// Error types
pub use crate::error::{
    ConfigError, FormError, RegistryError, SessionError, SolverError, StoreError, ValidationError,
};
