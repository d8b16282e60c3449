use thiserror::Error;

/// Errors raised when looking up operations in the registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Operation '{0}' is not registered")]
    NotFound(String),

    #[error("Operation '{0}' is registered more than once")]
    Duplicate(String),

    #[error("Operation '{operation}' uses field '{field}' in its payload shape, but declares no such field")]
    UndeclaredShapeField { operation: String, field: String },
}

/// Errors raised while driving the dynamic form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("No form is currently rendered")]
    NoActiveForm,

    #[error("Operation '{operation}' has no field named '{field}'")]
    UnknownField { operation: String, field: String },
}

/// Reasons a submission is blocked before it reaches the solver.
///
/// Parse failures from the normalizer surface here as `Malformed`, so a bad
/// interval or vector never travels to the solver as an empty list.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required fields for '{operation}': {}", .fields.join(", "))]
    Missing {
        operation: String,
        fields: Vec<String>,
    },

    #[error("Field '{field}' could not be read ('{input}'): {reason}")]
    Malformed {
        field: String,
        input: String,
        reason: String,
    },
}

/// Failures reported by, or on the way to, the remote solver.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    #[error("Failed to reach solver: {0}")]
    Transport(String),

    /// The solver answered but reported a domain failure. The message is kept verbatim.
    #[error("{0}")]
    Rejected(String),

    #[error("Solver returned an unreadable response: {0}")]
    InvalidResponse(String),
}

/// Errors from the file-backed key-value store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store file '{path}' could not be accessed: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Store contents could not be encoded or decoded: {0}")]
    Codec(String),
}

/// Errors raised while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Top-level error for a submission made through a `Session`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl From<RegistryError> for SessionError {
    fn from(err: RegistryError) -> Self {
        SessionError::Form(FormError::Registry(err))
    }
}
