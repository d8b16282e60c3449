use crate::error::SolverError;
use crate::render::ResultValue;
use crate::request::RequestPayload;
use serde::Deserialize;

mod http;

pub use http::{DEFAULT_ENDPOINT, HttpSolverClient};

/// Outcome of one solver round trip.
pub type SolverOutcome = Result<ResultValue, SolverError>;

/// The remote solver, seen through one operation.
///
/// Implementations never retry; a failed submission is reported and the user resubmits.
pub trait SolverClient {
    fn submit(&self, payload: &RequestPayload) -> SolverOutcome;
}

impl<C: SolverClient + ?Sized> SolverClient for Box<C> {
    fn submit(&self, payload: &RequestPayload) -> SolverOutcome {
        (**self).submit(payload)
    }
}

impl<C: SolverClient + ?Sized> SolverClient for &C {
    fn submit(&self, payload: &RequestPayload) -> SolverOutcome {
        (**self).submit(payload)
    }
}

/// Response body of the solver: `{"result": ...}` or `{"error": "..."}`.
#[derive(Debug, Deserialize)]
pub struct SolverResponse {
    #[serde(default)]
    pub result: Option<ResultValue>,
    #[serde(default)]
    pub error: Option<String>,
}

impl SolverResponse {
    /// Decodes a response body. An out-of-band `error` wins over any `result`.
    pub fn from_body(body: &str) -> SolverOutcome {
        let response: SolverResponse = serde_json::from_str(body)
            .map_err(|e| SolverError::InvalidResponse(e.to_string()))?;
        response.into_outcome()
    }

    pub fn into_outcome(self) -> SolverOutcome {
        match (self.error, self.result) {
            (Some(message), _) => Err(SolverError::Rejected(message)),
            (None, Some(result)) => Ok(result),
            (None, None) => Err(SolverError::InvalidResponse(
                "response has neither 'result' nor 'error'".to_string(),
            )),
        }
    }
}
