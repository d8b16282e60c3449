use super::{SolverClient, SolverOutcome, SolverResponse};
use crate::error::SolverError;
use crate::request::RequestPayload;
use reqwest::blocking::Client;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// The local solver endpoint the client talks to by default.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/solve";

/// Posts payloads as JSON to a fixed solver endpoint and decodes the JSON reply.
pub struct HttpSolverClient {
    client: Client,
    endpoint: String,
}

impl HttpSolverClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, SolverError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SolverError::Transport(format!("could not create HTTP client: {}", e)))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl SolverClient for HttpSolverClient {
    fn submit(&self, payload: &RequestPayload) -> SolverOutcome {
        let start = Instant::now();
        debug!(endpoint = %self.endpoint, operation = %payload.operation, "Posting solver request");

        let response = self
            .client
            .post(&self.endpoint)
            .json(payload)
            .send()
            .map_err(|e| {
                warn!(endpoint = %self.endpoint, error = %e, "Solver unreachable");
                SolverError::Transport(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| SolverError::Transport(e.to_string()))?;
        info!(
            operation = %payload.operation,
            status = status.as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Solver responded"
        );

        // The solver reports rejected operations as a JSON error body on a 4xx status.
        match SolverResponse::from_body(&body) {
            Err(SolverError::InvalidResponse(_)) if !status.is_success() => Err(
                SolverError::Transport(format!("HTTP {}: {}", status, body.trim())),
            ),
            outcome => outcome,
        }
    }
}
