//! Common test utilities: a scripted solver, a one-shot HTTP responder and form helpers.
use keisan::prelude::*;
use std::cell::RefCell;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// A solver that answers every request with the same outcome and records what it saw.
#[allow(dead_code)]
pub struct ScriptedSolver {
    outcome: SolverOutcome,
    pub seen: RefCell<Vec<RequestPayload>>,
}

#[allow(dead_code)]
impl ScriptedSolver {
    pub fn answering(value: ResultValue) -> Self {
        Self {
            outcome: Ok(value),
            seen: RefCell::new(Vec::new()),
        }
    }

    pub fn failing(error: SolverError) -> Self {
        Self {
            outcome: Err(error),
            seen: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.seen.borrow().len()
    }
}

impl SolverClient for ScriptedSolver {
    fn submit(&self, payload: &RequestPayload) -> SolverOutcome {
        self.seen.borrow_mut().push(payload.clone());
        self.outcome.clone()
    }
}

#[allow(dead_code)]
pub fn registry() -> Arc<Registry> {
    Arc::new(Registry::standard())
}

/// Builds a value map from `(field, value)` pairs.
#[allow(dead_code)]
pub fn values(pairs: &[(&str, &str)]) -> FieldValues {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Fully valid input for every built-in operation, including optional parts.
#[allow(dead_code)]
pub fn valid_values(operation_id: &str) -> FieldValues {
    match operation_id {
        "partial_derivative" => values(&[("expression", "2xy + sin(t)"), ("variables", "x t"), ("order", "2")]),
        "gradient" => values(&[("expression", "x^2 y + z"), ("variables", "x y z")]),
        "divergence" | "curl" => values(&[("vector_field", "x*y, y*z, z*x"), ("variables", "x y z")]),
        "greens_theorem" => values(&[("vector_field", "-y, x"), ("variables", "x y")]),
        "multiple_integral" => values(&[("expression", "x y"), ("limits", "x in [0,1], y in [0,2]")]),
        "directional_derivative" => values(&[
            ("expression", "x^2 + y^2"),
            ("variables", "x y"),
            ("direction", "1, 1"),
        ]),
        "line_integral" => values(&[("vector_field", "y, x, z"), ("path", "t; t, t^2, t^3")]),
        "surface_integral" | "stokes_theorem" => values(&[
            ("vector_field", "x, y, z"),
            ("surface", "u, v; u, v, u*v; u in [0,1], v in [0,2]"),
        ]),
        "lagrange_multipliers" => values(&[
            ("expression", "x y"),
            ("constraint", "x + y - 1"),
            ("variables", "x y"),
        ]),
        other => panic!("no fixture for operation '{}'", other),
    }
}

/// Serves exactly one HTTP request with `status` and `body`, returning the base URL
/// and a handle yielding the raw request that was received.
#[allow(dead_code)]
pub fn one_shot_server(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind test listener");
    let url = format!("http://{}/solve", listener.local_addr().expect("local addr"));

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept connection");
        let request = read_request(&mut stream);
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).expect("write response");
        stream.flush().expect("flush response");
        request
    });

    (url, handle)
}

fn read_request(stream: &mut impl Read) -> String {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let read = stream.read(&mut chunk).expect("read request");
        if read == 0 {
            break;
        }
        buffer.extend_from_slice(&chunk[..read]);

        let text = String::from_utf8_lossy(&buffer);
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.trim()
                        .eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buffer.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buffer).into_owned()
}

/// Accepts one connection, reads the request and never answers. The socket is held
/// open for `hold` so the client has to give up on its own.
#[allow(dead_code)]
pub fn silent_server(hold: Duration) -> (String, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind test listener");
    let url = format!("http://{}/solve", listener.local_addr().expect("local addr"));

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept connection");
        read_request(&mut stream);
        thread::sleep(hold);
    });

    (url, handle)
}

/// A URL nothing is listening on.
#[allow(dead_code)]
pub fn dead_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind probe listener");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{}/solve", addr)
}
