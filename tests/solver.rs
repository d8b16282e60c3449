//! Tests for response decoding and the HTTP solver client.
mod common;
use common::*;
use keisan::prelude::*;
use keisan::solver::SolverResponse;
use std::time::Duration;

fn gradient_payload() -> RequestPayload {
    RequestBuilder::new(registry())
        .build("gradient", &valid_values("gradient"))
        .unwrap()
}

#[test]
fn test_decode_result_body() {
    let outcome = SolverResponse::from_body(r#"{"result": [1, -2, 3]}"#);
    assert_eq!(
        outcome,
        Ok(ResultValue::List(vec![
            ResultValue::Number(1.0),
            ResultValue::Number(-2.0),
            ResultValue::Number(3.0),
        ]))
    );
}

#[test]
fn test_decode_error_body_wins() {
    let outcome = SolverResponse::from_body(r#"{"error": "singular matrix", "result": 1}"#);
    assert_eq!(outcome, Err(SolverError::Rejected("singular matrix".to_string())));
}

#[test]
fn test_decode_rejects_unusable_bodies() {
    assert!(matches!(
        SolverResponse::from_body("<html>oops</html>"),
        Err(SolverError::InvalidResponse(_))
    ));
    assert!(matches!(
        SolverResponse::from_body(r#"{"status": "ok"}"#),
        Err(SolverError::InvalidResponse(_))
    ));
}

#[test]
fn test_http_client_posts_payload_and_decodes_result() {
    let (url, server) = one_shot_server("200 OK", r#"{"result": "2*x*y"}"#);
    let client = HttpSolverClient::new(url.clone(), Duration::from_secs(5)).unwrap();
    assert_eq!(client.endpoint(), url);

    let outcome = client.submit(&gradient_payload());
    assert_eq!(outcome, Ok(ResultValue::Text("2*x*y".to_string())));

    let request = server.join().unwrap();
    assert!(request.starts_with("POST /solve"));
    let body = &request[request.find("\r\n\r\n").unwrap() + 4..];
    let sent: serde_json::Value = serde_json::from_str(body).unwrap();
    assert_eq!(sent["operation"], "gradient");
    assert_eq!(sent["variables"], serde_json::json!(["x", "y", "z"]));
}

#[test]
fn test_http_error_status_with_json_body_is_rejected() {
    let (url, server) = one_shot_server("400 BAD REQUEST", r#"{"error": "Invalid operation"}"#);
    let client = HttpSolverClient::new(url, Duration::from_secs(5)).unwrap();

    let outcome = client.submit(&gradient_payload());
    assert_eq!(outcome, Err(SolverError::Rejected("Invalid operation".to_string())));
    server.join().unwrap();
}

#[test]
fn test_http_error_status_without_json_is_transport() {
    let (url, server) = one_shot_server("500 INTERNAL SERVER ERROR", "boom");
    let client = HttpSolverClient::new(url, Duration::from_secs(5)).unwrap();

    match client.submit(&gradient_payload()) {
        Err(SolverError::Transport(message)) => assert!(message.contains("500")),
        other => panic!("Expected a transport error, got {:?}", other),
    }
    server.join().unwrap();
}

#[test]
fn test_unreachable_solver_is_transport_error() {
    let client = HttpSolverClient::new(dead_endpoint(), Duration::from_secs(2)).unwrap();
    assert!(matches!(
        client.submit(&gradient_payload()),
        Err(SolverError::Transport(_))
    ));
}

#[test]
fn test_solver_timeout_is_transport_error() {
    let (url, server) = silent_server(Duration::from_secs(2));
    let client = HttpSolverClient::new(url, Duration::from_millis(200)).unwrap();

    let started = std::time::Instant::now();
    assert!(matches!(
        client.submit(&gradient_payload()),
        Err(SolverError::Transport(_))
    ));
    assert!(started.elapsed() < Duration::from_secs(2));
    server.join().unwrap();
}
