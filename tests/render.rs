//! Tests for result rendering.
mod common;
use common::*;
use keisan::prelude::*;
use serde_json::json;

fn renderer() -> ResultRenderer {
    ResultRenderer::new(registry())
}

fn value(json: serde_json::Value) -> ResultValue {
    ResultValue::from(json)
}

#[test]
fn test_gradient_renders_as_tuple() {
    let display = renderer().render(&value(json!([1, -2, 3])), "gradient");
    assert_eq!(display.kind, DisplayKind::Result);
    assert_eq!(display.blocks.len(), 1);
    assert_eq!(display.blocks[0].text, "⟨1, -2, 3⟩");
    assert_eq!(display.copy_text, "<1, -2, 3>");
}

#[test]
fn test_vector_tuple_accepts_numeric_text() {
    let display = renderer().render(&value(json!(["0.5", 2])), "curl");
    assert_eq!(display.blocks[0].text, "⟨0.5, 2⟩");
}

#[test]
fn test_symbolic_vector_falls_back_to_solutions() {
    let display = renderer().render(&value(json!(["2*x*y", "x**2", "1"])), "gradient");
    assert_eq!(display.blocks.len(), 3);
    assert_eq!(display.blocks[0].label.as_deref(), Some("Solution 1"));
    assert_eq!(display.blocks[0].text, "2xy");
    assert_eq!(display.blocks[1].text, "x^2");
}

#[test]
fn test_long_numeric_list_is_not_a_tuple() {
    let display = renderer().render(&value(json!([1, 2, 3, 4])), "gradient");
    assert_eq!(display.blocks.len(), 4);
}

#[test]
fn test_lagrange_solutions() {
    let result = json!([{"x": "1/2", "y": "1/2", "lambda": "1/2"}, {"x": "-sqrt(2)", "y": 0}]);
    let display = renderer().render(&value(result), "lagrange_multipliers");

    assert_eq!(display.blocks.len(), 2);
    assert_eq!(display.blocks[0].label.as_deref(), Some("Solution 1"));
    assert_eq!(display.blocks[0].text, "lambda = 1/2, x = 1/2, y = 1/2");
    assert_eq!(display.blocks[1].text, "x = -\\sqrt{2}, y = 0");
    assert_eq!(
        display.copy_text,
        "Solution 1: lambda = 1/2, x = 1/2, y = 1/2\nSolution 2: x = -\\sqrt{2}, y = 0"
    );
}

#[test]
fn test_multi_solution_numbers_are_not_tuples() {
    let display = renderer().render(&value(json!([1, 2])), "lagrange_multipliers");
    assert_eq!(display.blocks.len(), 2);
    assert_eq!(display.text(), "Solution 1: 1\nSolution 2: 2");
}

#[test]
fn test_object_is_dumped() {
    let display = renderer().render(
        &value(json!({"a": 1, "b": "x", "c": [2, 0.5]})),
        "multiple_integral",
    );
    assert_eq!(display.blocks.len(), 1);
    let dumped: serde_json::Value = serde_json::from_str(&display.blocks[0].text).unwrap();
    assert_eq!(dumped, json!({"a": 1, "b": "x", "c": [2, 0.5]}));
    assert!(!display.blocks[0].text.contains("1.0"));
    assert!(!display.blocks[0].text.contains("2.0"));
    assert_eq!(display.copy_text, display.blocks[0].text);
}

#[test]
fn test_scalar_is_cleaned_for_display_only() {
    let display = renderer().render(&value(json!("2*x*sqrt(y)")), "partial_derivative");
    assert_eq!(display.blocks[0].text, "2x*\\sqrt{y}");
    assert_eq!(display.copy_text, "2*x*sqrt(y)");

    let display = renderer().render(&value(json!(4.5)), "multiple_integral");
    assert_eq!(display.text(), "4.5");
}

#[test]
fn test_in_band_errors() {
    let renderer = renderer();
    for result in [
        json!("Error: could not parse expression"),
        json!(["error: division by zero"]),
        json!({"error": "Error: no solution"}),
    ] {
        let display = renderer.render(&value(result.clone()), "gradient");
        assert!(display.is_error(), "not rendered as an error: {}", result);
    }

    let display = renderer.render(&value(json!("Error: x**2 undefined")), "gradient");
    assert_eq!(display.text(), "Error: x**2 undefined");
}

#[test]
fn test_solver_error_message_is_verbatim() {
    let outcome = Err(SolverError::Rejected("singular matrix".to_string()));
    let display = renderer().render_outcome(&outcome, "curl");
    assert!(display.is_error());
    assert_eq!(display.text(), "singular matrix");
    assert_eq!(display.copy_text, "singular matrix");
}

#[test]
fn test_transport_error_is_reported() {
    let outcome = Err(SolverError::Transport("connection refused".to_string()));
    let display = renderer().render_outcome(&outcome, "curl");
    assert!(display.is_error());
    assert_eq!(display.text(), "Failed to reach solver: connection refused");
}

#[test]
fn test_clean_output_is_stable_under_rerender() {
    let first = renderer().render(&value(json!("x**2*y + sqrt(z)")), "gradient");
    let second = renderer().render(&value(json!(first.blocks[0].text.clone())), "gradient");
    assert_eq!(first.blocks[0].text, second.blocks[0].text);
}
