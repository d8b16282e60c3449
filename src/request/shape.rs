use crate::error::ValidationError;
use crate::normalize::{
    normalize_latex_input, parse_interval_list, parse_numeric_vector, parse_variable_list,
    split_top_level, strip_segment_label,
};
use crate::registry::{FieldKind, FieldSpec, PayloadShape};
use serde_json::{Map, Value};

fn malformed(field: &FieldSpec, input: &str, reason: &str) -> ValidationError {
    ValidationError::Malformed {
        field: field.id.clone(),
        input: input.to_string(),
        reason: reason.to_string(),
    }
}

/// Normalizes a field that no shape rule consumes, according to its kind.
pub(super) fn normalize_field(field: &FieldSpec, raw: &str) -> Result<Value, ValidationError> {
    let raw = raw.trim();
    match field.kind {
        FieldKind::Expression => Ok(Value::from(normalize_latex_input(raw))),
        FieldKind::Text => Ok(Value::from(raw)),
        FieldKind::Variables => {
            let names = parse_variable_list(raw);
            if names.is_empty() {
                return Err(malformed(field, raw, "expected at least one variable name"));
            }
            Ok(Value::from(names))
        }
        FieldKind::Components => {
            let components = components(raw);
            if components.is_empty() {
                return Err(malformed(field, raw, "expected comma-separated components"));
            }
            Ok(Value::from(components))
        }
        FieldKind::Integer => raw
            .parse::<u32>()
            .map(Value::from)
            .map_err(|_| malformed(field, raw, "expected a non-negative integer")),
    }
}

/// Runs the shape rule over the field it consumes, writing the produced keys into `payload`.
pub(super) fn apply_shape(
    shape: &PayloadShape,
    field: &FieldSpec,
    raw: &str,
    payload: &mut Map<String, Value>,
) -> Result<(), ValidationError> {
    let raw = raw.trim();
    match shape {
        PayloadShape::Generic => {
            payload.insert(field.id.clone(), normalize_field(field, raw)?);
        }
        PayloadShape::Intervals { .. } => {
            let limits = intervals(field, raw)?;
            payload.insert("limits".to_string(), limits);
        }
        PayloadShape::Direction { .. } => {
            let direction = parse_numeric_vector(raw);
            if direction.is_empty() || direction.iter().any(|c| !c.is_finite()) {
                return Err(malformed(field, raw, "expected numeric components such as `1, 1`"));
            }
            payload.insert("direction".to_string(), Value::from(direction));
        }
        PayloadShape::Curve { .. } => {
            let segments = split_top_level(raw, ';');
            let [param, curve] = segments.as_slice() else {
                return Err(malformed(field, raw, "expected `<param>; <curve components>`"));
            };
            let param = strip_segment_label(param);
            let curve = components(strip_segment_label(curve));
            if param.is_empty() || curve.is_empty() {
                return Err(malformed(field, raw, "expected `<param>; <curve components>`"));
            }
            payload.insert("param".to_string(), Value::from(param));
            payload.insert("curve".to_string(), Value::from(curve));
        }
        PayloadShape::Surface { .. } => {
            let segments = split_top_level(raw, ';');
            if !(2..=3).contains(&segments.len()) {
                return Err(malformed(
                    field,
                    raw,
                    "expected `<params>; <surface>; <optional bounds>`",
                ));
            }
            let params = parse_variable_list(strip_segment_label(segments[0]));
            let surface = components(strip_segment_label(segments[1]));
            if params.is_empty() || surface.is_empty() {
                return Err(malformed(
                    field,
                    raw,
                    "expected `<params>; <surface>; <optional bounds>`",
                ));
            }
            payload.insert("params".to_string(), Value::from(params));
            payload.insert("surface".to_string(), Value::from(surface));

            let bounds = segments.get(2).map(|s| strip_segment_label(s)).unwrap_or("");
            if !bounds.is_empty() {
                payload.insert("bounds".to_string(), intervals(field, bounds)?);
            }
        }
        PayloadShape::Constraint { .. } => {
            payload.insert(
                "constraint".to_string(),
                Value::from(normalize_latex_input(strip_segment_label(raw))),
            );
        }
    }
    Ok(())
}

fn components(text: &str) -> Vec<String> {
    split_top_level(text, ',')
        .into_iter()
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}

// The interval parser fails soft; non-empty input with an empty result is an error here.
fn intervals(field: &FieldSpec, raw: &str) -> Result<Value, ValidationError> {
    let parsed = parse_interval_list(raw);
    if parsed.is_empty() {
        return Err(malformed(field, raw, "expected bounds like `x in [0, 1], y in [0, 2]`"));
    }
    serde_json::to_value(parsed).map_err(|e| malformed(field, raw, &e.to_string()))
}
