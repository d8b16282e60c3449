use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A solver result as decoded from JSON. Only ever read, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResultValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<ResultValue>),
    Object(BTreeMap<String, ResultValue>),
}

impl ResultValue {
    /// The numeric value of a number, or of text that reads as one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ResultValue::Number(n) => Some(*n),
            ResultValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResultValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Converts back to JSON, writing whole numbers as integers.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            ResultValue::Null => serde_json::Value::Null,
            ResultValue::Bool(b) => serde_json::Value::Bool(*b),
            ResultValue::Number(n) if is_whole(*n) => serde_json::Value::from(*n as i64),
            ResultValue::Number(n) => serde_json::Value::from(*n),
            ResultValue::Text(s) => serde_json::Value::from(s.as_str()),
            ResultValue::List(items) => items.iter().map(ResultValue::to_json).collect(),
            ResultValue::Object(map) => serde_json::Value::Object(
                map.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
        }
    }

    /// The solver reports some failures in-band as text starting with `Error`.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            ResultValue::Text(s) if is_error_text(s) => Some(s),
            ResultValue::List(items) if items.len() == 1 => items[0].error_message(),
            ResultValue::Object(map) if map.len() == 1 => map.get("error").and_then(|v| v.as_text()),
            _ => None,
        }
    }
}

fn is_error_text(text: &str) -> bool {
    text.trim_start()
        .get(..5)
        .is_some_and(|head| head.eq_ignore_ascii_case("error"))
}

fn is_whole(n: f64) -> bool {
    n.fract() == 0.0 && n.abs() < 1e15
}

/// Whole numbers print without a fractional part.
pub fn format_number(n: f64) -> String {
    if is_whole(n) {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

impl fmt::Display for ResultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultValue::Null => write!(f, "null"),
            ResultValue::Bool(b) => write!(f, "{}", b),
            ResultValue::Number(n) => write!(f, "{}", format_number(*n)),
            ResultValue::Text(s) => write!(f, "{}", s),
            ResultValue::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            ResultValue::Object(map) => {
                write!(f, "{{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{} = {}", key, value)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<serde_json::Value> for ResultValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => ResultValue::Null,
            serde_json::Value::Bool(b) => ResultValue::Bool(b),
            serde_json::Value::Number(n) => n.as_f64().map_or(ResultValue::Null, ResultValue::Number),
            serde_json::Value::String(s) => ResultValue::Text(s),
            serde_json::Value::Array(items) => {
                ResultValue::List(items.into_iter().map(ResultValue::from).collect())
            }
            serde_json::Value::Object(map) => ResultValue::Object(
                map.into_iter()
                    .map(|(k, v)| (k, ResultValue::from(v)))
                    .collect(),
            ),
        }
    }
}
