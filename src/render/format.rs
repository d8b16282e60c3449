use super::value::{ResultValue, format_number};
use crate::normalize::clean_math_notation;
use itertools::Itertools;

/// Turns result fragments into display and clipboard text.
pub struct ResultFormatter;

impl ResultFormatter {
    /// `⟨1, -2, 3⟩` for display.
    pub fn angle_tuple(components: &[f64]) -> String {
        format!("⟨{}⟩", Self::join_numbers(components))
    }

    /// `<1, -2, 3>` for the clipboard.
    pub fn plain_tuple(components: &[f64]) -> String {
        format!("<{}>", Self::join_numbers(components))
    }

    fn join_numbers(components: &[f64]) -> String {
        components.iter().map(|n| format_number(*n)).join(", ")
    }

    /// One list element, cleaned for display. Objects render as `k = v` pairs.
    pub fn element(value: &ResultValue) -> String {
        match value {
            ResultValue::Object(map) => map
                .iter()
                .map(|(key, value)| format!("{} = {}", key, Self::element(value)))
                .join(", "),
            ResultValue::List(items) => format!("[{}]", items.iter().map(Self::element).join(", ")),
            ResultValue::Text(s) => clean_math_notation(s),
            other => other.to_string(),
        }
    }

    /// Pretty-printed structural dump of a value. Whole numbers stay integers.
    pub fn dump(value: &ResultValue) -> String {
        serde_json::to_string_pretty(&value.to_json()).unwrap_or_else(|_| value.to_string())
    }
}
