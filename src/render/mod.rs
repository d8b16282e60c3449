use crate::error::SolverError;
use crate::normalize::clean_math_notation;
use crate::registry::{Registry, RenderHint};
use itertools::Itertools;
use serde::Serialize;
use std::sync::Arc;

mod format;
mod value;

pub use format::ResultFormatter;
pub use value::{ResultValue, format_number};

/// Whether a display model carries a result or an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DisplayKind {
    Result,
    Error,
}

/// One labeled piece of rendered output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    pub label: Option<String>,
    pub text: String,
}

impl Block {
    fn plain(text: String) -> Self {
        Self { label: None, text }
    }
}

/// Rendering-agnostic output: labeled text blocks plus a plain-text clipboard copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayModel {
    pub kind: DisplayKind,
    pub blocks: Vec<Block>,
    pub copy_text: String,
}

impl DisplayModel {
    /// An error model. The message is kept verbatim, never run through notation cleanup.
    pub fn error(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            kind: DisplayKind::Error,
            blocks: vec![Block::plain(message.clone())],
            copy_text: message,
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == DisplayKind::Error
    }

    /// All block text, one block per line with its label.
    pub fn text(&self) -> String {
        self.blocks
            .iter()
            .map(|b| match &b.label {
                Some(label) => format!("{}: {}", label, b.text),
                None => b.text.clone(),
            })
            .join("\n")
    }
}

/// Turns solver responses into display models, dispatching on response shape and
/// the operation's render hint.
pub struct ResultRenderer {
    registry: Arc<Registry>,
}

impl ResultRenderer {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    /// Renders a solver outcome. Transport and solver failures become error models.
    pub fn render_outcome(
        &self,
        outcome: &Result<ResultValue, SolverError>,
        operation_id: &str,
    ) -> DisplayModel {
        match outcome {
            Ok(value) => self.render(value, operation_id),
            Err(SolverError::Rejected(message)) => DisplayModel::error(message.as_str()),
            Err(other) => DisplayModel::error(other.to_string()),
        }
    }

    /// Dispatch, in priority order:
    /// 1. list + multi-solution operation → one `Solution i` block per element;
    /// 2. list of 2 or 3 numbers + vector operation → one angle-bracket tuple;
    /// 3. any other list → one `Solution i` block per element;
    /// 4. object → pretty-printed dump;
    /// 5. scalar → cleaned text, raw text on the clipboard.
    ///
    /// In-band error results short-circuit to an error model.
    pub fn render(&self, value: &ResultValue, operation_id: &str) -> DisplayModel {
        if let Some(message) = value.error_message() {
            return DisplayModel::error(message);
        }

        let hint = self
            .registry
            .get(operation_id)
            .map_or(RenderHint::Scalar, |op| op.render_hint);

        match value {
            ResultValue::List(items) if hint == RenderHint::MultiSolution => solutions(items),
            ResultValue::List(items) if hint == RenderHint::Vector => match numeric_tuple(items) {
                Some(components) => DisplayModel {
                    kind: DisplayKind::Result,
                    blocks: vec![Block::plain(ResultFormatter::angle_tuple(&components))],
                    copy_text: ResultFormatter::plain_tuple(&components),
                },
                None => solutions(items),
            },
            ResultValue::List(items) => solutions(items),
            ResultValue::Object(_) => {
                let dump = ResultFormatter::dump(value);
                DisplayModel {
                    kind: DisplayKind::Result,
                    blocks: vec![Block::plain(dump.clone())],
                    copy_text: dump,
                }
            }
            scalar => {
                let raw = scalar.to_string();
                DisplayModel {
                    kind: DisplayKind::Result,
                    blocks: vec![Block::plain(clean_math_notation(&raw))],
                    copy_text: raw,
                }
            }
        }
    }
}

fn solutions(items: &[ResultValue]) -> DisplayModel {
    let blocks: Vec<Block> = items
        .iter()
        .enumerate()
        .map(|(i, item)| Block {
            label: Some(format!("Solution {}", i + 1)),
            text: ResultFormatter::element(item),
        })
        .collect();
    let copy_text = blocks
        .iter()
        .map(|b| format!("{}: {}", b.label.as_deref().unwrap_or_default(), b.text))
        .join("\n");
    DisplayModel {
        kind: DisplayKind::Result,
        blocks,
        copy_text,
    }
}

fn numeric_tuple(items: &[ResultValue]) -> Option<Vec<f64>> {
    if !(2..=3).contains(&items.len()) {
        return None;
    }
    items.iter().map(ResultValue::as_number).collect()
}
