/// How a field's raw text is normalized when no payload-shape rule consumes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A single math expression, possibly typed as LaTeX.
    Expression,
    /// Variable names separated by whitespace and/or commas.
    Variables,
    /// Comma-separated expression components, e.g. a vector field.
    Components,
    /// A non-negative integer.
    Integer,
    /// Free text, trimmed only. Used for combined fields read by a shape rule.
    Text,
}

/// Declares one labeled input slot of an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub id: String,
    pub label: String,
    pub placeholder: String,
    pub kind: FieldKind,
    /// The placeholder doubles as a legitimate explicit value (e.g. a default order).
    /// Such a field is never reported missing and restores a stored value even
    /// when it equals the placeholder text.
    pub never_blank: bool,
}

impl FieldSpec {
    pub fn new(id: &str, label: &str, placeholder: &str, kind: FieldKind) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            placeholder: placeholder.to_string(),
            kind,
            never_blank: false,
        }
    }

    pub fn never_blank(mut self) -> Self {
        self.never_blank = true;
        self
    }
}

/// The payload family an operation belongs to.
///
/// Every variant except `Generic` names the combined field it consumes. All other
/// fields of the operation are copied under their own id after kind normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadShape {
    /// `{operation, ...values}`.
    Generic,
    /// An interval list (`x in [0,1], y in [0,2]`) parsed into `limits`.
    Intervals { source: String },
    /// A numeric vector parsed into `direction`.
    Direction { source: String },
    /// `<param>; <curve components>` split into `param` and `curve`.
    Curve { source: String },
    /// `<params>; <surface>; <optional bounds>` split into `params`, `surface` and `bounds`.
    Surface { source: String },
    /// A secondary expression placed under `constraint`.
    Constraint { source: String },
}

impl PayloadShape {
    /// The field this shape reads, if any.
    pub fn source(&self) -> Option<&str> {
        match self {
            PayloadShape::Generic => None,
            PayloadShape::Intervals { source }
            | PayloadShape::Direction { source }
            | PayloadShape::Curve { source }
            | PayloadShape::Surface { source }
            | PayloadShape::Constraint { source } => Some(source),
        }
    }

    /// Payload keys this shape always produces.
    pub fn produced_keys(&self) -> &'static [&'static str] {
        match self {
            PayloadShape::Generic => &[],
            PayloadShape::Intervals { .. } => &["limits"],
            PayloadShape::Direction { .. } => &["direction"],
            PayloadShape::Curve { .. } => &["param", "curve"],
            PayloadShape::Surface { .. } => &["params", "surface"],
            PayloadShape::Constraint { .. } => &["constraint"],
        }
    }

    /// Payload keys this shape produces only when the input carries them.
    pub fn optional_keys(&self) -> &'static [&'static str] {
        match self {
            PayloadShape::Surface { .. } => &["bounds"],
            _ => &[],
        }
    }
}

/// How the renderer should present a list result for this operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderHint {
    Scalar,
    /// Short numeric lists are shown as an angle-bracket tuple.
    Vector,
    /// Each list element is a separate solution.
    MultiSolution,
}

/// Everything the form engine, request builder and renderer need to know about one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationSpec {
    pub id: String,
    pub title: String,
    pub fields: Vec<FieldSpec>,
    pub shape: PayloadShape,
    pub render_hint: RenderHint,
    pub has_latex_helpers: bool,
}

impl OperationSpec {
    pub fn field(&self, field_id: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.id == field_id)
    }

    /// The exact key set of a payload built from fully valid input, `operation` included.
    pub fn payload_keys(&self) -> Vec<String> {
        let source = self.shape.source();
        let mut keys = vec!["operation".to_string()];
        keys.extend(
            self.fields
                .iter()
                .filter(|f| Some(f.id.as_str()) != source)
                .map(|f| f.id.clone()),
        );
        keys.extend(
            self.shape
                .produced_keys()
                .iter()
                .chain(self.shape.optional_keys())
                .map(|k| k.to_string()),
        );
        keys
    }
}
