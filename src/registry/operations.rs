use super::definition::{FieldKind, FieldSpec, OperationSpec, PayloadShape, RenderHint};

/// Defines the built-in operation table.
///
/// Each row is one operation: its id, menu title, render hint, LaTeX helper flag,
/// payload shape and ordered fields. Adding an operation means adding one row.
macro_rules! define_operations {
    ( $( $id:literal, $title:literal, $hint:ident, latex: $latex:literal, $shape:expr => [ $( $field:expr ),* $(,)? ] );* $(;)? ) => {
        /// Returns the built-in operations in menu order.
        pub fn standard_operations() -> Vec<OperationSpec> {
            vec![
                $(
                    OperationSpec {
                        id: $id.to_string(),
                        title: $title.to_string(),
                        fields: vec![ $( $field ),* ],
                        shape: $shape,
                        render_hint: RenderHint::$hint,
                        has_latex_helpers: $latex,
                    },
                )*
            ]
        }

        /// Ids of the built-in operations, in menu order.
        pub const STANDARD_OPERATION_IDS: &[&str] = &[ $( $id ),* ];
    };
}

fn expression(placeholder: &str) -> FieldSpec {
    FieldSpec::new("expression", "Function", placeholder, FieldKind::Expression)
}

fn variables(placeholder: &str) -> FieldSpec {
    FieldSpec::new("variables", "Variables", placeholder, FieldKind::Variables)
}

fn vector_field(placeholder: &str) -> FieldSpec {
    FieldSpec::new("vector_field", "Vector field", placeholder, FieldKind::Components)
}

fn combined(id: &str, label: &str, placeholder: &str) -> FieldSpec {
    FieldSpec::new(id, label, placeholder, FieldKind::Text)
}

define_operations! {
    "partial_derivative", "Partial derivative", Scalar, latex: true, PayloadShape::Generic => [
        expression("e.g. 2xy + sin(t)"),
        variables("e.g. x t"),
        FieldSpec::new("order", "Order", "1", FieldKind::Integer).never_blank(),
    ];
    "gradient", "Gradient", Vector, latex: true, PayloadShape::Generic => [
        expression("e.g. x^2 y + z"),
        variables("e.g. x y z"),
    ];
    "divergence", "Divergence", Vector, latex: false, PayloadShape::Generic => [
        vector_field("e.g. x*y, y*z, z*x"),
        variables("e.g. x y z"),
    ];
    "curl", "Curl", Vector, latex: false, PayloadShape::Generic => [
        vector_field("e.g. y, -x, z"),
        variables("e.g. x y z"),
    ];
    "greens_theorem", "Green's theorem", Scalar, latex: false, PayloadShape::Generic => [
        vector_field("e.g. -y, x"),
        variables("e.g. x y"),
    ];
    "multiple_integral", "Multiple integral", Scalar, latex: true,
        PayloadShape::Intervals { source: "limits".into() } => [
        expression("e.g. x y"),
        combined("limits", "Bounds", "e.g. x in [0,1], y in [0,2]"),
    ];
    "directional_derivative", "Directional derivative", Scalar, latex: true,
        PayloadShape::Direction { source: "direction".into() } => [
        expression("e.g. x^2 + y^2"),
        variables("e.g. x y"),
        combined("direction", "Direction vector", "e.g. 1, 1"),
    ];
    "line_integral", "Line integral", Scalar, latex: false,
        PayloadShape::Curve { source: "path".into() } => [
        vector_field("e.g. y, x, z"),
        combined("path", "Path", "Param: t; Curve: t, t^2, t^3"),
    ];
    "surface_integral", "Surface integral", Scalar, latex: false,
        PayloadShape::Surface { source: "surface".into() } => [
        vector_field("e.g. x, y, z"),
        combined("surface", "Surface", "Params: u, v; Surface: u, v, u*v; Bounds: u in [0,1], v in [0,2]"),
    ];
    "stokes_theorem", "Stokes' theorem", Scalar, latex: false,
        PayloadShape::Surface { source: "surface".into() } => [
        vector_field("e.g. -y, x, 0"),
        combined("surface", "Surface", "Params: u, v; Surface: u, v, 0; Bounds: u in [0,1], v in [0,1]"),
    ];
    "lagrange_multipliers", "Lagrange multipliers", MultiSolution, latex: true,
        PayloadShape::Constraint { source: "constraint".into() } => [
        expression("f(x,y)"),
        FieldSpec::new("constraint", "Constraint", "Constraint: g(x,y)", FieldKind::Expression),
        variables("x y"),
    ];
}
