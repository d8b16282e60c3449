//! Tests for the operation registry.
use keisan::prelude::*;
use keisan::registry::STANDARD_OPERATION_IDS;

#[test]
fn test_standard_registry_lookup() {
    let registry = Registry::standard();
    assert_eq!(registry.len(), STANDARD_OPERATION_IDS.len());

    let gradient = registry.get("gradient").unwrap();
    assert_eq!(gradient.render_hint, RenderHint::Vector);
    assert!(gradient.has_latex_helpers);
    let field_ids: Vec<_> = gradient.fields.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(field_ids, vec!["expression", "variables"]);
}

#[test]
fn test_unknown_operation_is_not_found() {
    let registry = Registry::standard();
    match registry.get("laplacian") {
        Err(RegistryError::NotFound(id)) => assert_eq!(id, "laplacian"),
        other => panic!("Expected NotFound, got {:?}", other),
    }
}

#[test]
fn test_operations_listed_in_table_order() {
    let registry = Registry::standard();
    let ids: Vec<_> = registry.operations().map(|op| op.id.as_str()).collect();
    assert_eq!(ids, STANDARD_OPERATION_IDS);
}

#[test]
fn test_every_shape_reads_a_declared_field() {
    // The builder performs the same check; the standard table must pass it.
    let registry = Registry::builder().build().unwrap();
    for operation in registry.operations() {
        if let Some(source) = operation.shape.source() {
            assert!(operation.field(source).is_some(), "{}", operation.id);
        }
    }
}

#[test]
fn test_builder_rejects_duplicates() {
    let duplicate = Registry::standard().get("curl").unwrap().clone();
    let result = Registry::builder().with_operation(duplicate).build();
    assert!(matches!(result, Err(RegistryError::Duplicate(id)) if id == "curl"));
}

#[test]
fn test_builder_rejects_shape_without_field() {
    let broken = OperationSpec {
        id: "broken".to_string(),
        title: "Broken".to_string(),
        fields: vec![FieldSpec::new("expression", "Function", "f", FieldKind::Expression)],
        shape: PayloadShape::Direction {
            source: "direction".to_string(),
        },
        render_hint: RenderHint::Scalar,
        has_latex_helpers: false,
    };
    let result = RegistryBuilder::empty().with_operation(broken).build();
    assert!(matches!(
        result,
        Err(RegistryError::UndeclaredShapeField { ref field, .. }) if field == "direction"
    ));
}

#[test]
fn test_builder_accepts_custom_operation() {
    let laplacian = OperationSpec {
        id: "laplacian".to_string(),
        title: "Laplacian".to_string(),
        fields: vec![
            FieldSpec::new("expression", "Function", "e.g. x^2 + y^2", FieldKind::Expression),
            FieldSpec::new("variables", "Variables", "e.g. x y", FieldKind::Variables),
        ],
        shape: PayloadShape::Generic,
        render_hint: RenderHint::Scalar,
        has_latex_helpers: true,
    };
    let registry = Registry::builder().with_operation(laplacian).build().unwrap();
    assert!(registry.contains("laplacian"));
    assert!(registry.contains("gradient"));
}

#[test]
fn test_never_blank_field_has_default() {
    let registry = Registry::standard();
    let order = registry
        .get("partial_derivative")
        .unwrap()
        .field("order")
        .unwrap();
    assert!(order.never_blank);
    assert_eq!(order.placeholder, "1");
}
