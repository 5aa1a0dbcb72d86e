//! Shared string, integer, short and decimal declarations.

use crate::helpers::model_assertions::*;
use crate::helpers::model_fixtures::*;
use metaed::diagnostics::validators;
use metaed::model::EntityDetail;
use metaed::{EntityKind, TreeBuilder};

#[test]
fn test_sample_shared_types() {
    let environment = &SAMPLE_MODEL.environment;

    let name = get_entity(environment, "EdFi", EntityKind::SharedString, "Name");
    assert_eq!(name.documentation, "A person's name.");
    let restrictions = name.restrictions().expect("shared string restrictions");
    assert_eq!(restrictions.min_length.as_deref(), Some("1"));
    assert_eq!(restrictions.max_length.as_deref(), Some("75"));

    let amount = get_entity(environment, "EdFi", EntityKind::SharedDecimal, "Amount");
    let restrictions = amount.restrictions().expect("shared decimal restrictions");
    assert_eq!(restrictions.total_digits.as_deref(), Some("9"));
    assert_eq!(restrictions.decimal_places.as_deref(), Some("2"));
    assert_eq!(restrictions.min_length, None);

    let rank = get_entity(environment, "EdFi", EntityKind::SharedInteger, "Rank");
    assert_eq!(rank.type_humanized_name(), "Shared Short");
    assert!(matches!(rank.detail, EntityDetail::SharedSimple { is_short: true, .. }));
    assert_eq!(rank.restrictions().and_then(|r| r.min_value.as_deref()), Some("1"));
}

#[test]
fn test_shared_types_carry_no_properties() {
    let environment = &SAMPLE_MODEL.environment;
    let core = get_namespace(environment, "EdFi");

    for kind in [EntityKind::SharedString, EntityKind::SharedDecimal, EntityKind::SharedInteger] {
        for entity in core.entity.of_kind(kind) {
            assert!(entity.properties.is_empty(), "{} should have no properties", entity.name);
        }
    }
}

#[test]
fn test_short_and_integer_share_a_partition() {
    let root = in_core(|tree| {
        tree.start_shared_integer("Count")
            .with_documentation("A count.")
            .end_entity()
            .start_shared_short("Count")
            .with_documentation("A short count.")
            .end_entity()
    });
    let model = build(&root);

    assert_eq!(
        messages(&model.failures),
        vec![
            "Shared Short named Count is a duplicate declaration of that name.",
            "Shared Integer named Count is a duplicate declaration of that name.",
        ]
    );
    assert!(
        model
            .failures
            .iter()
            .all(|failure| failure.validator_name == validators::SHARED_SIMPLE_BUILDER)
    );
    let count = get_entity(&model.environment, "EdFi", EntityKind::SharedInteger, "Count");
    assert_eq!(count.documentation, "A count.");
    assert!(matches!(count.detail, EntityDetail::SharedSimple { is_short: false, .. }));
}

#[test]
fn test_shared_types_in_two_namespaces() {
    let root = TreeBuilder::new()
        .begin_namespace("EdFi", None)
        .start_shared_string("Code")
        .with_max_length("50")
        .end_entity()
        .end_namespace()
        .begin_namespace("Sample", Some("SAMPLE"))
        .start_shared_string("Code")
        .with_max_length("10")
        .end_entity()
        .end_namespace()
        .build();
    let model = build(&root);

    assert!(model.failures.is_empty());
    for (namespace, max_length) in [("EdFi", "50"), ("Sample", "10")] {
        let code = get_entity(&model.environment, namespace, EntityKind::SharedString, "Code");
        assert_eq!(code.restrictions().and_then(|r| r.max_length.as_deref()), Some(max_length));
    }
}
