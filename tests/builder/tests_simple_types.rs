//! String, integer and decimal types through the full pipeline.

use crate::helpers::model_assertions::*;
use crate::helpers::model_fixtures::*;
use metaed::syntax::Production;
use metaed::{EntityKind, TreeBuilder};

#[test]
fn test_sample_shared_declarations_have_simple_types() {
    let environment = &SAMPLE_MODEL.environment;

    let name = get_entity(environment, "EdFi", EntityKind::StringType, "Name");
    assert!(!name.is_generated_simple_type());
    assert_eq!(name.documentation, "A person's name.");
    assert_eq!(name.restrictions().and_then(|r| r.max_length.as_deref()), Some("75"));

    let amount = get_entity(environment, "EdFi", EntityKind::DecimalType, "Amount");
    assert_eq!(amount.restrictions().and_then(|r| r.decimal_places.as_deref()), Some("2"));

    let rank = get_entity(environment, "EdFi", EntityKind::IntegerType, "Rank");
    assert!(rank.is_short());
    assert_eq!(rank.type_humanized_name(), "Integer Type");
}

#[test]
fn test_sample_restricted_property_has_generated_type() {
    let environment = &SAMPLE_MODEL.environment;

    let unique_id = get_entity(environment, "EdFi", EntityKind::StringType, "StudentUniqueId");
    assert!(unique_id.is_generated_simple_type());
    assert_eq!(unique_id.documentation, "Identifier.");
    assert_eq!(unique_id.restrictions().and_then(|r| r.max_length.as_deref()), Some("32"));

    assert_entity_absent(environment, "EdFi", EntityKind::StringType, "City");
    assert_entity_absent(environment, "EdFi", EntityKind::IntegerType, "SchoolId");
    assert_entity_absent(environment, "Sample", EntityKind::StringType, "BusId");
}

#[test]
fn test_simple_types_never_raise_failures() {
    let root = in_core(|tree| {
        tree.start_shared_string("Code")
            .with_max_length("20")
            .end_entity()
            .start_domain_entity("Program")
            .start_property(Production::StringProperty, "Code")
            .with_documentation("Program code.")
            .with_max_length("10")
            .end_property()
            .end_entity()
            .start_domain_entity("Course")
            .start_property(Production::StringProperty, "Code")
            .with_documentation("Course code.")
            .with_max_length("12")
            .end_property()
            .end_entity()
    });
    let model = build(&root);

    assert!(model.failures.is_empty(), "unexpected failures: {:?}", messages(&model.failures));
    let code = get_entity(&model.environment, "EdFi", EntityKind::StringType, "Code");
    assert!(!code.is_generated_simple_type());
    assert_eq!(code.restrictions().and_then(|r| r.max_length.as_deref()), Some("20"));
    assert_eq!(get_namespace(&model.environment, "EdFi").entity.count(EntityKind::StringType), 1);
}

#[test]
fn test_simple_types_are_scoped_to_their_namespace() {
    let root = TreeBuilder::new()
        .begin_namespace("EdFi", None)
        .start_shared_decimal("Amount")
        .with_total_digits("9")
        .with_decimal_places("2")
        .end_entity()
        .end_namespace()
        .begin_namespace("Sample", Some("SAMPLE"))
        .start_domain_entity("Bus")
        .start_property(Production::ShortProperty, "Capacity")
        .with_documentation("Seats.")
        .with_max_value("90")
        .end_property()
        .end_entity()
        .end_namespace()
        .build();
    let model = build(&root);

    assert!(model.failures.is_empty());
    get_entity(&model.environment, "EdFi", EntityKind::DecimalType, "Amount");
    assert_entity_absent(&model.environment, "Sample", EntityKind::DecimalType, "Amount");

    let capacity = get_entity(&model.environment, "Sample", EntityKind::IntegerType, "Capacity");
    assert!(capacity.is_short());
    assert!(capacity.is_generated_simple_type());
    assert_entity_absent(&model.environment, "EdFi", EntityKind::IntegerType, "Capacity");
}
