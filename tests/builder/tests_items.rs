//! Domains, subdomains and interchanges with their item lists.

use crate::helpers::model_assertions::*;
use crate::helpers::model_fixtures::*;
use metaed::diagnostics::validators;
use metaed::model::{EntityDetail, ItemType};
use metaed::syntax::TokenKind;
use metaed::{EntityKind, TreeBuilder};

// =============================================================================
// DOMAINS
// =============================================================================

#[test]
fn test_sample_domain_and_subdomain() {
    let environment = &SAMPLE_MODEL.environment;

    let enrollment = get_entity(environment, "EdFi", EntityKind::Domain, "Enrollment");
    let items: Vec<(&str, ItemType)> = enrollment
        .domain_items()
        .iter()
        .map(|item| (item.name.as_str(), item.referenced_type))
        .collect();
    assert_eq!(
        items,
        vec![
            ("Student", ItemType::DomainEntity),
            ("StudentSchoolAssociation", ItemType::Association),
        ]
    );

    let attendance = get_entity(environment, "EdFi", EntityKind::Subdomain, "Attendance");
    assert!(matches!(
        &attendance.detail,
        EntityDetail::Domain { parent_name, position: Some(1), .. } if parent_name == "Enrollment"
    ));
    assert_eq!(attendance.domain_items()[0].referenced_type, ItemType::Descriptor);
    assert_eq!(attendance.domain_items()[0].referenced_namespace_name, "EdFi");
}

#[test]
fn test_malformed_domain_item_is_skipped() {
    let root = in_core(|tree| {
        tree.start_domain("Enrollment")
            .start_domain_item(TokenKind::DomainEntityKeyword, "Student")
            .mark_exception()
            .end_item()
            .with_domain_item(TokenKind::CommonKeyword, "Address")
            .end_entity()
    });
    let model = build(&root);

    assert!(model.failures.is_empty());
    let enrollment = get_entity(&model.environment, "EdFi", EntityKind::Domain, "Enrollment");
    let names: Vec<&str> =
        enrollment.domain_items().iter().map(|item| item.name.as_str()).collect();
    assert_eq!(names, vec!["Address"]);
}

#[test]
fn test_domain_and_subdomain_partitions_are_separate() {
    let root = in_core(|tree| {
        tree.start_domain("Assessment")
            .end_entity()
            .start_subdomain("Assessment", "Assessment")
            .end_entity()
            .start_domain("Assessment")
            .end_entity()
    });
    let model = build(&root);

    assert_duplicate_pair(
        &model.failures,
        validators::DOMAIN_BUILDER,
        "Domain named Assessment is a duplicate declaration of that name.",
    );
    get_entity(&model.environment, "EdFi", EntityKind::Subdomain, "Assessment");
}

// =============================================================================
// INTERCHANGES
// =============================================================================

#[test]
fn test_sample_interchange_and_extension() {
    let environment = &SAMPLE_MODEL.environment;

    let interchange = get_entity(environment, "EdFi", EntityKind::Interchange, "StudentEnrollment");
    assert_eq!(interchange.documentation, "Enrollment interchange.");
    assert_eq!(interchange.interchange_elements().len(), 1);
    assert_eq!(
        interchange.interchange_elements()[0].referenced_types,
        vec![ItemType::DomainEntity, ItemType::DomainEntitySubclass]
    );
    let templates = interchange.interchange_identity_templates();
    assert_eq!(templates.len(), 1);
    assert_eq!(templates[0].name, "StudentSchoolAssociation");

    let extension =
        get_entity(environment, "Sample", EntityKind::InterchangeExtension, "StudentEnrollment");
    assert_eq!(extension.base_entity_namespace_name, "EdFi");
    let element = &extension.interchange_elements()[0];
    assert_eq!(element.name, "Bus");
    assert_eq!(element.namespace, "Sample");
    assert_eq!(element.referenced_namespace_name, "Sample");
}

#[test]
fn test_interchange_and_extension_of_one_name_coexist() {
    let root = TreeBuilder::new()
        .begin_namespace("EdFi", None)
        .start_interchange("Staff")
        .with_interchange_element(TokenKind::DomainEntityKeyword, "Staff")
        .end_entity()
        .start_interchange_extension("Staff")
        .with_interchange_element(TokenKind::DescriptorKeyword, "StaffClassification")
        .end_entity()
        .end_namespace()
        .build();
    let model = build(&root);

    assert!(model.failures.is_empty());
    let namespace = get_namespace(&model.environment, "EdFi");
    assert_eq!(namespace.entity.count(EntityKind::Interchange), 1);
    assert_eq!(namespace.entity.count(EntityKind::InterchangeExtension), 1);
}

#[test]
fn test_duplicate_interchange_is_reported_by_interchange_builder() {
    let root = in_core(|tree| {
        tree.start_interchange("Staff")
            .with_documentation("First.")
            .end_entity()
            .start_interchange("Staff")
            .with_documentation("Second.")
            .end_entity()
    });
    let model = build(&root);

    assert_duplicate_pair(
        &model.failures,
        validators::INTERCHANGE_BUILDER,
        "Interchange named Staff is a duplicate declaration of that name.",
    );
    assert_eq!(
        get_entity(&model.environment, "EdFi", EntityKind::Interchange, "Staff").documentation,
        "First."
    );
}
