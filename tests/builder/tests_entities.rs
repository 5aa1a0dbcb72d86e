//! Top-level entity commit, duplicate reporting and kind-specific payloads.

use crate::helpers::model_assertions::*;
use crate::helpers::model_fixtures::*;
use metaed::diagnostics::validators;
use metaed::model::EntityDetail;
use metaed::{EntityKind, Severity, TreeBuilder};
use rstest::rstest;

// =============================================================================
// SAMPLE MODEL
// =============================================================================

#[test]
fn test_sample_model_builds_without_failures() {
    assert!(
        SAMPLE_MODEL.failures.is_empty(),
        "unexpected failures: {:?}",
        messages(&SAMPLE_MODEL.failures)
    );
}

#[rstest]
#[case("EdFi", EntityKind::SharedString, "Name")]
#[case("EdFi", EntityKind::SharedDecimal, "Amount")]
#[case("EdFi", EntityKind::SharedInteger, "Rank")]
#[case("EdFi", EntityKind::DomainEntity, "Student")]
#[case("EdFi", EntityKind::DomainEntity, "EducationOrganization")]
#[case("EdFi", EntityKind::DomainEntitySubclass, "School")]
#[case("EdFi", EntityKind::Association, "StudentSchoolAssociation")]
#[case("EdFi", EntityKind::Common, "Address")]
#[case("EdFi", EntityKind::Common, "Credential")]
#[case("EdFi", EntityKind::Choice, "Medium")]
#[case("EdFi", EntityKind::Descriptor, "GradeLevel")]
#[case("EdFi", EntityKind::MapTypeEnumeration, "GradeLevelMap")]
#[case("EdFi", EntityKind::SchoolYearEnumeration, "SchoolYear")]
#[case("EdFi", EntityKind::Enumeration, "Sex")]
#[case("EdFi", EntityKind::Domain, "Enrollment")]
#[case("EdFi", EntityKind::Subdomain, "Attendance")]
#[case("EdFi", EntityKind::Interchange, "StudentEnrollment")]
#[case("EdFi", EntityKind::StringType, "Name")]
#[case("EdFi", EntityKind::StringType, "StudentUniqueId")]
#[case("EdFi", EntityKind::DecimalType, "Amount")]
#[case("EdFi", EntityKind::IntegerType, "Rank")]
#[case("Sample", EntityKind::DomainEntityExtension, "Student")]
#[case("Sample", EntityKind::DomainEntity, "Bus")]
#[case("Sample", EntityKind::AssociationExtension, "StudentSchoolAssociation")]
#[case("Sample", EntityKind::CommonExtension, "Address")]
#[case("Sample", EntityKind::InterchangeExtension, "StudentEnrollment")]
fn test_sample_model_entity_is_committed(
    #[case] namespace: &str,
    #[case] kind: EntityKind,
    #[case] name: &str,
) {
    let entity = get_entity(&SAMPLE_MODEL.environment, namespace, kind, name);
    assert_eq!(entity.kind, kind);
    assert_eq!(entity.namespace, namespace);
    assert_eq!(entity.name, name);
}

#[test]
fn test_sample_model_partition_sizes() {
    let core = get_namespace(&SAMPLE_MODEL.environment, "EdFi");
    assert_eq!(core.entity.count(EntityKind::DomainEntity), 2);
    assert_eq!(core.entity.count(EntityKind::Common), 2);
    assert_eq!(core.entity.count(EntityKind::Enumeration), 1);
    assert_eq!(core.entity.count(EntityKind::StringType), 2);
    assert_eq!(core.entity.len(), 21);

    let sample = get_namespace(&SAMPLE_MODEL.environment, "Sample");
    assert_eq!(sample.entity.len(), 5);
}

#[test]
fn test_sample_model_extensions_point_at_core() {
    let environment = &SAMPLE_MODEL.environment;
    for kind in [
        EntityKind::DomainEntityExtension,
        EntityKind::AssociationExtension,
        EntityKind::CommonExtension,
        EntityKind::InterchangeExtension,
    ] {
        for extension in get_namespace(environment, "Sample").entity.of_kind(kind) {
            assert_eq!(extension.base_entity_name, extension.name);
            assert_eq!(extension.base_entity_namespace_name, "EdFi");
        }
    }

    let school = get_entity(environment, "EdFi", EntityKind::DomainEntitySubclass, "School");
    assert_eq!(school.base_entity_name, "EducationOrganization");
    assert_eq!(school.base_entity_namespace_name, "EdFi");
}

#[test]
fn test_sample_model_kind_payloads() {
    let environment = &SAMPLE_MODEL.environment;

    let organization =
        get_entity(environment, "EdFi", EntityKind::DomainEntity, "EducationOrganization");
    assert!(organization.is_abstract());
    assert_eq!(organization.type_humanized_name(), "Abstract Entity");
    assert!(!get_entity(environment, "EdFi", EntityKind::DomainEntity, "Student").is_abstract());

    assert!(get_entity(environment, "EdFi", EntityKind::Common, "Credential").inline_in_ods());
    assert!(!get_entity(environment, "EdFi", EntityKind::Common, "Address").inline_in_ods());

    let grade_level = get_entity(environment, "EdFi", EntityKind::Descriptor, "GradeLevel");
    let map_type = get_entity(environment, "EdFi", EntityKind::MapTypeEnumeration, "GradeLevelMap");
    assert_eq!(
        grade_level.detail,
        EntityDetail::Descriptor {
            is_map_type_required: true,
            is_map_type_optional: false,
            map_type_enumeration: Some(map_type.id()),
        }
    );
    let items: Vec<&str> = map_type
        .enumeration_items()
        .iter()
        .map(|item| item.short_description.as_str())
        .collect();
    assert_eq!(items, vec!["First grade", "Second grade"]);
    assert_eq!(environment.entity(&map_type.id()).map(|entity| &entity.name), Some(&map_type.name));
}

// =============================================================================
// DUPLICATES
// =============================================================================

#[test]
fn test_duplicate_entity_keeps_first() {
    let root = in_core(|tree| {
        tree.start_domain_entity("Foo")
            .with_documentation("First.")
            .end_entity()
            .start_domain_entity("Foo")
            .with_documentation("Second.")
            .end_entity()
    });
    let model = build(&root);

    assert_duplicate_pair(
        &model.failures,
        validators::TOP_LEVEL_ENTITY_BUILDER,
        "Domain Entity named Foo is a duplicate declaration of that name.",
    );
    assert!(model.failures.iter().all(|failure| failure.category == Severity::Error));
    assert_eq!(get_namespace(&model.environment, "EdFi").entity.count(EntityKind::DomainEntity), 1);
    let foo = get_entity(&model.environment, "EdFi", EntityKind::DomainEntity, "Foo");
    assert_eq!(foo.documentation, "First.");
}

#[rstest]
#[case::association(
    |tree: TreeBuilder| tree.start_association("Enrollment").end_entity(),
    "Association named Enrollment is a duplicate declaration of that name."
)]
#[case::choice(
    |tree: TreeBuilder| tree.start_choice("Enrollment").end_entity(),
    "Choice named Enrollment is a duplicate declaration of that name."
)]
#[case::descriptor(
    |tree: TreeBuilder| tree.start_descriptor("Enrollment").end_entity(),
    "Descriptor named Enrollment is a duplicate declaration of that name."
)]
#[case::enumeration(
    |tree: TreeBuilder| tree.start_enumeration("Enrollment").end_entity(),
    "Enumeration named Enrollment is a duplicate declaration of that name."
)]
#[case::common(
    |tree: TreeBuilder| tree.start_common("Enrollment").end_entity(),
    "Common named Enrollment is a duplicate declaration of that name."
)]
fn test_duplicate_message_names_the_kind(
    #[case] declare: fn(TreeBuilder) -> TreeBuilder,
    #[case] expected: &str,
) {
    let model = build(&in_core(|tree| declare(declare(tree))));

    assert_eq!(messages(&model.failures), vec![expected, expected]);
}

#[test]
fn test_same_name_in_different_kinds_is_not_a_duplicate() {
    let root = in_core(|tree| {
        tree.start_domain_entity("Program")
            .end_entity()
            .start_descriptor("Program")
            .end_entity()
            .start_common("Program")
            .end_entity()
    });
    let model = build(&root);

    assert!(model.failures.is_empty());
    assert_eq!(get_namespace(&model.environment, "EdFi").entity.len(), 3);
}

#[test]
fn test_failures_follow_builder_order() {
    let root = in_core(|tree| {
        tree.start_domain_entity("Student")
            .end_entity()
            .start_domain_entity("Student")
            .end_entity()
            .start_association("Enrollment")
            .end_entity()
            .start_association("Enrollment")
            .end_entity()
    });
    let model = build(&root);

    assert_eq!(
        messages(&model.failures),
        vec![
            "Association named Enrollment is a duplicate declaration of that name.",
            "Association named Enrollment is a duplicate declaration of that name.",
            "Domain Entity named Student is a duplicate declaration of that name.",
            "Domain Entity named Student is a duplicate declaration of that name.",
        ]
    );
}

// =============================================================================
// SCHOOL YEAR
// =============================================================================

#[test]
fn test_school_year_enumeration_has_its_own_partition() {
    let environment = &SAMPLE_MODEL.environment;

    assert_entity_absent(environment, "EdFi", EntityKind::Enumeration, "SchoolYear");
    let school_year =
        get_entity(environment, "EdFi", EntityKind::SchoolYearEnumeration, "SchoolYear");
    assert_eq!(school_year.kind.as_str(), "schoolYearEnumeration");
    assert_eq!(school_year.enumeration_items().len(), 2);
}
