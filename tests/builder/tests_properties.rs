//! Property construction through the full pipeline.

use crate::helpers::model_assertions::*;
use crate::helpers::model_fixtures::*;
use metaed::diagnostics::validators;
use metaed::model::{Cardinality, EntityId};
use metaed::syntax::Production;
use metaed::{EntityKind, PropertyKind};
use rstest::rstest;

// =============================================================================
// SAMPLE MODEL
// =============================================================================

#[test]
fn test_student_properties_in_declaration_order() {
    let student =
        get_entity(&SAMPLE_MODEL.environment, "EdFi", EntityKind::DomainEntity, "Student");

    assert_eq!(
        property_names(student),
        vec!["StudentUniqueId", "FirstName", "HomeAddress", "SchoolYear"]
    );

    let first_name = student.property("FirstName").expect("role named shared string");
    assert_eq!(first_name.kind, PropertyKind::SharedString);
    assert_eq!(first_name.name, "Name");
    assert_eq!(first_name.referenced_type, "Name");
    assert_eq!(first_name.cardinality, Cardinality::Required);

    let home_address = student.property("HomeAddress").expect("role named common");
    assert_eq!(home_address.shorten_to, "Hm");
    assert_eq!(home_address.cardinality, Cardinality::OptionalCollection);

    assert_eq!(
        student.property("SchoolYear").map(|property| property.kind),
        Some(PropertyKind::SchoolYearEnumeration)
    );
}

#[test]
fn test_identity_properties_are_finished_copies() {
    let environment = &SAMPLE_MODEL.environment;

    let student = get_entity(environment, "EdFi", EntityKind::DomainEntity, "Student");
    assert_eq!(student.identity_properties.len(), 1);
    assert_eq!(Some(&student.identity_properties[0]), student.property("StudentUniqueId"));
    assert_eq!(
        student.identity_properties[0].restrictions.max_length.as_deref(),
        Some("32")
    );

    let association =
        get_entity(environment, "EdFi", EntityKind::Association, "StudentSchoolAssociation");
    let identity: Vec<&str> = association
        .identity_properties
        .iter()
        .map(|property| property.full_property_name.as_str())
        .collect();
    assert_eq!(identity, vec!["Student", "School", "EntryDate"]);
    assert!(
        association.identity_properties[..2]
            .iter()
            .all(|property| property.defines_association)
    );
    assert_eq!(association.identity_properties[1].documentation, "The school.");

    let school = get_entity(environment, "EdFi", EntityKind::DomainEntitySubclass, "School");
    let school_id = &school.identity_properties[0];
    assert!(school_id.is_identity_rename);
    assert_eq!(school_id.base_key_name, "EducationOrganizationId");
}

#[test]
fn test_property_index_spans_namespaces() {
    let environment = &SAMPLE_MODEL.environment;

    let booleans = environment.property_index.of_kind(PropertyKind::Boolean);
    assert_eq!(booleans.len(), 1);
    let is_homeless = &booleans[0];
    assert_eq!(is_homeless.namespace, "Sample");
    assert_eq!(
        is_homeless.parent_entity,
        Some(EntityId::new("Sample", EntityKind::DomainEntityExtension, "Student"))
    );
    let parent = environment.parent_of(is_homeless).expect("owner committed");
    assert_eq!(parent.base_entity_namespace_name, "EdFi");

    let references = environment.property_index.of_kind(PropertyKind::DomainEntity);
    let names: Vec<(&str, &str)> = references
        .iter()
        .map(|property| {
            (property.parent_entity_name.as_str(), property.full_property_name.as_str())
        })
        .collect();
    assert_eq!(
        names,
        vec![
            ("StudentSchoolAssociation", "Student"),
            ("StudentSchoolAssociation", "School"),
            ("StudentSchoolAssociation", "Bus"),
            ("Bus", "School"),
        ]
    );

    let total: usize = PropertyKind::ALL
        .iter()
        .map(|kind| environment.property_index.of_kind(*kind).len())
        .sum();
    assert_eq!(total, environment.property_index.len());
}

#[test]
fn test_qualified_reference_keeps_owner_namespace() {
    let bus = get_entity(&SAMPLE_MODEL.environment, "Sample", EntityKind::DomainEntity, "Bus");
    let school = bus.property("School").expect("school reference");

    assert_eq!(school.namespace, "Sample");
    assert_eq!(school.referenced_namespace_name, "EdFi");
    assert_eq!(
        bus.property("BusId").map(|property| property.referenced_namespace_name.as_str()),
        Some("Sample")
    );
}

// =============================================================================
// NAMING
// =============================================================================

#[rstest]
#[case("Primary", "PrimaryAddress")]
#[case("Address", "Address")]
fn test_role_name_prefixes_full_property_name(#[case] role_name: &str, #[case] expected: &str) {
    let root = in_core(|tree| {
        tree.start_domain_entity("Student")
            .start_property(Production::CommonProperty, "Address")
            .with_documentation("An address.")
            .with_role_name(role_name, None)
            .end_property()
            .end_entity()
    });
    let model = build(&root);

    let student = get_entity(&model.environment, "EdFi", EntityKind::DomainEntity, "Student");
    assert_eq!(property_names(student), vec![expected]);
    assert_eq!(student.properties[0].name, "Address");
}

#[test]
fn test_property_collision_reports_both_and_keeps_first() {
    let root = in_core(|tree| {
        tree.start_common("Contact")
            .with_property(Production::StringProperty, "Email", "Primary email.")
            .with_property(Production::DateProperty, "BirthDate", "Birth date.")
            .with_property(Production::StringProperty, "Email", "Duplicate email.")
            .end_entity()
    });
    let model = build(&root);

    assert_eq!(
        messages(&model.failures),
        vec![
            concat!(
                "Property named Email is a duplicate declaration of that name. ",
                "Use 'role name' keyword to avoid naming collisions.",
            ),
            concat!(
                "Property named Email is a duplicate declaration of that name.  ",
                "Use 'role name' keyword to avoid naming collisions.",
            ),
        ]
    );
    assert!(
        model
            .failures
            .iter()
            .all(|failure| failure.validator_name == validators::TOP_LEVEL_ENTITY_BUILDER)
    );

    let contact = get_entity(&model.environment, "EdFi", EntityKind::Common, "Contact");
    assert_eq!(property_names(contact), vec!["Email", "BirthDate"]);
    assert_eq!(contact.properties[0].documentation, "Primary email.");
    assert_eq!(model.environment.property_index.of_kind(PropertyKind::String).len(), 1);
}

#[test]
fn test_role_name_separates_otherwise_colliding_properties() {
    let root = in_core(|tree| {
        tree.start_domain_entity("Student")
            .with_property(Production::DescriptorProperty, "Language", "Native language.")
            .start_property(Production::DescriptorProperty, "Language")
            .with_documentation("Home language.")
            .with_role_name("Home", None)
            .end_property()
            .end_entity()
    });
    let model = build(&root);

    assert!(model.failures.is_empty());
    let student = get_entity(&model.environment, "EdFi", EntityKind::DomainEntity, "Student");
    assert_eq!(property_names(student), vec!["Language", "HomeLanguage"]);
}

// =============================================================================
// RESTRICTIONS
// =============================================================================

#[rstest]
#[case(Some("1"), Some("60"), true)]
#[case(None, None, false)]
fn test_string_restrictions(
    #[case] min: Option<&str>,
    #[case] max: Option<&str>,
    #[case] restricted: bool,
) {
    let root = in_core(|tree| {
        let mut tree = tree
            .start_common("Contact")
            .start_property(Production::StringProperty, "Email")
            .with_documentation("Email.");
        if let Some(min) = min {
            tree = tree.with_min_length(min);
        }
        if let Some(max) = max {
            tree = tree.with_max_length(max);
        }
        tree.end_property().end_entity()
    });
    let model = build(&root);

    let contact = get_entity(&model.environment, "EdFi", EntityKind::Common, "Contact");
    let email = &contact.properties[0];
    assert_eq!(email.has_restriction, restricted);
    assert_eq!(email.restrictions.is_empty(), !restricted);
    assert_eq!(email.restrictions.min_length.as_deref(), min);
    assert_eq!(email.restrictions.max_length.as_deref(), max);
}
