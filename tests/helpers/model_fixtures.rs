//! Model fixtures: parse trees of realistic documents and their built
//! environments.

use metaed::syntax::{Production, TokenKind};
use metaed::{
    BuildOptions, MetaEdEnvironment, ParseNode, TreeBuilder, ValidationFailure, build_metaed,
};
use once_cell::sync::Lazy;

/// An environment together with the failures raised while building it.
pub struct BuiltModel {
    pub environment: MetaEdEnvironment,
    pub failures: Vec<ValidationFailure>,
}

/// The sample model is built once and shared by every test reading it.
pub static SAMPLE_MODEL: Lazy<BuiltModel> = Lazy::new(|| build(&sample_document()));

/// Build `root` with default options.
pub fn build(root: &ParseNode) -> BuiltModel {
    build_with(root, &BuildOptions::default().with_yield_between_builders(false))
}

pub fn build_with(root: &ParseNode, options: &BuildOptions) -> BuiltModel {
    let mut environment = MetaEdEnvironment::new();
    let failures = build_metaed(root, &mut environment, options).expect("document root is MetaEd");
    BuiltModel { environment, failures }
}

/// Wrap `body` in a core `EdFi` namespace block.
pub fn in_core(body: impl FnOnce(TreeBuilder) -> TreeBuilder) -> ParseNode {
    body(TreeBuilder::new().begin_namespace("EdFi", None)).end_namespace().build()
}

/// A core namespace covering every declaration kind, followed by an
/// extension namespace extending it.
pub fn sample_document() -> ParseNode {
    let tree = TreeBuilder::new().begin_namespace("EdFi", None);
    let tree = core_shared_types(tree);
    let tree = core_entities(tree);
    let tree = core_items(tree);
    let tree = tree.end_namespace().begin_namespace("Sample", Some("SAMPLE"));
    sample_extension(tree).end_namespace().build()
}

fn core_shared_types(tree: TreeBuilder) -> TreeBuilder {
    tree.start_shared_string("Name")
        .with_documentation("A person's name.")
        .with_min_length("1")
        .with_max_length("75")
        .end_entity()
        .start_shared_decimal("Amount")
        .with_documentation("A monetary amount.")
        .with_total_digits("9")
        .with_decimal_places("2")
        .end_entity()
        .start_shared_short("Rank")
        .with_documentation("A rank.")
        .with_min_value("1")
        .end_entity()
}

fn core_entities(tree: TreeBuilder) -> TreeBuilder {
    tree.start_domain_entity("Student")
        .with_documentation("A person enrolled in a school.")
        .with_metaed_id("1")
        .start_property(Production::StringProperty, "StudentUniqueId")
        .with_documentation("Identifier.")
        .with_identity()
        .with_max_length("32")
        .end_property()
        .start_property(Production::SharedStringProperty, "Name")
        .with_documentation("First name.")
        .with_role_name("First", None)
        .with_required()
        .end_property()
        .start_property(Production::CommonProperty, "Address")
        .with_documentation("Home address.")
        .with_role_name("Home", Some("Hm"))
        .with_optional_collection()
        .end_property()
        .with_property(Production::EnumerationProperty, "SchoolYear", "Graduation year.")
        .end_entity()
        .start_abstract_entity("EducationOrganization")
        .with_documentation("An organization.")
        .start_property(Production::IntegerProperty, "EducationOrganizationId")
        .with_documentation("Identifier.")
        .with_identity()
        .end_property()
        .end_entity()
        .start_domain_entity_subclass("School", "EducationOrganization")
        .with_documentation("A school.")
        .start_property(Production::IntegerProperty, "SchoolId")
        .with_documentation("Identifier.")
        .with_identity_rename("EducationOrganizationId")
        .end_property()
        .end_entity()
        .start_association("StudentSchoolAssociation")
        .with_documentation("Enrollment of a student.")
        .start_defining_domain_entity("Student")
        .with_documentation("The student.")
        .end_property()
        .start_defining_domain_entity("School")
        .with_documentation("The school.")
        .end_property()
        .start_property(Production::DateProperty, "EntryDate")
        .with_documentation("Entry date.")
        .with_identity()
        .end_property()
        .end_entity()
        .start_common("Address")
        .with_documentation("An address.")
        .with_property(Production::StringProperty, "City", "City.")
        .end_entity()
        .start_inline_common("Credential")
        .with_documentation("A credential.")
        .end_entity()
        .start_choice("Medium")
        .with_documentation("Delivery medium.")
        .end_entity()
        .start_descriptor("GradeLevel")
        .with_documentation("Grade levels.")
        .start_map_type(true)
        .with_documentation("Grade level map.")
        .with_enumeration_item("First grade")
        .with_enumeration_item("Second grade")
        .end_map_type()
        .end_entity()
        .start_enumeration("SchoolYear")
        .with_documentation("School years.")
        .with_enumeration_item("2024")
        .with_enumeration_item("2025")
        .end_entity()
        .start_enumeration("Sex")
        .with_documentation("Sex.")
        .with_enumeration_item("Female")
        .end_entity()
}

fn core_items(tree: TreeBuilder) -> TreeBuilder {
    tree.start_domain("Enrollment")
        .with_documentation("Enrollment domain.")
        .with_domain_item(TokenKind::DomainEntityKeyword, "Student")
        .with_domain_item(TokenKind::AssociationKeyword, "StudentSchoolAssociation")
        .end_entity()
        .start_subdomain("Attendance", "Enrollment")
        .with_documentation("Attendance subdomain.")
        .with_subdomain_position(1)
        .with_domain_item(TokenKind::DescriptorKeyword, "GradeLevel")
        .end_entity()
        .start_interchange("StudentEnrollment")
        .with_documentation("Enrollment interchange.")
        .with_interchange_element(TokenKind::DomainEntityKeyword, "Student")
        .with_interchange_identity(TokenKind::AssociationIdentity, "StudentSchoolAssociation")
        .end_entity()
}

fn sample_extension(tree: TreeBuilder) -> TreeBuilder {
    tree.start_domain_entity_extension("EdFi.Student")
        .with_property(Production::BooleanProperty, "IsHomeless", "Homeless status.")
        .end_entity()
        .start_domain_entity("Bus")
        .with_documentation("A school bus.")
        .start_property(Production::StringProperty, "BusId")
        .with_documentation("Identifier.")
        .with_identity()
        .end_property()
        .with_property(Production::DomainEntityProperty, "EdFi.School", "Home school.")
        .end_entity()
        .start_association_extension("EdFi.StudentSchoolAssociation")
        .with_property(Production::DomainEntityProperty, "Bus", "Assigned bus.")
        .end_entity()
        .start_common_extension("EdFi.Address")
        .with_property(Production::StringProperty, "Complex", "Housing complex.")
        .end_entity()
        .start_interchange_extension("EdFi.StudentEnrollment")
        .with_interchange_element(TokenKind::DomainEntityKeyword, "Bus")
        .end_entity()
}
