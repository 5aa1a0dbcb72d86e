//! Orchestration: builder order, root checks and failure accumulation.

use crate::helpers::model_assertions::*;
use crate::helpers::model_fixtures::*;
use metaed::syntax::{Production, TokenKind};
use metaed::{
    BuildError, BuildOptions, BuilderKind, EntityKind, MetaEdEnvironment, TreeBuilder, build_metaed,
    build_metaed_into,
};

fn quiet() -> BuildOptions {
    BuildOptions::default().with_yield_between_builders(false)
}

#[test]
fn test_namespace_builder_walks_first() {
    assert_eq!(BuilderKind::ORDER[0], BuilderKind::Namespace);
    assert_eq!(BuilderKind::ORDER[0].as_str(), "NamespaceBuilder");
    assert_eq!(BuilderKind::ORDER.len(), 19);
}

#[test]
fn test_empty_document_builds_nothing() {
    let mut environment = MetaEdEnvironment::new();
    let failures =
        build_metaed(&TreeBuilder::new().build(), &mut environment, &quiet()).expect("empty root");

    assert!(failures.is_empty());
    assert!(environment.namespace.is_empty());
    assert!(environment.property_index.is_empty());
}

#[test]
fn test_non_root_tree_is_rejected() {
    let root = sample_document();
    let namespace = root.child(Production::Namespace).expect("first namespace");
    let mut environment = MetaEdEnvironment::new();

    let error =
        build_metaed(namespace, &mut environment, &quiet()).expect_err("namespace is not a root");
    assert_eq!(error, BuildError::UnexpectedRoot { found: Production::Namespace });
    assert_eq!(error.to_string(), "expected a metaEd root production, found Namespace");
    assert!(environment.namespace.is_empty());
}

#[test]
fn test_yielding_does_not_change_the_model() {
    let root = sample_document();
    let yielding = build_with(&root, &BuildOptions::default());

    assert_eq!(yielding.environment, SAMPLE_MODEL.environment);
    assert_eq!(yielding.failures, SAMPLE_MODEL.failures);
}

#[test]
fn test_single_builder_runs_only_its_partition() {
    let root = sample_document();
    let mut environment = MetaEdEnvironment::new();
    let mut failures = Vec::new();
    let options = quiet();

    BuilderKind::Namespace.run(&root, &mut environment, &mut failures, &options);
    BuilderKind::Choice.run(&root, &mut environment, &mut failures, &options);

    assert!(failures.is_empty());
    let core = get_namespace(&environment, "EdFi");
    assert_eq!(core.entity.len(), 1);
    get_entity(&environment, "EdFi", EntityKind::Choice, "Medium");
    assert!(get_namespace(&environment, "Sample").entity.is_empty());
}

#[test]
fn test_documents_accumulate_into_one_environment() {
    let core = TreeBuilder::new()
        .begin_namespace("EdFi", None)
        .start_domain_entity("Student")
        .with_property(Production::StringProperty, "StudentUniqueId", "Identifier.")
        .end_entity()
        .end_namespace()
        .build();
    let extension = TreeBuilder::new()
        .begin_namespace("Sample", Some("SAMPLE"))
        .start_domain_entity_extension("EdFi.Student")
        .with_property(Production::BooleanProperty, "IsHomeless", "Homeless status.")
        .end_entity()
        .start_domain("Transportation")
        .with_domain_item(TokenKind::DomainEntityKeyword, "EdFi.Student")
        .end_entity()
        .end_namespace()
        .build();

    let mut environment = MetaEdEnvironment::new();
    let mut failures = Vec::new();
    build_metaed_into(&core, &mut environment, &mut failures, &quiet()).expect("core document");
    build_metaed_into(&extension, &mut environment, &mut failures, &quiet())
        .expect("extension document");

    assert!(failures.is_empty());
    let names: Vec<&str> = environment.namespace.keys().map(|name| name.as_str()).collect();
    assert_eq!(names, vec!["EdFi", "Sample"]);
    assert_eq!(environment.property_index.len(), 2);

    let transportation = get_entity(&environment, "Sample", EntityKind::Domain, "Transportation");
    assert_eq!(transportation.domain_items()[0].referenced_namespace_name, "EdFi");
}

#[test]
fn test_rebuilding_a_document_reports_every_entity_twice() {
    let root = in_core(|tree| {
        tree.start_domain_entity("Student")
            .end_entity()
            .start_shared_string("Name")
            .end_entity()
            .start_interchange("StudentEnrollment")
            .end_entity()
    });
    let mut environment = MetaEdEnvironment::new();
    let first = build_metaed(&root, &mut environment, &quiet()).expect("first build");
    let second = build_metaed(&root, &mut environment, &quiet()).expect("second build");

    assert!(first.is_empty());
    assert_eq!(
        messages(&second),
        vec![
            "Domain Entity named Student is a duplicate declaration of that name.",
            "Domain Entity named Student is a duplicate declaration of that name.",
            "Interchange named StudentEnrollment is a duplicate declaration of that name.",
            "Interchange named StudentEnrollment is a duplicate declaration of that name.",
            "Shared String named Name is a duplicate declaration of that name.",
            "Shared String named Name is a duplicate declaration of that name.",
        ]
    );
    let core = get_namespace(&environment, "EdFi");
    assert_eq!(core.entity.len(), 4);
    assert!(core.entity.contains(EntityKind::StringType, "Name"));
}
