//! Assertion helpers over a built environment.

use metaed::{EntityKind, MetaEdEnvironment, Namespace, TopLevelEntity, ValidationFailure};

/// Assert a namespace is registered and return it.
pub fn get_namespace<'a>(environment: &'a MetaEdEnvironment, name: &str) -> &'a Namespace {
    environment
        .namespace(name)
        .unwrap_or_else(|| panic!("Expected namespace '{}' to be registered", name))
}

/// Assert an entity exists and return it for further assertions.
pub fn get_entity<'a>(
    environment: &'a MetaEdEnvironment,
    namespace: &str,
    kind: EntityKind,
    name: &str,
) -> &'a TopLevelEntity {
    get_namespace(environment, namespace)
        .entity
        .get(kind, name)
        .unwrap_or_else(|| panic!("Expected {} '{}.{}' to exist", kind, namespace, name))
}

/// Assert no entity of `kind` named `name` exists in `namespace`.
pub fn assert_entity_absent(
    environment: &MetaEdEnvironment,
    namespace: &str,
    kind: EntityKind,
    name: &str,
) {
    assert!(
        !get_namespace(environment, namespace).entity.contains(kind, name),
        "Expected {} '{}.{}' to be absent",
        kind,
        namespace,
        name
    );
}

/// Full property names of an entity's properties, in declaration order.
pub fn property_names(entity: &TopLevelEntity) -> Vec<&str> {
    entity
        .properties
        .iter()
        .map(|property| property.full_property_name.as_str())
        .collect()
}

pub fn messages(failures: &[ValidationFailure]) -> Vec<&str> {
    failures.iter().map(|failure| failure.message.as_str()).collect()
}

/// Assert `failures` is exactly one duplicate pair: the later declaration
/// first, the original second.
pub fn assert_duplicate_pair(failures: &[ValidationFailure], validator: &str, message: &str) {
    assert_eq!(
        failures.len(),
        2,
        "Expected exactly two failures, got {:?}",
        messages(failures)
    );
    for failure in failures {
        assert_eq!(failure.validator_name, validator);
        assert_eq!(failure.message, message);
    }
    assert!(
        failures[0].source_location.line > failures[1].source_location.line,
        "Expected the later declaration to be reported first"
    );
}
