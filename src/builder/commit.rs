//! Check-and-insert of finished entities.

use tracing::{debug, trace, warn};

use crate::diagnostics::ValidationFailure;
use crate::model::{EntityId, MetaEdEnvironment, TopLevelEntity};

/// Insert `entity` into its namespace unless the name is taken.
///
/// A duplicate raises two failures, one at each declaration, and the
/// existing entity stays. An entity whose namespace is not registered is
/// dropped. Returns the id of the committed entity.
pub(crate) fn commit_entity(
    environment: &mut MetaEdEnvironment,
    failures: &mut Vec<ValidationFailure>,
    validator: &str,
    entity: TopLevelEntity,
    describe: impl Fn(&TopLevelEntity) -> String,
) -> Option<EntityId> {
    let Some(namespace) = environment.namespace.get_mut(&entity.namespace) else {
        warn!(
            kind = %entity.kind,
            name = %entity.name,
            namespace = %entity.namespace,
            "entity declared outside a registered namespace; dropped"
        );
        return None;
    };

    if let Some(existing) = namespace.entity.get(entity.kind, &entity.name) {
        debug!(kind = %entity.kind, name = %entity.name, "duplicate entity rejected");
        failures.push(ValidationFailure::error(
            validator,
            format!("{} is a duplicate declaration of that name.", describe(&entity)),
            entity.name_location.clone(),
        ));
        failures.push(ValidationFailure::error(
            validator,
            format!("{} is a duplicate declaration of that name.", describe(existing)),
            existing.name_location.clone(),
        ));
        return None;
    }

    trace!(
        kind = %entity.kind,
        name = %entity.name,
        namespace = %entity.namespace,
        "entity committed"
    );
    let id = entity.id();
    namespace.entity.insert(entity);
    Some(id)
}

/// "`Domain Entity` named `Student`"
pub(crate) fn describe_by_type(entity: &TopLevelEntity) -> String {
    format!("{} named {}", entity.type_humanized_name(), entity.name)
}
