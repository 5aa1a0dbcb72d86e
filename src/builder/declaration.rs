//! State for builders that build one declaration at a time without a
//! property sub-state: shared simple types, domains and interchanges.

use smol_str::SmolStr;

use super::commit::commit_entity;
use super::extract;
use super::state::Ongoing;
use crate::diagnostics::ValidationFailure;
use crate::model::{EntityKind, MetaEdEnvironment, TopLevelEntity};
use crate::syntax::ParseNode;

pub(crate) struct DeclarationState<'a> {
    pub(crate) environment: &'a mut MetaEdEnvironment,
    pub(crate) failures: &'a mut Vec<ValidationFailure>,
    validator: &'static str,
    current_namespace: Option<SmolStr>,
    pub(crate) entity: Ongoing<TopLevelEntity>,
}

impl<'a> DeclarationState<'a> {
    pub(crate) fn new(
        environment: &'a mut MetaEdEnvironment,
        failures: &'a mut Vec<ValidationFailure>,
        validator: &'static str,
    ) -> Self {
        Self {
            environment,
            failures,
            validator,
            current_namespace: None,
            entity: Ongoing::Idle,
        }
    }

    pub(crate) fn current_namespace_name(&self) -> SmolStr {
        self.current_namespace.clone().unwrap_or_default()
    }

    pub(crate) fn entering_namespace_name(&mut self, node: &ParseNode) {
        self.current_namespace =
            extract::id_text(node).filter(|name| self.environment.namespace.contains_key(name));
    }

    pub(crate) fn entering_entity(&mut self, kind: EntityKind, node: &ParseNode) {
        let namespace = self.current_namespace_name();
        self.entity.open(TopLevelEntity::new(kind, namespace, node.source_location()));
    }

    pub(crate) fn entering_name(&mut self, node: &ParseNode) {
        let Some(entity) = self.entity.as_open_mut() else {
            return;
        };
        if let Some(name) = extract::id_text(node) {
            entity.name = name;
            entity.name_location = node.source_location();
        }
    }

    pub(crate) fn entering_documentation(&mut self, node: &ParseNode) {
        if let Some(entity) = self.entity.as_open_mut() {
            entity.documentation = extract::documentation(node);
        }
    }

    pub(crate) fn entering_deprecated(&mut self, node: &ParseNode) {
        if node.exception {
            return;
        }
        if let Some(entity) = self.entity.as_open_mut() {
            entity.is_deprecated = true;
            entity.deprecation_reason = extract::deprecation_reason(node);
        }
    }

    pub(crate) fn entering_metaed_id(&mut self, node: &ParseNode) {
        let Some(entity) = self.entity.as_open_mut() else {
            return;
        };
        if let Some(id) = extract::metaed_id(node) {
            entity.metaed_id = id;
        }
    }

    /// Close the open declaration, committing it when it has a name.
    pub(crate) fn exiting_entity(&mut self, describe: impl Fn(&TopLevelEntity) -> String) {
        let Some(entity) = self.entity.take() else {
            return;
        };
        if entity.name.is_empty() {
            return;
        }
        commit_entity(self.environment, self.failures, self.validator, entity, describe);
    }
}
