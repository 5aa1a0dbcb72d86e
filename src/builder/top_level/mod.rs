//! The shared state machine behind every property-owning entity builder.
//!
//! ```text
//!   enter <Entity>          exit <Entity>
//! Idle ───────────▶ Open(entity) ───────────▶ Idle   (commit or reject)
//!                     │    ▲
//!       enter <kind>  ▼    │ exit Property
//!                 Open(property) ── pending: [MarkIdentity, MarkQueryable]
//!                     │    ▲
//!  enter MergeDirective ▼  │ exit MergeDirective
//!                 Open(merge directive)
//! ```
//!
//! [`EntityState`] owns the protocol. An [`EntityKindHandler`] supplies what
//! differs per entity kind (which productions open and close an entity,
//! where its name comes from, kind-specific fields) and sees every node
//! before the shared protocol does.

mod handlers;
mod property;


use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::commit::{commit_entity, describe_by_type};
use super::extract;
use super::state::{Ongoing, PendingAction};
use crate::base::SourceLocation;
use crate::diagnostics::{ValidationFailure, validators};
use crate::error::BuildError;
use crate::model::{EntityKind, EntityProperty, MergeDirective, MetaEdEnvironment, TopLevelEntity};
use crate::syntax::{MetaEdListener, ParseNode, Production};

pub use handlers::{
    AssociationExtensionHandler, AssociationHandler, AssociationSubclassHandler, ChoiceHandler,
    CommonExtensionHandler, CommonHandler, CommonSubclassHandler, DescriptorHandler,
    DomainEntityExtensionHandler, DomainEntityHandler, DomainEntitySubclassHandler,
    EnumerationHandler,
};

/// Whether a handler consumed a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dispatch {
    Handled,
    Unhandled,
}

/// Kind-specific part of a top level entity builder.
///
/// Both methods see each node first; returning [`Dispatch::Unhandled`]
/// passes it on to the shared protocol.
pub trait EntityKindHandler {
    fn enter(&mut self, state: &mut EntityState<'_>, node: &ParseNode) -> Dispatch;

    fn exit(&mut self, _state: &mut EntityState<'_>, _node: &ParseNode) -> Dispatch {
        Dispatch::Unhandled
    }
}

/// State shared by every top level entity builder.
pub struct EntityState<'a> {
    pub(crate) environment: &'a mut MetaEdEnvironment,
    pub(crate) failures: &'a mut Vec<ValidationFailure>,
    pub(crate) current_namespace: Option<SmolStr>,
    pub(crate) entity: Ongoing<TopLevelEntity>,
    pub(crate) property: Ongoing<EntityProperty>,
    pub(crate) merge_directive: Ongoing<MergeDirective>,
    pub(crate) pending: Vec<PendingAction>,
    /// Full property names of the open entity and where each was declared.
    pub(crate) property_lookup: FxHashMap<SmolStr, (SmolStr, SourceLocation)>,
}

impl<'a> EntityState<'a> {
    pub fn new(
        environment: &'a mut MetaEdEnvironment,
        failures: &'a mut Vec<ValidationFailure>,
    ) -> Self {
        Self {
            environment,
            failures,
            current_namespace: None,
            entity: Ongoing::Idle,
            property: Ongoing::Idle,
            merge_directive: Ongoing::Idle,
            pending: Vec::new(),
            property_lookup: FxHashMap::default(),
        }
    }

    pub fn current_entity(&self) -> Result<&TopLevelEntity, BuildError> {
        self.entity.require(BuildError::no_entity("current_entity"))
    }

    pub fn current_property(&self) -> Result<&EntityProperty, BuildError> {
        self.property.require(BuildError::no_property("current_property"))
    }

    /// Name of the namespace being walked, empty when none resolved.
    pub(crate) fn current_namespace_name(&self) -> SmolStr {
        self.current_namespace.clone().unwrap_or_default()
    }

    // =========================================================================
    // ENTITY PROTOCOL
    // =========================================================================

    fn entering_namespace_name(&mut self, node: &ParseNode) {
        self.current_namespace =
            extract::id_text(node).filter(|name| self.environment.namespace.contains_key(name));
    }

    /// Open a new entity of `kind` in the current namespace.
    pub fn entering_entity(&mut self, kind: EntityKind, node: &ParseNode) {
        let namespace = self.current_namespace_name();
        self.entity.open(TopLevelEntity::new(kind, namespace, node.source_location()));
        self.property_lookup.clear();
    }

    /// Name the open entity from the `ID` of a name production.
    pub fn entering_name(&mut self, node: &ParseNode) {
        let Some(entity) = self.entity.as_open_mut() else {
            return;
        };
        let Some(name) = extract::id_text(node) else {
            return;
        };
        entity.name = name;
        entity.name_location = node.source_location();
    }

    /// Close the open entity, committing it when it has a name.
    pub fn exiting_entity(&mut self) {
        let Some(entity) = self.entity.take() else {
            return;
        };
        if entity.name.is_empty() {
            return;
        }
        commit_entity(
            self.environment,
            self.failures,
            validators::TOP_LEVEL_ENTITY_BUILDER,
            entity,
            describe_by_type,
        );
    }

    /// `extendeeName`: the extension takes the extendee's name, which is
    /// also its deferred base reference.
    fn entering_extendee_name(&mut self, node: &ParseNode) {
        if node.exception {
            return;
        }
        let Some(local) = node.valid_child(Production::LocalExtendeeName) else {
            return;
        };
        let Some(extendee) = extract::id_text(local) else {
            return;
        };
        let namespace = extract::child_id_text(node, Production::ExtendeeNamespace)
            .unwrap_or_else(|| self.current_namespace_name());
        let Some(entity) = self.entity.as_open_mut() else {
            return;
        };
        entity.name = extendee.clone();
        entity.name_location = node.source_location();
        entity.base_entity_name = extendee;
        entity.base_entity_namespace_name = namespace;
    }

    /// `baseName` of a subclass: deferred base reference.
    fn entering_base_name(&mut self, node: &ParseNode) {
        if node.exception {
            return;
        }
        let Some(base) = extract::child_id_text(node, Production::LocalBaseName) else {
            return;
        };
        let namespace = extract::child_id_text(node, Production::BaseNamespace)
            .unwrap_or_else(|| self.current_namespace_name());
        let Some(entity) = self.entity.as_open_mut() else {
            return;
        };
        entity.base_entity_name = base;
        entity.base_entity_namespace_name = namespace;
    }

    fn entering_documentation(&mut self, node: &ParseNode) {
        if let Some(entity) = self.entity.as_open_mut() {
            entity.documentation = extract::documentation(node);
        }
    }

    fn entering_deprecated(&mut self, node: &ParseNode) {
        if node.exception {
            return;
        }
        if let Some(entity) = self.entity.as_open_mut() {
            entity.is_deprecated = true;
            entity.deprecation_reason = extract::deprecation_reason(node);
        }
    }

    fn entering_cascade_update(&mut self, node: &ParseNode) {
        if node.exception {
            return;
        }
        if let Some(entity) = self.entity.as_open_mut() {
            entity.allow_primary_key_updates = true;
        }
    }

    /// metaEdId of the open property, or of the open entity.
    fn entering_metaed_id(&mut self, node: &ParseNode) {
        let Some(id) = extract::metaed_id(node) else {
            return;
        };
        if let Some(property) = self.property.as_open_mut() {
            property.metaed_id = id;
        } else if let Some(entity) = self.entity.as_open_mut() {
            entity.metaed_id = id;
        }
    }

    // =========================================================================
    // DISPATCH
    // =========================================================================

    fn enter(&mut self, node: &ParseNode) {
        match node.production {
            Production::NamespaceName => self.entering_namespace_name(node),
            Production::Documentation => self.entering_documentation(node),
            Production::Deprecated => self.entering_deprecated(node),
            Production::CascadeUpdate => self.entering_cascade_update(node),
            Production::MetaEdId => self.entering_metaed_id(node),
            Production::ExtendeeName => self.entering_extendee_name(node),
            Production::BaseName => self.entering_base_name(node),
            _ => self.enter_property_production(node),
        }
    }

    fn exit(&mut self, node: &ParseNode) {
        match node.production {
            Production::Property => self.exiting_property(),
            Production::MergeDirective => self.exiting_merge_directive(),
            _ => {}
        }
    }
}

/// A listener building one family of top level entities.
pub struct TopLevelEntityBuilder<'a, H> {
    state: EntityState<'a>,
    handler: H,
}

impl<'a, H: EntityKindHandler + Default> TopLevelEntityBuilder<'a, H> {
    pub fn new(
        environment: &'a mut MetaEdEnvironment,
        failures: &'a mut Vec<ValidationFailure>,
    ) -> Self {
        Self::with_handler(environment, failures, H::default())
    }
}

impl<'a, H: EntityKindHandler> TopLevelEntityBuilder<'a, H> {
    pub fn with_handler(
        environment: &'a mut MetaEdEnvironment,
        failures: &'a mut Vec<ValidationFailure>,
        handler: H,
    ) -> Self {
        Self {
            state: EntityState::new(environment, failures),
            handler,
        }
    }

    pub fn state(&self) -> &EntityState<'a> {
        &self.state
    }
}

impl<H: EntityKindHandler> MetaEdListener for TopLevelEntityBuilder<'_, H> {
    fn enter(&mut self, node: &ParseNode) {
        if self.handler.enter(&mut self.state, node) == Dispatch::Unhandled {
            self.state.enter(node);
        }
    }

    fn exit(&mut self, node: &ParseNode) {
        if self.handler.exit(&mut self.state, node) == Dispatch::Unhandled {
            self.state.exit(node);
        }
    }
}

pub type DomainEntityBuilder<'a> = TopLevelEntityBuilder<'a, DomainEntityHandler>;
pub type DomainEntityExtensionBuilder<'a> = TopLevelEntityBuilder<'a, DomainEntityExtensionHandler>;
pub type DomainEntitySubclassBuilder<'a> = TopLevelEntityBuilder<'a, DomainEntitySubclassHandler>;
pub type AssociationBuilder<'a> = TopLevelEntityBuilder<'a, AssociationHandler>;
pub type AssociationExtensionBuilder<'a> = TopLevelEntityBuilder<'a, AssociationExtensionHandler>;
pub type AssociationSubclassBuilder<'a> = TopLevelEntityBuilder<'a, AssociationSubclassHandler>;
pub type CommonBuilder<'a> = TopLevelEntityBuilder<'a, CommonHandler>;
pub type CommonExtensionBuilder<'a> = TopLevelEntityBuilder<'a, CommonExtensionHandler>;
pub type CommonSubclassBuilder<'a> = TopLevelEntityBuilder<'a, CommonSubclassHandler>;
pub type ChoiceBuilder<'a> = TopLevelEntityBuilder<'a, ChoiceHandler>;
pub type DescriptorBuilder<'a> = TopLevelEntityBuilder<'a, DescriptorHandler>;
pub type EnumerationBuilder<'a> = TopLevelEntityBuilder<'a, EnumerationHandler>;
