//! Interchanges, interchange extensions and their element and identity
//! template lists.

use super::declaration::DeclarationState;
use super::extract;
use super::state::Ongoing;
use crate::diagnostics::{ValidationFailure, validators};
use crate::model::{
    EntityDetail, EntityKind, InterchangeItem, ItemType, MetaEdEnvironment, TopLevelEntity,
};
use crate::syntax::{MetaEdListener, ParseNode, Production, TokenKind};

/// Builds interchanges and interchange extensions.
pub struct InterchangeBuilder<'a> {
    state: DeclarationState<'a>,
    item: Ongoing<InterchangeItem>,
}

impl<'a> InterchangeBuilder<'a> {
    pub fn new(
        environment: &'a mut MetaEdEnvironment,
        failures: &'a mut Vec<ValidationFailure>,
    ) -> Self {
        Self {
            state: DeclarationState::new(environment, failures, validators::INTERCHANGE_BUILDER),
            item: Ongoing::Idle,
        }
    }

    fn entering_metaed_id(&mut self, node: &ParseNode) {
        if !self.state.entity.is_open() {
            return;
        }
        match self.item.as_open_mut() {
            Some(item) => {
                if let Some(id) = extract::metaed_id(node) {
                    item.metaed_id = id;
                }
            }
            None => self.state.entering_metaed_id(node),
        }
    }

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
            .unwrap_or_else(|| self.state.current_namespace_name());
        let Some(entity) = self.state.entity.as_open_mut() else {
            return;
        };
        entity.name = extendee.clone();
        entity.name_location = local.source_location();
        entity.base_entity_name = extendee;
        entity.base_entity_namespace_name = namespace;
    }

    fn entering_documentation_field(&mut self, node: &ParseNode, extended: bool) {
        if let Some(entity) = self.state.entity.as_open_mut()
            && let EntityDetail::Interchange {
                extended_documentation,
                use_case_documentation,
                ..
            } = &mut entity.detail
        {
            let field = if extended { extended_documentation } else { use_case_documentation };
            *field = extract::documentation(node);
        }
    }

    fn entering_item(&mut self, node: &ParseNode) {
        if !self.state.entity.is_open() || node.exception {
            return;
        }
        let Some(local) = node.valid_child(Production::LocalInterchangeItemName) else {
            return;
        };
        let Some(name) = extract::id_text(local) else {
            return;
        };

        let mut item =
            InterchangeItem::new(self.state.current_namespace_name(), local.source_location());
        item.name = name;
        item.referenced_types = interchange_item_types(node);
        item.referenced_namespace_name = extract::child_id_text(node, Production::BaseNamespace)
            .unwrap_or_else(|| self.state.current_namespace_name());
        self.item.open(item);
    }

    fn exiting_item(&mut self, identity: bool) {
        let Some(item) = self.item.take() else {
            return;
        };
        if let Some(entity) = self.state.entity.as_open_mut()
            && let EntityDetail::Interchange {
                elements,
                identity_templates,
                ..
            } = &mut entity.detail
        {
            if identity {
                identity_templates.push(item);
            } else {
                elements.push(item);
            }
        }
    }
}

/// Candidate types of an interchange item. Identity and element keywords of
/// the same base kind resolve alike.
fn interchange_item_types(node: &ParseNode) -> Vec<ItemType> {
    if node.has_token(TokenKind::AssociationKeyword)
        || node.has_token(TokenKind::AssociationIdentity)
    {
        vec![ItemType::Association, ItemType::AssociationSubclass]
    } else if node.has_token(TokenKind::DomainEntityKeyword)
        || node.has_token(TokenKind::DomainEntityIdentity)
    {
        vec![ItemType::DomainEntity, ItemType::DomainEntitySubclass]
    } else if node.has_token(TokenKind::DescriptorKeyword) {
        vec![ItemType::Descriptor]
    } else {
        vec![ItemType::Unknown]
    }
}

/// "Interchange named X" or "Interchange Extension named X".
fn describe_interchange(entity: &TopLevelEntity) -> String {
    let extension = if entity.kind == EntityKind::InterchangeExtension { "Extension " } else { "" };
    format!("Interchange {extension}named {}", entity.name)
}

impl MetaEdListener for InterchangeBuilder<'_> {
    fn enter(&mut self, node: &ParseNode) {
        match node.production {
            Production::NamespaceName => self.state.entering_namespace_name(node),
            Production::Interchange => self.state.entering_entity(EntityKind::Interchange, node),
            Production::InterchangeExtension => {
                self.state.entering_entity(EntityKind::InterchangeExtension, node)
            }
            Production::InterchangeName => self.state.entering_name(node),
            Production::ExtendeeName => self.entering_extendee_name(node),
            Production::Documentation => self.state.entering_documentation(node),
            Production::ExtendedDocumentation => self.entering_documentation_field(node, true),
            Production::UseCaseDocumentation => self.entering_documentation_field(node, false),
            Production::Deprecated => self.state.entering_deprecated(node),
            Production::MetaEdId => self.entering_metaed_id(node),
            Production::InterchangeElement | Production::InterchangeIdentity => {
                self.entering_item(node)
            }
            _ => {}
        }
    }

    fn exit(&mut self, node: &ParseNode) {
        match node.production {
            Production::InterchangeElement => self.exiting_item(false),
            Production::InterchangeIdentity => self.exiting_item(true),
            Production::Interchange | Production::InterchangeExtension => {
                self.item.reset();
                self.state.exiting_entity(describe_interchange);
            }
            _ => {}
        }
    }
}
