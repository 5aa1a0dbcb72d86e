//! Domains, subdomains and their ordered item lists.

use super::commit::describe_by_type;
use super::declaration::DeclarationState;
use super::extract;
use super::state::Ongoing;
use crate::diagnostics::{ValidationFailure, validators};
use crate::model::{DomainItem, EntityDetail, EntityKind, ItemType, MetaEdEnvironment};
use crate::syntax::{MetaEdListener, ParseNode, Production, TokenKind};

/// Builds domains and subdomains.
pub struct DomainBuilder<'a> {
    state: DeclarationState<'a>,
    item: Ongoing<DomainItem>,
}

impl<'a> DomainBuilder<'a> {
    pub fn new(
        environment: &'a mut MetaEdEnvironment,
        failures: &'a mut Vec<ValidationFailure>,
    ) -> Self {
        Self {
            state: DeclarationState::new(environment, failures, validators::DOMAIN_BUILDER),
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

    fn entering_footer_documentation(&mut self, node: &ParseNode) {
        if let Some(entity) = self.state.entity.as_open_mut()
            && let EntityDetail::Domain { footer_documentation, .. } = &mut entity.detail
        {
            *footer_documentation = extract::documentation(node);
        }
    }

    fn entering_parent_domain_name(&mut self, node: &ParseNode) {
        let Some(parent) = extract::id_text(node) else {
            return;
        };
        if let Some(entity) = self.state.entity.as_open_mut()
            && let EntityDetail::Domain { parent_name, .. } = &mut entity.detail
        {
            *parent_name = parent;
        }
    }

    fn entering_subdomain_position(&mut self, node: &ParseNode) {
        let Some(value) = extract::unsigned_int(node).and_then(|text| text.parse::<u32>().ok())
        else {
            return;
        };
        if let Some(entity) = self.state.entity.as_open_mut()
            && let EntityDetail::Domain { position, .. } = &mut entity.detail
        {
            *position = Some(value);
        }
    }

    fn entering_domain_item(&mut self, node: &ParseNode) {
        let Some(domain) = self.state.entity.as_open() else {
            return;
        };
        if node.exception {
            return;
        }
        let Some(local) = node.valid_child(Production::LocalDomainItemName) else {
            return;
        };
        let Some(name) = extract::id_text(local) else {
            return;
        };

        let mut item = DomainItem::new(domain.namespace.clone(), local.source_location());
        item.name = name;
        item.referenced_type = domain_item_type(node);
        item.referenced_namespace_name = extract::child_id_text(node, Production::BaseNamespace)
            .unwrap_or_else(|| self.state.current_namespace_name());
        self.item.open(item);
    }

    fn exiting_domain_item(&mut self) {
        let Some(item) = self.item.take() else {
            return;
        };
        if let Some(entity) = self.state.entity.as_open_mut()
            && let EntityDetail::Domain { items, .. } = &mut entity.detail
        {
            items.push(item);
        }
    }
}

/// Referenced type of a domain item, from the keyword that introduced it.
fn domain_item_type(node: &ParseNode) -> ItemType {
    [
        (TokenKind::AssociationKeyword, ItemType::Association),
        (TokenKind::CommonKeyword, ItemType::Common),
        (TokenKind::DomainEntityKeyword, ItemType::DomainEntity),
        (TokenKind::DescriptorKeyword, ItemType::Descriptor),
        (TokenKind::InlineCommonKeyword, ItemType::InlineCommon),
    ]
    .into_iter()
    .find(|(keyword, _)| node.has_token(*keyword))
    .map_or(ItemType::Unknown, |(_, item_type)| item_type)
}

impl MetaEdListener for DomainBuilder<'_> {
    fn enter(&mut self, node: &ParseNode) {
        match node.production {
            Production::NamespaceName => self.state.entering_namespace_name(node),
            Production::Domain => self.state.entering_entity(EntityKind::Domain, node),
            Production::Subdomain => self.state.entering_entity(EntityKind::Subdomain, node),
            Production::DomainName | Production::SubdomainName => self.state.entering_name(node),
            Production::ParentDomainName => self.entering_parent_domain_name(node),
            Production::SubdomainPosition => self.entering_subdomain_position(node),
            Production::Documentation => self.state.entering_documentation(node),
            Production::FooterDocumentation => self.entering_footer_documentation(node),
            Production::Deprecated => self.state.entering_deprecated(node),
            Production::MetaEdId => self.entering_metaed_id(node),
            Production::DomainItem => self.entering_domain_item(node),
            _ => {}
        }
    }

    fn exit(&mut self, node: &ParseNode) {
        match node.production {
            Production::DomainItem => self.exiting_domain_item(),
            Production::Domain | Production::Subdomain => {
                self.item.reset();
                self.state.exiting_entity(describe_by_type);
            }
            _ => {}
        }
    }
}
