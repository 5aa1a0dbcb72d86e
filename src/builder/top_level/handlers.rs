//! Per-kind handlers for the top level entity builder.
//!
//! Most kinds only say which production opens and closes them and which
//! production carries their name; extensions take their name from the
//! extendee, which the shared protocol reads.

use super::{Dispatch, EntityKindHandler, EntityState};
use crate::builder::commit::{commit_entity, describe_by_type};
use crate::builder::extract;
use crate::builder::state::Ongoing;
use crate::diagnostics::validators;
use crate::model::{EntityDetail, EntityKind, EnumerationItem, PropertyKind, TopLevelEntity};
use crate::syntax::{ParseNode, Production};

/// Handler for a kind that opens on `$entity`, closes on its exit and
/// optionally reads its name from `$name`.
macro_rules! entity_handler {
    ($handler:ident, $entity:ident => $kind:ident $(, name: $name:ident)?) => {
        #[doc = concat!("Builds `", stringify!($kind), "` entities.")]
        #[derive(Clone, Copy, Debug, Default)]
        pub struct $handler;

        impl EntityKindHandler for $handler {
            fn enter(&mut self, state: &mut EntityState<'_>, node: &ParseNode) -> Dispatch {
                match node.production {
                    Production::$entity => state.entering_entity(EntityKind::$kind, node),
                    $(Production::$name => state.entering_name(node),)?
                    _ => return Dispatch::Unhandled,
                }
                Dispatch::Handled
            }

            fn exit(&mut self, state: &mut EntityState<'_>, node: &ParseNode) -> Dispatch {
                if node.production != Production::$entity {
                    return Dispatch::Unhandled;
                }
                state.exiting_entity();
                Dispatch::Handled
            }
        }
    };
}

entity_handler!(DomainEntityExtensionHandler, DomainEntityExtension => DomainEntityExtension);
entity_handler!(
    DomainEntitySubclassHandler,
    DomainEntitySubclass => DomainEntitySubclass, name: EntityName
);
entity_handler!(AssociationExtensionHandler, AssociationExtension => AssociationExtension);
entity_handler!(
    AssociationSubclassHandler,
    AssociationSubclass => AssociationSubclass, name: AssociationName
);
entity_handler!(CommonExtensionHandler, CommonExtension => CommonExtension);
entity_handler!(CommonSubclassHandler, CommonSubclass => CommonSubclass, name: CommonName);
entity_handler!(ChoiceHandler, Choice => Choice, name: ChoiceName);

/// Builds domain entities, including abstract ones.
#[derive(Clone, Copy, Debug, Default)]
pub struct DomainEntityHandler;

impl EntityKindHandler for DomainEntityHandler {
    fn enter(&mut self, state: &mut EntityState<'_>, node: &ParseNode) -> Dispatch {
        match node.production {
            Production::DomainEntity => state.entering_entity(EntityKind::DomainEntity, node),
            Production::AbstractEntity => {
                state.entering_entity(EntityKind::DomainEntity, node);
                set_detail(state, EntityDetail::DomainEntity { is_abstract: true });
            }
            Production::EntityName | Production::AbstractEntityName => state.entering_name(node),
            _ => return Dispatch::Unhandled,
        }
        Dispatch::Handled
    }

    fn exit(&mut self, state: &mut EntityState<'_>, node: &ParseNode) -> Dispatch {
        match node.production {
            Production::DomainEntity | Production::AbstractEntity => state.exiting_entity(),
            _ => return Dispatch::Unhandled,
        }
        Dispatch::Handled
    }
}

/// Builds commons, including inline commons.
#[derive(Clone, Copy, Debug, Default)]
pub struct CommonHandler;

impl EntityKindHandler for CommonHandler {
    fn enter(&mut self, state: &mut EntityState<'_>, node: &ParseNode) -> Dispatch {
        match node.production {
            Production::Common => state.entering_entity(EntityKind::Common, node),
            Production::InlineCommon => {
                state.entering_entity(EntityKind::Common, node);
                set_detail(state, EntityDetail::Common { inline_in_ods: true });
            }
            Production::CommonName | Production::InlineCommonName => state.entering_name(node),
            _ => return Dispatch::Unhandled,
        }
        Dispatch::Handled
    }

    fn exit(&mut self, state: &mut EntityState<'_>, node: &ParseNode) -> Dispatch {
        match node.production {
            Production::Common | Production::InlineCommon => state.exiting_entity(),
            _ => return Dispatch::Unhandled,
        }
        Dispatch::Handled
    }
}

/// Builds associations. Each defining domain entity becomes an identity
/// property of the association.
#[derive(Clone, Copy, Debug, Default)]
pub struct AssociationHandler;

impl EntityKindHandler for AssociationHandler {
    fn enter(&mut self, state: &mut EntityState<'_>, node: &ParseNode) -> Dispatch {
        match node.production {
            Production::Association => state.entering_entity(EntityKind::Association, node),
            Production::AssociationName => state.entering_name(node),
            Production::DefiningDomainEntity => {
                state.entering_property(PropertyKind::DomainEntity, node);
                if let Some(property) = state.property.as_open_mut() {
                    property.defines_association = true;
                }
                state.entering_identity();
            }
            _ => return Dispatch::Unhandled,
        }
        Dispatch::Handled
    }

    fn exit(&mut self, state: &mut EntityState<'_>, node: &ParseNode) -> Dispatch {
        match node.production {
            Production::Association => state.exiting_entity(),
            Production::DefiningDomainEntity => state.exiting_property(),
            _ => return Dispatch::Unhandled,
        }
        Dispatch::Handled
    }
}

fn set_detail(state: &mut EntityState<'_>, detail: EntityDetail) {
    if let Some(entity) = state.entity.as_open_mut() {
        entity.detail = detail;
    }
}

// ============================================================================
// ENUMERATIONS
// ============================================================================

/// The enumeration item being built inside an enumeration or map type.
#[derive(Clone, Debug, Default)]
struct ItemState {
    item: Ongoing<EnumerationItem>,
}

impl ItemState {
    fn enter(&mut self, node: &ParseNode) -> Dispatch {
        match node.production {
            Production::EnumerationItem => self.item.open(EnumerationItem {
                location: node.source_location(),
                ..EnumerationItem::default()
            }),
            Production::ShortDescription => {
                if let Some(item) = self.item.as_open_mut() {
                    item.short_description = extract::documentation(node);
                }
            }
            Production::EnumerationItemDocumentation => {
                if let Some(item) = self.item.as_open_mut() {
                    item.documentation = extract::documentation(node);
                }
            }
            Production::MetaEdId if self.item.is_open() => {
                if let (Some(item), Some(id)) = (self.item.as_open_mut(), extract::metaed_id(node))
                {
                    item.metaed_id = id;
                }
            }
            _ => return Dispatch::Unhandled,
        }
        Dispatch::Handled
    }

    /// The finished item, when `node` closes one.
    fn exit(&mut self, node: &ParseNode) -> Option<EnumerationItem> {
        if node.production != Production::EnumerationItem {
            return None;
        }
        self.item.take()
    }
}

fn push_item(entity: &mut TopLevelEntity, item: EnumerationItem) {
    if let EntityDetail::Enumeration { items } = &mut entity.detail {
        items.push(item);
    }
}

/// Builds enumerations. The name `SchoolYear` turns the open enumeration
/// into a school year enumeration.
#[derive(Clone, Debug, Default)]
pub struct EnumerationHandler {
    items: ItemState,
}

impl EntityKindHandler for EnumerationHandler {
    fn enter(&mut self, state: &mut EntityState<'_>, node: &ParseNode) -> Dispatch {
        match node.production {
            Production::Enumeration => state.entering_entity(EntityKind::Enumeration, node),
            Production::EnumerationName => {
                state.entering_name(node);
                if let Some(entity) = state.entity.as_open_mut()
                    && entity.name == "SchoolYear"
                {
                    entity.kind = EntityKind::SchoolYearEnumeration;
                }
            }
            _ if state.entity.is_open() => return self.items.enter(node),
            _ => return Dispatch::Unhandled,
        }
        Dispatch::Handled
    }

    fn exit(&mut self, state: &mut EntityState<'_>, node: &ParseNode) -> Dispatch {
        match node.production {
            Production::Enumeration => state.exiting_entity(),
            Production::EnumerationItem => {
                if let (Some(item), Some(entity)) =
                    (self.items.exit(node), state.entity.as_open_mut())
                {
                    push_item(entity, item);
                }
            }
            _ => return Dispatch::Unhandled,
        }
        Dispatch::Handled
    }
}

// ============================================================================
// DESCRIPTORS
// ============================================================================

/// Builds descriptors and their optional map type enumeration, which is
/// committed on its own when its block closes. A descriptor without a name
/// gets no map type.
#[derive(Clone, Debug, Default)]
pub struct DescriptorHandler {
    map_type: Ongoing<TopLevelEntity>,
    items: ItemState,
}

impl DescriptorHandler {
    fn entering_map_type(&mut self, state: &EntityState<'_>, node: &ParseNode) {
        if node.exception {
            return;
        }
        let Some(descriptor) = state.entity.as_open() else {
            return;
        };
        if descriptor.name.is_empty() {
            return;
        }
        let mut map_type = TopLevelEntity::new(
            EntityKind::MapTypeEnumeration,
            descriptor.namespace.clone(),
            node.source_location(),
        );
        map_type.name = format!("{}Map", descriptor.name).into();
        map_type.name_location = descriptor.name_location.clone();
        self.map_type.open(map_type);
    }

    fn exiting_map_type(&mut self, state: &mut EntityState<'_>) {
        let Some(map_type) = self.map_type.take() else {
            return;
        };
        if state.entity.as_open().is_none_or(|descriptor| descriptor.name.is_empty()) {
            return;
        }
        let id = map_type.id();
        commit_entity(
            state.environment,
            state.failures,
            validators::TOP_LEVEL_ENTITY_BUILDER,
            map_type,
            describe_by_type,
        );
        if let Some(descriptor) = state.entity.as_open_mut()
            && let EntityDetail::Descriptor { map_type_enumeration, .. } = &mut descriptor.detail
        {
            *map_type_enumeration = Some(id);
        }
    }
}

impl EntityKindHandler for DescriptorHandler {
    fn enter(&mut self, state: &mut EntityState<'_>, node: &ParseNode) -> Dispatch {
        match node.production {
            Production::Descriptor => state.entering_entity(EntityKind::Descriptor, node),
            Production::DescriptorName => state.entering_name(node),
            Production::WithMapType => self.entering_map_type(state, node),
            Production::MapTypeDocumentation => {
                if let Some(map_type) = self.map_type.as_open_mut() {
                    map_type.documentation = extract::documentation(node);
                }
            }
            Production::RequiredMapType | Production::OptionalMapType => {
                let required = node.production == Production::RequiredMapType;
                if let Some(descriptor) = state.entity.as_open_mut()
                    && let EntityDetail::Descriptor {
                        is_map_type_required,
                        is_map_type_optional,
                        ..
                    } = &mut descriptor.detail
                {
                    *is_map_type_required = required;
                    *is_map_type_optional = !required;
                }
            }
            _ if self.map_type.is_open() => return self.items.enter(node),
            _ => return Dispatch::Unhandled,
        }
        Dispatch::Handled
    }

    fn exit(&mut self, state: &mut EntityState<'_>, node: &ParseNode) -> Dispatch {
        match node.production {
            Production::Descriptor => {
                self.map_type.reset();
                state.exiting_entity();
            }
            Production::WithMapType => self.exiting_map_type(state),
            Production::EnumerationItem => {
                if let (Some(item), Some(map_type)) =
                    (self.items.exit(node), self.map_type.as_open_mut())
                {
                    push_item(map_type, item);
                }
            }
            _ => return Dispatch::Unhandled,
        }
        Dispatch::Handled
    }
}
