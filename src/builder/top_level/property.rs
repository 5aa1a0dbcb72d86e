//! Property sub-protocol of [`EntityState`].

use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use tracing::debug;

use super::EntityState;
use crate::base::SourceLocation;
use crate::builder::extract;
use crate::builder::state::PendingAction;
use crate::diagnostics::{ValidationFailure, validators};
use crate::model::{Cardinality, EntityProperty, MergeDirective, PropertyKind, Restrictions};
use crate::syntax::{ParseNode, Production, TokenKind};

/// Which restriction a production fills, and where its literal sits.
#[derive(Clone, Copy)]
enum Literal {
    UnsignedInt,
    Child(Production),
}

impl EntityState<'_> {
    /// Open a property of `kind` on the open entity.
    pub fn entering_property(&mut self, kind: PropertyKind, node: &ParseNode) {
        if !self.entity.is_open() || node.exception {
            return;
        }
        self.property.open(EntityProperty::new(kind, node.source_location()));
    }

    /// Mark the open property as part of the owner's identity once built.
    pub fn entering_identity(&mut self) {
        let Some(property) = self.property.as_open_mut() else {
            return;
        };
        property.is_part_of_identity = true;
        self.pending.push(PendingAction::MarkIdentity);
    }

    /// Close the open property: default its namespaces and name, stamp its
    /// owner, apply pending actions, then commit it unless it is queryable
    /// only or its full name collides.
    pub fn exiting_property(&mut self) {
        let Some(mut property) = self.property.take() else {
            return;
        };
        let pending = std::mem::take(&mut self.pending);
        self.merge_directive.reset();

        let Some(entity) = self.entity.as_open_mut() else {
            return;
        };

        property.namespace = entity.namespace.clone();
        if property.referenced_namespace_name.is_empty() {
            property.referenced_namespace_name = property.namespace.clone();
        }
        if property.name.is_empty() && property.kind.is_shared() {
            property.name = property.referenced_type.clone();
        }

        property.parent_entity = Some(entity.id());
        property.parent_entity_name = entity.name.clone();
        property.full_property_name = property.compute_full_property_name();

        for action in pending.iter().rev() {
            match action {
                PendingAction::MarkIdentity => entity.identity_properties.push(property.clone()),
                PendingAction::MarkQueryable => entity.queryable_fields.push(property.clone()),
            }
        }

        if property.is_queryable_only {
            return;
        }
        if name_collides(&mut self.property_lookup, self.failures, &property) {
            return;
        }
        entity.properties.push(property.clone());
        self.environment.property_index.push(property);
    }

    // =========================================================================
    // FIELDS
    // =========================================================================

    fn entering_property_documentation(&mut self, node: &ParseNode) {
        let Some(property) = self.property.as_open_mut() else {
            return;
        };
        if node.valid_text(TokenKind::Inherited).is_some() {
            property.documentation_inherited = true;
        } else {
            property.documentation = extract::documentation(node);
        }
    }

    fn entering_property_deprecated(&mut self, node: &ParseNode) {
        if node.exception {
            return;
        }
        if let Some(property) = self.property.as_open_mut() {
            property.is_deprecated = true;
            property.deprecation_reason = extract::deprecation_reason(node);
        }
    }

    /// `propertyName`: local name plus optional namespace qualifier.
    fn entering_property_name(&mut self, node: &ParseNode) {
        if node.exception {
            return;
        }
        let current_namespace = self.current_namespace_name();
        let Some(property) = self.property.as_open_mut() else {
            return;
        };
        let Some(local) = node.child(Production::LocalPropertyName) else {
            return;
        };
        set_local_name(property, local);

        if property.name == "SchoolYear" && property.kind == PropertyKind::Enumeration {
            property.kind = PropertyKind::SchoolYearEnumeration;
        }

        property.referenced_namespace_name =
            extract::child_id_text(node, Production::PropertyNamespace)
                .unwrap_or(current_namespace);
    }

    fn entering_simple_property_name(&mut self, node: &ParseNode) {
        if node.exception {
            return;
        }
        let Some(property) = self.property.as_open_mut() else {
            return;
        };
        if let Some(local) = node.child(Production::LocalPropertyName) {
            set_local_name(property, local);
        }
    }

    /// `sharedPropertyType`: the shared simple type a shared property uses.
    fn entering_shared_property_type(&mut self, node: &ParseNode) {
        if node.exception {
            return;
        }
        let current_namespace = self.current_namespace_name();
        let Some(property) = self.property.as_open_mut() else {
            return;
        };
        let Some(local) = node.valid_child(Production::LocalPropertyType) else {
            return;
        };
        let Some(referenced_type) = extract::id_text(local) else {
            return;
        };
        property.referenced_type = referenced_type;
        // Stands in for the name until a `named` clause replaces it.
        property.name_location = local.source_location();
        property.referenced_namespace_name =
            extract::child_id_text(node, Production::PropertyNamespace)
                .unwrap_or(current_namespace);
    }

    /// `named <name>` of a shared property.
    fn entering_shared_property_name(&mut self, node: &ParseNode) {
        let Some(property) = self.property.as_open_mut() else {
            return;
        };
        if let Some(name) = extract::id_text(node) {
            property.name = name;
            property.name_location = node.source_location();
        }
    }

    /// Set a text field of the open property from the `ID` of `node`.
    fn entering_id_field(&mut self, node: &ParseNode, set: fn(&mut EntityProperty, SmolStr)) {
        let Some(property) = self.property.as_open_mut() else {
            return;
        };
        if let Some(text) = extract::id_text(node) {
            set(property, text);
        }
    }

    fn entering_cardinality(&mut self, cardinality: Cardinality) {
        if let Some(property) = self.property.as_open_mut() {
            property.cardinality = cardinality;
        }
    }

    fn entering_flag(&mut self, set: fn(&mut EntityProperty)) {
        if let Some(property) = self.property.as_open_mut() {
            set(property);
        }
    }

    fn entering_queryable(&mut self, queryable_only: bool) {
        if !self.entity.is_open() {
            return;
        }
        let Some(property) = self.property.as_open_mut() else {
            return;
        };
        if queryable_only {
            property.is_queryable_only = true;
        }
        self.pending.push(PendingAction::MarkQueryable);
    }

    fn entering_restriction(
        &mut self,
        node: &ParseNode,
        literal: Literal,
        field: fn(&mut Restrictions) -> &mut Option<SmolStr>,
    ) {
        let Some(property) = self.property.as_open_mut() else {
            return;
        };
        let value = match literal {
            Literal::UnsignedInt => extract::unsigned_int(node),
            Literal::Child(production) => extract::child_literal(node, production),
        };
        if let Some(value) = value {
            *field(&mut property.restrictions) = Some(value);
            property.has_restriction = true;
        }
    }

    // =========================================================================
    // MERGE DIRECTIVES
    // =========================================================================

    fn entering_merge_directive(&mut self, node: &ParseNode) {
        if !self.property.is_open() || node.exception {
            return;
        }
        self.merge_directive.open(MergeDirective {
            location: node.source_location(),
            ..MergeDirective::default()
        });
    }

    fn entering_merge_path(&mut self, node: &ParseNode, is_source: bool) {
        let Some(directive) = self.merge_directive.as_open_mut() else {
            return;
        };
        if node.exception {
            return;
        }
        let Some(path) = node.valid_child(Production::PropertyPath) else {
            return;
        };
        let path = extract::property_path(path);
        if is_source {
            directive.source_path = path;
        } else {
            directive.target_path = path;
        }
    }

    pub(super) fn exiting_merge_directive(&mut self) {
        let Some(directive) = self.merge_directive.take() else {
            return;
        };
        if let Some(property) = self.property.as_open_mut() {
            property.merge_directives.push(directive);
        }
    }

    // =========================================================================
    // DISPATCH
    // =========================================================================

    pub(super) fn enter_property_production(&mut self, node: &ParseNode) {
        if let Some(kind) = PropertyKind::from_production(node.production) {
            self.entering_property(kind, node);
            return;
        }

        match node.production {
            Production::CommonExtensionOverride => {
                self.entering_flag(|p| p.is_extension_override = true)
            }
            Production::PropertyDocumentation => self.entering_property_documentation(node),
            Production::PropertyDeprecated => self.entering_property_deprecated(node),
            Production::PropertyName => self.entering_property_name(node),
            Production::SimplePropertyName => self.entering_simple_property_name(node),
            Production::SharedPropertyType => self.entering_shared_property_type(node),
            Production::SharedPropertyName => self.entering_shared_property_name(node),
            Production::RoleNameName => self.entering_id_field(node, |p, role| p.role_name = role),
            Production::ShortenToName => {
                self.entering_id_field(node, |p, name| p.shorten_to = name)
            }
            Production::BaseKeyName => {
                self.entering_id_field(node, |p, name| p.base_key_name = name)
            }

            Production::Identity => self.entering_identity(),
            Production::IdentityRename => {
                self.entering_flag(|p| p.is_identity_rename = true);
                self.entering_identity();
            }
            Production::IsQueryableField => self.entering_queryable(false),
            Production::IsQueryableOnly => self.entering_queryable(true),
            Production::Required => self.entering_cardinality(Cardinality::Required),
            Production::Optional => self.entering_cardinality(Cardinality::Optional),
            Production::RequiredCollection => {
                self.entering_cardinality(Cardinality::RequiredCollection)
            }
            Production::OptionalCollection => {
                self.entering_cardinality(Cardinality::OptionalCollection)
            }
            Production::IsWeakReference => self.entering_flag(|p| p.is_weak = true),
            Production::PotentiallyLogical => self.entering_flag(|p| p.potentially_logical = true),

            Production::MinLength => {
                self.entering_restriction(node, Literal::UnsignedInt, |r| &mut r.min_length)
            }
            Production::MaxLength => {
                self.entering_restriction(node, Literal::UnsignedInt, |r| &mut r.max_length)
            }
            Production::TotalDigits => {
                self.entering_restriction(node, Literal::UnsignedInt, |r| &mut r.total_digits)
            }
            Production::DecimalPlaces => {
                self.entering_restriction(node, Literal::UnsignedInt, |r| &mut r.decimal_places)
            }
            Production::MinValue | Production::MinValueShort => self.entering_restriction(
                node,
                Literal::Child(Production::SignedInt),
                |r| &mut r.min_value,
            ),
            Production::MaxValue | Production::MaxValueShort => self.entering_restriction(
                node,
                Literal::Child(Production::SignedInt),
                |r| &mut r.max_value,
            ),
            Production::MinValueDecimal => self.entering_restriction(
                node,
                Literal::Child(Production::DecimalValue),
                |r| &mut r.min_value,
            ),
            Production::MaxValueDecimal => self.entering_restriction(
                node,
                Literal::Child(Production::DecimalValue),
                |r| &mut r.max_value,
            ),

            Production::MergeDirective => self.entering_merge_directive(node),
            Production::SourcePropertyPath => self.entering_merge_path(node, true),
            Production::TargetPropertyPath => self.entering_merge_path(node, false),
            _ => {}
        }
    }
}

fn set_local_name(property: &mut EntityProperty, local: &ParseNode) {
    if let Some(name) = extract::id_text(local) {
        property.name = name;
        property.name_location = local.source_location();
    }
}

/// Record `property`'s full name for its entity. A repeat raises a failure at
/// each declaration; an empty name (left by malformed input) collides
/// silently.
fn name_collides(
    lookup: &mut FxHashMap<SmolStr, (SmolStr, SourceLocation)>,
    failures: &mut Vec<ValidationFailure>,
    property: &EntityProperty,
) -> bool {
    if property.full_property_name.is_empty() {
        return true;
    }
    let Some((existing_name, existing_location)) = lookup.get(&property.full_property_name) else {
        lookup.insert(
            property.full_property_name.clone(),
            (property.name.clone(), property.name_location.clone()),
        );
        return false;
    };

    debug!(name = %property.full_property_name, "duplicate property rejected");
    failures.push(ValidationFailure::error(
        validators::TOP_LEVEL_ENTITY_BUILDER,
        format!(
            concat!(
                "Property named {} is a duplicate declaration of that name. ",
                "Use 'role name' keyword to avoid naming collisions.",
            ),
            property.name
        ),
        property.name_location.clone(),
    ));
    failures.push(ValidationFailure::error(
        validators::TOP_LEVEL_ENTITY_BUILDER,
        format!(
            concat!(
                "Property named {} is a duplicate declaration of that name.  ",
                "Use 'role name' keyword to avoid naming collisions.",
            ),
            existing_name
        ),
        existing_location.clone(),
    ));
    true
}
