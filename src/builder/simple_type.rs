//! String, integer and decimal types.
//!
//! Every shared simple declaration yields a simple type of the same name.
//! Every string, integer, short or decimal property carrying a restriction
//! yields one too, named by the property's full name and flagged
//! `generated_simple_type`. Each builder walks one family.
//!
//! Names are unique per namespace and family. A repeat keeps the first type
//! and raises nothing: the declarations behind it are checked by the shared
//! simple and top level builders.

use smol_str::SmolStr;
use tracing::{debug, trace};

use super::extract;
use super::state::Ongoing;
use crate::model::{EntityDetail, EntityKind, MetaEdEnvironment, Restrictions, TopLevelEntity};
use crate::syntax::{MetaEdListener, ParseNode, Production, TokenKind};

/// The family of simple types one builder walk produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SimpleTypeFamily {
    String,
    Integer,
    Decimal,
}

impl SimpleTypeFamily {
    pub fn kind(self) -> EntityKind {
        match self {
            SimpleTypeFamily::String => EntityKind::StringType,
            SimpleTypeFamily::Integer => EntityKind::IntegerType,
            SimpleTypeFamily::Decimal => EntityKind::DecimalType,
        }
    }

    /// How `production` contributes to this family, if at all.
    fn source(self, production: Production) -> Option<Source> {
        let source = match (self, production) {
            (SimpleTypeFamily::String, Production::SharedString)
            | (SimpleTypeFamily::Integer, Production::SharedInteger)
            | (SimpleTypeFamily::Decimal, Production::SharedDecimal) => Source::declaration(false),
            (SimpleTypeFamily::Integer, Production::SharedShort) => Source::declaration(true),
            (SimpleTypeFamily::String, Production::StringProperty)
            | (SimpleTypeFamily::Integer, Production::IntegerProperty)
            | (SimpleTypeFamily::Decimal, Production::DecimalProperty) => Source::property(false),
            (SimpleTypeFamily::Integer, Production::ShortProperty) => Source::property(true),
            _ => return None,
        };
        Some(source)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Source {
    generated: bool,
    is_short: bool,
}

impl Source {
    fn declaration(is_short: bool) -> Self {
        Self { generated: false, is_short }
    }

    fn property(is_short: bool) -> Self {
        Self { generated: true, is_short }
    }
}

/// A simple type being read from its declaration or property.
#[derive(Clone, Debug)]
struct Draft {
    entity: TopLevelEntity,
    source: Source,
    role_name: SmolStr,
    restrictions: Restrictions,
}

impl Draft {
    /// Full property name for generated types, the declared name otherwise.
    fn name(&self) -> SmolStr {
        let name = &self.entity.name;
        if !self.source.generated || self.role_name.is_empty() || &self.role_name == name {
            return name.clone();
        }
        SmolStr::from(format!("{}{}", self.role_name, name))
    }
}

/// Builds the simple types of one [`SimpleTypeFamily`].
pub struct SimpleTypeBuilder<'a> {
    environment: &'a mut MetaEdEnvironment,
    family: SimpleTypeFamily,
    current_namespace: Option<SmolStr>,
    draft: Ongoing<Draft>,
}

impl<'a> SimpleTypeBuilder<'a> {
    pub fn new(environment: &'a mut MetaEdEnvironment, family: SimpleTypeFamily) -> Self {
        Self {
            environment,
            family,
            current_namespace: None,
            draft: Ongoing::Idle,
        }
    }

    fn entering_namespace_name(&mut self, node: &ParseNode) {
        self.current_namespace =
            extract::id_text(node).filter(|name| self.environment.namespace.contains_key(name));
    }

    fn entering_type(&mut self, source: Source, node: &ParseNode) {
        if node.exception {
            self.draft.reset();
            return;
        }
        let namespace = self.current_namespace.clone().unwrap_or_default();
        self.draft.open(Draft {
            entity: TopLevelEntity::new(self.family.kind(), namespace, node.source_location()),
            source,
            role_name: SmolStr::default(),
            restrictions: Restrictions::default(),
        });
    }

    fn exiting_type(&mut self) {
        let Some(draft) = self.draft.take() else {
            return;
        };
        if draft.source.generated && draft.restrictions.is_empty() {
            return;
        }
        let name = draft.name();
        if name.is_empty() {
            return;
        }

        let mut entity = draft.entity;
        entity.name = name;
        entity.detail = EntityDetail::SimpleType {
            restrictions: draft.restrictions,
            is_short: draft.source.is_short,
            generated_simple_type: draft.source.generated,
        };

        let Some(namespace) = self.environment.namespace.get_mut(&entity.namespace) else {
            return;
        };
        let (kind, name) = (entity.kind, entity.name.clone());
        if namespace.entity.insert(entity) {
            trace!(%kind, %name, "simple type committed");
        } else {
            debug!(%kind, %name, "simple type already built; first kept");
        }
    }

    /// Fields read while a type is open.
    fn entering_field(&mut self, node: &ParseNode) {
        let Some(draft) = self.draft.as_open_mut() else {
            return;
        };
        let generated = draft.source.generated;
        match node.production {
            Production::SharedStringName
            | Production::SharedIntegerName
            | Production::SharedShortName
            | Production::SharedDecimalName
                if !generated =>
            {
                set_name(&mut draft.entity, node);
            }
            Production::SimplePropertyName if generated && !node.exception => {
                if let Some(local) = node.child(Production::LocalPropertyName) {
                    set_name(&mut draft.entity, local);
                }
            }
            Production::RoleNameName if generated => {
                if let Some(role_name) = extract::id_text(node) {
                    draft.role_name = role_name;
                }
            }
            Production::Documentation if !generated => {
                draft.entity.documentation = extract::documentation(node);
            }
            Production::PropertyDocumentation if generated => {
                if node.valid_text(TokenKind::Inherited).is_none() {
                    draft.entity.documentation = extract::documentation(node);
                }
            }
            Production::Deprecated | Production::PropertyDeprecated if !node.exception => {
                draft.entity.is_deprecated = true;
                draft.entity.deprecation_reason = extract::deprecation_reason(node);
            }
            Production::MetaEdId => {
                if let Some(id) = extract::metaed_id(node) {
                    draft.entity.metaed_id = id;
                }
            }
            Production::MinLength => {
                set_restriction(&mut draft.restrictions.min_length, extract::unsigned_int(node))
            }
            Production::MaxLength => {
                set_restriction(&mut draft.restrictions.max_length, extract::unsigned_int(node))
            }
            Production::TotalDigits => {
                set_restriction(&mut draft.restrictions.total_digits, extract::unsigned_int(node))
            }
            Production::DecimalPlaces => {
                set_restriction(&mut draft.restrictions.decimal_places, extract::unsigned_int(node))
            }
            Production::MinValue | Production::MinValueShort => set_restriction(
                &mut draft.restrictions.min_value,
                extract::child_literal(node, Production::SignedInt),
            ),
            Production::MaxValue | Production::MaxValueShort => set_restriction(
                &mut draft.restrictions.max_value,
                extract::child_literal(node, Production::SignedInt),
            ),
            Production::MinValueDecimal => set_restriction(
                &mut draft.restrictions.min_value,
                extract::child_literal(node, Production::DecimalValue),
            ),
            Production::MaxValueDecimal => set_restriction(
                &mut draft.restrictions.max_value,
                extract::child_literal(node, Production::DecimalValue),
            ),
            _ => {}
        }
    }
}

fn set_name(entity: &mut TopLevelEntity, node: &ParseNode) {
    if let Some(name) = extract::id_text(node) {
        entity.name = name;
        entity.name_location = node.source_location();
    }
}

fn set_restriction(field: &mut Option<SmolStr>, value: Option<SmolStr>) {
    if value.is_some() {
        *field = value;
    }
}

impl MetaEdListener for SimpleTypeBuilder<'_> {
    fn enter(&mut self, node: &ParseNode) {
        if node.production == Production::NamespaceName {
            self.entering_namespace_name(node);
        } else if let Some(source) = self.family.source(node.production) {
            self.entering_type(source, node);
        } else {
            self.entering_field(node);
        }
    }

    fn exit(&mut self, node: &ParseNode) {
        if self.family.source(node.production).is_some() {
            self.exiting_type();
        }
    }
}
