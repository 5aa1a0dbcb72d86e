//! Top level entities and their kinds.

use std::fmt;

use smol_str::SmolStr;

use super::item::{DomainItem, EnumerationItem, InterchangeItem};
use super::property::{EntityProperty, Restrictions};
use crate::base::SourceLocation;

/// Repository partition of a top level entity.
///
/// Abstract entities are domain entities, inline commons are commons and
/// shared shorts are shared integers; the distinction is kept in
/// [`EntityDetail`]. String, integer and decimal types are the simple types
/// derived from shared declarations and restricted properties.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntityKind {
    Association,
    AssociationExtension,
    AssociationSubclass,
    Choice,
    Common,
    CommonExtension,
    CommonSubclass,
    DecimalType,
    Descriptor,
    Domain,
    DomainEntity,
    DomainEntityExtension,
    DomainEntitySubclass,
    Enumeration,
    IntegerType,
    Interchange,
    InterchangeExtension,
    MapTypeEnumeration,
    SchoolYearEnumeration,
    SharedDecimal,
    SharedInteger,
    SharedString,
    StringType,
    Subdomain,
}

impl EntityKind {
    pub const ALL: [EntityKind; 24] = [
        EntityKind::Association,
        EntityKind::AssociationExtension,
        EntityKind::AssociationSubclass,
        EntityKind::Choice,
        EntityKind::Common,
        EntityKind::CommonExtension,
        EntityKind::CommonSubclass,
        EntityKind::DecimalType,
        EntityKind::Descriptor,
        EntityKind::Domain,
        EntityKind::DomainEntity,
        EntityKind::DomainEntityExtension,
        EntityKind::DomainEntitySubclass,
        EntityKind::Enumeration,
        EntityKind::IntegerType,
        EntityKind::Interchange,
        EntityKind::InterchangeExtension,
        EntityKind::MapTypeEnumeration,
        EntityKind::SchoolYearEnumeration,
        EntityKind::SharedDecimal,
        EntityKind::SharedInteger,
        EntityKind::SharedString,
        EntityKind::StringType,
        EntityKind::Subdomain,
    ];

    /// Camel-case tag used by downstream consumers.
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Association => "association",
            EntityKind::AssociationExtension => "associationExtension",
            EntityKind::AssociationSubclass => "associationSubclass",
            EntityKind::Choice => "choice",
            EntityKind::Common => "common",
            EntityKind::CommonExtension => "commonExtension",
            EntityKind::CommonSubclass => "commonSubclass",
            EntityKind::DecimalType => "decimalType",
            EntityKind::Descriptor => "descriptor",
            EntityKind::Domain => "domain",
            EntityKind::DomainEntity => "domainEntity",
            EntityKind::DomainEntityExtension => "domainEntityExtension",
            EntityKind::DomainEntitySubclass => "domainEntitySubclass",
            EntityKind::Enumeration => "enumeration",
            EntityKind::IntegerType => "integerType",
            EntityKind::Interchange => "interchange",
            EntityKind::InterchangeExtension => "interchangeExtension",
            EntityKind::MapTypeEnumeration => "mapTypeEnumeration",
            EntityKind::SchoolYearEnumeration => "schoolYearEnumeration",
            EntityKind::SharedDecimal => "sharedDecimal",
            EntityKind::SharedInteger => "sharedInteger",
            EntityKind::SharedString => "sharedString",
            EntityKind::StringType => "stringType",
            EntityKind::Subdomain => "subdomain",
        }
    }

    /// Name used in user-facing messages.
    pub fn humanized_name(self) -> &'static str {
        match self {
            EntityKind::Association => "Association",
            EntityKind::AssociationExtension => "Association Extension",
            EntityKind::AssociationSubclass => "Association Subclass",
            EntityKind::Choice => "Choice",
            EntityKind::Common => "Common",
            EntityKind::CommonExtension => "Common Extension",
            EntityKind::CommonSubclass => "Common Subclass",
            EntityKind::DecimalType => "Decimal Type",
            EntityKind::Descriptor => "Descriptor",
            EntityKind::Domain => "Domain",
            EntityKind::DomainEntity => "Domain Entity",
            EntityKind::DomainEntityExtension => "Domain Entity Extension",
            EntityKind::DomainEntitySubclass => "Domain Entity Subclass",
            EntityKind::Enumeration => "Enumeration",
            EntityKind::IntegerType => "Integer Type",
            EntityKind::Interchange => "Interchange",
            EntityKind::InterchangeExtension => "Interchange Extension",
            EntityKind::MapTypeEnumeration => "Map Type Enumeration",
            EntityKind::SchoolYearEnumeration => "School Year Enumeration",
            EntityKind::SharedDecimal => "Shared Decimal",
            EntityKind::SharedInteger => "Shared Integer",
            EntityKind::SharedString => "Shared String",
            EntityKind::StringType => "String Type",
            EntityKind::Subdomain => "Subdomain",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable identity of an entity: namespace, partition and name.
///
/// Relationships between model elements are stored as ids and resolved
/// through [`crate::model::MetaEdEnvironment::entity`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EntityId {
    pub namespace: SmolStr,
    pub kind: EntityKind,
    pub name: SmolStr,
}

impl EntityId {
    pub fn new(namespace: impl Into<SmolStr>, kind: EntityKind, name: impl Into<SmolStr>) -> Self {
        Self {
            namespace: namespace.into(),
            kind,
            name: name.into(),
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}({})", self.namespace, self.name, self.kind)
    }
}

/// Kind-specific payload of a [`TopLevelEntity`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum EntityDetail {
    #[default]
    None,
    DomainEntity {
        is_abstract: bool,
    },
    Common {
        inline_in_ods: bool,
    },
    /// Enumerations, school year enumerations and map type enumerations.
    Enumeration {
        items: Vec<EnumerationItem>,
    },
    Descriptor {
        is_map_type_required: bool,
        is_map_type_optional: bool,
        map_type_enumeration: Option<EntityId>,
    },
    SharedSimple {
        restrictions: Restrictions,
        is_short: bool,
    },
    /// String, integer and decimal types. `generated_simple_type` marks one
    /// derived from a restricted property rather than a shared declaration.
    SimpleType {
        restrictions: Restrictions,
        is_short: bool,
        generated_simple_type: bool,
    },
    /// Domains and subdomains.
    Domain {
        items: Vec<DomainItem>,
        footer_documentation: SmolStr,
        parent_name: SmolStr,
        position: Option<u32>,
    },
    /// Interchanges and interchange extensions.
    Interchange {
        elements: Vec<InterchangeItem>,
        identity_templates: Vec<InterchangeItem>,
        extended_documentation: SmolStr,
        use_case_documentation: SmolStr,
    },
}

impl EntityDetail {
    /// The empty payload for entities of `kind`.
    pub fn for_kind(kind: EntityKind) -> Self {
        match kind {
            EntityKind::DomainEntity => EntityDetail::DomainEntity { is_abstract: false },
            EntityKind::Common => EntityDetail::Common { inline_in_ods: false },
            EntityKind::Enumeration
            | EntityKind::SchoolYearEnumeration
            | EntityKind::MapTypeEnumeration => EntityDetail::Enumeration { items: Vec::new() },
            EntityKind::Descriptor => EntityDetail::Descriptor {
                is_map_type_required: false,
                is_map_type_optional: false,
                map_type_enumeration: None,
            },
            EntityKind::SharedDecimal | EntityKind::SharedInteger | EntityKind::SharedString => {
                EntityDetail::SharedSimple {
                    restrictions: Restrictions::default(),
                    is_short: false,
                }
            }
            EntityKind::DecimalType | EntityKind::IntegerType | EntityKind::StringType => {
                EntityDetail::SimpleType {
                    restrictions: Restrictions::default(),
                    is_short: false,
                    generated_simple_type: false,
                }
            }
            EntityKind::Domain | EntityKind::Subdomain => EntityDetail::Domain {
                items: Vec::new(),
                footer_documentation: SmolStr::default(),
                parent_name: SmolStr::default(),
                position: None,
            },
            EntityKind::Interchange | EntityKind::InterchangeExtension => {
                EntityDetail::Interchange {
                    elements: Vec::new(),
                    identity_templates: Vec::new(),
                    extended_documentation: SmolStr::default(),
                    use_case_documentation: SmolStr::default(),
                }
            }
            _ => EntityDetail::None,
        }
    }
}

/// A named, namespace-scoped declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TopLevelEntity {
    pub kind: EntityKind,
    pub name: SmolStr,
    /// Name of the owning namespace.
    pub namespace: SmolStr,
    pub documentation: SmolStr,
    pub metaed_id: SmolStr,
    pub is_deprecated: bool,
    pub deprecation_reason: SmolStr,
    /// Deferred reference to the base or extended entity.
    pub base_entity_name: SmolStr,
    pub base_entity_namespace_name: SmolStr,
    pub allow_primary_key_updates: bool,
    pub properties: Vec<EntityProperty>,
    /// Finished copies of the identity properties, in declaration order.
    pub identity_properties: Vec<EntityProperty>,
    /// Finished copies of the queryable fields, in declaration order.
    pub queryable_fields: Vec<EntityProperty>,
    pub detail: EntityDetail,
    /// Location of the declaring keyword.
    pub location: SourceLocation,
    pub name_location: SourceLocation,
}

impl TopLevelEntity {
    pub fn new(kind: EntityKind, namespace: impl Into<SmolStr>, location: SourceLocation) -> Self {
        Self {
            kind,
            name: SmolStr::default(),
            namespace: namespace.into(),
            documentation: SmolStr::default(),
            metaed_id: SmolStr::default(),
            is_deprecated: false,
            deprecation_reason: SmolStr::default(),
            base_entity_name: SmolStr::default(),
            base_entity_namespace_name: SmolStr::default(),
            allow_primary_key_updates: false,
            properties: Vec::new(),
            identity_properties: Vec::new(),
            queryable_fields: Vec::new(),
            detail: EntityDetail::for_kind(kind),
            location,
            name_location: SourceLocation::default(),
        }
    }

    pub fn id(&self) -> EntityId {
        EntityId::new(self.namespace.clone(), self.kind, self.name.clone())
    }

    /// Display name of the declared type, distinguishing abstract entities,
    /// inline commons and shared shorts from their partitions.
    pub fn type_humanized_name(&self) -> &'static str {
        match &self.detail {
            EntityDetail::DomainEntity { is_abstract: true } => "Abstract Entity",
            EntityDetail::Common { inline_in_ods: true } => "Inline Common",
            EntityDetail::SharedSimple { is_short: true, .. } => "Shared Short",
            _ => self.kind.humanized_name(),
        }
    }

    pub fn is_abstract(&self) -> bool {
        matches!(self.detail, EntityDetail::DomainEntity { is_abstract: true })
    }

    pub fn inline_in_ods(&self) -> bool {
        matches!(self.detail, EntityDetail::Common { inline_in_ods: true })
    }

    /// Committed property with the given full property name.
    pub fn property(&self, full_property_name: &str) -> Option<&EntityProperty> {
        self.properties
            .iter()
            .find(|property| property.full_property_name == full_property_name)
    }

    pub fn enumeration_items(&self) -> &[EnumerationItem] {
        match &self.detail {
            EntityDetail::Enumeration { items } => items,
            _ => &[],
        }
    }

    pub fn domain_items(&self) -> &[DomainItem] {
        match &self.detail {
            EntityDetail::Domain { items, .. } => items,
            _ => &[],
        }
    }

    pub fn interchange_elements(&self) -> &[InterchangeItem] {
        match &self.detail {
            EntityDetail::Interchange { elements, .. } => elements,
            _ => &[],
        }
    }

    pub fn interchange_identity_templates(&self) -> &[InterchangeItem] {
        match &self.detail {
            EntityDetail::Interchange { identity_templates, .. } => identity_templates,
            _ => &[],
        }
    }

    /// Restrictions of a shared simple declaration or a simple type.
    pub fn restrictions(&self) -> Option<&Restrictions> {
        match &self.detail {
            EntityDetail::SharedSimple { restrictions, .. }
            | EntityDetail::SimpleType { restrictions, .. } => Some(restrictions),
            _ => None,
        }
    }

    /// Whether a short declaration or property gave rise to this entity.
    pub fn is_short(&self) -> bool {
        matches!(
            self.detail,
            EntityDetail::SharedSimple { is_short: true, .. }
                | EntityDetail::SimpleType { is_short: true, .. }
        )
    }

    pub fn is_generated_simple_type(&self) -> bool {
        matches!(self.detail, EntityDetail::SimpleType { generated_simple_type: true, .. })
    }
}
