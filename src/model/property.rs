//! Entity properties, cardinality, restrictions and merge directives.

use std::fmt;

use smol_str::SmolStr;

use super::entity::{EntityId, EntityKind};
use crate::base::SourceLocation;
use crate::syntax::Production;

/// Concrete property type, also the partition key of the property index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PropertyKind {
    Association,
    Boolean,
    Choice,
    Common,
    Currency,
    Date,
    Datetime,
    Decimal,
    Descriptor,
    DomainEntity,
    Duration,
    Enumeration,
    InlineCommon,
    Integer,
    Percent,
    SchoolYearEnumeration,
    SharedDecimal,
    SharedInteger,
    SharedShort,
    SharedString,
    Short,
    String,
    Time,
    Year,
}

impl PropertyKind {
    pub const ALL: [PropertyKind; 24] = [
        PropertyKind::Association,
        PropertyKind::Boolean,
        PropertyKind::Choice,
        PropertyKind::Common,
        PropertyKind::Currency,
        PropertyKind::Date,
        PropertyKind::Datetime,
        PropertyKind::Decimal,
        PropertyKind::Descriptor,
        PropertyKind::DomainEntity,
        PropertyKind::Duration,
        PropertyKind::Enumeration,
        PropertyKind::InlineCommon,
        PropertyKind::Integer,
        PropertyKind::Percent,
        PropertyKind::SchoolYearEnumeration,
        PropertyKind::SharedDecimal,
        PropertyKind::SharedInteger,
        PropertyKind::SharedShort,
        PropertyKind::SharedString,
        PropertyKind::Short,
        PropertyKind::String,
        PropertyKind::Time,
        PropertyKind::Year,
    ];

    /// Kind opened by a property-kind production.
    pub fn from_production(production: Production) -> Option<Self> {
        let kind = match production {
            Production::AssociationProperty => PropertyKind::Association,
            Production::BooleanProperty => PropertyKind::Boolean,
            Production::ChoiceProperty => PropertyKind::Choice,
            Production::CommonProperty => PropertyKind::Common,
            Production::CurrencyProperty => PropertyKind::Currency,
            Production::DateProperty => PropertyKind::Date,
            Production::DatetimeProperty => PropertyKind::Datetime,
            Production::DecimalProperty => PropertyKind::Decimal,
            Production::DescriptorProperty => PropertyKind::Descriptor,
            Production::DomainEntityProperty => PropertyKind::DomainEntity,
            Production::DurationProperty => PropertyKind::Duration,
            Production::EnumerationProperty => PropertyKind::Enumeration,
            Production::InlineCommonProperty => PropertyKind::InlineCommon,
            Production::IntegerProperty => PropertyKind::Integer,
            Production::PercentProperty => PropertyKind::Percent,
            Production::SharedDecimalProperty => PropertyKind::SharedDecimal,
            Production::SharedIntegerProperty => PropertyKind::SharedInteger,
            Production::SharedShortProperty => PropertyKind::SharedShort,
            Production::SharedStringProperty => PropertyKind::SharedString,
            Production::ShortProperty => PropertyKind::Short,
            Production::StringProperty => PropertyKind::String,
            Production::TimeProperty => PropertyKind::Time,
            Production::YearProperty => PropertyKind::Year,
            _ => return None,
        };
        Some(kind)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PropertyKind::Association => "association",
            PropertyKind::Boolean => "boolean",
            PropertyKind::Choice => "choice",
            PropertyKind::Common => "common",
            PropertyKind::Currency => "currency",
            PropertyKind::Date => "date",
            PropertyKind::Datetime => "datetime",
            PropertyKind::Decimal => "decimal",
            PropertyKind::Descriptor => "descriptor",
            PropertyKind::DomainEntity => "domainEntity",
            PropertyKind::Duration => "duration",
            PropertyKind::Enumeration => "enumeration",
            PropertyKind::InlineCommon => "inlineCommon",
            PropertyKind::Integer => "integer",
            PropertyKind::Percent => "percent",
            PropertyKind::SchoolYearEnumeration => "schoolYearEnumeration",
            PropertyKind::SharedDecimal => "sharedDecimal",
            PropertyKind::SharedInteger => "sharedInteger",
            PropertyKind::SharedShort => "sharedShort",
            PropertyKind::SharedString => "sharedString",
            PropertyKind::Short => "short",
            PropertyKind::String => "string",
            PropertyKind::Time => "time",
            PropertyKind::Year => "year",
        }
    }

    /// Properties typed by a shared simple declaration.
    pub fn is_shared(self) -> bool {
        matches!(
            self,
            PropertyKind::SharedDecimal
                | PropertyKind::SharedInteger
                | PropertyKind::SharedShort
                | PropertyKind::SharedString
        )
    }

    /// Properties that reference another top level entity by name.
    pub fn is_referential(self) -> bool {
        self.referenced_entity_kind().is_some() && !self.is_shared()
    }

    /// Partition holding the entity this property refers to.
    pub fn referenced_entity_kind(self) -> Option<EntityKind> {
        match self {
            PropertyKind::Association => Some(EntityKind::Association),
            PropertyKind::Choice => Some(EntityKind::Choice),
            PropertyKind::Common | PropertyKind::InlineCommon => Some(EntityKind::Common),
            PropertyKind::Descriptor => Some(EntityKind::Descriptor),
            PropertyKind::DomainEntity => Some(EntityKind::DomainEntity),
            PropertyKind::Enumeration => Some(EntityKind::Enumeration),
            PropertyKind::SchoolYearEnumeration => Some(EntityKind::SchoolYearEnumeration),
            PropertyKind::SharedDecimal => Some(EntityKind::SharedDecimal),
            PropertyKind::SharedInteger | PropertyKind::SharedShort => {
                Some(EntityKind::SharedInteger)
            }
            PropertyKind::SharedString => Some(EntityKind::SharedString),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Required or optional, scalar or collection. One value, so the four
/// states exclude each other.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cardinality {
    #[default]
    Unspecified,
    Required,
    Optional,
    RequiredCollection,
    OptionalCollection,
}

impl Cardinality {
    pub fn is_required(self) -> bool {
        matches!(self, Cardinality::Required | Cardinality::RequiredCollection)
    }

    pub fn is_optional(self) -> bool {
        matches!(self, Cardinality::Optional | Cardinality::OptionalCollection)
    }

    pub fn is_collection(self) -> bool {
        matches!(self, Cardinality::RequiredCollection | Cardinality::OptionalCollection)
    }
}

/// Length, precision and range restrictions, kept as declared text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Restrictions {
    pub min_length: Option<SmolStr>,
    pub max_length: Option<SmolStr>,
    pub total_digits: Option<SmolStr>,
    pub decimal_places: Option<SmolStr>,
    pub min_value: Option<SmolStr>,
    pub max_value: Option<SmolStr>,
}

impl Restrictions {
    pub fn is_empty(&self) -> bool {
        self.min_length.is_none()
            && self.max_length.is_none()
            && self.total_digits.is_none()
            && self.decimal_places.is_none()
            && self.min_value.is_none()
            && self.max_value.is_none()
    }
}

/// Two property paths that denote the same value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MergeDirective {
    pub source_path: Vec<SmolStr>,
    pub target_path: Vec<SmolStr>,
    pub location: SourceLocation,
}

/// A typed field of a top level entity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntityProperty {
    pub kind: PropertyKind,
    pub name: SmolStr,
    pub role_name: SmolStr,
    pub shorten_to: SmolStr,
    /// Role name (unless equal to the name) followed by the name; unique
    /// within the owning entity.
    pub full_property_name: SmolStr,
    pub documentation: SmolStr,
    pub documentation_inherited: bool,
    pub metaed_id: SmolStr,
    pub is_deprecated: bool,
    pub deprecation_reason: SmolStr,
    /// Namespace of the owning entity.
    pub namespace: SmolStr,
    pub referenced_namespace_name: SmolStr,
    /// Shared simple type named by a shared property.
    pub referenced_type: SmolStr,
    pub parent_entity: Option<EntityId>,
    pub parent_entity_name: SmolStr,
    pub is_part_of_identity: bool,
    pub is_identity_rename: bool,
    pub base_key_name: SmolStr,
    pub cardinality: Cardinality,
    pub is_queryable_only: bool,
    pub is_weak: bool,
    pub potentially_logical: bool,
    pub is_extension_override: bool,
    pub defines_association: bool,
    pub has_restriction: bool,
    pub restrictions: Restrictions,
    pub merge_directives: Vec<MergeDirective>,
    /// Location of the property type keyword.
    pub location: SourceLocation,
    pub name_location: SourceLocation,
}

impl EntityProperty {
    pub fn new(kind: PropertyKind, location: SourceLocation) -> Self {
        Self {
            kind,
            name: SmolStr::default(),
            role_name: SmolStr::default(),
            shorten_to: SmolStr::default(),
            full_property_name: SmolStr::default(),
            documentation: SmolStr::default(),
            documentation_inherited: false,
            metaed_id: SmolStr::default(),
            is_deprecated: false,
            deprecation_reason: SmolStr::default(),
            namespace: SmolStr::default(),
            referenced_namespace_name: SmolStr::default(),
            referenced_type: SmolStr::default(),
            parent_entity: None,
            parent_entity_name: SmolStr::default(),
            is_part_of_identity: false,
            is_identity_rename: false,
            base_key_name: SmolStr::default(),
            cardinality: Cardinality::Unspecified,
            is_queryable_only: false,
            is_weak: false,
            potentially_logical: false,
            is_extension_override: false,
            defines_association: false,
            has_restriction: false,
            restrictions: Restrictions::default(),
            merge_directives: Vec::new(),
            location,
            name_location: SourceLocation::default(),
        }
    }

    /// Role name prefix, elided when it repeats the name.
    pub fn compute_full_property_name(&self) -> SmolStr {
        if self.role_name.is_empty() || self.role_name == self.name {
            self.name.clone()
        } else {
            SmolStr::from(format!("{}{}", self.role_name, self.name))
        }
    }
}
