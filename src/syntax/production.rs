//! Grammar productions and token kinds of the MetaEd language.
//!
//! The grammar and lexer live outside this crate. These enums fix the names
//! a parser adapter must use when it hands a parse tree to the builders.

/// One variant per grammar rule.
///
/// Rules are listed in grammar order: structure, documentation, entities,
/// restrictions, property annotations, properties, merge directives, names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Production {
    // =========================================================================
    // STRUCTURE
    // =========================================================================
    MetaEd,
    Namespace,
    NamespaceType,
    TopLevelEntity,

    // =========================================================================
    // DOCUMENTATION AND DEPRECATION
    // =========================================================================
    Deprecated,
    PropertyDeprecated,
    Documentation,
    EnumerationItemDocumentation,
    MapTypeDocumentation,
    PropertyDocumentation,
    FooterDocumentation,
    ExtendedDocumentation,
    UseCaseDocumentation,

    // =========================================================================
    // TOP LEVEL ENTITIES
    // =========================================================================
    AbstractEntity,
    EntityConfiguration,
    CascadeUpdate,
    Association,
    DefiningDomainEntity,
    AssociationExtension,
    AssociationSubclass,
    Choice,
    SharedDecimal,
    SharedInteger,
    SharedShort,
    SharedString,
    Common,
    CommonExtension,
    CommonSubclass,
    Descriptor,
    WithMapType,
    RequiredMapType,
    OptionalMapType,
    Domain,
    DomainItem,
    DomainEntity,
    DomainEntityExtension,
    DomainEntitySubclass,
    Enumeration,
    EnumerationItem,
    ShortDescription,
    InlineCommon,
    Interchange,
    InterchangeComponent,
    InterchangeElement,
    InterchangeIdentity,
    InterchangeExtension,
    InterchangeExtensionComponent,
    Subdomain,
    SubdomainPosition,

    // =========================================================================
    // RESTRICTIONS
    // =========================================================================
    MinValue,
    MaxValue,
    MinValueShort,
    MaxValueShort,
    MinValueDecimal,
    MaxValueDecimal,
    DecimalValue,
    TotalDigits,
    DecimalPlaces,
    MinLength,
    MaxLength,

    // =========================================================================
    // PROPERTY ANNOTATIONS
    // =========================================================================
    CommonExtensionOverride,
    PropertyAnnotation,
    Identity,
    IdentityRename,
    Required,
    Optional,
    Collection,
    RequiredCollection,
    OptionalCollection,
    IsQueryableOnly,
    PropertyComponents,
    IsQueryableField,
    RoleName,
    IsWeakReference,
    PotentiallyLogical,

    // =========================================================================
    // PROPERTIES
    // =========================================================================
    Property,
    BooleanProperty,
    CurrencyProperty,
    DateProperty,
    DatetimeProperty,
    DecimalProperty,
    DescriptorProperty,
    DurationProperty,
    EnumerationProperty,
    CommonProperty,
    InlineCommonProperty,
    ChoiceProperty,
    IntegerProperty,
    PercentProperty,
    AssociationProperty,
    DomainEntityProperty,
    SharedDecimalProperty,
    SharedIntegerProperty,
    SharedShortProperty,
    SharedStringProperty,
    ShortProperty,
    StringProperty,
    TimeProperty,
    YearProperty,

    // =========================================================================
    // MERGE DIRECTIVES
    // =========================================================================
    MergeDirective,
    SourcePropertyPath,
    TargetPropertyPath,
    PropertyPath,
    SignedInt,
    UnaryOperator,

    // =========================================================================
    // NAMES
    // =========================================================================
    AbstractEntityName,
    AssociationName,
    BaseKeyName,
    BaseName,
    BaseNamespace,
    ChoiceName,
    SharedDecimalName,
    SharedIntegerName,
    CommonName,
    SharedShortName,
    SharedStringName,
    DescriptorName,
    DomainName,
    EntityName,
    EnumerationName,
    ExtendeeName,
    ExtendeeNamespace,
    InlineCommonName,
    InterchangeName,
    LocalBaseName,
    LocalDomainItemName,
    LocalExtendeeName,
    LocalInterchangeItemName,
    LocalPropertyName,
    LocalPropertyType,
    ParentDomainName,
    PropertyName,
    PropertyNamespace,
    RoleNameName,
    SharedPropertyName,
    SharedPropertyType,
    ShortenToName,
    SimplePropertyName,
    SubdomainName,
    NamespaceName,
    MetaEdId,
}

impl Production {
    /// Every property-kind rule that may appear under [`Production::Property`].
    pub const PROPERTY_KINDS: [Production; 23] = [
        Production::AssociationProperty,
        Production::BooleanProperty,
        Production::ChoiceProperty,
        Production::CommonProperty,
        Production::CurrencyProperty,
        Production::DateProperty,
        Production::DatetimeProperty,
        Production::DecimalProperty,
        Production::DescriptorProperty,
        Production::DomainEntityProperty,
        Production::DurationProperty,
        Production::EnumerationProperty,
        Production::InlineCommonProperty,
        Production::IntegerProperty,
        Production::PercentProperty,
        Production::SharedDecimalProperty,
        Production::SharedIntegerProperty,
        Production::SharedShortProperty,
        Production::SharedStringProperty,
        Production::ShortProperty,
        Production::StringProperty,
        Production::TimeProperty,
        Production::YearProperty,
    ];

    pub fn is_property_kind(self) -> bool {
        Self::PROPERTY_KINDS.contains(&self)
    }

    /// Property rules whose name is a `propertyName` (with an optional
    /// namespace qualifier) rather than a `simplePropertyName`.
    pub fn has_qualified_property_name(self) -> bool {
        matches!(
            self,
            Production::AssociationProperty
                | Production::ChoiceProperty
                | Production::CommonProperty
                | Production::DescriptorProperty
                | Production::DomainEntityProperty
                | Production::EnumerationProperty
                | Production::InlineCommonProperty
        )
    }

    /// Shared simple property rules: their type is a `sharedPropertyType` and
    /// the property name is optional.
    pub fn is_shared_property_kind(self) -> bool {
        matches!(
            self,
            Production::SharedDecimalProperty
                | Production::SharedIntegerProperty
                | Production::SharedShortProperty
                | Production::SharedStringProperty
        )
    }
}

/// Token kinds the builders inspect. Every other literal of the grammar is a
/// [`TokenKind::Keyword`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Id,
    Text,
    UnsignedInt,
    DecimalValue,
    MetaEdId,
    Core,
    Inherited,
    Period,
    PosSign,
    NegSign,
    AssociationKeyword,
    CommonKeyword,
    DomainEntityKeyword,
    DescriptorKeyword,
    InlineCommonKeyword,
    AssociationIdentity,
    DomainEntityIdentity,
    Keyword,
}
