//! Items listed inside enumerations, domains and interchanges.

use smol_str::SmolStr;

use crate::base::SourceLocation;

/// Entity kind a domain or interchange item may refer to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ItemType {
    Association,
    AssociationSubclass,
    Common,
    Descriptor,
    DomainEntity,
    DomainEntitySubclass,
    InlineCommon,
    Unknown,
}

/// One `item` of an enumeration or map type.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EnumerationItem {
    pub short_description: SmolStr,
    pub documentation: SmolStr,
    pub metaed_id: SmolStr,
    pub location: SourceLocation,
}

/// Deferred reference from a domain or subdomain to a member entity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DomainItem {
    pub name: SmolStr,
    pub metaed_id: SmolStr,
    /// Namespace of the owning domain.
    pub namespace: SmolStr,
    pub referenced_type: ItemType,
    pub referenced_namespace_name: SmolStr,
    pub location: SourceLocation,
}

impl DomainItem {
    pub fn new(namespace: impl Into<SmolStr>, location: SourceLocation) -> Self {
        Self {
            name: SmolStr::default(),
            metaed_id: SmolStr::default(),
            namespace: namespace.into(),
            referenced_type: ItemType::Unknown,
            referenced_namespace_name: SmolStr::default(),
            location,
        }
    }
}

/// Deferred reference from an interchange to an element or identity
/// template. The candidate types pair a base kind with its subclass kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InterchangeItem {
    pub name: SmolStr,
    pub metaed_id: SmolStr,
    pub namespace: SmolStr,
    pub referenced_types: Vec<ItemType>,
    pub referenced_namespace_name: SmolStr,
    pub location: SourceLocation,
}

impl InterchangeItem {
    pub fn new(namespace: impl Into<SmolStr>, location: SourceLocation) -> Self {
        Self {
            name: SmolStr::default(),
            metaed_id: SmolStr::default(),
            namespace: namespace.into(),
            referenced_types: Vec::new(),
            referenced_namespace_name: SmolStr::default(),
            location,
        }
    }
}
