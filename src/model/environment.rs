//! The model produced by one build.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::entity::{EntityId, TopLevelEntity};
use super::namespace::Namespace;
use super::property::{EntityProperty, PropertyKind};

/// Every committed property across all namespaces, partitioned by kind in
/// commit order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PropertyIndex {
    partitions: FxHashMap<PropertyKind, Vec<EntityProperty>>,
}

impl PropertyIndex {
    pub fn push(&mut self, property: EntityProperty) {
        self.partitions.entry(property.kind).or_default().push(property);
    }

    pub fn of_kind(&self, kind: PropertyKind) -> &[EntityProperty] {
        self.partitions.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every indexed property, partition by partition in [`PropertyKind::ALL`]
    /// order.
    pub fn iter(&self) -> impl Iterator<Item = &EntityProperty> {
        PropertyKind::ALL.into_iter().flat_map(|kind| self.of_kind(kind).iter())
    }

    pub fn len(&self) -> usize {
        self.partitions.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Namespace registry and property index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetaEdEnvironment {
    /// Namespaces by name, in commit order.
    pub namespace: IndexMap<SmolStr, Namespace>,
    pub property_index: PropertyIndex,
}

impl MetaEdEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn namespace(&self, name: &str) -> Option<&Namespace> {
        self.namespace.get(name)
    }

    pub fn entity(&self, id: &EntityId) -> Option<&TopLevelEntity> {
        self.namespace
            .get(&id.namespace)
            .and_then(|namespace| namespace.entity.get(id.kind, &id.name))
    }

    /// The committed owner of `property`.
    pub fn parent_of(&self, property: &EntityProperty) -> Option<&TopLevelEntity> {
        property.parent_entity.as_ref().and_then(|id| self.entity(id))
    }
}
