//! Namespaces and their per-kind entity repositories.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::entity::{EntityKind, TopLevelEntity};
use crate::base::SourceLocation;

/// Entities of one namespace, partitioned by kind, each partition in
/// declaration order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EntityRepository {
    partitions: FxHashMap<EntityKind, IndexMap<SmolStr, TopLevelEntity>>,
}

impl EntityRepository {
    pub fn get(&self, kind: EntityKind, name: &str) -> Option<&TopLevelEntity> {
        self.partitions.get(&kind).and_then(|partition| partition.get(name))
    }

    pub fn contains(&self, kind: EntityKind, name: &str) -> bool {
        self.get(kind, name).is_some()
    }

    /// Insert unless an entity of the same kind and name exists. The first
    /// entity always wins; returns whether `entity` was stored.
    pub fn insert(&mut self, entity: TopLevelEntity) -> bool {
        let partition = self.partitions.entry(entity.kind).or_default();
        if partition.contains_key(&entity.name) {
            return false;
        }
        partition.insert(entity.name.clone(), entity);
        true
    }

    /// Entities of one kind in declaration order.
    pub fn of_kind(&self, kind: EntityKind) -> impl Iterator<Item = &TopLevelEntity> {
        self.partitions.get(&kind).into_iter().flat_map(|partition| partition.values())
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        self.partitions.get(&kind).map_or(0, IndexMap::len)
    }

    pub fn len(&self) -> usize {
        self.partitions.values().map(IndexMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A core or extension module scope.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Namespace {
    pub name: SmolStr,
    /// Extension code, empty for core.
    pub project_extension: SmolStr,
    pub is_extension: bool,
    /// Provisional until a later pass assigns the real project name.
    pub project_name: SmolStr,
    /// Names of namespaces this one depends on, filled by later passes.
    pub dependencies: Vec<SmolStr>,
    pub entity: EntityRepository,
    pub location: SourceLocation,
}

impl Namespace {
    pub fn new(location: SourceLocation) -> Self {
        Self {
            name: SmolStr::default(),
            project_extension: SmolStr::default(),
            is_extension: false,
            project_name: SmolStr::default(),
            dependencies: Vec::new(),
            entity: EntityRepository::default(),
            location,
        }
    }
}
