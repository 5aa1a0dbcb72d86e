//! The namespace-scoped entity graph.
//!
//! ```text
//! MetaEdEnvironment
//!   ├── namespace: name → Namespace
//!   │     └── entity: EntityKind → name → TopLevelEntity
//!   │                                       └── properties: [EntityProperty]
//!   └── property_index: PropertyKind → [EntityProperty]
//! ```
//!
//! Back-references are ids: a property stores its owner's [`EntityId`] and
//! [`MetaEdEnvironment::entity`] resolves it on demand.

mod entity;
mod environment;
mod item;
mod namespace;
mod property;

pub use entity::{EntityDetail, EntityId, EntityKind, TopLevelEntity};
pub use environment::{MetaEdEnvironment, PropertyIndex};
pub use item::{DomainItem, EnumerationItem, InterchangeItem, ItemType};
pub use namespace::{EntityRepository, Namespace};
pub use property::{Cardinality, EntityProperty, MergeDirective, PropertyKind, Restrictions};
