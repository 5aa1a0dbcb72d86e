//! # metaed
//!
//! Front end of the MetaEd modeling language: walks a parse tree and builds
//! the namespace-scoped entity graph consumed by artifact generators.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! builder   → NamespaceBuilder, entity builders, orchestrator
//!   ↓
//! model     → Namespace, TopLevelEntity, EntityProperty, MetaEdEnvironment
//!   ↓
//! syntax    → Production, ParseNode, MetaEdListener, TreeBuilder
//!   ↓
//! base      → Position, SourceLocation
//! ```
//!
//! ```
//! use metaed::{BuildOptions, EntityKind, MetaEdEnvironment, TreeBuilder, build_metaed};
//!
//! let root = TreeBuilder::new()
//!     .begin_namespace("EdFi", None)
//!     .start_domain_entity("Student")
//!     .with_documentation("A person enrolled in a school.")
//!     .end_entity()
//!     .end_namespace()
//!     .build();
//!
//! let mut environment = MetaEdEnvironment::new();
//! let failures = build_metaed(&root, &mut environment, &BuildOptions::default()).unwrap();
//! assert!(failures.is_empty());
//!
//! let namespace = environment.namespace("EdFi").unwrap();
//! assert!(namespace.entity.contains(EntityKind::DomainEntity, "Student"));
//! ```

// ============================================================================
// MODULES (dependency order: base → syntax → model → builder)
// ============================================================================

/// Foundation types: Position, SourceLocation
pub mod base;

/// Parse-tree input: productions, tokens, listener traversal, TreeBuilder
pub mod syntax;

/// The entity graph: namespaces, entities, properties, items
pub mod model;

/// Listeners building the model from a parse tree
pub mod builder;

/// Validation failures raised while building
pub mod diagnostics;

/// Builder misuse errors
pub mod error;

/// Build options
pub mod config;

pub use base::{Position, SourceLocation};
pub use builder::{BuilderKind, build_metaed, build_metaed_into};
pub use config::BuildOptions;
pub use diagnostics::{Severity, ValidationFailure};
pub use error::BuildError;
pub use model::{
    EntityKind, EntityProperty, MetaEdEnvironment, Namespace, PropertyKind, TopLevelEntity,
};
pub use syntax::{ParseNode, TreeBuilder};
