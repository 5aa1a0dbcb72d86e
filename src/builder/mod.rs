//! Listeners that turn a parse tree into the entity graph.
//!
//! Every builder walks the whole tree and reacts only to the productions it
//! owns. They share one [`MetaEdEnvironment`](crate::model::MetaEdEnvironment)
//! and one failure list:
//!
//! - [`NamespaceBuilder`] - registers namespaces, always first
//! - [`TopLevelEntityBuilder`] - property-owning entities, one
//!   [`EntityKindHandler`] per kind
//! - [`SharedSimpleBuilder`] - shared string, integer, short and decimal types
//! - [`SimpleTypeBuilder`] - string, integer and decimal types derived from
//!   shared declarations and restricted properties
//! - [`DomainBuilder`] / [`InterchangeBuilder`] - item-list declarations
//! - [`build_metaed`] - runs all of them in [`BuilderKind::ORDER`]
//!
//! Malformed nodes are skipped where they are read. Duplicates raise two
//! [`ValidationFailure`](crate::diagnostics::ValidationFailure)s and keep the
//! first declaration.

mod commit;
mod declaration;
mod domain;
mod extract;
mod interchange;
mod namespace;
mod orchestrator;
mod shared_simple;
mod simple_type;
mod state;
mod top_level;

pub use domain::DomainBuilder;
pub use interchange::InterchangeBuilder;
pub use namespace::NamespaceBuilder;
pub use orchestrator::{BuilderKind, build_metaed, build_metaed_into};
pub use shared_simple::SharedSimpleBuilder;
pub use simple_type::{SimpleTypeBuilder, SimpleTypeFamily};
pub use state::{Ongoing, PendingAction};
pub use top_level::{
    AssociationBuilder, AssociationExtensionBuilder, AssociationExtensionHandler,
    AssociationHandler, AssociationSubclassBuilder, AssociationSubclassHandler, ChoiceBuilder,
    ChoiceHandler, CommonBuilder, CommonExtensionBuilder, CommonExtensionHandler, CommonHandler,
    CommonSubclassBuilder, CommonSubclassHandler, DescriptorBuilder, DescriptorHandler, Dispatch,
    DomainEntityBuilder, DomainEntityExtensionBuilder, DomainEntityExtensionHandler,
    DomainEntityHandler, DomainEntitySubclassBuilder, DomainEntitySubclassHandler,
    EntityKindHandler, EntityState, EnumerationBuilder, EnumerationHandler, TopLevelEntityBuilder,
};
