//! Runs every builder over a parse tree.
//!
//! The namespace builder walks first so that later builders can resolve the
//! namespace of each block by name. The rest touch disjoint partitions and
//! run in a fixed alphabetical order, one full walk each.

use tracing::debug;

use super::domain::DomainBuilder;
use super::interchange::InterchangeBuilder;
use super::namespace::NamespaceBuilder;
use super::shared_simple::SharedSimpleBuilder;
use super::simple_type::{SimpleTypeBuilder, SimpleTypeFamily};
use super::top_level::{
    AssociationBuilder, AssociationExtensionBuilder, AssociationSubclassBuilder, ChoiceBuilder,
    CommonBuilder, CommonExtensionBuilder, CommonSubclassBuilder, DescriptorBuilder,
    DomainEntityBuilder, DomainEntityExtensionBuilder, DomainEntitySubclassBuilder,
    EnumerationBuilder,
};
use crate::config::BuildOptions;
use crate::diagnostics::ValidationFailure;
use crate::error::BuildError;
use crate::model::MetaEdEnvironment;
use crate::syntax::{ParseNode, Production, walk};

/// One listener pass over the tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BuilderKind {
    Namespace,
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
    SharedSimple,
    StringType,
}

impl BuilderKind {
    /// Walk order: namespaces first, then alphabetical.
    pub const ORDER: [BuilderKind; 19] = [
        BuilderKind::Namespace,
        BuilderKind::Association,
        BuilderKind::AssociationExtension,
        BuilderKind::AssociationSubclass,
        BuilderKind::Choice,
        BuilderKind::Common,
        BuilderKind::CommonExtension,
        BuilderKind::CommonSubclass,
        BuilderKind::DecimalType,
        BuilderKind::Descriptor,
        BuilderKind::Domain,
        BuilderKind::DomainEntity,
        BuilderKind::DomainEntityExtension,
        BuilderKind::DomainEntitySubclass,
        BuilderKind::Enumeration,
        BuilderKind::IntegerType,
        BuilderKind::Interchange,
        BuilderKind::SharedSimple,
        BuilderKind::StringType,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BuilderKind::Namespace => "NamespaceBuilder",
            BuilderKind::Association => "AssociationBuilder",
            BuilderKind::AssociationExtension => "AssociationExtensionBuilder",
            BuilderKind::AssociationSubclass => "AssociationSubclassBuilder",
            BuilderKind::Choice => "ChoiceBuilder",
            BuilderKind::Common => "CommonBuilder",
            BuilderKind::CommonExtension => "CommonExtensionBuilder",
            BuilderKind::CommonSubclass => "CommonSubclassBuilder",
            BuilderKind::DecimalType => "DecimalTypeBuilder",
            BuilderKind::Descriptor => "DescriptorBuilder",
            BuilderKind::Domain => "DomainBuilder",
            BuilderKind::DomainEntity => "DomainEntityBuilder",
            BuilderKind::DomainEntityExtension => "DomainEntityExtensionBuilder",
            BuilderKind::DomainEntitySubclass => "DomainEntitySubclassBuilder",
            BuilderKind::Enumeration => "EnumerationBuilder",
            BuilderKind::IntegerType => "IntegerTypeBuilder",
            BuilderKind::Interchange => "InterchangeBuilder",
            BuilderKind::SharedSimple => "SharedSimpleBuilder",
            BuilderKind::StringType => "StringTypeBuilder",
        }
    }

    /// Walk `root` with this builder.
    pub fn run(
        self,
        root: &ParseNode,
        environment: &mut MetaEdEnvironment,
        failures: &mut Vec<ValidationFailure>,
        options: &BuildOptions,
    ) {
        match self {
            BuilderKind::Namespace => walk(&mut NamespaceBuilder::new(environment, options), root),
            BuilderKind::Association => {
                walk(&mut AssociationBuilder::new(environment, failures), root)
            }
            BuilderKind::AssociationExtension => {
                walk(&mut AssociationExtensionBuilder::new(environment, failures), root)
            }
            BuilderKind::AssociationSubclass => {
                walk(&mut AssociationSubclassBuilder::new(environment, failures), root)
            }
            BuilderKind::Choice => walk(&mut ChoiceBuilder::new(environment, failures), root),
            BuilderKind::Common => walk(&mut CommonBuilder::new(environment, failures), root),
            BuilderKind::CommonExtension => {
                walk(&mut CommonExtensionBuilder::new(environment, failures), root)
            }
            BuilderKind::CommonSubclass => {
                walk(&mut CommonSubclassBuilder::new(environment, failures), root)
            }
            BuilderKind::DecimalType => {
                walk(&mut SimpleTypeBuilder::new(environment, SimpleTypeFamily::Decimal), root)
            }
            BuilderKind::Descriptor => {
                walk(&mut DescriptorBuilder::new(environment, failures), root)
            }
            BuilderKind::Domain => walk(&mut DomainBuilder::new(environment, failures), root),
            BuilderKind::DomainEntity => {
                walk(&mut DomainEntityBuilder::new(environment, failures), root)
            }
            BuilderKind::DomainEntityExtension => {
                walk(&mut DomainEntityExtensionBuilder::new(environment, failures), root)
            }
            BuilderKind::DomainEntitySubclass => {
                walk(&mut DomainEntitySubclassBuilder::new(environment, failures), root)
            }
            BuilderKind::Enumeration => {
                walk(&mut EnumerationBuilder::new(environment, failures), root)
            }
            BuilderKind::IntegerType => {
                walk(&mut SimpleTypeBuilder::new(environment, SimpleTypeFamily::Integer), root)
            }
            BuilderKind::Interchange => {
                walk(&mut InterchangeBuilder::new(environment, failures), root)
            }
            BuilderKind::SharedSimple => {
                walk(&mut SharedSimpleBuilder::new(environment, failures), root)
            }
            BuilderKind::StringType => {
                walk(&mut SimpleTypeBuilder::new(environment, SimpleTypeFamily::String), root)
            }
        }
    }
}

/// Build `root` into `environment` and return the failures raised.
pub fn build_metaed(
    root: &ParseNode,
    environment: &mut MetaEdEnvironment,
    options: &BuildOptions,
) -> Result<Vec<ValidationFailure>, BuildError> {
    let mut failures = Vec::new();
    build_metaed_into(root, environment, &mut failures, options)?;
    Ok(failures)
}

/// Build `root` into `environment`, appending failures to `failures`.
pub fn build_metaed_into(
    root: &ParseNode,
    environment: &mut MetaEdEnvironment,
    failures: &mut Vec<ValidationFailure>,
    options: &BuildOptions,
) -> Result<(), BuildError> {
    if root.production != Production::MetaEd {
        return Err(BuildError::UnexpectedRoot { found: root.production });
    }

    for (index, kind) in BuilderKind::ORDER.into_iter().enumerate() {
        if index > 0 && options.yield_between_builders {
            std::thread::yield_now();
        }
        let before = failures.len();
        kind.run(root, environment, failures, options);
        debug!(
            builder = kind.as_str(),
            failures = failures.len() - before,
            "builder walk complete"
        );
    }
    Ok(())
}
