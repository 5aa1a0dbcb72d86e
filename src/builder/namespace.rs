//! Namespace registration.
//!
//! A namespace is committed as soon as its type (`core` or an extension
//! code) is known, not at the end of the block, so every later lookup by
//! name in the same walk succeeds.

use smol_str::SmolStr;
use tracing::{debug, trace};

use super::extract;
use super::state::Ongoing;
use crate::config::BuildOptions;
use crate::model::{MetaEdEnvironment, Namespace};
use crate::syntax::{MetaEdListener, ParseNode, Production, TokenKind};

/// Registers namespaces in the environment; the first namespace of a name
/// wins.
pub struct NamespaceBuilder<'a> {
    environment: &'a mut MetaEdEnvironment,
    core_project_name: SmolStr,
    namespace: Ongoing<Namespace>,
}

impl<'a> NamespaceBuilder<'a> {
    pub fn new(environment: &'a mut MetaEdEnvironment, options: &BuildOptions) -> Self {
        Self {
            environment,
            core_project_name: options.core_project_name.clone(),
            namespace: Ongoing::Idle,
        }
    }

    fn entering_namespace(&mut self, node: &ParseNode) {
        if self.namespace.is_open() {
            return;
        }
        self.namespace.open(Namespace::new(node.source_location()));
    }

    fn entering_namespace_name(&mut self, node: &ParseNode) {
        let Some(namespace) = self.namespace.as_open_mut() else {
            return;
        };
        let Some(name) = extract::id_text(node) else {
            return;
        };
        namespace.project_name = capitalize(&name);
        namespace.name = name;
    }

    fn entering_namespace_type(&mut self, node: &ParseNode) {
        let Some(namespace) = self.namespace.as_open_mut() else {
            return;
        };

        if node.valid_text(TokenKind::Core).is_some() {
            namespace.project_extension = SmolStr::default();
            namespace.is_extension = false;
            namespace.project_name = self.core_project_name.clone();
        } else if let Some(extension) = extract::id_text(node) {
            namespace.project_extension = extension;
            namespace.is_extension = true;
        } else {
            return;
        }

        let Some(namespace) = self.namespace.take() else {
            return;
        };
        if self.environment.namespace.contains_key(&namespace.name) {
            debug!(name = %namespace.name, "namespace already registered; keeping the first");
            return;
        }
        trace!(
            name = %namespace.name,
            extension = %namespace.project_extension,
            "namespace committed"
        );
        self.environment.namespace.insert(namespace.name.clone(), namespace);
    }
}

impl MetaEdListener for NamespaceBuilder<'_> {
    fn enter(&mut self, node: &ParseNode) {
        match node.production {
            Production::Namespace => self.entering_namespace(node),
            Production::NamespaceName => self.entering_namespace_name(node),
            Production::NamespaceType => self.entering_namespace_type(node),
            _ => {}
        }
    }

    fn exit(&mut self, node: &ParseNode) {
        if node.production == Production::Namespace {
            self.namespace.reset();
        }
    }
}

/// Provisional project name: the namespace name with its first letter
/// upper-cased.
fn capitalize(name: &str) -> SmolStr {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>().into(),
        None => SmolStr::default(),
    }
}
