//! Error types for builder misuse.
//!
//! Problems in the model never surface here; they become
//! [`crate::diagnostics::ValidationFailure`]s.

use thiserror::Error;

use crate::syntax::Production;

/// Errors raised when the builders are driven incorrectly.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    /// An entity operation ran while no entity was being built.
    #[error("{operation} requires an open entity")]
    NoEntityOpen { operation: &'static str },

    /// A property operation ran while no property was being built.
    #[error("{operation} requires an open property")]
    NoPropertyOpen { operation: &'static str },

    /// The tree handed to the orchestrator is not a whole MetaEd document.
    #[error("expected a metaEd root production, found {found:?}")]
    UnexpectedRoot { found: Production },
}

impl BuildError {
    pub fn no_entity(operation: &'static str) -> Self {
        Self::NoEntityOpen { operation }
    }

    pub fn no_property(operation: &'static str) -> Self {
        Self::NoPropertyOpen { operation }
    }
}
