//! Validation failures: non-fatal diagnostics raised while building.
//!
//! Builders never stop on a semantic problem. They append a
//! [`ValidationFailure`] to the list shared by every builder of a build and
//! keep walking; reporting is left to the caller.

use std::fmt;

use smol_str::SmolStr;

use crate::base::SourceLocation;

// ============================================================================
// FAILURE TYPES
// ============================================================================

/// Category of a validation failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

/// A diagnostic attached to the declaration that caused it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationFailure {
    /// Name of the builder that raised it, see [`validators`].
    pub validator_name: SmolStr,
    pub category: Severity,
    pub message: String,
    pub source_location: SourceLocation,
}

impl ValidationFailure {
    /// Create an error-category failure.
    pub fn error(
        validator_name: &str,
        message: impl Into<String>,
        source_location: SourceLocation,
    ) -> Self {
        Self {
            validator_name: SmolStr::new(validator_name),
            category: Severity::Error,
            message: message.into(),
            source_location,
        }
    }

    /// Create a warning-category failure.
    pub fn warning(
        validator_name: &str,
        message: impl Into<String>,
        source_location: SourceLocation,
    ) -> Self {
        Self {
            category: Severity::Warning,
            ..Self::error(validator_name, message, source_location)
        }
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {}: {}",
            self.category.as_str(),
            self.validator_name,
            self.source_location,
            self.message
        )
    }
}

// ============================================================================
// VALIDATOR NAMES
// ============================================================================

/// Names builders stamp on the failures they raise.
pub mod validators {
    pub const TOP_LEVEL_ENTITY_BUILDER: &str = "TopLevelEntityBuilder";
    pub const SHARED_SIMPLE_BUILDER: &str = "SharedSimpleBuilder";
    pub const DOMAIN_BUILDER: &str = "DomainBuilder";
    pub const INTERCHANGE_BUILDER: &str = "InterchangeBuilder";
}
