//! Foundation types for the MetaEd front end.
//!
//! - [`Position`] - Line/column of a token or production
//! - [`SourceLocation`] - Position plus declaring text, stamped on model elements
//!
//! This module has NO dependencies on other metaed modules.

mod position;

pub use position::{Position, SourceLocation};
