//! Builder integration tests
//!
//! Every test drives the full pipeline through `build_metaed`:
//! - Namespace registration and scoping
//! - Entity commit and duplicate reporting
//! - Property construction, naming and restrictions
//! - Shared simple types, generated simple types, domains and interchanges
//! - Orchestration order and failure accumulation

pub mod tests_entities;
pub mod tests_items;
pub mod tests_orchestration;
pub mod tests_properties;
pub mod tests_shared_simple;
pub mod tests_simple_types;
