//! Shared helpers for the builder integration tests.

pub mod model_assertions;
pub mod model_fixtures;
