//! Build configuration.

use smol_str::SmolStr;

/// Options for [`crate::builder::build_metaed`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildOptions {
    /// Project name given to core namespaces.
    pub core_project_name: SmolStr,
    /// Yield the thread between builder walks.
    pub yield_between_builders: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            core_project_name: SmolStr::new_static("Ed-Fi"),
            yield_between_builders: true,
        }
    }
}

impl BuildOptions {
    pub fn with_core_project_name(mut self, name: impl Into<SmolStr>) -> Self {
        self.core_project_name = name.into();
        self
    }

    pub fn with_yield_between_builders(mut self, enabled: bool) -> Self {
        self.yield_between_builders = enabled;
        self
    }
}
