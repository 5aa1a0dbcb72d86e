//! In-flight builder state.

use crate::error::BuildError;

/// Something being built: nothing yet, or an open value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Ongoing<T> {
    Idle,
    Open(T),
}

impl<T> Default for Ongoing<T> {
    fn default() -> Self {
        Ongoing::Idle
    }
}

impl<T> Ongoing<T> {
    pub fn open(&mut self, value: T) {
        *self = Ongoing::Open(value);
    }

    /// Return the open value, leaving `Idle` behind.
    pub fn take(&mut self) -> Option<T> {
        match std::mem::replace(self, Ongoing::Idle) {
            Ongoing::Open(value) => Some(value),
            Ongoing::Idle => None,
        }
    }

    pub fn reset(&mut self) {
        *self = Ongoing::Idle;
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Ongoing::Open(_))
    }

    pub fn as_open(&self) -> Option<&T> {
        match self {
            Ongoing::Open(value) => Some(value),
            Ongoing::Idle => None,
        }
    }

    pub fn as_open_mut(&mut self) -> Option<&mut T> {
        match self {
            Ongoing::Open(value) => Some(value),
            Ongoing::Idle => None,
        }
    }

    /// The open value, or `error` when idle.
    pub fn require(&self, error: BuildError) -> Result<&T, BuildError> {
        self.as_open().ok_or(error)
    }
}

/// Owner-side bookkeeping deferred until the open property is finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PendingAction {
    /// Record the property in the owner's identity properties.
    MarkIdentity,
    /// Record the property in the owner's queryable fields.
    MarkQueryable,
}
