//! Host notification carrying a pipe

use pipeworks_core::SharedFitting;
use std::fmt;

/// A host notification announcing a pipe for the mediator's junction
#[derive(Clone)]
pub struct Notification {
    /// Notification name, matched against the mediator's interests
    pub name: String,
    /// Name to register the pipe under
    pub pipe_name: String,
    pub pipe: SharedFitting,
}

impl Notification {
    pub fn new(name: impl Into<String>, pipe_name: impl Into<String>, pipe: SharedFitting) -> Self {
        Self {
            name: name.into(),
            pipe_name: pipe_name.into(),
            pipe,
        }
    }
}

impl fmt::Debug for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notification")
            .field("name", &self.name)
            .field("pipe_name", &self.pipe_name)
            .finish_non_exhaustive()
    }
}
