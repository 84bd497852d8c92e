//! Error types for pipe plumbing

use crate::types::PipeDirection;

/// Topology and routing failures reported by fittings and junctions
#[derive(Debug, thiserror::Error)]
pub enum PipeError {
    #[error("fitting already has an output connected")]
    AlreadyConnected,

    #[error("terminal fitting cannot be connected to an output")]
    TerminalFitting,

    #[error("no output connected")]
    NotConnected,

    #[error("pipe '{0}' is already registered")]
    DuplicatePipe(String),

    #[error("no pipe registered as '{0}'")]
    UnknownPipe(String),

    #[error("pipe '{name}' is not an {expected} pipe")]
    WrongDirection {
        name: String,
        expected: PipeDirection,
    },

    #[error("delivery failed on {failed} of {total} writes")]
    PartialDelivery { failed: usize, total: usize },

    #[error("filter '{filter}' failed to transform message")]
    Transform {
        filter: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("fitting is already handling a write")]
    Reentrant,
}

pub type Result<T> = std::result::Result<T, PipeError>;
