//! Core plumbing for in-process pipes-and-filters message routing

mod config;
mod error;
mod filter;
mod fitting;
mod junction;
mod listener;
mod message;
mod pipe;
mod queue;
mod tee;
mod types;

#[cfg(test)]
mod test_support;

pub use config::PipesConfig;
pub use error::{PipeError, Result};
pub use filter::Filter;
pub use fitting::{same_fitting, shared, Fitting, SharedFitting};
pub use junction::Junction;
pub use listener::PipeListener;
pub use message::{
    transform, FilterAction, FilterControlMessage, Message, PipeMessage, QueueAction,
    QueueControlMessage, Transform,
};
pub use pipe::Pipe;
pub use queue::Queue;
pub use tee::{TeeMerge, TeeSplit};
pub use types::{FilterMode, PipeDirection, Priority, QueueMode};
