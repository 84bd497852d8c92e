//! Binds a pipe junction to a host application's notifications

pub mod config;
pub mod handler;
pub mod mediator;
pub mod notification;

pub use config::MediatorConfig;
pub use handler::PipeMessageHandler;
pub use mediator::{JunctionMediator, PipeAware};
pub use notification::Notification;
