//! Junction mediator: feeds host notifications into a junction

use crate::config::MediatorConfig;
use crate::handler::PipeMessageHandler;
use crate::notification::Notification;
use pipeworks_core::{Junction, PipeDirection, PipeMessage, Result, SharedFitting};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info};

/// Implemented by anything that can be handed pipes to communicate over
pub trait PipeAware {
    fn accept_input_pipe(&mut self, name: &str, pipe: SharedFitting) -> Result<()>;
    fn accept_output_pipe(&mut self, name: &str, pipe: SharedFitting) -> Result<()>;
}

/// Owns a junction and registers the pipes the host announces.
///
/// Output pipes get the mediator's handler attached as a listener, so every
/// message leaving through them reaches the host.
pub struct JunctionMediator<H> {
    name: String,
    config: MediatorConfig,
    junction: Junction,
    handler: Rc<RefCell<H>>,
}

impl<H: PipeMessageHandler + 'static> JunctionMediator<H> {
    pub fn new(name: impl Into<String>, config: MediatorConfig, handler: Rc<RefCell<H>>) -> Self {
        Self {
            name: name.into(),
            config,
            junction: Junction::new(),
            handler,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn junction(&self) -> &Junction {
        &self.junction
    }

    pub fn junction_mut(&mut self) -> &mut Junction {
        &mut self.junction
    }

    pub fn handler(&self) -> &Rc<RefCell<H>> {
        &self.handler
    }

    /// Notification names this mediator wants to receive
    pub fn list_notification_interests(&self) -> Vec<String> {
        vec![
            self.config.accept_input_pipe.clone(),
            self.config.accept_output_pipe.clone(),
        ]
    }

    /// Dispatch a host notification; names outside the interests are ignored
    pub fn handle_notification(&mut self, note: &Notification) -> Result<()> {
        if note.name == self.config.accept_input_pipe {
            self.accept_input_pipe(&note.pipe_name, note.pipe.clone())
        } else if note.name == self.config.accept_output_pipe {
            self.accept_output_pipe(&note.pipe_name, note.pipe.clone())
        } else {
            debug!(mediator = %self.name, notification = %note.name, "Ignoring notification");
            Ok(())
        }
    }

    pub fn send_message(&self, input_pipe_name: &str, message: PipeMessage) -> Result<()> {
        self.junction.send_message(input_pipe_name, message)
    }
}

impl<H: PipeMessageHandler + 'static> PipeAware for JunctionMediator<H> {
    fn accept_input_pipe(&mut self, name: &str, pipe: SharedFitting) -> Result<()> {
        self.junction
            .register_pipe(name, PipeDirection::Input, pipe)?;
        info!(mediator = %self.name, pipe = %name, "Accepted input pipe");
        Ok(())
    }

    fn accept_output_pipe(&mut self, name: &str, pipe: SharedFitting) -> Result<()> {
        self.junction
            .register_pipe(name, PipeDirection::Output, pipe)?;
        self.junction.add_pipe_listener(
            name,
            self.handler.clone(),
            |handler: &mut H, message| handler.handle_pipe_message(message),
        )?;
        info!(mediator = %self.name, pipe = %name, "Accepted output pipe");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pipeworks_core::{shared, Message, Pipe, PipeError};

    fn mediator() -> JunctionMediator<Vec<PipeMessage>> {
        JunctionMediator::new(
            "shell",
            MediatorConfig::default(),
            Rc::new(RefCell::new(Vec::new())),
        )
    }

    #[test]
    fn test_interests() {
        let mediator = mediator();
        assert_eq!(
            mediator.list_notification_interests(),
            vec!["acceptInputPipe", "acceptOutputPipe"]
        );
        assert_eq!(mediator.name(), "shell");
    }

    #[test]
    fn test_accept_input_pipe_registers() {
        let mut mediator = mediator();
        let pipe: SharedFitting = shared(Pipe::new());
        mediator
            .handle_notification(&Notification::new("acceptInputPipe", "to-logger", pipe))
            .unwrap();

        assert!(mediator.junction().has_input_pipe("to-logger"));
        assert_eq!(mediator.junction().listener_count("to-logger"), 0);
    }

    #[test]
    fn test_accept_output_pipe_listens() {
        let mut mediator = mediator();
        let pipe: SharedFitting = shared(Pipe::new());
        mediator
            .handle_notification(&Notification::new(
                "acceptOutputPipe",
                "from-logger",
                pipe.clone(),
            ))
            .unwrap();

        assert!(mediator.junction().has_output_pipe("from-logger"));
        pipe.borrow_mut().write(Message::new("log line").into()).unwrap();

        let inbox = mediator.handler().borrow();
        assert_eq!(inbox.len(), 1);
        assert_eq!(inbox[0].as_data().unwrap().body, "log line");
    }

    #[test]
    fn test_removed_output_pipe_stops_reaching_handler() {
        let mut mediator = mediator();
        let pipe: SharedFitting = shared(Pipe::new());
        mediator
            .accept_output_pipe("from-logger", pipe.clone())
            .unwrap();

        assert!(mediator
            .junction_mut()
            .remove_pipe("from-logger")
            .unwrap()
            .is_some());
        assert!(pipe.borrow_mut().write(Message::new("late").into()).is_err());
        assert!(mediator.handler().borrow().is_empty());

        // the host may announce the same pipe again
        mediator
            .accept_output_pipe("from-logger", pipe.clone())
            .unwrap();
        pipe.borrow_mut().write(Message::new("back").into()).unwrap();
        assert_eq!(mediator.handler().borrow().len(), 1);
    }

    #[test]
    fn test_unknown_notification_ignored() {
        let mut mediator = mediator();
        let pipe: SharedFitting = shared(Pipe::new());
        mediator
            .handle_notification(&Notification::new("somethingElse", "p", pipe))
            .unwrap();
        assert!(mediator.junction().is_empty());
    }

    #[test]
    fn test_duplicate_announcement_fails() {
        let mut mediator = mediator();
        mediator
            .accept_input_pipe("p", shared(Pipe::new()))
            .unwrap();
        let result = mediator.accept_output_pipe("p", shared(Pipe::new()));
        assert!(matches!(result, Err(PipeError::DuplicatePipe(_))));
    }
}
