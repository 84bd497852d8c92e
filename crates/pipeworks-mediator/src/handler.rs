//! Receiver for messages arriving on a mediator's output pipes

use pipeworks_core::PipeMessage;

/// Host-side consumer of pipe messages
pub trait PipeMessageHandler {
    fn handle_pipe_message(&mut self, message: PipeMessage);
}

/// Collects every message, in arrival order
impl PipeMessageHandler for Vec<PipeMessage> {
    fn handle_pipe_message(&mut self, message: PipeMessage) {
        self.push(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pipeworks_core::{Message, QueueControlMessage};

    #[test]
    fn test_vec_handler_collects_in_order() {
        let mut inbox: Vec<PipeMessage> = Vec::new();
        inbox.handle_pipe_message(Message::new("first").into());
        inbox.handle_pipe_message(QueueControlMessage::flush().into());

        assert_eq!(inbox.len(), 2);
        assert!(inbox[0].as_data().is_some());
        assert!(inbox[1].is_control());
    }
}
