//! Single-output identity pipe

use crate::error::{PipeError, Result};
use crate::fitting::{write_to, Fitting, SharedFitting};
use crate::message::PipeMessage;
use tracing::debug;

/// Directed connector with at most one output
#[derive(Default)]
pub struct Pipe {
    output: Option<SharedFitting>,
}

impl Pipe {
    pub fn new() -> Self {
        Self { output: None }
    }

    /// Create a pipe already connected to `output`
    pub fn with_output(output: SharedFitting) -> Self {
        Self {
            output: Some(output),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.output.is_some()
    }
}

impl Fitting for Pipe {
    fn write(&mut self, message: PipeMessage) -> Result<()> {
        match &self.output {
            Some(output) => write_to(output, message),
            None => {
                debug!(
                    message.kind = message.message_type(),
                    "Dropped message at unconnected pipe"
                );
                Err(PipeError::NotConnected)
            }
        }
    }

    fn connect(&mut self, output: SharedFitting) -> Result<()> {
        if self.output.is_some() {
            return Err(PipeError::AlreadyConnected);
        }
        self.output = Some(output);
        Ok(())
    }

    fn disconnect(&mut self) -> Option<SharedFitting> {
        self.output.take()
    }
}
