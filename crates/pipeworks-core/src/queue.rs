//! Buffering queue released on flush

use crate::config::PipesConfig;
use crate::error::{PipeError, Result};
use crate::fitting::{Fitting, SharedFitting};
use crate::message::{PipeMessage, QueueAction};
use crate::pipe::Pipe;
use crate::types::QueueMode;
use std::fmt;
use tracing::{debug, warn};

/// Stores every non-control message until flushed.
///
/// In [`QueueMode::Sort`] a flush releases messages by priority, keeping
/// insertion order between equal priorities. In [`QueueMode::Fifo`] they leave
/// in insertion order.
pub struct Queue {
    mode: QueueMode,
    messages: Vec<PipeMessage>,
    output: Pipe,
}

impl Queue {
    pub fn new() -> Self {
        Self::with_mode(QueueMode::default())
    }

    pub fn with_mode(mode: QueueMode) -> Self {
        Self {
            mode,
            messages: Vec::new(),
            output: Pipe::new(),
        }
    }

    pub fn from_config(config: &PipesConfig) -> Self {
        Self::with_mode(config.default_queue_mode)
    }

    pub fn mode(&self) -> QueueMode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Buffer a message without forwarding it
    pub fn store(&mut self, message: PipeMessage) {
        self.messages.push(message);
    }

    /// Release every buffered message downstream.
    ///
    /// Without an output the buffer is kept for a later retry. Otherwise every
    /// message is written even if some writes fail, the buffer is cleared, and
    /// the failures are reported together.
    pub fn flush(&mut self) -> Result<()> {
        if self.messages.is_empty() {
            return Ok(());
        }
        if !self.output.is_connected() {
            warn!(count = self.messages.len(), "Queue flush with no output");
            return Err(PipeError::NotConnected);
        }

        if self.mode == QueueMode::Sort {
            // stable: equal priorities keep insertion order
            self.messages.sort_by_key(|m| m.priority());
        }

        let pending = std::mem::take(&mut self.messages);
        let total = pending.len();
        let mut failed = 0;
        for message in pending {
            if let Err(err) = self.output.write(message) {
                debug!(error = %err, "Queue flush write failed");
                failed += 1;
            }
        }

        debug!(count = total, failed, mode = ?self.mode, "Flushed queue");
        if failed > 0 {
            warn!(failed, total, "Queue flush partially delivered");
            return Err(PipeError::PartialDelivery { failed, total });
        }
        Ok(())
    }
}

impl Default for Queue {
    fn default() -> Self {
        Self::new()
    }
}

impl Fitting for Queue {
    fn write(&mut self, message: PipeMessage) -> Result<()> {
        match message {
            PipeMessage::QueueControl(control) => match control.action {
                QueueAction::Flush => self.flush(),
                QueueAction::Sort => {
                    self.mode = QueueMode::Sort;
                    Ok(())
                }
                QueueAction::Fifo => {
                    self.mode = QueueMode::Fifo;
                    Ok(())
                }
            },
            other => {
                self.store(other);
                Ok(())
            }
        }
    }

    fn connect(&mut self, output: SharedFitting) -> Result<()> {
        self.output.connect(output)
    }

    fn disconnect(&mut self) -> Option<SharedFitting> {
        self.output.disconnect()
    }
}

impl fmt::Debug for Queue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Queue")
            .field("mode", &self.mode)
            .field("len", &self.messages.len())
            .field("connected", &self.output.is_connected())
            .finish()
    }
}
