//! Fan-out and fan-in tees

use crate::error::{PipeError, Result};
use crate::fitting::{same_fitting, shared, write_to, Fitting, SharedFitting};
use crate::message::PipeMessage;
use crate::pipe::Pipe;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, warn};

/// Broadcasts each message to every output in connection order
#[derive(Default)]
pub struct TeeSplit {
    outputs: Vec<SharedFitting>,
}

impl TeeSplit {
    pub fn new() -> Self {
        Self {
            outputs: Vec::new(),
        }
    }

    pub fn with_outputs(outputs: Vec<SharedFitting>) -> Self {
        Self { outputs }
    }

    pub fn outputs_len(&self) -> usize {
        self.outputs.len()
    }
}

impl Fitting for TeeSplit {
    /// Every output gets the message even if an earlier one failed; branches
    /// that already received it are not rolled back.
    fn write(&mut self, message: PipeMessage) -> Result<()> {
        if self.outputs.is_empty() {
            return Err(PipeError::NotConnected);
        }

        let total = self.outputs.len();
        let mut failed = 0;
        for output in &self.outputs {
            if let Err(err) = write_to(output, message.clone()) {
                debug!(error = %err, "Tee branch write failed");
                failed += 1;
            }
        }

        if failed > 0 {
            warn!(failed, total, "Tee split partially delivered");
            return Err(PipeError::PartialDelivery { failed, total });
        }
        Ok(())
    }

    /// Always succeeds; outputs accumulate
    fn connect(&mut self, output: SharedFitting) -> Result<()> {
        self.outputs.push(output);
        Ok(())
    }

    /// Detach the first connected output
    fn disconnect(&mut self) -> Option<SharedFitting> {
        if self.outputs.is_empty() {
            None
        } else {
            Some(self.outputs.remove(0))
        }
    }

    /// Detach a specific output, leaving the others in order
    fn disconnect_fitting(&mut self, target: &SharedFitting) -> Option<SharedFitting> {
        let index = self
            .outputs
            .iter()
            .position(|output| same_fitting(output, target))?;
        Some(self.outputs.remove(index))
    }
}

/// Merges any number of inputs into one shared output.
///
/// Each input is connected to its own inlet pipe, and every inlet terminates
/// in the same outlet. Messages leave in the order they were written.
pub struct TeeMerge {
    outlet: Rc<RefCell<Pipe>>,
    inlets: Vec<Rc<RefCell<Pipe>>>,
}

impl TeeMerge {
    pub fn new() -> Self {
        Self {
            outlet: shared(Pipe::new()),
            inlets: Vec::new(),
        }
    }

    /// Connect `input` so whatever it writes reaches this tee's output
    pub fn connect_input(&mut self, input: SharedFitting) -> Result<()> {
        let inlet = shared(Pipe::with_output(self.outlet.clone()));
        input
            .try_borrow_mut()
            .map_err(|_| PipeError::Reentrant)?
            .connect(inlet.clone())?;
        self.inlets.push(inlet);
        Ok(())
    }

    pub fn inputs_len(&self) -> usize {
        self.inlets.len()
    }
}

impl Default for TeeMerge {
    fn default() -> Self {
        Self::new()
    }
}

impl Fitting for TeeMerge {
    fn write(&mut self, message: PipeMessage) -> Result<()> {
        self.outlet
            .try_borrow_mut()
            .map_err(|_| PipeError::Reentrant)?
            .write(message)
    }

    fn connect(&mut self, output: SharedFitting) -> Result<()> {
        self.outlet
            .try_borrow_mut()
            .map_err(|_| PipeError::Reentrant)?
            .connect(output)
    }

    fn disconnect(&mut self) -> Option<SharedFitting> {
        self.outlet.try_borrow_mut().ok()?.disconnect()
    }
}
