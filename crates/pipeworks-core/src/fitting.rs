//! The fitting trait shared by every plumbing component

use crate::error::{PipeError, Result};
use crate::message::PipeMessage;
use std::cell::RefCell;
use std::rc::Rc;

/// Shared handle to a fitting in the graph
pub type SharedFitting = Rc<RefCell<dyn Fitting>>;

/// Anything that can receive a message and pass it on
pub trait Fitting {
    /// Deliver a message to this fitting
    fn write(&mut self, message: PipeMessage) -> Result<()>;

    /// Attach an output
    fn connect(&mut self, output: SharedFitting) -> Result<()>;

    /// Detach and return the output, if any
    fn disconnect(&mut self) -> Option<SharedFitting>;

    /// Detach `target` only if it is connected here
    fn disconnect_fitting(&mut self, target: &SharedFitting) -> Option<SharedFitting> {
        let output = self.disconnect()?;
        if same_fitting(&output, target) {
            return Some(output);
        }
        // not ours: put it back where it was
        self.connect(output).ok()?;
        None
    }
}

/// Wrap a fitting in a shared handle
pub fn shared<F: Fitting + 'static>(fitting: F) -> Rc<RefCell<F>> {
    Rc::new(RefCell::new(fitting))
}

/// Whether two handles point at the same fitting
pub fn same_fitting(a: &SharedFitting, b: &SharedFitting) -> bool {
    std::ptr::eq(Rc::as_ptr(a) as *const (), Rc::as_ptr(b) as *const ())
}

/// Write into a shared fitting, failing instead of panicking when it is
/// already mid-write further up the call stack.
pub(crate) fn write_to(output: &SharedFitting, message: PipeMessage) -> Result<()> {
    output
        .try_borrow_mut()
        .map_err(|_| PipeError::Reentrant)?
        .write(message)
}
