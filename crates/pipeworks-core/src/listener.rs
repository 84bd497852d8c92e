//! Terminal fitting that hands messages to a callback

use crate::error::{PipeError, Result};
use crate::fitting::{Fitting, SharedFitting};
use crate::message::PipeMessage;
use std::cell::RefCell;
use std::rc::Rc;

/// Final recipient of a pipeline.
///
/// The callback receives the listener's context explicitly instead of
/// capturing it, so the caller keeps a handle to the same context.
pub struct PipeListener<C> {
    context: Rc<RefCell<C>>,
    callback: Box<dyn FnMut(&mut C, PipeMessage)>,
}

impl<C> PipeListener<C> {
    pub fn new(
        context: Rc<RefCell<C>>,
        callback: impl FnMut(&mut C, PipeMessage) + 'static,
    ) -> Self {
        Self {
            context,
            callback: Box::new(callback),
        }
    }

    pub fn context(&self) -> &Rc<RefCell<C>> {
        &self.context
    }
}

impl<C> Fitting for PipeListener<C> {
    fn write(&mut self, message: PipeMessage) -> Result<()> {
        let mut context = self
            .context
            .try_borrow_mut()
            .map_err(|_| PipeError::Reentrant)?;
        (self.callback)(&mut *context, message);
        Ok(())
    }

    /// Nothing can follow a listener
    fn connect(&mut self, _output: SharedFitting) -> Result<()> {
        Err(PipeError::TerminalFitting)
    }

    fn disconnect(&mut self) -> Option<SharedFitting> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitting::shared;
    use crate::message::{Message, QueueControlMessage};
    use crate::pipe::Pipe;

    #[derive(Default)]
    struct Counter {
        data: usize,
        control: usize,
    }

    #[test]
    fn test_listener_receives_with_context() {
        let counter = Rc::new(RefCell::new(Counter::default()));
        let mut listener = PipeListener::new(counter.clone(), |c: &mut Counter, m| {
            if m.is_control() {
                c.control += 1;
            } else {
                c.data += 1;
            }
        });

        listener.write(Message::new("a").into()).unwrap();
        listener.write(Message::new("b").into()).unwrap();
        listener.write(QueueControlMessage::flush().into()).unwrap();

        assert_eq!(counter.borrow().data, 2);
        assert_eq!(counter.borrow().control, 1);
        assert!(Rc::ptr_eq(listener.context(), &counter));
    }

    #[test]
    fn test_listener_is_terminal() {
        let context = Rc::new(RefCell::new(()));
        let mut listener = PipeListener::new(context, |_, _| {});

        let next: SharedFitting = shared(Pipe::new());
        assert!(matches!(
            listener.connect(next),
            Err(PipeError::TerminalFitting)
        ));
        assert!(listener.disconnect().is_none());
    }

    #[test]
    fn test_borrowed_context_reports_reentrant() {
        let context = Rc::new(RefCell::new(0usize));
        let mut listener = PipeListener::new(context.clone(), |n: &mut usize, _| *n += 1);

        let _held = context.borrow_mut();
        let result = listener.write(Message::new("x").into());
        assert!(matches!(result, Err(PipeError::Reentrant)));
    }
}
