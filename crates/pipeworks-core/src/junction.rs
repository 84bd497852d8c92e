//! Named pipe registry and routing facade
//!
//! A [`Junction`] holds the pipes of one module by name. Messages are sent
//! into INPUT pipes; listeners are attached to OUTPUT pipes. Names are unique
//! across both directions.

use crate::error::{PipeError, Result};
use crate::fitting::{shared, write_to, Fitting, SharedFitting};
use crate::listener::PipeListener;
use crate::message::PipeMessage;
use crate::tee::TeeSplit;
use crate::types::PipeDirection;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use tracing::{debug, warn};

/// Listeners bound to one output pipe, fed through a shared tee
struct ListenerBinding {
    sink: Rc<RefCell<TeeSplit>>,
    listeners: Vec<SharedFitting>,
}

#[derive(Default)]
pub struct Junction {
    pipes: HashMap<String, SharedFitting>,
    pipe_types: HashMap<String, PipeDirection>,
    input_pipes: Vec<String>,
    output_pipes: Vec<String>,
    listeners: HashMap<String, ListenerBinding>,
}

impl Junction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pipe under a unique name
    pub fn register_pipe(
        &mut self,
        name: impl Into<String>,
        direction: PipeDirection,
        pipe: SharedFitting,
    ) -> Result<()> {
        let name = name.into();
        if self.pipes.contains_key(&name) {
            return Err(PipeError::DuplicatePipe(name));
        }

        match direction {
            PipeDirection::Input => self.input_pipes.push(name.clone()),
            PipeDirection::Output => self.output_pipes.push(name.clone()),
        }
        self.pipe_types.insert(name.clone(), direction);
        debug!(pipe = %name, %direction, "Registered pipe");
        self.pipes.insert(name, pipe);
        Ok(())
    }

    pub fn has_pipe(&self, name: &str) -> bool {
        self.pipes.contains_key(name)
    }

    pub fn has_input_pipe(&self, name: &str) -> bool {
        self.pipe_types.get(name) == Some(&PipeDirection::Input)
    }

    pub fn has_output_pipe(&self, name: &str) -> bool {
        self.pipe_types.get(name) == Some(&PipeDirection::Output)
    }

    /// Unregister a pipe and detach its listeners.
    ///
    /// The internal listener tee is unplugged from the pipe so the same
    /// fitting can be registered and listened to again. Connections upstream
    /// of the pipe are left alone. Fails with `Reentrant`, changing nothing,
    /// if the pipe or its listeners are mid-write.
    pub fn remove_pipe(&mut self, name: &str) -> Result<Option<SharedFitting>> {
        let Some(pipe) = self.pipes.get(name).cloned() else {
            return Ok(None);
        };

        if let Some(binding) = self.listeners.get(name) {
            let mut sink = binding
                .sink
                .try_borrow_mut()
                .map_err(|_| PipeError::Reentrant)?;
            let mut upstream = pipe.try_borrow_mut().map_err(|_| {
                warn!(pipe = %name, "Pipe busy, not removed");
                PipeError::Reentrant
            })?;
            for listener in &binding.listeners {
                sink.disconnect_fitting(listener);
            }
            let sink_handle: SharedFitting = binding.sink.clone();
            upstream.disconnect_fitting(&sink_handle);
        }
        self.listeners.remove(name);

        self.pipes.remove(name);
        match self.pipe_types.remove(name) {
            Some(PipeDirection::Input) => self.input_pipes.retain(|n| n != name),
            Some(PipeDirection::Output) => self.output_pipes.retain(|n| n != name),
            None => {}
        }

        debug!(pipe = %name, "Removed pipe");
        Ok(Some(pipe))
    }

    pub fn retrieve_pipe(&self, name: &str) -> Option<SharedFitting> {
        self.pipes.get(name).cloned()
    }

    /// Attach a terminal listener to an OUTPUT pipe.
    ///
    /// Several listeners on one pipe receive each message in the order they
    /// were added.
    pub fn add_pipe_listener<C: 'static>(
        &mut self,
        output_pipe_name: &str,
        context: Rc<RefCell<C>>,
        callback: impl FnMut(&mut C, PipeMessage) + 'static,
    ) -> Result<()> {
        let pipe = self
            .expect_direction(output_pipe_name, PipeDirection::Output)?
            .clone();
        let listener: SharedFitting = shared(PipeListener::new(context, callback));

        if let Some(binding) = self.listeners.get_mut(output_pipe_name) {
            binding
                .sink
                .try_borrow_mut()
                .map_err(|_| PipeError::Reentrant)?
                .connect(listener.clone())?;
            binding.listeners.push(listener);
        } else {
            let sink = shared(TeeSplit::with_outputs(vec![listener.clone()]));
            pipe.try_borrow_mut()
                .map_err(|_| PipeError::Reentrant)?
                .connect(sink.clone())?;
            self.listeners.insert(
                output_pipe_name.to_string(),
                ListenerBinding {
                    sink,
                    listeners: vec![listener],
                },
            );
        }

        debug!(pipe = %output_pipe_name, "Added pipe listener");
        Ok(())
    }

    /// Write a message into a named INPUT pipe
    pub fn send_message(&self, input_pipe_name: &str, message: PipeMessage) -> Result<()> {
        let pipe = self.expect_direction(input_pipe_name, PipeDirection::Input)?;
        write_to(pipe, message)
    }

    /// INPUT pipe names in registration order
    pub fn input_pipe_names(&self) -> &[String] {
        &self.input_pipes
    }

    /// OUTPUT pipe names in registration order
    pub fn output_pipe_names(&self) -> &[String] {
        &self.output_pipes
    }

    pub fn listener_count(&self, name: &str) -> usize {
        self.listeners
            .get(name)
            .map(|binding| binding.listeners.len())
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.pipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pipes.is_empty()
    }

    fn expect_direction(&self, name: &str, expected: PipeDirection) -> Result<&SharedFitting> {
        let pipe = self
            .pipes
            .get(name)
            .ok_or_else(|| PipeError::UnknownPipe(name.to_string()))?;
        if self.pipe_types.get(name) != Some(&expected) {
            return Err(PipeError::WrongDirection {
                name: name.to_string(),
                expected,
            });
        }
        Ok(pipe)
    }
}
