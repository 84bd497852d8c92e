//! Named filter that transforms data in transit
//!
//! Filters are reconfigured at runtime by [`FilterControlMessage`]s carrying
//! their name. A control message for another filter passes through untouched
//! so a chain of filters can share one control path.

use crate::error::{PipeError, Result};
use crate::fitting::{Fitting, SharedFitting};
use crate::message::{FilterAction, FilterControlMessage, Message, PipeMessage, Transform};
use crate::pipe::Pipe;
use crate::types::FilterMode;
use serde_json::Value;
use std::fmt;
use tracing::debug;

pub struct Filter {
    name: String,
    mode: FilterMode,
    transform: Option<Transform>,
    params: Value,
    output: Pipe,
}

impl Filter {
    /// Filter with no transform; forwards data unchanged until one is set
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mode: FilterMode::Filter,
            transform: None,
            params: Value::Null,
            output: Pipe::new(),
        }
    }

    pub fn with_transform(name: impl Into<String>, transform: Transform, params: Value) -> Self {
        Self {
            transform: Some(transform),
            params,
            ..Self::new(name)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    pub fn params(&self) -> &Value {
        &self.params
    }

    pub fn set_filter(&mut self, transform: Transform) {
        self.transform = Some(transform);
    }

    pub fn set_params(&mut self, params: Value) {
        self.params = params;
    }

    pub fn set_mode(&mut self, mode: FilterMode) {
        self.mode = mode;
    }

    /// Whether `message` is a filter control addressed to this filter
    pub fn is_target(&self, message: &PipeMessage) -> bool {
        matches!(message, PipeMessage::FilterControl(control) if control.name == self.name)
    }

    fn apply_control(&mut self, control: FilterControlMessage) {
        debug!(filter = %self.name, action = ?control.action, "Applying filter control");
        match control.action {
            FilterAction::SetFilter => self.transform = control.filter,
            FilterAction::SetParams => self.params = control.params.unwrap_or(Value::Null),
            FilterAction::Bypass => self.mode = FilterMode::Bypass,
            FilterAction::Filter => self.mode = FilterMode::Filter,
        }
    }

    fn apply_filter(&self, mut message: Message) -> Result<Message> {
        if self.mode == FilterMode::Bypass {
            return Ok(message);
        }
        if let Some(transform) = &self.transform {
            transform(&mut message, &self.params).map_err(|source| PipeError::Transform {
                filter: self.name.clone(),
                source,
            })?;
        }
        Ok(message)
    }
}

impl Fitting for Filter {
    fn write(&mut self, message: PipeMessage) -> Result<()> {
        match message {
            PipeMessage::FilterControl(control) if control.name == self.name => {
                self.apply_control(control);
                Ok(())
            }
            PipeMessage::Data(data) => {
                let data = self.apply_filter(data)?;
                self.output.write(PipeMessage::Data(data))
            }
            other => self.output.write(other),
        }
    }

    fn connect(&mut self, output: SharedFitting) -> Result<()> {
        self.output.connect(output)
    }

    fn disconnect(&mut self) -> Option<SharedFitting> {
        self.output.disconnect()
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter")
            .field("name", &self.name)
            .field("mode", &self.mode)
            .field("has_transform", &self.transform.is_some())
            .field("params", &self.params)
            .field("connected", &self.output.is_connected())
            .finish()
    }
}
