//! Messages carried through the fitting graph
//!
//! A [`PipeMessage`] is either application data or a control message that
//! reconfigures a filter or queue on its way through the pipes.

use crate::config::PipesConfig;
use crate::types::Priority;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::rc::Rc;

/// Filter transform: mutates the message in place using the filter's params
pub type Transform = Rc<dyn Fn(&mut Message, &Value) -> anyhow::Result<()>>;

/// Wrap a closure as a [`Transform`]
pub fn transform<F>(f: F) -> Transform
where
    F: Fn(&mut Message, &Value) -> anyhow::Result<()> + 'static,
{
    Rc::new(f)
}

/// Application data message
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub header: Value,
    #[serde(default)]
    pub body: Value,
    #[serde(default)]
    pub priority: Priority,
}

impl Message {
    pub const TYPE: &'static str = "pipeworks/message/normal";

    pub fn new(body: impl Into<Value>) -> Self {
        Self {
            header: Value::Null,
            body: body.into(),
            priority: Priority::default(),
        }
    }

    /// Message with the configured default priority
    pub fn from_config(config: &PipesConfig, body: impl Into<Value>) -> Self {
        Self::new(body).with_priority(config.default_priority)
    }

    pub fn with_header(mut self, header: impl Into<Value>) -> Self {
        self.header = header.into();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }
}

/// Filter control actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterAction {
    #[serde(rename = "SET_FILTER")]
    SetFilter,
    #[serde(rename = "SET_PARAMS")]
    SetParams,
    #[serde(rename = "BYPASS")]
    Bypass,
    #[serde(rename = "FILTER")]
    Filter,
}

impl FilterAction {
    pub fn type_tag(self) -> &'static str {
        match self {
            FilterAction::SetFilter => FilterControlMessage::SET_FILTER,
            FilterAction::SetParams => FilterControlMessage::SET_PARAMS,
            FilterAction::Bypass => FilterControlMessage::BYPASS,
            FilterAction::Filter => FilterControlMessage::FILTER,
        }
    }
}

/// Control message addressed to a named filter
#[derive(Clone)]
pub struct FilterControlMessage {
    pub action: FilterAction,
    pub name: String,
    pub filter: Option<Transform>,
    pub params: Option<Value>,
    pub priority: Priority,
}

impl FilterControlMessage {
    pub const BASE: &'static str = "pipeworks/message/filter/";
    pub const SET_FILTER: &'static str = "pipeworks/message/filter/setfilter";
    pub const SET_PARAMS: &'static str = "pipeworks/message/filter/setparams";
    pub const BYPASS: &'static str = "pipeworks/message/filter/bypass";
    pub const FILTER: &'static str = "pipeworks/message/filter/filter";

    pub fn new(action: FilterAction, name: impl Into<String>) -> Self {
        Self {
            action,
            name: name.into(),
            filter: None,
            params: None,
            priority: Priority::default(),
        }
    }

    /// Position among buffered messages in a sorting queue
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn set_filter(name: impl Into<String>, filter: Transform) -> Self {
        Self {
            filter: Some(filter),
            ..Self::new(FilterAction::SetFilter, name)
        }
    }

    pub fn set_params(name: impl Into<String>, params: impl Into<Value>) -> Self {
        Self {
            params: Some(params.into()),
            ..Self::new(FilterAction::SetParams, name)
        }
    }

    pub fn bypass(name: impl Into<String>) -> Self {
        Self::new(FilterAction::Bypass, name)
    }

    pub fn filter(name: impl Into<String>) -> Self {
        Self::new(FilterAction::Filter, name)
    }
}

impl fmt::Debug for FilterControlMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterControlMessage")
            .field("action", &self.action)
            .field("name", &self.name)
            .field("filter", &self.filter.as_ref().map(|_| "<transform>"))
            .field("params", &self.params)
            .field("priority", &self.priority)
            .finish()
    }
}

/// Queue control actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueueAction {
    #[serde(rename = "FLUSH")]
    Flush,
    #[serde(rename = "SORT")]
    Sort,
    #[serde(rename = "FIFO")]
    Fifo,
}

/// Control message for whichever queue receives it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueControlMessage {
    pub action: QueueAction,
    #[serde(default)]
    pub priority: Priority,
}

impl QueueControlMessage {
    pub const BASE: &'static str = "pipeworks/message/queue/";
    pub const FLUSH: &'static str = "pipeworks/message/queue/flush";
    pub const SORT: &'static str = "pipeworks/message/queue/sort";
    pub const FIFO: &'static str = "pipeworks/message/queue/fifo";

    pub fn new(action: QueueAction) -> Self {
        Self {
            action,
            priority: Priority::default(),
        }
    }

    pub fn flush() -> Self {
        Self::new(QueueAction::Flush)
    }

    pub fn sort() -> Self {
        Self::new(QueueAction::Sort)
    }

    pub fn fifo() -> Self {
        Self::new(QueueAction::Fifo)
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn type_tag(&self) -> &'static str {
        match self.action {
            QueueAction::Flush => Self::FLUSH,
            QueueAction::Sort => Self::SORT,
            QueueAction::Fifo => Self::FIFO,
        }
    }
}

/// Anything that travels through a pipe
#[derive(Debug, Clone)]
pub enum PipeMessage {
    Data(Message),
    FilterControl(FilterControlMessage),
    QueueControl(QueueControlMessage),
}

impl PipeMessage {
    /// Type tag discriminating data from control subtypes
    pub fn message_type(&self) -> &'static str {
        match self {
            PipeMessage::Data(_) => Message::TYPE,
            PipeMessage::FilterControl(control) => control.action.type_tag(),
            PipeMessage::QueueControl(control) => control.type_tag(),
        }
    }

    /// Sort key used by a queue in SORT mode
    pub fn priority(&self) -> Priority {
        match self {
            PipeMessage::Data(message) => message.priority,
            PipeMessage::FilterControl(control) => control.priority,
            PipeMessage::QueueControl(control) => control.priority,
        }
    }

    pub fn is_control(&self) -> bool {
        !matches!(self, PipeMessage::Data(_))
    }

    pub fn as_data(&self) -> Option<&Message> {
        match self {
            PipeMessage::Data(message) => Some(message),
            _ => None,
        }
    }

    pub fn into_data(self) -> Option<Message> {
        match self {
            PipeMessage::Data(message) => Some(message),
            _ => None,
        }
    }
}

impl From<Message> for PipeMessage {
    fn from(message: Message) -> Self {
        PipeMessage::Data(message)
    }
}

impl From<FilterControlMessage> for PipeMessage {
    fn from(message: FilterControlMessage) -> Self {
        PipeMessage::FilterControl(message)
    }
}

impl From<QueueControlMessage> for PipeMessage {
    fn from(message: QueueControlMessage) -> Self {
        PipeMessage::QueueControl(message)
    }
}
