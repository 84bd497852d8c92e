//! Fixtures shared by unit tests

use crate::fitting::{shared, SharedFitting};
use crate::listener::PipeListener;
use crate::message::PipeMessage;
use std::cell::RefCell;
use std::rc::Rc;

pub type Received = Rc<RefCell<Vec<PipeMessage>>>;

/// Terminal fitting that records every message it receives
pub fn collector() -> (Received, SharedFitting) {
    let received: Received = Rc::new(RefCell::new(Vec::new()));
    let listener = PipeListener::new(received.clone(), |seen: &mut Vec<PipeMessage>, message| {
        seen.push(message)
    });
    let sink: SharedFitting = shared(listener);
    (received, sink)
}

/// Bodies of the data messages received, as strings
pub fn bodies(received: &Received) -> Vec<String> {
    received
        .borrow()
        .iter()
        .filter_map(|m| m.as_data())
        .map(|m| m.body.as_str().unwrap_or_default().to_string())
        .collect()
}
