#![allow(dead_code)]

use pipeworks_core::{
    shared, transform, Filter, Fitting, Junction, Pipe, PipeDirection, PipeMessage, Queue,
    QueueMode, SharedFitting, Transform,
};
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;

pub type Heard = Rc<RefCell<Vec<PipeMessage>>>;

pub fn uppercase() -> Transform {
    transform(|message, _params| {
        if let Some(text) = message.body.as_str() {
            message.body = Value::String(text.to_uppercase());
        }
        Ok(())
    })
}

pub fn heard() -> Heard {
    Rc::new(RefCell::new(Vec::new()))
}

pub fn bodies(heard: &Heard) -> Vec<String> {
    heard
        .borrow()
        .iter()
        .filter_map(|m| m.as_data())
        .map(|m| m.body.as_str().unwrap_or_default().to_string())
        .collect()
}

/// Junction wired as `in -> Filter("f") -> Queue -> out`, with a listener on `out`
pub fn sample_junction(transform: Transform, mode: QueueMode) -> (Junction, Heard) {
    let output: SharedFitting = shared(Pipe::new());
    let queue = shared(Queue::with_mode(mode));
    queue.borrow_mut().connect(output.clone()).unwrap();
    let filter = shared(Filter::with_transform("f", transform, Value::Null));
    filter.borrow_mut().connect(queue).unwrap();

    let mut junction = Junction::new();
    junction
        .register_pipe("in", PipeDirection::Input, shared(Pipe::with_output(filter)))
        .unwrap();
    junction
        .register_pipe("out", PipeDirection::Output, output)
        .unwrap();

    let heard = heard();
    junction
        .add_pipe_listener("out", heard.clone(), |seen: &mut Vec<PipeMessage>, m| {
            seen.push(m)
        })
        .unwrap();
    (junction, heard)
}
