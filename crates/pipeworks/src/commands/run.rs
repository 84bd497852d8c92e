use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use pipeworks_core::{
    shared, transform, Filter, FilterControlMessage, Fitting, Message, Pipe, PipeMessage,
    PipesConfig, Priority, Queue, QueueControlMessage, QueueMode, SharedFitting, Transform,
};
use pipeworks_mediator::{JunctionMediator, MediatorConfig, Notification};
use serde_json::Value;
use tracing::info;

const FILTER_NAME: &str = "upper";

pub fn run(
    bodies: &[String],
    mode: Option<QueueMode>,
    config_path: Option<&Path>,
    bypass: bool,
) -> anyhow::Result<()> {
    let config = match config_path {
        Some(path) => PipesConfig::load(path)?,
        None => PipesConfig::default(),
    };

    let received = route(&config, bodies, mode, bypass)?;
    println!("{}", serde_json::json!({ "received": received }));
    Ok(())
}

/// Send `bodies` into `in -> upper filter -> queue -> out` and flush.
/// Returns the bodies the mediator heard on `out`.
pub fn route(
    config: &PipesConfig,
    bodies: &[String],
    mode: Option<QueueMode>,
    bypass: bool,
) -> anyhow::Result<Vec<String>> {
    let host = MediatorConfig::default();
    let inbox: Rc<RefCell<Vec<PipeMessage>>> = Rc::new(RefCell::new(Vec::new()));
    let mut mediator = JunctionMediator::new("demo", host.clone(), inbox.clone());

    let output: SharedFitting = shared(Pipe::new());
    let queue = shared(Queue::with_mode(mode.unwrap_or(config.default_queue_mode)));
    queue.borrow_mut().connect(output.clone())?;
    let filter = shared(Filter::with_transform(FILTER_NAME, uppercase(), Value::Null));
    filter.borrow_mut().connect(queue)?;
    let input: SharedFitting = shared(Pipe::with_output(filter));

    mediator.handle_notification(&Notification::new(&host.accept_input_pipe, "in", input))?;
    mediator.handle_notification(&Notification::new(&host.accept_output_pipe, "out", output))?;

    if bypass {
        mediator.send_message("in", FilterControlMessage::bypass(FILTER_NAME).into())?;
    }
    for raw in bodies {
        let (body, priority) = parse_body(raw, config.default_priority);
        mediator.send_message("in", Message::new(body).with_priority(priority).into())?;
    }
    mediator.send_message("in", QueueControlMessage::flush().into())?;

    let received: Vec<String> = inbox
        .borrow()
        .iter()
        .filter_map(|message| message.as_data())
        .map(|data| body_text(&data.body))
        .collect();
    info!(sent = bodies.len(), received = received.len(), "Routed messages");
    Ok(received)
}

fn uppercase() -> Transform {
    transform(|message, _params| {
        if let Some(text) = message.body.as_str() {
            message.body = Value::String(text.to_uppercase());
        }
        Ok(())
    })
}

fn body_text(body: &Value) -> String {
    match body {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Split an optional `@priority` suffix off a body
fn parse_body(raw: &str, default: Priority) -> (String, Priority) {
    if let Some((body, suffix)) = raw.rsplit_once('@') {
        let priority = match suffix.to_ascii_lowercase().as_str() {
            "high" => Some(Priority::High),
            "med" => Some(Priority::Med),
            "normal" => Some(Priority::Normal),
            "low" => Some(Priority::Low),
            _ => None,
        };
        if let Some(priority) = priority {
            return (body.to_string(), priority);
        }
    }
    (raw.to_string(), default)
}
