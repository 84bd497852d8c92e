use criterion::{criterion_group, criterion_main, Criterion};
use pipeworks_core::{
    shared, transform, Filter, Fitting, Message, PipeListener, PipeMessage, SharedFitting,
    TeeSplit,
};
use serde_json::Value;
use std::cell::RefCell;
use std::hint::black_box;
use std::rc::Rc;

fn counter(count: &Rc<RefCell<usize>>) -> SharedFitting {
    shared(PipeListener::new(
        count.clone(),
        |n: &mut usize, _: PipeMessage| *n += 1,
    ))
}

fn bench_tee_split_8_outputs(c: &mut Criterion) {
    let count = Rc::new(RefCell::new(0usize));
    let outputs = (0..8).map(|_| counter(&count)).collect();
    let mut tee = TeeSplit::with_outputs(outputs);

    c.bench_function("tee_split_8_outputs", |b| {
        b.iter(|| {
            tee.write(black_box(Message::new("payload").into())).unwrap();
        });
    });
}

fn bench_filter_chain_4(c: &mut Criterion) {
    let count = Rc::new(RefCell::new(0usize));
    let mut next = counter(&count);
    for i in 0..3 {
        let increment = transform(|message, _| {
            let n = message.body.as_i64().unwrap_or(0);
            message.body = Value::from(n + 1);
            Ok(())
        });
        let filter: SharedFitting =
            shared(Filter::with_transform(format!("inc-{i}"), increment, Value::Null));
        filter.borrow_mut().connect(next).unwrap();
        next = filter;
    }
    let mut head = Filter::new("head");
    head.connect(next).unwrap();

    c.bench_function("filter_chain_4", |b| {
        b.iter(|| {
            head.write(black_box(Message::new(0).into())).unwrap();
        });
    });
}

criterion_group!(benches, bench_tee_split_8_outputs, bench_filter_chain_4);
criterion_main!(benches);
