use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use otkit_core::{generate_op, transform, transform_cursor, Operation};

/// Build an operation that edits every tenth character of a `len`-char text
fn scattered_edits(len: usize, insert: &str) -> Operation {
    let mut op = Operation::new();
    let mut consumed = 0;
    while consumed + 10 <= len {
        op.retain(9).delete(1).insert(insert);
        consumed += 10;
    }
    op.retain(len - consumed);
    op
}

/// Benchmark a single keystroke diff on growing documents
fn bench_generate_op(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_op_keystroke");

    for size in [100, 1_000, 10_000, 100_000].iter() {
        let old = "a".repeat(*size);
        let mut new = old.clone();
        new.insert(size / 2, 'b');

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(generate_op(&old, &new)));
        });
    }

    group.finish();
}

/// Benchmark apply with many scattered steps
fn bench_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply_scattered");

    for size in [1_000, 10_000, 100_000].iter() {
        let text = "a".repeat(*size);
        let op = scattered_edits(*size, "xy");

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(op.apply(&text).unwrap()));
        });
    }

    group.finish();
}

/// Benchmark composing a long run of single-character typing
fn bench_compose_typing(c: &mut Criterion) {
    c.bench_function("compose_1000_keystrokes", |b| {
        b.iter(|| {
            let mut text = String::new();
            let mut composed = Operation::new();
            for i in 0..1_000 {
                let mut next = text.clone();
                next.push(if i % 2 == 0 { 'a' } else { 'b' });
                let op = generate_op(&text, &next);
                composed = composed.compose(&op).unwrap();
                text = next;
            }
            black_box(composed)
        });
    });
}

/// Benchmark transform of two dense concurrent operations
fn bench_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform_scattered");

    for size in [1_000, 10_000, 100_000].iter() {
        let a = scattered_edits(*size, "x");
        let mut b = Operation::new();
        b.retain(5).delete(size - 10).insert("replacement").retain(5);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |bench, _| {
            bench.iter(|| black_box(transform(&a, &b).unwrap()));
        });
    }

    group.finish();
}

fn bench_transform_cursor(c: &mut Criterion) {
    let op = scattered_edits(100_000, "xyz");
    c.bench_function("transform_cursor_100k", |b| {
        b.iter(|| black_box(transform_cursor(black_box(50_000), &op)));
    });
}

criterion_group!(
    benches,
    bench_generate_op,
    bench_apply,
    bench_compose_typing,
    bench_transform,
    bench_transform_cursor
);
criterion_main!(benches);
