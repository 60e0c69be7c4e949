//! Criterion benchmarks for rust_log_dispatch

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rust_log_dispatch::prelude::*;
use std::sync::Arc;

struct Discard;

impl Handler for Discard {
    fn log(&self, entry: &Entry) -> Result<()> {
        black_box(entry);
        Ok(())
    }
}

fn logger_with(handlers: usize) -> Logger {
    let logger = Logger::new();
    for _ in 0..handlers {
        logger.register_handler(Arc::new(Discard), &[Level::Info, Level::Error]);
    }
    logger
}

// ============================================================================
// Dispatch Benchmarks
// ============================================================================

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");
    group.throughput(Throughput::Elements(1));

    let logger = logger_with(1);

    group.bench_function("unrouted_level", |b| {
        b.iter(|| logger.debug(black_box("Debug message")));
    });

    group.bench_function("one_handler", |b| {
        b.iter(|| logger.info(black_box("Info message")));
    });

    group.bench_function("formatted", |b| {
        b.iter(|| logger.info_fmt(format_args!("request {} done", black_box(42))));
    });

    group.finish();
}

fn bench_handler_fanout(c: &mut Criterion) {
    let mut group = c.benchmark_group("handler_fanout");

    for handlers in [1, 4, 16] {
        let logger = logger_with(handlers);
        let entry = logger.str("service", "api").int("attempt", 1);

        group.throughput(Throughput::Elements(handlers as u64));
        group.bench_with_input(BenchmarkId::from_parameter(handlers), &entry, |b, entry| {
            b.iter(|| entry.info(black_box("fanout")));
        });
    }

    group.finish();
}

// ============================================================================
// Field Chain Benchmarks
// ============================================================================

fn bench_field_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("field_chain");

    let logger = logger_with(0);
    logger.with_default_fields(Fields::new().with("service", "api").with("region", "eu"));

    group.bench_function("build_unemitted", |b| {
        b.iter(|| {
            let entry = logger
                .str("user", black_box("ana"))
                .int("status", 200)
                .f64("latency_ms", 1.25);
            // Debug has no handlers, so the chain is never merged
            entry.debug("dropped");
        });
    });

    for depth in [1, 8, 32] {
        let mut entry = logger.entry();
        for i in 0..depth {
            entry = entry.with_field(format!("k{}", i % 8), i);
        }

        group.bench_with_input(BenchmarkId::new("merge", depth), &entry, |b, entry| {
            b.iter(|| black_box(entry.chain().merged()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_dispatch, bench_handler_fanout, bench_field_chain);
criterion_main!(benches);
