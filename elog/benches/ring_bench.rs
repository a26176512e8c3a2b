use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use elog::codec::ArgValue;
use elog::log::Log;
use rand::Rng;

fn emit_throughput(c: &mut Criterion) {
    let mut rng = rand::rng();
    let mut group = c.benchmark_group("emit");
    for capacity in [256usize, 4096, 65536] {
        group.bench_with_input(BenchmarkId::from_parameter(capacity), &capacity, |b, &capacity| {
            let mut log = Log::init(capacity);
            let ty = log.register_type("seq=%d val=%f", None);
            b.iter(|| {
                let val: f64 = rng.random_range(0.0..100.0);
                log.emit(ty, 0, &[ArgValue::U32(1), ArgValue::F64(val)]);
            });
        });
    }
    group.finish();
}

fn peek_cost(c: &mut Criterion) {
    let mut log = Log::init(8192);
    let ty = log.register_type("seq=%d", None);
    for i in 0..8192u32 {
        log.emit(ty, 0, &[ArgValue::U32(i)]);
    }
    c.bench_function("peek_full_ring", |b| {
        b.iter(|| log.peek());
    });
}

fn merge_cost(c: &mut Criterion) {
    c.bench_function("merge_two_4k_logs", |b| {
        b.iter_batched(
            || {
                let mut a = Log::init(4096);
                let mut b = Log::init(4096);
                let ta = a.register_type("a=%d", None);
                let tb = b.register_type("b=%d", None);
                for i in 0..4096u32 {
                    a.emit(ta, 0, &[ArgValue::U32(i)]);
                    b.emit(tb, 0, &[ArgValue::U32(i)]);
                }
                (a, b)
            },
            |(mut a, b)| a.merge(&b),
            criterion::BatchSize::LargeInput,
        );
    });
}

criterion_group!(benches, emit_throughput, peek_cost, merge_cost);
criterion_main!(benches);
