use criterion::{black_box, criterion_group, criterion_main, Criterion};
use cycleprof::{read_cycles, ZoneRegistry};

fn bench_timing_core(c: &mut Criterion) {
    let mut group = c.benchmark_group("cycleprof");

    group.bench_function("read_cycles", |b| {
        b.iter(|| black_box(read_cycles()));
    });

    group.bench_function("start_stop_pair", |b| {
        let mut zones = ZoneRegistry::new();
        b.iter(|| {
            zones.start("bench");
            zones.stop("bench").unwrap();
        });
    });

    group.finish();
}

criterion_group!(benches, bench_timing_core);
criterion_main!(benches);
