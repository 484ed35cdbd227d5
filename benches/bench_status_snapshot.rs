// benches/bench_status_snapshot.rs
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use intersection_controller::TrafficLightController;
use std::time::Duration;

fn bench_status_snapshot(c: &mut Criterion) {
    let controller = TrafficLightController::new(15, 3).unwrap();
    for _ in 0..7 {
        controller.tick_once();
    }

    let mut group = c.benchmark_group("status_snapshot");
    group.measurement_time(Duration::from_secs(5));
    group.sample_size(100);

    group.bench_function("snapshot", |b| {
        b.iter(|| black_box(controller.snapshot()));
    });

    group.bench_function("snapshot_to_json", |b| {
        b.iter(|| black_box(controller.snapshot().to_json().unwrap()));
    });

    // Contended read: a tick between every snapshot.
    group.bench_function("tick_then_snapshot", |b| {
        b.iter(|| {
            controller.tick_once();
            black_box(controller.snapshot())
        });
    });

    group.finish();
}

criterion_group!(benches, bench_status_snapshot);
criterion_main!(benches);
