use criterion::{criterion_group, criterion_main, BatchSize, Criterion};

use tickflow_sched::{ops, Curve, Scheduler, Value};

fn bench_tick_delays(c: &mut Criterion) {
    c.bench_function("tick_200_delays", |b| {
        b.iter_batched(
            || {
                let mut sched = Scheduler::default();
                for i in 0..200 {
                    let h = sched.register(ops::delay(10.0 + i as f32));
                    sched.start(h);
                }
                sched
            },
            |mut sched| {
                for _ in 0..60 {
                    sched.tick(0.016);
                }
                sched
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_tick_interpolations(c: &mut Criterion) {
    c.bench_function("tick_100_interpolations", |b| {
        b.iter_batched(
            || {
                let mut sched = Scheduler::default();
                for i in 0..100 {
                    let goal = i as f32;
                    let h = sched.register(ops::interpolate(
                        Value::f(0.0),
                        move || Value::f(goal),
                        |_| {},
                        10.0,
                        Curve::ease_in_out(),
                    ));
                    sched.start(h);
                }
                sched
            },
            |mut sched| {
                for _ in 0..60 {
                    sched.tick(0.016);
                }
                sched
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_tick_delays, bench_tick_interpolations);
criterion_main!(benches);
