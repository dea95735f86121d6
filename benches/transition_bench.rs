use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rustc_hash::FxHashMap;
use std::time::Duration;
use viewstate::animation::{materialize, Transition, TransitionComponent};
use viewstate::controller::TransitionTable;
use viewstate::options::TransitionOptions;
use viewstate::state::{AnimatedValue, Composition, PropertyGoal, ViewId, ViewState, Visibility};
use viewstate::util::easing::EasingFunction;

fn easing_benchmark(c: &mut Criterion) {
    let f = EasingFunction::CubicHermite { c1: 0.33, c2: 1.0 };
    c.bench_function("cubic_hermite_easing", |b| {
        b.iter(|| black_box(f.evaluate(black_box(0.5))))
    });
    let f = EasingFunction::AccelerateDecelerate;
    c.bench_function("accelerate_decelerate_easing", |b| {
        b.iter(|| black_box(f.evaluate(black_box(0.5))))
    });
}

fn table(count: usize) -> TransitionTable {
    let states: FxHashMap<String, Composition> = (0..count)
        .map(|i| {
            let view_state = ViewState::new(
                ViewId(i as u32),
                Visibility::Visible,
                [PropertyGoal::new("alpha", i as f32 / count as f32)],
            );
            (format!("s{i}"), Composition::from(view_state))
        })
        .collect();
    TransitionTable::new("bench", states, TransitionOptions::default())
}

fn table_lookup_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("table_lookup");

    for count in [4, 16, 64] {
        let table = table(count);
        let last = format!("s{}", count - 1);
        let _ = table.get_transition("s0", &last);

        group.bench_function(format!("cached_{count}_states"), |b| {
            b.iter(|| black_box(table.get_transition(black_box("s0"), black_box(&last))))
        });
    }
    group.finish();
}

fn materialize_benchmark(c: &mut Criterion) {
    let components = (0..32).map(|i| {
        TransitionComponent::new(
            ViewId(i),
            "translationX",
            [AnimatedValue::Float(0.0), AnimatedValue::Float(i as f32)],
        )
        .with_window(0.0, 0.5)
    });
    let transition = Transition::new(components, Duration::from_millis(300));

    c.bench_function("materialize_32_components", |b| {
        b.iter(|| black_box(materialize(black_box(&transition), "bench")))
    });
}

criterion_group!(
    benches,
    easing_benchmark,
    table_lookup_benchmark,
    materialize_benchmark
);
criterion_main!(benches);
