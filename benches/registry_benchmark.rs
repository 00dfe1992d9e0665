use std::time::Duration;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use stabletrack_rs::{Detection, Rect, TrackRegistry};

/* ----------------------------------------------------------------------------
 * Synthetic stream: objects drifting right, a few appearing and leaving
 * ---------------------------------------------------------------------------- */
fn synthetic_frames(num_frames: usize, num_objects: i32) -> Vec<Vec<Detection>> {
    (0..num_frames)
        .map(|frame| {
            (0..num_objects)
                .filter(|obj| (frame as i32 + obj) % 17 != 0)
                .map(|obj| {
                    let x = (obj * 60 + frame as i32 * 3) % 1800;
                    let y = (obj * 37) % 1000;
                    Detection::new("object", 0.8, Rect::new(x, y, 48, 96))
                })
                .collect()
        })
        .collect()
}

fn bench_registry(c: &mut Criterion) {
    let frames = synthetic_frames(300, 30);

    let mut group = c.benchmark_group("track_registry");
    group.measurement_time(Duration::from_secs(10));
    group.bench_function("analyse_300_frames_30_objects", |b| {
        b.iter(|| {
            let mut registry = TrackRegistry::new(1920, 1080).unwrap();
            for dets in &frames {
                black_box(registry.analyse(black_box(dets)));
            }
        })
    });
    group.finish();
}

criterion_group!(benches, bench_registry);
criterion_main!(benches);
