use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use pathstroke::*;
use std::{fs::File, hint::black_box, time::Duration};

const SQUIRREL_FILE: &str = "data/squirrel.path";

fn load_squirrel() -> Path {
    let file = File::open(SQUIRREL_FILE).expect("failed to open path");
    let mut path = Path::load(file).expect("failed to load path");
    // scale it up so flattening produces realistic number of segments
    path.transform(Transform::identity().scale(16.0, 16.0));
    path
}

fn intersection_benchmark(c: &mut Criterion) {
    let p1 = Point::new(0.0, -5.0);
    let p2 = Point::new(100.0, -5.0);
    let p3 = Point::new(105.0, 0.0);
    let p4 = Point::new(105.0, 100.0);
    c.bench_function("line_intersection", |b| {
        b.iter(|| line_intersection(black_box(p1), black_box(p2), black_box(p3), black_box(p4)))
    });
}

fn stroke_benchmark(c: &mut Criterion) {
    let path = load_squirrel();
    let joints = [JointStyle::Miter, JointStyle::Round, JointStyle::Bevel];

    let mut group = c.benchmark_group("squirrel");
    group.throughput(Throughput::Elements(path.segments_count() as u64));
    group.bench_function("flatten", |b| {
        b.iter(|| path.flatten(Transform::identity(), DEFAULT_FLATNESS, false).count())
    });
    for joint in joints {
        let style = StrokeStyle::new(8.0, joint, EndCapStyle::Round);
        group.bench_with_input(
            BenchmarkId::new("stroke", format!("{:?}", joint)),
            &style,
            |b, style| b.iter_with_large_drop(|| path.stroke(*style)),
        );
    }
    let pattern = DashPattern::new(&[24.0, 8.0]).expect("valid pattern");
    let stroker = Stroker::new(StrokeStyle::new(8.0, JointStyle::Round, EndCapStyle::Butt));
    group.bench_function("dash", |b| {
        b.iter_with_large_drop(|| stroker.dash(&path, &pattern, Transform::identity()))
    });
    group.finish()
}

criterion_group!(
    name = stroke;
    config = Criterion::default().sample_size(10).warm_up_time(Duration::new(1, 0));
    targets = intersection_benchmark, stroke_benchmark
);
criterion_main!(stroke);
