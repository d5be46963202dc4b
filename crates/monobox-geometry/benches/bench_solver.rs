use criterion::{black_box, criterion_group, criterion_main, Criterion};

use monobox_geometry::{
    dimensions_to_corners, solve_box3d, Box2D, BoxDimensions, KittiCalibration,
};

fn bench_solver(c: &mut Criterion) {
    let mut group = c.benchmark_group("box3d");

    let calib = KittiCalibration {
        p2: [
            [721.5377, 0.0, 609.5593, 44.85728],
            [0.0, 721.5377, 172.854, 0.2163791],
            [0.0, 0.0, 1.0, 0.002745884],
        ],
        r0_rect: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
    };
    let dims = BoxDimensions {
        height: 1.5,
        width: 1.6,
        length: 3.9,
    };
    let bbox = Box2D {
        x1: 500.0,
        y1: 150.0,
        x2: 700.0,
        y2: 300.0,
    };
    let corners = dimensions_to_corners(&dims);

    group.bench_function("dimensions_to_corners", |bencher| {
        bencher.iter(|| black_box(dimensions_to_corners(black_box(&dims))))
    });

    group.bench_function("solve_box3d", |bencher| {
        bencher.iter(|| {
            black_box(solve_box3d(
                black_box(&bbox),
                black_box(&corners),
                black_box(0.3),
                black_box(&calib),
            ))
        })
    });

    group.finish();
}

criterion_group!(benches, bench_solver);
criterion_main!(benches);
