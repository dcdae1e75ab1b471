use brightness::brdf::Phong;
use brightness::earthshine::earthshine_intensity;
use brightness::geometry::{HorizontalCoordinates, ViewingGeometry};
use brightness::{BrightnessEstimator, PowerBudget, ReflectionOptions, SatelliteModel};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use shared::units::{Length, LengthExt};

fn reference_geometry() -> ViewingGeometry {
    ViewingGeometry::new(
        Length::from_kilometers(550.0),
        HorizontalCoordinates::from_degrees(45.0, 270.0),
        HorizontalCoordinates::from_degrees(-15.0, 270.0),
    )
}

fn bench_earthshine_density(c: &mut Criterion) {
    let scene = reference_geometry().scene();
    let model = SatelliteModel::with_solar_array(&PowerBudget::from_kilowatts(100.0, false));
    let surfaces = model.oriented(&scene.body);
    let earth = Phong::earth();

    let mut group = c.benchmark_group("earthshine_intensity");
    for density in [51usize, 101, 151, 301] {
        group.bench_function(format!("density_{density}"), |b| {
            b.iter(|| {
                earthshine_intensity(
                    black_box(&scene),
                    black_box(&surfaces),
                    black_box(density),
                    black_box(&earth),
                )
            })
        });
    }
    group.finish();
}

fn bench_estimate_track(c: &mut Criterion) {
    let estimator = BrightnessEstimator::new(ReflectionOptions::default().with_earthshine(true));
    let positions: Vec<_> = (0..=18)
        .map(|i| HorizontalCoordinates::from_degrees(i as f64 * 5.0, 90.0))
        .collect();
    let sun = HorizontalCoordinates::from_degrees(-15.0, 270.0);
    let budget = PowerBudget::from_kilowatts(100.0, false);

    let mut group = c.benchmark_group("estimate_track");
    group.sample_size(20);
    group.bench_function("19_positions_with_earthshine", |b| {
        b.iter(|| {
            estimator.estimate_track(
                black_box(Length::from_kilometers(550.0)),
                black_box(&positions),
                sun,
                budget,
            )
        })
    });
    group.finish();
}

criterion_group!(benches, bench_earthshine_density, bench_estimate_track);
criterion_main!(benches);
