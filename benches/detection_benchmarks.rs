use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use siteclash::{
    Building, BuildingCategory, ClashEngine, SitePlan, StaticIndex, bounding_box,
    spatial::BoundingBox,
};

fn grid_layout(side: usize) -> Vec<Building> {
    let categories = [
        BuildingCategory::Office,
        BuildingCategory::School,
        BuildingCategory::ResidentialBuilding,
        BuildingCategory::Nightclub,
        BuildingCategory::Stadium,
    ];

    (0..side * side)
        .map(|i| {
            let x = (i % side) as f64 * 25.0;
            let y = (i / side) as f64 * 25.0;
            Building::new(
                format!("building:{}", i),
                categories[i % categories.len()],
                20.0,
                20.0,
                x,
                y,
            )
        })
        .collect()
}

fn benchmark_index(c: &mut Criterion) {
    let mut group = c.benchmark_group("static_index");

    for side in [10, 30, 60] {
        let boxes: Vec<(BoundingBox, usize)> = grid_layout(side)
            .iter()
            .enumerate()
            .map(|(idx, b)| (bounding_box(b), idx))
            .collect();

        group.bench_with_input(BenchmarkId::new("build", side * side), &boxes, |b, boxes| {
            b.iter(|| StaticIndex::build(black_box(boxes.clone()), 4).unwrap())
        });

        let index = StaticIndex::build(boxes.clone(), 4).unwrap();
        let query = BoundingBox::new(100.0, 100.0, 200.0, 200.0);
        group.bench_with_input(BenchmarkId::new("query", side * side), &index, |b, index| {
            b.iter(|| index.query(black_box(&query)).len())
        });
    }

    group.finish();
}

fn benchmark_detection(c: &mut Criterion) {
    let mut group = c.benchmark_group("detection");
    let engine = ClashEngine::default();

    for side in [10, 30, 60] {
        let buildings = grid_layout(side);
        let site = SitePlan::new(side as f64 * 25.0, side as f64 * 25.0);

        group.bench_with_input(
            BenchmarkId::new("detect_validated", side * side),
            &buildings,
            |b, buildings| b.iter(|| engine.detect_validated(black_box(buildings), &site).unwrap()),
        );
    }

    group.finish();
}

criterion_group!(benches, benchmark_index, benchmark_detection);
criterion_main!(benches);
