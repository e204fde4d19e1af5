use criterion::{criterion_group, criterion_main, Criterion};
use kd_index::kdtree::{KDTree, KDTreeIndex};
use kd_index::KDPoint;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rstar::RTree;

fn load_data(n: usize) -> Vec<[f64; 2]> {
    let mut rng = StdRng::seed_from_u64(0);
    (0..n)
        .map(|_| [rng.gen_range(-100.0..100.0), rng.gen_range(-100.0..100.0)])
        .collect()
}

fn brute_force_nearest<'a>(points: &'a [[f64; 2]], query: &[f64; 2]) -> Option<&'a [f64; 2]> {
    points.iter().min_by(|a, b| {
        a.squared_distance(query)
            .total_cmp(&b.squared_distance(query))
    })
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let points = load_data(50_000);

    c.bench_function("construction (kd-index)", |b| {
        b.iter(|| KDTree::build(points.to_vec()).unwrap())
    });

    c.bench_function("construction (kd-index incremental)", |b| {
        b.iter(|| {
            let mut tree = KDTree::new();
            tree.extend(points.iter().copied());
            tree
        })
    });

    c.bench_function("construction (rstar bulk)", |b| {
        b.iter(|| RTree::bulk_load(points.to_vec()))
    });

    let tree = KDTree::build(points.to_vec()).unwrap();
    let rstar_tree = RTree::bulk_load(points.to_vec());
    let query = [12.3, -45.6];

    c.bench_function("nearest (kd-index)", |b| b.iter(|| tree.nearest(&query)));

    c.bench_function("nearest within 10 (kd-index)", |b| {
        b.iter(|| tree.nearest_within(&query, 10.))
    });

    c.bench_function("nearest (rstar)", |b| {
        b.iter(|| rstar_tree.nearest_neighbor(&query))
    });

    c.bench_function("nearest (brute force)", |b| {
        b.iter(|| brute_force_nearest(&points, &query))
    });

    c.bench_function("within 5 (kd-index)", |b| b.iter(|| tree.within(&query, 5.)));

    c.bench_function("within 5 (rstar)", |b| {
        b.iter(|| {
            rstar_tree
                .locate_within_distance(query, 25.)
                .collect::<Vec<_>>()
        })
    });

    c.bench_function("smallest (kd-index)", |b| b.iter(|| tree.smallest(1)));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
