use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::DVec2;
use palaeo_curve::{CurveAnalysis, GeometryConfig, PointRef, PointRole, SegmentChain};
use std::hint::black_box;

/// Baut eine Zickzack-Kette mit `segment_count` Segmenten.
fn build_synthetic_chain(segment_count: usize, probe_number: usize) -> SegmentChain {
    let mut chain = SegmentChain::new(GeometryConfig::with_probe_number(probe_number));
    for pos in [
        DVec2::new(0.0, 0.0),
        DVec2::new(40.0, 0.0),
        DVec2::new(100.0, 60.0),
        DVec2::new(60.0, 60.0),
    ] {
        chain.place_point(pos);
    }

    let mut end = chain.tail().map(|id| PointRef::new(id, PointRole::End));
    for index in 1..segment_count {
        let Some(point) = end.and_then(|p| chain.clone_point(p)) else {
            break;
        };
        let x = 100.0 * (index + 1) as f64;
        let y = if index % 2 == 0 { 60.0 } else { 0.0 };
        chain.set_point(point, DVec2::new(x, y));
        end = Some(point);
    }

    chain
}

fn build_query_points(count: usize) -> Vec<DVec2> {
    (0..count)
        .map(|i| {
            let x = ((i * 37) % 10_000) as f64 + 0.37;
            let y = ((i * 7) % 80) as f64 + 0.63;
            DVec2::new(x, y)
        })
        .collect()
}

fn bench_chain_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("chain_sampling");

    for &segment_count in &[10usize, 100usize] {
        let chain = build_synthetic_chain(segment_count, 256);

        group.bench_with_input(
            BenchmarkId::new("curve_kappas", segment_count),
            &chain,
            |b, chain| {
                b.iter(|| {
                    let kappas = black_box(chain).curve_kappas();
                    black_box(kappas.len())
                })
            },
        );

        group.bench_with_input(
            BenchmarkId::new("full_analysis", segment_count),
            &chain,
            |b, chain| {
                b.iter(|| {
                    let analysis = CurveAnalysis::from_chain(black_box(chain));
                    black_box(analysis.maxima.len())
                })
            },
        );
    }

    group.finish();
}

fn bench_hit_test(c: &mut Criterion) {
    let mut group = c.benchmark_group("hit_test");

    for &segment_count in &[10usize, 100usize] {
        let chain = build_synthetic_chain(segment_count, 16);
        let query_points = build_query_points(1024);

        group.bench_with_input(
            BenchmarkId::new("inside_control_point_batch", segment_count),
            &chain,
            |b, chain| {
                b.iter(|| {
                    let mut hits = 0usize;
                    for point in &query_points {
                        if chain.inside_control_point(black_box(*point)).is_some() {
                            hits += 1;
                        }
                    }
                    black_box(hits)
                })
            },
        );
    }

    group.finish();
}

fn bench_anchor_drag(c: &mut Criterion) {
    let mut chain = build_synthetic_chain(100, 16);
    let Some(head) = chain.head() else {
        return;
    };
    let anchor = PointRef::new(head, PointRole::End);

    c.bench_function("set_point_shared_anchor", |b| {
        let mut step = 0.0;
        b.iter(|| {
            step += 0.5;
            chain.set_point(anchor, black_box(DVec2::new(100.0 + step % 10.0, 60.0)))
        })
    });
}

criterion_group!(core_benches, bench_chain_sampling, bench_hit_test, bench_anchor_drag);
criterion_main!(core_benches);
