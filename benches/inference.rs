//! Benchmarks for view materialization and propagation

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use semview::{parse_rule, Engine, GraphId, Quad, Rule, Term};

fn g(name: &str) -> GraphId {
    GraphId::new(format!("http://example.org/graphs/{}", name))
}

fn node(i: usize) -> Term {
    Term::uri(format!("http://example.org/n{}", i))
}

fn pred() -> Term {
    Term::uri("http://example.org/p")
}

fn transitive_rule() -> Rule {
    parse_rule(
        "{ ?x <http://example.org/p> ?y . ?y <http://example.org/p> ?z } \
         => { ?x <http://example.org/p> ?z } .",
    )
    .unwrap()
}

fn chain_materialization_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("materialize_chain");

    for len in [10usize, 25, 50] {
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, &len| {
            b.iter(|| {
                let mut engine = Engine::new();
                for i in 0..len {
                    engine
                        .insert(Quad::new(node(i), pred(), node(i + 1), g("base")))
                        .unwrap();
                }
                engine
                    .create_view(g("base"), g("inf"), vec![transitive_rule()])
                    .unwrap();
                black_box(engine.size(&g("inf")))
            });
        });
    }

    group.finish();
}

fn incremental_insert_benchmark(c: &mut Criterion) {
    c.bench_function("incremental_insert_steady_view", |b| {
        let mut engine = Engine::new();
        engine
            .create_view(g("base"), g("inf"), vec![transitive_rule()])
            .unwrap();
        for i in 0..200 {
            engine
                .insert(Quad::new(node(i), pred(), node(i), g("base")))
                .unwrap();
        }

        let mut next = 1000usize;
        b.iter(|| {
            next += 1;
            engine
                .insert(Quad::new(node(next), pred(), node(next), g("base")))
                .unwrap();
            black_box(engine.size(&g("inf")))
        });
    });
}

fn union_scan_benchmark(c: &mut Criterion) {
    let mut engine = Engine::new();
    for i in 0..1000 {
        engine
            .insert(Quad::new(node(i), pred(), node(i + 1), g("left")))
            .unwrap();
        engine
            .insert(Quad::new(node(i + 2000), pred(), node(i + 2001), g("right")))
            .unwrap();
    }
    engine
        .create_union(g("all"), vec![g("left"), g("right")])
        .unwrap();

    c.bench_function("union_full_scan_2000", |b| {
        b.iter(|| black_box(engine.match_triples(None, None, None, &g("all")).len()));
    });

    c.bench_function("union_size_2000", |b| {
        b.iter(|| black_box(engine.size(&g("all"))));
    });
}

criterion_group!(
    benches,
    chain_materialization_benchmark,
    incremental_insert_benchmark,
    union_scan_benchmark
);
criterion_main!(benches);
