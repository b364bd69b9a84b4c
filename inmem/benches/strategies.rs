//! This benchmark compares the indexing strategies
//! * when loading a collection,
//! * when querying a freshly loaded collection,
//! * when alternating mutations and queries.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use trine_inmem::{CollectionConfig, IndexStrategy, TripleCollection};
use trine_term::{Node, Triple};

fn triples(size: usize) -> Vec<Triple> {
    let node = |i: usize| Node::iri_unchecked(format!("http://example.org/n{i}"));
    let pred = |i: usize| Node::iri_unchecked(format!("http://example.org/p{}", i % 10));
    (0..size)
        .map(|i| Triple::new(node(i / 5), pred(i), node((i * 31) % size)))
        .collect()
}

fn load(config: &CollectionConfig, data: &[Triple]) -> Box<dyn TripleCollection> {
    let mut c = config.build();
    for t in data {
        c.add(t.clone());
    }
    c
}

fn configs() -> Vec<(String, CollectionConfig)> {
    let mut v: Vec<_> = IndexStrategy::ALL
        .into_iter()
        .map(|s| (s.to_string(), CollectionConfig::new(s)))
        .collect();
    v.push((
        "eager-partial".to_string(),
        CollectionConfig::new(IndexStrategy::Eager).with_full_index(false),
    ));
    v
}

fn loading(c: &mut Criterion) {
    let data = triples(10_000);
    for (name, config) in configs() {
        c.bench_with_input(BenchmarkId::new("load", name), &data, |b, data| {
            b.iter(|| black_box(load(&config, data).len()));
        });
    }
}

fn querying(c: &mut Criterion) {
    let data = triples(10_000);
    let subjects: Vec<_> = data.iter().step_by(97).map(|t| t.s().clone()).collect();
    for (name, config) in configs() {
        let coll = load(&config, &data);
        c.bench_with_input(BenchmarkId::new("query", name), &subjects, |b, subjects| {
            b.iter(|| {
                for s in subjects {
                    black_box(coll.with_subject(s));
                    black_box(coll.with_object(s));
                }
            });
        });
    }
}

fn interleaved(c: &mut Criterion) {
    let data = triples(2_000);
    for (name, config) in configs() {
        c.bench_with_input(BenchmarkId::new("interleaved", name), &data, |b, data| {
            b.iter(|| {
                let mut coll = load(&config, data);
                for t in data.iter().step_by(50) {
                    coll.delete(t);
                    black_box(coll.with_predicate(t.p()));
                }
            });
        });
    }
}

criterion_group!(benches, loading, querying, interleaved);
criterion_main!(benches);
