//! Conformance tests, checking that every strategy answers identically.
use super::*;
use crate::collection::normalized;
use test_case::test_case;
use trine_term::{GraphId, Node, Triple};

const NS: &str = "http://example.org/";

fn n(x: &str) -> Node {
    Node::iri_unchecked(format!("{NS}{x}"))
}

fn t(s: &str, p: &str, o: &str) -> Triple {
    Triple::new(n(s), n(p), n(o))
}

fn all_configs() -> Vec<CollectionConfig> {
    let mut configs: Vec<_> = IndexStrategy::ALL
        .into_iter()
        .map(CollectionConfig::new)
        .collect();
    configs.push(CollectionConfig::new(IndexStrategy::Eager).with_full_index(false));
    configs
}

fn some_triples() -> Vec<Triple> {
    let g = GraphId::fresh();
    let b1 = Node::blank_unchecked("b1", g);
    let b2 = Node::blank_unchecked("b2", g);
    vec![
        t("C1", "type", "Class"),
        t("C2", "type", "Class"),
        t("C2", "subClassOf", "C1"),
        t("P1", "type", "Property"),
        t("P1", "domain", "C1"),
        t("P1", "range", "C2"),
        t("I1", "type", "C1"),
        t("I2", "type", "C2"),
        t("I1", "P1", "I2"),
        Triple::new(b1.clone(), n("type"), n("C1")),
        Triple::new(b1.clone(), n("P1"), b2.clone()),
        Triple::new(b2, n("label"), Node::literal("two")),
        Triple::new(n("I2"), n("label"), Node::lang_literal("deux", "fr").unwrap()),
        Triple::new(b1, n("label"), Node::literal("one")),
    ]
}

fn filled(config: &CollectionConfig) -> Box<dyn TripleCollection> {
    let mut c = config.build();
    for tr in some_triples() {
        assert!(c.add(tr));
    }
    c
}

/// Run every kind of query against `c`, in a stable order.
fn all_answers(c: &dyn TripleCollection) -> Vec<Vec<Triple>> {
    let triples = some_triples();
    let mut answers = vec![normalized(c.triples())];
    for tr in &triples {
        let [s, p, o] = tr.spo();
        answers.push(normalized(c.with_subject(s)));
        answers.push(normalized(c.with_predicate(p)));
        answers.push(normalized(c.with_object(o)));
        answers.push(normalized(c.with_subject_predicate(s, p)));
        answers.push(normalized(c.with_predicate_object(p, o)));
        answers.push(normalized(c.with_subject_object(s, o)));
        answers.push(normalized(c.with_subject_object(o, s)));
    }
    answers
}

#[test_case(IndexStrategy::Eager ; "eager")]
#[test_case(IndexStrategy::Lazy ; "lazy")]
#[test_case(IndexStrategy::Sorted ; "sorted")]
fn single_triple_lookups(strategy: IndexStrategy) {
    test_setup();
    let mut c = CollectionConfig::new(strategy).build();
    assert_eq!(c.strategy(), strategy);
    c.add(t("a", "p", "b"));
    assert_eq!(c.with_subject(&n("a")), vec![t("a", "p", "b")]);
    assert_eq!(c.with_object(&n("b")), vec![t("a", "p", "b")]);
    assert!(c.with_predicate(&n("q")).is_empty());
    assert!(c.with_subject(&n("b")).is_empty());
    c.check_consistency().unwrap();
}

#[test_case(IndexStrategy::Eager ; "eager")]
#[test_case(IndexStrategy::Lazy ; "lazy")]
#[test_case(IndexStrategy::Sorted ; "sorted")]
fn add_is_idempotent(strategy: IndexStrategy) {
    test_setup();
    let mut c = CollectionConfig::new(strategy).build();
    assert!(c.is_empty());
    assert!(c.add(t("a", "p", "b")));
    // an equal triple, built independently
    assert!(!c.add(t("a", "p", "b")));
    assert_eq!(c.len(), 1);
    assert_eq!(c.with_subject(&n("a")).len(), 1);
    assert!(!c.add(t("a", "p", "b")));
    assert_eq!(c.with_subject(&n("a")).len(), 1);
    c.check_consistency().unwrap();
}

#[test_case(IndexStrategy::Eager ; "eager")]
#[test_case(IndexStrategy::Lazy ; "lazy")]
#[test_case(IndexStrategy::Sorted ; "sorted")]
fn delete_is_visible_to_every_query(strategy: IndexStrategy) {
    test_setup();
    let mut c = filled(&CollectionConfig::new(strategy));
    let before = all_answers(&*c);
    let victim = t("C2", "subClassOf", "C1");
    assert!(c.delete(&victim));
    assert!(!c.delete(&victim));
    assert!(!c.contains(&victim));
    assert_eq!(c.len(), some_triples().len() - 1);
    for answer in all_answers(&*c) {
        assert!(!answer.contains(&victim));
    }
    assert_ne!(before, all_answers(&*c));
    c.check_consistency().unwrap();
    // add it back
    assert!(c.add(victim.clone()));
    assert_eq!(before, all_answers(&*c));
    c.check_consistency().unwrap();
}

#[test_case(IndexStrategy::Eager ; "eager")]
#[test_case(IndexStrategy::Lazy ; "lazy")]
#[test_case(IndexStrategy::Sorted ; "sorted")]
fn delete_absent_is_a_no_op(strategy: IndexStrategy) {
    test_setup();
    let mut c = filled(&CollectionConfig::new(strategy));
    let before = all_answers(&*c);
    assert!(!c.delete(&t("nope", "type", "C1")));
    assert_eq!(before, all_answers(&*c));
}

#[test_case(IndexStrategy::Eager ; "eager")]
#[test_case(IndexStrategy::Lazy ; "lazy")]
#[test_case(IndexStrategy::Sorted ; "sorted")]
fn get_returns_stored_instance(strategy: IndexStrategy) {
    test_setup();
    let mut c = CollectionConfig::new(strategy).build();
    c.add(t("a", "p", "b"));
    assert_eq!(c.get(&t("a", "p", "b")).unwrap(), t("a", "p", "b"));
    match c.get(&t("a", "p", "c")) {
        Err(IndexError::NotFound(msg)) => assert!(msg.contains("example.org/c")),
        other => panic!("unexpected {other:?}"),
    }
}

#[test_case(IndexStrategy::Eager ; "eager")]
#[test_case(IndexStrategy::Lazy ; "lazy")]
#[test_case(IndexStrategy::Sorted ; "sorted")]
fn node_projections(strategy: IndexStrategy) {
    test_setup();
    let c = filled(&CollectionConfig::new(strategy));
    assert!(c.subject_nodes().contains(&n("C1")));
    assert!(!c.subject_nodes().contains(&n("Class")));
    assert_eq!(c.predicate_nodes().len(), 6);
    assert!(c.object_nodes().contains(&Node::literal("one")));
}

#[test_case(IndexStrategy::Eager ; "eager")]
#[test_case(IndexStrategy::Lazy ; "lazy")]
#[test_case(IndexStrategy::Sorted ; "sorted")]
fn clear_and_dispose(strategy: IndexStrategy) {
    test_setup();
    let mut c = filled(&CollectionConfig::new(strategy));
    c.with_subject(&n("C1"));
    c.clear();
    assert!(c.is_empty());
    assert!(c.with_subject(&n("C1")).is_empty());
    c.check_consistency().unwrap();
    c.add(t("a", "p", "b"));
    c.dispose();
    assert!(c.is_empty());
    assert!(c.add(t("a", "p", "b")));
    assert_eq!(c.with_predicate(&n("p")).len(), 1);
}

#[test]
fn strategies_agree() {
    test_setup();
    let configs = all_configs();
    let reference = all_answers(&*filled(&configs[0]));
    for config in &configs[1..] {
        assert_eq!(
            all_answers(&*filled(config)),
            reference,
            "{config:?} disagrees"
        );
    }
}

#[test]
fn strategies_agree_under_interleaved_mutations() {
    test_setup();
    let triples = some_triples();
    let mut collections: Vec<_> = all_configs().iter().map(CollectionConfig::build).collect();
    for (i, tr) in triples.iter().enumerate() {
        for c in collections.iter_mut() {
            c.add(tr.clone());
            if i % 3 == 2 {
                c.delete(&triples[i - 1]);
            }
        }
        let reference = all_answers(&*collections[0]);
        for c in &collections[1..] {
            assert_eq!(all_answers(&**c), reference, "{:?} disagrees", c.strategy());
            c.check_consistency().unwrap();
        }
    }
}

#[test]
fn triples_matching_dispatches_on_pattern() {
    test_setup();
    for config in all_configs() {
        let c = filled(&config);
        let ty = n("type");
        assert_eq!(
            normalized(c.triples_matching(None, Some(&ty), None)),
            normalized(c.with_predicate(&ty))
        );
        assert_eq!(
            c.triples_matching(Some(&n("C1")), Some(&ty), Some(&n("Class"))),
            vec![t("C1", "type", "Class")]
        );
        assert!(c
            .triples_matching(Some(&n("C1")), Some(&ty), Some(&n("C2")))
            .is_empty());
        assert_eq!(c.triples_matching(None, None, None).len(), c.len());
    }
}

#[test]
fn closure_selection() {
    test_setup();
    let c = filled(&CollectionConfig::default());
    let with_blank = c.triples_where(|t| !t.is_ground());
    assert_eq!(with_blank.len(), 4);
    let typed = c.with_subject_where(&n("C2"), |t| t.p() == &n("type"));
    assert_eq!(typed, vec![t("C2", "type", "Class")]);
    assert!(c.any_triple(|t| t.o().is_literal()));
    assert!(!c.any_triple(|t| t.s().is_literal()));
}

#[cfg(feature = "all_tests")]
#[test]
fn strategies_agree_on_larger_collections() {
    test_setup();
    let nodes: Vec<_> = (0..40).map(|i| n(&format!("n{i}"))).collect();
    let preds: Vec<_> = (0..5).map(|i| n(&format!("p{i}"))).collect();
    let mut collections: Vec<_> = all_configs().iter().map(CollectionConfig::build).collect();
    for (i, s) in nodes.iter().enumerate() {
        for (j, p) in preds.iter().enumerate() {
            let o = &nodes[(i * 7 + j * 3) % nodes.len()];
            let tr = Triple::new(s.clone(), p.clone(), o.clone());
            for c in collections.iter_mut() {
                c.add(tr.clone());
                if (i + j) % 4 == 0 {
                    c.delete(&tr);
                }
            }
        }
    }
    let expected = normalized(collections[0].triples());
    for c in &collections {
        assert_eq!(normalized(c.triples()), expected);
        for s in &nodes {
            assert_eq!(
                normalized(c.with_subject(s)),
                normalized(collections[0].with_subject(s))
            );
            assert_eq!(
                normalized(c.with_object(s)),
                normalized(collections[0].with_object(s))
            );
        }
        c.check_consistency().unwrap();
    }
}
