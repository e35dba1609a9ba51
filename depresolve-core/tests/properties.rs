//! Property Tests for Dependency Resolution
//!
//! Random graphs are built with every edge pointing from a higher id to a
//! lower one, which makes them acyclic by construction. Cycles are then
//! injected explicitly where a test needs one.

use std::collections::HashSet;

use depresolve_core::resolver::DependencyResolver;
use proptest::prelude::*;

/// A node count and a list of `(dependent, dependency)` edges forming a DAG.
fn dag() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (1usize..40).prop_flat_map(|n| {
        let edges = prop::collection::vec((0..n, 0..n), 0..n * 3).prop_map(|pairs| {
            pairs
                .into_iter()
                .filter(|(a, b)| a != b)
                .map(|(a, b)| if a > b { (a, b) } else { (b, a) })
                .collect::<Vec<_>>()
        });
        (Just(n), edges)
    })
}

fn registered(n: usize, edges: &[(usize, usize)]) -> DependencyResolver<usize, usize> {
    let mut resolver = DependencyResolver::new();
    for id in 0..n {
        resolver.add_node(id, id * 10);
    }
    for &(dependent, dependency) in edges {
        resolver.add_node_dependencies(dependent, [dependency]);
    }
    resolver
}

proptest! {
    #[test]
    fn every_dependency_precedes_its_dependent((n, edges) in dag()) {
        let resolution = registered(n, &edges).resolve().unwrap();

        for &(dependent, dependency) in &edges {
            let before = resolution.position(&dependency).unwrap();
            let after = resolution.position(&dependent).unwrap();
            prop_assert!(before < after, "{} should precede {}", dependency, dependent);
        }
    }

    #[test]
    fn every_referenced_id_appears_once((_n, edges) in dag()) {
        let mut resolver: DependencyResolver<usize, ()> = DependencyResolver::new();
        for &(dependent, dependency) in &edges {
            resolver.add_node_dependencies(dependent, [dependency]);
        }

        let referenced: HashSet<usize> = edges.iter().flat_map(|&(a, b)| [a, b]).collect();
        prop_assert_eq!(resolver.len(), referenced.len());

        let resolution = resolver.resolve().unwrap();
        let ordered: Vec<usize> = resolution.id_ordering().into_iter().copied().collect();
        let unique: HashSet<usize> = ordered.iter().copied().collect();

        prop_assert_eq!(ordered.len(), referenced.len());
        prop_assert_eq!(unique, referenced);
    }

    #[test]
    fn payloads_follow_their_nodes((n, edges) in dag()) {
        let resolution = registered(n, &edges).resolve().unwrap();

        let ids: Vec<usize> = resolution.id_ordering().into_iter().copied().collect();
        let data: Vec<usize> = resolution.data_ordering().into_iter().flatten().copied().collect();
        let expected: Vec<usize> = ids.iter().map(|id| id * 10).collect();

        prop_assert_eq!(data, expected);
    }

    #[test]
    fn unrelated_nodes_keep_registration_order(
        ids in Just((0usize..30).collect::<Vec<_>>()).prop_shuffle()
    ) {
        let mut resolver = DependencyResolver::new();
        for &id in &ids {
            resolver.add_node(id, ());
        }

        let resolution = resolver.resolve().unwrap();
        let ordered: Vec<usize> = resolution.id_ordering().into_iter().copied().collect();
        prop_assert_eq!(ordered, ids);
    }

    #[test]
    fn any_cycle_is_rejected((n, edges) in dag(), x in 0usize..40, y in 0usize..40) {
        let (x, y) = (x % n, y % n);
        let mut resolver = registered(n, &edges);
        resolver.add_node_dependencies(x, [y]);
        resolver.add_node_dependencies(y, [x]);

        let err = resolver.resolve().unwrap_err();
        prop_assert!(err.is_cycle());
    }

    #[test]
    fn repeated_edges_do_not_add_nodes((n, edges) in dag()) {
        let mut resolver = registered(n, &edges);
        for &(dependent, dependency) in &edges {
            resolver.add_node_dependencies(dependent, [dependency, dependency]);
        }

        prop_assert_eq!(resolver.len(), n);
        prop_assert_eq!(resolver.resolve().unwrap().len(), n);
    }
}
