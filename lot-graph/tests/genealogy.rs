use std::collections::BTreeMap;

use lot_graph::{LotGraph, Quantity};

enum Op {
    Supply(&'static str, Quantity),
    Transfer(&'static str, &'static str, Quantity),
}

// The sample network exercised by the demo driver: three sources feeding a
// small production fan-out that ends fully matched at A009..A011.
const SAMPLE: &[Op] = &[
    Op::Supply("A001", 100),
    Op::Supply("A002", 100),
    Op::Supply("A003", 100),
    Op::Transfer("A001", "A004", 100),
    Op::Transfer("A002", "A004", 100),
    Op::Transfer("A003", "A005", 20),
    Op::Transfer("A003", "A006", 80),
    Op::Transfer("A004", "A007", 40),
    Op::Transfer("A004", "A008", 160),
    Op::Transfer("A005", "A008", 20),
    Op::Transfer("A006", "A008", 80),
    Op::Transfer("A007", "A009", 40),
    Op::Transfer("A008", "A009", 60),
    Op::Transfer("A008", "A010", 100),
    Op::Transfer("A008", "A011", 100),
];

fn run(ops: &[Op]) -> LotGraph {
    let mut graph = LotGraph::default();
    for op in ops {
        match *op {
            Op::Supply(node, qty) => graph.introduce_supply(node, qty).unwrap(),
            Op::Transfer(from, to, qty) => graph.transfer(from, to, qty).unwrap(),
        }
    }
    graph
}

/// Balances computed independently from the operation arguments alone.
fn expected_balances(ops: &[Op]) -> BTreeMap<&'static str, Quantity> {
    let mut balances = BTreeMap::new();
    for op in ops {
        match *op {
            Op::Supply(node, qty) => *balances.entry(node).or_insert(0) += qty,
            Op::Transfer(from, to, qty) => {
                *balances.entry(from).or_insert(0) -= qty;
                *balances.entry(to).or_insert(0) += qty;
            }
        }
    }
    balances
}

#[test]
fn quantities_are_conserved() {
    let graph = run(SAMPLE);
    for (node, expected) in expected_balances(SAMPLE) {
        assert_eq!(graph.node_balance(node), expected, "balance at {node}");
    }
}

#[test]
fn every_link_is_symmetric_with_equal_quantities() {
    let graph = run(SAMPLE);
    for id in 0..graph.lot_count() {
        let lot = graph.lot(id);
        if let lot_graph::Upstream::Lot(parent) = lot.upstream {
            let up = graph.lot(parent);
            assert_eq!(up.downstream, Some(id));
            assert_eq!(up.quantity, lot.quantity);
        }
        if let Some(child) = lot.downstream {
            assert_eq!(graph.lot(child).upstream, lot_graph::Upstream::Lot(id));
        }
    }
}

#[test]
fn queries_are_idempotent() {
    let graph = run(SAMPLE);
    for node in graph.node_names() {
        assert_eq!(graph.node_balance(&node), graph.node_balance(&node));
        assert_eq!(graph.provenance_summary(&node), graph.provenance_summary(&node));
        assert_eq!(graph.node_inventory(&node), graph.node_inventory(&node));
        if graph.node_balance(&node) >= 0 {
            assert_eq!(
                graph.detailed_path(&node).unwrap(),
                graph.detailed_path(&node).unwrap()
            );
        }
    }
}

#[test]
fn split_equivalence_preserves_path_shape() {
    // Unsplit chain.
    let whole = run(&[
        Op::Supply("A", 100),
        Op::Transfer("A", "B", 100),
        Op::Transfer("B", "C", 100),
    ]);
    // Same chain consumed in two pieces.
    let split = run(&[
        Op::Supply("A", 100),
        Op::Transfer("A", "B", 100),
        Op::Transfer("B", "C", 100),
        Op::Transfer("C", "D", 35),
    ]);

    let whole_paths = whole.detailed_path("C").unwrap();
    assert_eq!(whole_paths.len(), 1);
    assert_eq!(whole_paths[0].quantity, 100);

    let c_paths = split.detailed_path("C").unwrap();
    assert_eq!(c_paths.len(), 1);
    assert_eq!(c_paths[0].quantity, 65);
    assert_eq!(c_paths[0].path, whole_paths[0].path);

    let d_paths = split.detailed_path("D").unwrap();
    assert_eq!(d_paths.len(), 1);
    assert_eq!(d_paths[0].quantity, 35);
    assert_eq!(d_paths[0].path[1..], whole_paths[0].path[..]);
}

#[test]
fn sample_provenance_traces_to_the_three_sources() {
    let graph = run(SAMPLE);

    for (node, source) in [("A009", "A001"), ("A010", "A002"), ("A011", "A003")] {
        let summary = graph.provenance_summary(node);
        assert_eq!(
            summary.matched,
            BTreeMap::from([(source.to_string(), 100)]),
            "matched summary at {node}"
        );
        assert!(summary.unmatched.is_empty(), "unmatched summary at {node}");
    }

    // Both of A009's held lots trace back to A001, one hop apart.
    let paths = graph.detailed_path("A009").unwrap();
    assert_eq!(paths.len(), 2);
    assert_eq!(paths[0].quantity, 40);
    assert_eq!(paths[0].path, vec!["A009", "A007", "A004", "A001"]);
    assert!(paths[0].sourced);
    assert_eq!(paths[1].quantity, 60);
    assert_eq!(paths[1].path, vec!["A009", "A008", "A004", "A001"]);
    assert!(paths[1].sourced);

    // Intermediate stages end fully matched, split exactly as consumed.
    assert_eq!(graph.node_balance("A004"), 0);
    assert_eq!(graph.node_balance("A008"), 0);
    let a008: Vec<Quantity> = graph
        .node_inventory("A008")
        .iter()
        .map(|state| state.quantity)
        .collect();
    assert_eq!(a008, vec![60, 100, 20, 80]);
}
