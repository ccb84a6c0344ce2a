//! Full pipeline tests: triples in, render-ready view out.
//!
//! Drives the crate the way an embedding application would:
//! 1. Convert triples against a prefix table and admission filter
//! 2. Reduce the graph to a capacity from a chosen root
//! 3. Toggle nodes and bind the result for a renderer

use triplefold_core::error::ReduceError;
use triplefold_core::filter::TripleFilter;
use triplefold_core::node::{GraphNode, NodeId};
use triplefold_core::prefix::PrefixTable;
use triplefold_core::term::{Term, TermType, Triple};
use triplefold_engine::builder::build_graph;
use triplefold_engine::collapse::{layer_and_collapse, CollapsePolicy};
use triplefold_engine::controller::NodeState;
use triplefold_engine::view::{bind_view, ViewOptions};

fn prefixes() -> PrefixTable {
    PrefixTable::parse(
        "PREFIX ex: <http://example.org/people/>\n\
         PREFIX foaf: <http://xmlns.com/foaf/0.1/>\n\
         @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .",
    )
}

fn person(name: &str) -> NodeId {
    NodeId::new(format!("http://example.org/people/{name}"))
}

fn knows(subject: &str, object: &str) -> Triple {
    Triple::new(
        Term::uri(format!("http://example.org/people/{subject}")),
        Term::uri("http://xmlns.com/foaf/0.1/knows"),
        Term::uri(format!("http://example.org/people/{object}")),
    )
}

fn labelled(subject: &str, label: &str) -> Triple {
    Triple::new(
        Term::uri(format!("http://example.org/people/{subject}")),
        Term::uri("http://www.w3.org/2000/01/rdf-schema#label"),
        Term::literal(label),
    )
}

/// Five people around alice, plus one label statement. Alice and dan tie
/// on raw degree at 3.
fn acquaintances() -> Vec<Triple> {
    vec![
        knows("alice", "bob"),
        knows("alice", "carol"),
        knows("bob", "dan"),
        knows("carol", "dan"),
        knows("dan", "erin"),
        labelled("alice", "Alice"),
    ]
}

#[test]
fn triples_flow_through_conversion_reduction_and_binding() {
    let table = prefixes();
    let graph = build_graph(&acquaintances(), &table, &TripleFilter::default());

    // five people plus the label literal
    assert_eq!(graph.nodes.len(), 6);
    assert_eq!(graph.links.len(), 6);

    let alice = graph
        .nodes
        .iter()
        .find(|n| n.display_value == "ex:alice")
        .unwrap();
    assert_eq!(alice.label.as_deref(), Some("Alice"));
    assert_eq!(alice.link_count, 3, "raw degree counts the label statement too");

    let summary =
        layer_and_collapse(graph, 50, Some("ex:alice"), CollapsePolicy::Dependency).unwrap();
    assert_eq!(summary.visible_count(), 6, "nothing folds below the capacity");
    assert_eq!(summary.hidden_count(), 0);
    assert!(summary.visible_nodes().all(|n| !n.is_collapsed));

    // distances radiate from alice
    let distance = |name: &str| summary.node(&person(name)).unwrap().distance;
    assert_eq!(distance("alice"), Some(0));
    assert_eq!(distance("dan"), Some(2));
    assert_eq!(distance("erin"), Some(3));

    let view = bind_view(&summary, &ViewOptions::default());
    assert_eq!(view.nodes.len(), 6);
    assert_eq!(view.links.len(), 6);
    assert_eq!(view.root, Some(0), "alice was converted first and stays first");
    assert_eq!(view.nodes[0].node.display_value, "ex:alice");
    assert!(view
        .links
        .iter()
        .all(|l| l.display_value == "foaf:knows" || l.display_value == "rdfs:label"));
}

#[test]
fn reduction_folds_layers_inward_until_the_bound_holds() {
    // a - b - c - d reduced to 3: only the farthest layer folds and the
    // count lands exactly on the bound
    let chain = vec![knows("a", "b"), knows("b", "c"), knows("c", "d")];
    let graph = build_graph(&chain, &prefixes(), &TripleFilter::default());
    let summary = layer_and_collapse(graph, 3, Some("ex:a"), CollapsePolicy::Dependency).unwrap();

    assert_eq!(summary.visible_count(), 3);
    let c = person("c");
    assert!(summary.node(&c).unwrap().is_collapsed);
    assert_eq!(summary.hidden_subgraph(&c).unwrap().nodes, vec![person("d")]);
    assert_eq!(summary.total_count(), 4, "no node is lost to the fold");

    // the acquaintance graph at the same bound sweeps whole layers and
    // undershoots: the capacity is a trigger, not a target
    let graph = build_graph(&acquaintances(), &prefixes(), &TripleFilter::default());
    let summary =
        layer_and_collapse(graph, 3, Some("ex:alice"), CollapsePolicy::Dependency).unwrap();
    println!(
        "acquaintances at capacity 3: visible={}, hidden={}",
        summary.visible_count(),
        summary.hidden_count()
    );

    assert!(summary.visible_count() <= 3);
    assert_eq!(summary.visible_count(), 1);
    let alice = person("alice");
    assert_eq!(summary.root(), &alice);
    assert!(summary.node(&alice).unwrap().is_collapsed);
    assert_eq!(
        summary.hidden_under(&alice).len(),
        5,
        "everyone reachable ends up under the root"
    );
    // erin folded into dan in an earlier round and stays nested there
    assert_eq!(
        summary.hidden_subgraph(&person("dan")).unwrap().nodes,
        vec![person("erin")]
    );
}

#[test]
fn root_selection_honours_the_preferred_display_value() {
    let graph = build_graph(&acquaintances(), &prefixes(), &TripleFilter::default());

    // degree would pick alice; the preference overrides it
    let summary = layer_and_collapse(
        graph.clone(),
        50,
        Some("ex:erin"),
        CollapsePolicy::Dependency,
    )
    .unwrap();
    assert_eq!(summary.root(), &person("erin"));
    assert_eq!(summary.node(summary.root()).unwrap().distance, Some(0));

    let err = layer_and_collapse(graph, 50, Some("ex:nobody"), CollapsePolicy::Dependency)
        .unwrap_err();
    assert_eq!(err, ReduceError::preferred_source_node_not_found("ex:nobody"));

    // a blacklist that rejects everything leaves nothing to reduce
    let empty = build_graph(
        &acquaintances(),
        &prefixes(),
        &TripleFilter::from_texts("", "."),
    );
    assert!(empty.is_empty());
    let err = layer_and_collapse(empty, 50, None, CollapsePolicy::Dependency).unwrap_err();
    assert_eq!(err, ReduceError::EmptyGraph);
}

#[test]
fn filters_match_raw_and_prefix_shortened_values_alike() {
    let table = prefixes();
    let triples = acquaintances();

    // written against the shortened subject form
    let shortened = build_graph(&triples, &table, &TripleFilter::from_texts("+s^ex:alice", ""));
    assert_eq!(shortened.links.len(), 3);
    assert_eq!(shortened.nodes.len(), 4);
    assert!(shortened.nodes.iter().all(|n| n.id != person("dan")));

    // the same restriction written against the raw IRI admits the same set
    let raw = build_graph(
        &triples,
        &table,
        &TripleFilter::from_texts(r"+s^http://example\.org/people/alice", ""),
    );
    assert_eq!(raw.links.len(), 3);
    assert_eq!(raw.nodes.len(), 4);
}

#[test]
fn repeated_literals_stay_apart_while_resources_merge() {
    let age = |subject: &str| {
        Triple::new(
            Term::uri(format!("http://example.org/people/{subject}")),
            Term::uri("http://xmlns.com/foaf/0.1/age"),
            Term::literal("42"),
        )
    };
    let triples = vec![
        knows("alice", "bob"),
        knows("bob", "alice"),
        age("alice"),
        age("bob"),
    ];
    let graph = build_graph(&triples, &prefixes(), &TripleFilter::default());

    // alice and bob each appear once; each "42" is its own node
    assert_eq!(graph.nodes.len(), 4);
    let literals: Vec<_> = graph.nodes.iter().filter(|n| n.value == "42").collect();
    assert_eq!(literals.len(), 2);
    assert_ne!(literals[0].id, literals[1].id);

    // opposite directions of the same pair survive deduplication
    let summary =
        layer_and_collapse(graph, 50, Some("ex:alice"), CollapsePolicy::Dependency).unwrap();
    let knows_links = summary
        .visible_links()
        .filter(|l| l.display_value == "foaf:knows")
        .count();
    assert_eq!(knows_links, 2);
}

#[test]
fn every_node_stays_accounted_for_through_toggles() {
    let graph = build_graph(&acquaintances(), &prefixes(), &TripleFilter::default());
    let mut summary =
        layer_and_collapse(graph, 3, Some("ex:alice"), CollapsePolicy::Dependency).unwrap();
    let total = summary.total_count();
    let alice = person("alice");
    let dan = person("dan");

    // expanding the root is one level deep: dan comes back still closed
    assert_eq!(
        summary.toggle_node(&alice, CollapsePolicy::Dependency),
        Some(NodeState::Expanded)
    );
    assert_eq!(summary.total_count(), total);
    assert!(summary.node(&dan).unwrap().is_collapsed, "nested folds stay closed");

    assert_eq!(
        summary.toggle_node(&dan, CollapsePolicy::Dependency),
        Some(NodeState::Expanded)
    );
    assert_eq!(summary.hidden_count(), 0);
    assert_eq!(summary.visible_count(), 6);
    assert_eq!(summary.visible_links().count(), 6);
    assert_eq!(summary.total_count(), total);

    // and closing dan again tucks erin away without losing anyone
    assert_eq!(
        summary.toggle_node(&dan, CollapsePolicy::Dependency),
        Some(NodeState::Collapsed)
    );
    assert_eq!(summary.total_count(), total);
    assert_eq!(summary.hidden_under(&dan).len(), 1);
}

#[test]
fn label_and_depiction_statements_annotate_and_still_link() {
    let mut triples = acquaintances();
    triples.push(Triple::new(
        Term::uri("http://example.org/people/alice"),
        Term::uri("http://xmlns.com/foaf/spec/#depiction"),
        Term::uri("http://example.org/img/alice.png"),
    ));
    let graph = build_graph(&triples, &prefixes(), &TripleFilter::default());

    let alice = graph
        .nodes
        .iter()
        .find(|n| n.display_value == "ex:alice")
        .unwrap();
    assert_eq!(alice.label.as_deref(), Some("Alice"));
    assert_eq!(alice.depiction.as_deref(), Some("http://example.org/img/alice.png"));

    // the annotating statements still contribute their own object nodes
    // and links
    assert_eq!(graph.nodes.len(), 7);
    assert_eq!(graph.links.len(), 7);
}

#[test]
fn isolated_nodes_ride_along_outside_the_reduction() {
    let mut graph = build_graph(&acquaintances(), &prefixes(), &TripleFilter::default());
    // a node merged in from elsewhere, with no links of its own
    graph.nodes.push(GraphNode::new(
        person("hermit"),
        "http://example.org/people/hermit",
        "ex:hermit",
        TermType::Uri,
    ));

    let summary =
        layer_and_collapse(graph, 2, Some("ex:alice"), CollapsePolicy::Dependency).unwrap();
    assert_eq!(summary.isolated_nodes().len(), 1);
    assert!(summary.isolated_nodes()[0].distance.is_none());
    assert_eq!(summary.visible_count(), 1, "the bound applies to the connected part only");

    // the view appends the isolated node after the visible ones
    let view = summary.view(&ViewOptions::default());
    assert_eq!(view.nodes.len(), summary.visible_count() + 1);
    assert_eq!(view.nodes.last().unwrap().node.display_value, "ex:hermit");
}

#[test]
fn the_two_collapse_policies_disagree_on_a_cycle() {
    let square = vec![
        knows("alice", "bob"),
        knows("bob", "carol"),
        knows("carol", "dan"),
        knows("alice", "dan"),
    ];
    let bob = person("bob");

    // carol's only way back to alice runs through bob, so the dependency
    // policy folds her in
    let graph = build_graph(&square, &prefixes(), &TripleFilter::default());
    let mut dependency = layer_and_collapse(
        graph.clone(),
        50,
        Some("ex:alice"),
        CollapsePolicy::Dependency,
    )
    .unwrap();
    assert_eq!(
        dependency.toggle_node(&bob, CollapsePolicy::Dependency),
        Some(NodeState::Collapsed)
    );
    assert_eq!(dependency.hidden_under(&bob).len(), 1);

    // removing bob leaves a single connected component, so the agnostic
    // policy finds nothing to cut off
    let mut agnostic =
        layer_and_collapse(graph, 50, Some("ex:alice"), CollapsePolicy::Agnostic).unwrap();
    assert_eq!(
        agnostic.toggle_node(&bob, CollapsePolicy::Agnostic),
        Some(NodeState::Expanded)
    );
    assert_eq!(agnostic.hidden_count(), 0);
}

#[test]
fn the_reduced_view_serializes_for_a_renderer() {
    let graph = build_graph(&acquaintances(), &prefixes(), &TripleFilter::default());
    let summary =
        layer_and_collapse(graph, 3, Some("ex:alice"), CollapsePolicy::Dependency).unwrap();
    let value = serde_json::to_value(summary.view(&ViewOptions::default())).unwrap();

    let nodes = value["nodes"].as_array().unwrap();
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0]["display_value"], "ex:alice");
    assert_eq!(nodes[0]["is_collapsed"], true);
    assert_eq!(nodes[0]["label"], "Alice");
    assert!(nodes[0]["radius"].is_number());
    assert_eq!(value["links"].as_array().unwrap().len(), 0);
    assert_eq!(value["root"], 0);
}
