//! Capacity-driven reduction: layer the graph by distance from the root,
//! then fold the farthest layers into closer hosts until the visible node
//! count fits the capacity.
//!
//! The capacity is a trigger, not an exact target. A layer is always
//! folded as a whole, so the final visible count can undershoot it.

use crate::layering::{dedup_links, select_root, split_isolated};
use crate::store::SummaryGraph;
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};
use tracing::debug;
use triplefold_core::error::{ReduceError, ReduceResult};
use triplefold_core::node::{NodeId, UnstructuredGraph};

/// How a host decides which of its surroundings fold into it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollapsePolicy {
    /// A node folds only when every one of its paths to the root runs
    /// through the node being absorbed. Nothing reachable around the
    /// fold disappears.
    #[default]
    Dependency,
    /// Treat the host as a cut point: of the components left when the
    /// host is removed, the largest stays and the rest fold into it,
    /// regardless of distance layers.
    Agnostic,
}

/// Whether `a` is strictly closer to the root than `b`. Nodes the
/// layering never reached are neither closer nor farther than anything.
fn closer(a: Option<u32>, b: Option<u32>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a < b,
        _ => false,
    }
}

/// Whether every path from `node` to the root passes through `gateway`.
///
/// Floods outward from `node` with `gateway` blocked; reaching the root
/// disproves dependence, exhausting the reachable set proves it. The
/// root itself acts as a universal gateway, and a node is always
/// dependent on itself.
pub(crate) fn is_dependent_on(graph: &SummaryGraph, node: &NodeId, gateway: &NodeId) -> bool {
    if node == gateway || gateway == graph.root() {
        return true;
    }
    let mut visited: HashSet<NodeId> = HashSet::new();
    visited.insert(node.clone());
    let mut queue: VecDeque<NodeId> = graph.neighbors_of(node).into();
    while let Some(current) = queue.pop_front() {
        if &current == graph.root() {
            return false;
        }
        if &current == gateway || !visited.insert(current.clone()) {
            continue;
        }
        queue.extend(graph.neighbors_of(&current));
    }
    true
}

/// Fold `target` into `host`, dragging along every node at `target`'s
/// distance or farther whose only routes to the root run through
/// `target`. No-op when only one node is left visible.
pub(crate) fn fold_into_host(graph: &mut SummaryGraph, host: &NodeId, target: &NodeId) {
    if graph.visible_count() <= 1 {
        return;
    }
    let Some(target_distance) = graph.node(target).map(|n| n.distance) else {
        return;
    };
    let snapshot: Vec<(NodeId, Option<u32>)> = graph
        .visible_nodes()
        .map(|n| (n.id.clone(), n.distance))
        .collect();
    let mut dependents = Vec::new();
    for (id, distance) in snapshot {
        if &id == host || closer(distance, target_distance) {
            continue;
        }
        if is_dependent_on(graph, &id, target) {
            dependents.push(id);
        }
    }
    graph.hide_set(host, &dependents);
}

/// Fold every component that `center`'s removal would cut off. With one
/// component or none there is nothing to cut; with more, the first
/// largest survives and the others disappear into `center`.
pub(crate) fn partition_collapse(graph: &mut SummaryGraph, center: &NodeId) {
    let Some(&center_idx) = graph.index.get(center) else {
        return;
    };
    let components = graph.components_excluding(center_idx);
    if components.len() <= 1 {
        return;
    }
    let mut keep = 0;
    for (i, component) in components.iter().enumerate().skip(1) {
        if component.len() > components[keep].len() {
            keep = i;
        }
    }
    let mut to_hide = Vec::new();
    for (i, component) in components.iter().enumerate() {
        if i == keep {
            continue;
        }
        to_hide.extend(component.iter().map(|&idx| graph.graph[idx].id.clone()));
    }
    graph.hide_set(center, &to_hide);
}

/// The closer neighbour a candidate would fold into, if the candidate
/// is foldable at all.
///
/// A candidate folds when exactly one neighbour sits strictly closer to
/// the root, or regardless of how many do once the innermost layer is
/// reached. A candidate with no closer neighbour never folds.
fn proximal_host(graph: &SummaryGraph, candidate: &NodeId, max_distance: u32) -> Option<NodeId> {
    let candidate_distance = graph.node(candidate)?.distance;
    let mut proximal: Vec<NodeId> = Vec::new();
    for link in graph.visible_links() {
        if !link.touches(candidate) {
            continue;
        }
        let Some(other) = link.other_end(candidate) else {
            continue;
        };
        if other == candidate || proximal.contains(other) {
            continue;
        }
        let Some(node) = graph.node(other) else {
            continue;
        };
        if closer(node.distance, candidate_distance) {
            proximal.push(other.clone());
        }
    }
    if proximal.len() == 1 || (max_distance == 1 && !proximal.is_empty()) {
        Some(proximal.swap_remove(0))
    } else {
        None
    }
}

/// Sweep the nodes at `max_distance` or farther and fold each remaining
/// one into its proximal host.
fn collapse_farthest_layer(graph: &mut SummaryGraph, max_distance: u32, policy: CollapsePolicy) {
    let layer: Vec<NodeId> = graph
        .visible_nodes()
        .filter(|n| n.distance.is_some_and(|d| d >= max_distance))
        .map(|n| n.id.clone())
        .collect();
    for candidate in layer {
        // an earlier fold in this sweep may have absorbed it already
        if !graph.contains(&candidate) {
            continue;
        }
        let Some(host) = proximal_host(graph, &candidate, max_distance) else {
            continue;
        };
        match policy {
            CollapsePolicy::Dependency => fold_into_host(graph, &host, &candidate),
            CollapsePolicy::Agnostic => partition_collapse(graph, &host),
        }
    }
}

/// Reduce a converted graph to at most `capacity` visible nodes.
///
/// Picks the root, deduplicates links, sets isolated nodes aside, layers
/// the rest by distance from the root, then folds layers inward until
/// the bound holds or only the root layer is left. Isolated nodes do not
/// count against the capacity and are never folded.
pub fn layer_and_collapse(
    graph: UnstructuredGraph,
    capacity: usize,
    preferred_root: Option<&str>,
    policy: CollapsePolicy,
) -> ReduceResult<SummaryGraph> {
    let UnstructuredGraph { nodes, links } = graph;
    if nodes.is_empty() {
        return Err(ReduceError::EmptyGraph);
    }
    let root = select_root(&nodes, preferred_root)?;
    let links = dedup_links(links);
    let (isolated, connected) = split_isolated(nodes, &links);
    let mut summary = SummaryGraph::new(root, connected, links, isolated);

    let mut max_distance = summary.assign_distances();
    while summary.visible_count() > capacity && max_distance > 0 {
        collapse_farthest_layer(&mut summary, max_distance, policy);
        max_distance -= 1;
    }
    summary.refresh_link_counts();
    debug!(
        visible = summary.visible_count(),
        hidden = summary.hidden_count(),
        isolated = summary.isolated_nodes().len(),
        "graph reduced"
    );
    Ok(summary)
}
