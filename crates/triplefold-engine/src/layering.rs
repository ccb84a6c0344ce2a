//! Root selection and link normalization, the steps between conversion
//! and the capacity loop.

use std::collections::{HashMap, HashSet};
use triplefold_core::error::{ReduceError, ReduceResult};
use triplefold_core::node::{GraphNode, NodeId, UnboundLink};

/// Pick the node distances are measured from.
///
/// A preferred value matches against display values, first match wins,
/// and a miss is an error rather than a fallback. Without a preference
/// the best-connected node wins, raw link counts, smallest id on ties.
pub fn select_root(nodes: &[GraphNode], preferred: Option<&str>) -> ReduceResult<NodeId> {
    if nodes.is_empty() {
        return Err(ReduceError::EmptyGraph);
    }
    if let Some(wanted) = preferred {
        return nodes
            .iter()
            .find(|node| node.display_value == wanted)
            .map(|node| node.id.clone())
            .ok_or_else(|| ReduceError::preferred_source_node_not_found(wanted));
    }
    let mut best = &nodes[0];
    for node in &nodes[1..] {
        if node.link_count > best.link_count
            || (node.link_count == best.link_count && node.id < best.id)
        {
            best = node;
        }
    }
    Ok(best.id.clone())
}

/// Collapse repeated links between the same source and target into one.
///
/// Direction matters: a link from b to a does not shadow one from a
/// to b. The surviving link sits at the position of the pair's first
/// occurrence but carries the fields of its last.
pub fn dedup_links(links: Vec<UnboundLink>) -> Vec<UnboundLink> {
    let mut kept: Vec<UnboundLink> = Vec::with_capacity(links.len());
    let mut position: HashMap<(NodeId, NodeId), usize> = HashMap::new();
    for link in links {
        let key = (link.source.clone(), link.target.clone());
        match position.get(&key) {
            Some(&at) => kept[at] = link,
            None => {
                position.insert(key, kept.len());
                kept.push(link);
            }
        }
    }
    kept
}

/// Partition nodes into those no link touches and the rest, preserving
/// order on both sides. Isolated nodes skip layering and collapsing and
/// are re-attached to the final view unchanged.
pub fn split_isolated(
    nodes: Vec<GraphNode>,
    links: &[UnboundLink],
) -> (Vec<GraphNode>, Vec<GraphNode>) {
    let touched: HashSet<&NodeId> = links
        .iter()
        .flat_map(|link| [&link.source, &link.target])
        .collect();
    nodes
        .into_iter()
        .partition(|node| !touched.contains(&node.id))
}
