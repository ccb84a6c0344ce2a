//! Interactive operations on a reduced graph: toggling a node between
//! its expanded and collapsed state, and inspecting any node wherever it
//! currently lives.

use crate::collapse::{fold_into_host, partition_collapse, CollapsePolicy};
use crate::store::SummaryGraph;
use serde::Serialize;
use tracing::debug;
use triplefold_core::node::NodeId;
use triplefold_core::term::TermType;

/// The state a node ends up in after a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeState {
    Expanded,
    Collapsed,
}

/// Everything known about one node, visible or not.
#[derive(Debug, Clone, Serialize)]
pub struct NodeDetails {
    pub id: NodeId,
    pub value: String,
    pub display_value: String,
    pub term_type: TermType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depiction: Option<String>,
    pub link_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<u32>,
    pub is_collapsed: bool,
    /// Nodes folded directly into this one.
    pub hidden_direct: usize,
    /// Nodes folded into this one at any depth.
    pub hidden_total: usize,
}

impl SummaryGraph {
    /// Collapse an expanded node or expand a collapsed one, and report
    /// the state it ends up in. `None` for ids that are not visible;
    /// hidden and isolated nodes cannot be toggled.
    pub fn toggle_node(&mut self, id: &NodeId, policy: CollapsePolicy) -> Option<NodeState> {
        let was_collapsed = self.node(id)?.is_collapsed;
        if was_collapsed {
            self.expand_node(id);
        } else {
            self.collapse_node(id, policy);
        }
        let state = if self.node(id)?.is_collapsed {
            NodeState::Collapsed
        } else {
            NodeState::Expanded
        };
        debug!(node = %id, ?state, "node toggled");
        Some(state)
    }

    /// Fold the node's farther surroundings into it.
    ///
    /// Under the dependency policy each neighbour strictly farther from
    /// the root is absorbed together with everything that depends on it.
    /// Under the agnostic policy the node is treated as a cut point and
    /// whole components fold in. A node with nothing to absorb stays
    /// expanded.
    pub fn collapse_node(&mut self, id: &NodeId, policy: CollapsePolicy) {
        if !self.contains(id) {
            return;
        }
        match policy {
            CollapsePolicy::Dependency => {
                let Some(host) = self.node(id) else {
                    return;
                };
                let host_distance = host.distance;
                let mut farther: Vec<NodeId> = Vec::new();
                for link in self.visible_links() {
                    if !link.touches(id) {
                        continue;
                    }
                    let Some(other) = link.other_end(id) else {
                        continue;
                    };
                    if other == id || farther.contains(other) {
                        continue;
                    }
                    let Some(neighbour) = self.node(other) else {
                        continue;
                    };
                    if is_farther(neighbour.distance, host_distance) {
                        farther.push(other.clone());
                    }
                }
                for neighbour in farther {
                    // absorbed into the host by an earlier iteration
                    if self.contains(&neighbour) {
                        fold_into_host(self, id, &neighbour);
                    }
                }
            }
            CollapsePolicy::Agnostic => partition_collapse(self, id),
        }
        self.refresh_link_counts();
    }

    /// Bring back what the node hides, one level deep. Children that
    /// hide content of their own stay collapsed until toggled
    /// themselves. Returns false for ids that are not visible and when
    /// there is nothing to restore.
    pub fn expand_node(&mut self, id: &NodeId) -> bool {
        if !self.contains(id) {
            return false;
        }
        let restored = self.restore_direct(id);
        if restored {
            self.refresh_link_counts();
        }
        restored
    }

    /// Details for a node, looked up among the visible, the isolated and
    /// the hidden in that order.
    pub fn inspect(&self, id: &NodeId) -> Option<NodeDetails> {
        let node = self
            .node(id)
            .or_else(|| self.isolated_nodes().iter().find(|n| &n.id == id))
            .or_else(|| self.hidden_node(id))?;
        Some(NodeDetails {
            id: node.id.clone(),
            value: node.value.clone(),
            display_value: node.display_value.clone(),
            term_type: node.term_type,
            label: node.label.clone(),
            depiction: node.depiction.clone(),
            link_count: node.link_count,
            distance: node.distance,
            is_collapsed: node.is_collapsed,
            hidden_direct: self.hidden_subgraph(id).map_or(0, |sub| sub.nodes.len()),
            hidden_total: self.hidden_under(id).len(),
        })
    }
}

fn is_farther(a: Option<u32>, b: Option<u32>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a > b,
        _ => false,
    }
}
