//! The render-ready form of a summary graph.
//!
//! Binding resolves link endpoints from ids to positions in the node
//! list and sizes every node from its display text, which is all a
//! force-directed renderer needs to lay the graph out.

use crate::store::SummaryGraph;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;
use triplefold_core::node::{GraphNode, NodeId};
use triplefold_core::term::TermType;

/// Node sizing knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewOptions {
    /// Display text beyond this many characters stops growing the node.
    pub max_text_length: usize,
    /// Radius contributed per counted character.
    pub node_radius_factor: f64,
    pub padding: f64,
    pub margin: f64,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            max_text_length: 24,
            node_radius_factor: 3.0,
            padding: 8.0,
            margin: 4.0,
        }
    }
}

/// A node with its computed radius.
#[derive(Debug, Clone, Serialize)]
pub struct ViewNode {
    #[serde(flatten)]
    pub node: GraphNode,
    pub radius: f64,
}

/// A link with endpoints resolved to node positions.
#[derive(Debug, Clone, Serialize)]
pub struct BoundLink {
    pub source: usize,
    pub target: usize,
    pub predicate: String,
    pub display_value: String,
    pub term_type: TermType,
}

/// The bound graph handed to a renderer: visible nodes first, isolated
/// nodes after them, links by position.
#[derive(Debug, Clone, Serialize)]
pub struct GraphView {
    pub nodes: Vec<ViewNode>,
    pub links: Vec<BoundLink>,
    /// Position of the root node, when it is part of the view.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<usize>,
}

fn radius_for(node: &GraphNode, options: &ViewOptions) -> f64 {
    let counted = node.display_value.chars().count().min(options.max_text_length);
    counted as f64 * options.node_radius_factor + options.padding + options.margin
}

impl SummaryGraph {
    /// Bind this graph for rendering. See [`bind_view`].
    pub fn view(&self, options: &ViewOptions) -> GraphView {
        bind_view(self, options)
    }
}

/// Bind a summary graph for rendering.
pub fn bind_view(graph: &SummaryGraph, options: &ViewOptions) -> GraphView {
    let mut nodes: Vec<ViewNode> = Vec::new();
    let mut positions: HashMap<&NodeId, usize> = HashMap::new();
    for node in graph.visible_nodes().chain(graph.isolated_nodes().iter()) {
        positions.insert(&node.id, nodes.len());
        nodes.push(ViewNode {
            node: node.clone(),
            radius: radius_for(node, options),
        });
    }

    let mut links: Vec<BoundLink> = Vec::new();
    for link in graph.visible_links() {
        match (positions.get(&link.source), positions.get(&link.target)) {
            (Some(&source), Some(&target)) => links.push(BoundLink {
                source,
                target,
                predicate: link.predicate.clone(),
                display_value: link.display_value.clone(),
                term_type: link.term_type,
            }),
            _ => {
                warn!(
                    source = %link.source,
                    target = %link.target,
                    "skipping link without a bindable endpoint"
                );
            }
        }
    }

    let root = positions.get(graph.root()).copied();
    GraphView { nodes, links, root }
}
