//! The summary graph store.
//!
//! Visible nodes and links live in a petgraph `StableUnGraph` with a
//! HashMap index for O(1) lookup by node id. Hidden state is flat: an
//! arena holds the payload of every hidden node, `hidden_by` records which
//! visible (or itself hidden) host owns it, and each host keeps an ordered
//! list of the node ids and links folded into it. Folding nests, since a
//! hidden node can own further hidden nodes, but the store never nests
//! data, only ownership edges.
//!
//! Every fold and every expansion moves nodes and links between the
//! visible store and the arena without dropping or duplicating anything,
//! so visible plus hidden always equals the post-conversion total.

use petgraph::stable_graph::{NodeIndex, StableUnGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::warn;
use triplefold_core::node::{GraphNode, NodeId, UnboundLink};

/// The nodes and links folded directly into one host node.
#[derive(Debug, Clone, Default)]
pub struct HiddenSubgraph {
    /// Direct children in fold order. Children may own further hidden
    /// subgraphs of their own.
    pub nodes: Vec<NodeId>,
    pub links: Vec<UnboundLink>,
}

/// A reduced graph: the visible subgraph plus everything folded away,
/// and the originally isolated nodes kept to the side.
#[derive(Debug)]
pub struct SummaryGraph {
    pub(crate) graph: StableUnGraph<GraphNode, UnboundLink>,
    /// Map from node id to petgraph's internal index, visible nodes only.
    pub(crate) index: HashMap<NodeId, NodeIndex>,
    pub(crate) root: NodeId,
    /// Nodes without any link after dedup. They are rendered but take no
    /// part in layering, capacity accounting, or collapsing.
    pub(crate) isolated: Vec<GraphNode>,
    /// Host id to its directly folded content.
    pub(crate) hidden: HashMap<NodeId, HiddenSubgraph>,
    /// Payloads of all currently hidden nodes.
    pub(crate) arena: HashMap<NodeId, GraphNode>,
    /// Hidden node id to the host that owns it.
    pub(crate) hidden_by: HashMap<NodeId, NodeId>,
}

impl SummaryGraph {
    pub(crate) fn new(
        root: NodeId,
        nodes: Vec<GraphNode>,
        links: Vec<UnboundLink>,
        isolated: Vec<GraphNode>,
    ) -> Self {
        let mut graph = StableUnGraph::<GraphNode, UnboundLink>::default();
        let mut index = HashMap::new();
        for node in nodes {
            let id = node.id.clone();
            let idx = graph.add_node(node);
            index.insert(id, idx);
        }
        for link in links {
            match (index.get(&link.source), index.get(&link.target)) {
                (Some(&s), Some(&t)) => {
                    graph.add_edge(s, t, link);
                }
                _ => {
                    warn!(
                        source = %link.source,
                        target = %link.target,
                        "dropping link with unknown endpoint"
                    );
                }
            }
        }
        let mut this = Self {
            graph,
            index,
            root,
            isolated,
            hidden: HashMap::new(),
            arena: HashMap::new(),
            hidden_by: HashMap::new(),
        };
        this.refresh_link_counts();
        this
    }

    /// The node every distance is measured from.
    pub fn root(&self) -> &NodeId {
        &self.root
    }

    /// Number of visible, non-isolated nodes. This is the count the
    /// capacity bound applies to.
    pub fn visible_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of hidden nodes across all hosts.
    pub fn hidden_count(&self) -> usize {
        self.arena.len()
    }

    /// Visible + hidden + isolated. Constant across folds and expansions.
    pub fn total_count(&self) -> usize {
        self.graph.node_count() + self.arena.len() + self.isolated.len()
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.index.contains_key(id)
    }

    /// A visible node by id.
    pub fn node(&self, id: &NodeId) -> Option<&GraphNode> {
        self.index.get(id).map(|&idx| &self.graph[idx])
    }

    /// A hidden node by id.
    pub fn hidden_node(&self, id: &NodeId) -> Option<&GraphNode> {
        self.arena.get(id)
    }

    /// Visible nodes in insertion order.
    pub fn visible_nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.graph.node_indices().map(|idx| &self.graph[idx])
    }

    /// Visible links in insertion order.
    pub fn visible_links(&self) -> impl Iterator<Item = &UnboundLink> {
        self.graph.edge_references().map(|e| e.weight())
    }

    pub fn isolated_nodes(&self) -> &[GraphNode] {
        &self.isolated
    }

    /// The content folded directly into `host`, if any.
    pub fn hidden_subgraph(&self, host: &NodeId) -> Option<&HiddenSubgraph> {
        self.hidden.get(host)
    }

    /// Every node hidden under `host`, including nodes hidden inside
    /// hidden nodes, in fold order depth-first.
    pub fn hidden_under(&self, host: &NodeId) -> Vec<&GraphNode> {
        let mut collected = Vec::new();
        let mut stack: Vec<&NodeId> = match self.hidden.get(host) {
            Some(sub) => sub.nodes.iter().rev().collect(),
            None => return collected,
        };
        while let Some(id) = stack.pop() {
            if let Some(node) = self.arena.get(id) {
                collected.push(node);
            }
            if let Some(sub) = self.hidden.get(id) {
                stack.extend(sub.nodes.iter().rev());
            }
        }
        collected
    }

    /// Ids of visible neighbours of `id`.
    pub fn neighbors_of(&self, id: &NodeId) -> Vec<NodeId> {
        let Some(&idx) = self.index.get(id) else {
            return Vec::new();
        };
        self.graph
            .neighbors(idx)
            .map(|n| self.graph[n].id.clone())
            .collect()
    }

    /// Links that are the only connection between their two endpoints.
    pub fn leaf_links(&self) -> Vec<&UnboundLink> {
        self.graph
            .edge_references()
            .filter(|e| self.graph.edges_connecting(e.source(), e.target()).count() == 1)
            .map(|e| e.weight())
            .collect()
    }

    /// Breadth-first distances from the root over the visible graph.
    /// Returns the greatest distance assigned. Unreachable nodes keep
    /// `None`; a root that is not in the visible store assigns nothing.
    pub(crate) fn assign_distances(&mut self) -> u32 {
        let indices: Vec<NodeIndex> = self.graph.node_indices().collect();
        for &idx in &indices {
            self.graph[idx].distance = None;
        }
        let Some(&root_idx) = self.index.get(&self.root) else {
            return 0;
        };

        let mut visited: HashSet<NodeIndex> = HashSet::new();
        let mut queue: VecDeque<(NodeIndex, u32)> = VecDeque::new();
        let mut greatest = 0;
        visited.insert(root_idx);
        queue.push_back((root_idx, 0));
        while let Some((current, distance)) = queue.pop_front() {
            self.graph[current].distance = Some(distance);
            if distance > greatest {
                greatest = distance;
            }
            let next_indices: Vec<NodeIndex> = self
                .graph
                .edges(current)
                .map(|edge| {
                    if edge.source() == current {
                        edge.target()
                    } else {
                        edge.source()
                    }
                })
                .collect();
            for next in next_indices {
                if visited.insert(next) {
                    queue.push_back((next, distance + 1));
                }
            }
        }
        greatest
    }

    /// Recompute every visible node's degree from the current link set.
    pub(crate) fn refresh_link_counts(&mut self) {
        let indices: Vec<NodeIndex> = self.graph.node_indices().collect();
        for idx in indices {
            self.graph[idx].link_count = self.graph.edges(idx).count();
        }
    }

    /// Connected components of the visible graph with `center` removed,
    /// in first-seen order.
    pub(crate) fn components_excluding(&self, center: NodeIndex) -> Vec<Vec<NodeIndex>> {
        let mut visited: HashSet<NodeIndex> = HashSet::new();
        visited.insert(center);
        let mut components = Vec::new();

        for start in self.graph.node_indices() {
            if visited.contains(&start) {
                continue;
            }
            let mut component = Vec::new();
            let mut queue = VecDeque::new();
            visited.insert(start);
            queue.push_back(start);
            while let Some(current) = queue.pop_front() {
                component.push(current);
                for edge in self.graph.edges(current) {
                    let next = if edge.source() == current {
                        edge.target()
                    } else {
                        edge.source()
                    };
                    if !visited.contains(&next) {
                        visited.insert(next);
                        queue.push_back(next);
                    }
                }
            }
            components.push(component);
        }
        components
    }

    /// Move `to_hide` and every link touching it out of the visible graph
    /// and into `host`'s hidden subgraph. Appends to whatever `host`
    /// already hides. No-op for an empty set.
    pub(crate) fn hide_set(&mut self, host: &NodeId, to_hide: &[NodeId]) {
        if to_hide.is_empty() {
            return;
        }
        debug_assert!(!to_hide.contains(host));
        let hiding: HashSet<&NodeId> = to_hide.iter().collect();

        // Links first: removing the nodes below would drop their edges.
        let loose_links: Vec<UnboundLink> = self
            .graph
            .edge_references()
            .filter(|e| {
                let w = e.weight();
                hiding.contains(&w.source) || hiding.contains(&w.target)
            })
            .map(|e| e.weight().clone())
            .collect();

        for id in to_hide {
            let Some(idx) = self.index.remove(id) else {
                continue;
            };
            if let Some(node) = self.graph.remove_node(idx) {
                self.arena.insert(id.clone(), node);
                self.hidden_by.insert(id.clone(), host.clone());
            }
        }

        let entry = self.hidden.entry(host.clone()).or_default();
        entry.nodes.extend(to_hide.iter().cloned());
        entry.links.extend(loose_links);
        if !entry.nodes.is_empty() {
            if let Some(&idx) = self.index.get(host) {
                self.graph[idx].is_collapsed = true;
            }
        }
    }

    /// Splice `host`'s direct hidden content back into the visible graph.
    /// Restored nodes that hide content of their own come back collapsed.
    /// Returns false if `host` hides nothing.
    pub(crate) fn restore_direct(&mut self, host: &NodeId) -> bool {
        let Some(sub) = self.hidden.remove(host) else {
            return false;
        };
        for id in &sub.nodes {
            self.hidden_by.remove(id);
            let Some(node) = self.arena.remove(id) else {
                continue;
            };
            let idx = self.graph.add_node(node);
            self.index.insert(id.clone(), idx);
        }
        for link in sub.links {
            match (self.index.get(&link.source), self.index.get(&link.target)) {
                (Some(&s), Some(&t)) => {
                    self.graph.add_edge(s, t, link);
                }
                _ => self.park_link_with_hidden_endpoint(link),
            }
        }
        if let Some(&idx) = self.index.get(host) {
            self.graph[idx].is_collapsed = false;
        }
        true
    }

    /// A restored link can have an endpoint that is meanwhile hidden
    /// under a different host. The link then moves to that host's hidden
    /// subgraph and resurfaces when the endpoint does.
    fn park_link_with_hidden_endpoint(&mut self, link: UnboundLink) {
        let owner = self
            .hidden_by
            .get(&link.source)
            .or_else(|| self.hidden_by.get(&link.target))
            .cloned();
        match owner {
            Some(host) => {
                self.hidden.entry(host).or_default().links.push(link);
            }
            None => {
                warn!(
                    source = %link.source,
                    target = %link.target,
                    "dropping restored link with unknown endpoint"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use triplefold_core::term::{Term, TermType};

    fn make_node(id: &str) -> GraphNode {
        GraphNode::new(NodeId::new(id), id, id, TermType::Uri)
    }

    fn make_link(source: &str, target: &str) -> UnboundLink {
        UnboundLink::new(
            NodeId::new(source),
            NodeId::new(target),
            &Term::uri("http://example.com/p"),
            "ex:p",
        )
    }

    fn chain_graph() -> SummaryGraph {
        // a - b - c - d
        SummaryGraph::new(
            NodeId::new("a"),
            vec![make_node("a"), make_node("b"), make_node("c"), make_node("d")],
            vec![make_link("a", "b"), make_link("b", "c"), make_link("c", "d")],
            vec![],
        )
    }

    #[test]
    fn distances_are_shortest_paths() {
        // diamond: a-b, a-c, b-d, c-d, plus a long detour d-e
        let mut g = SummaryGraph::new(
            NodeId::new("a"),
            vec![
                make_node("a"),
                make_node("b"),
                make_node("c"),
                make_node("d"),
                make_node("e"),
            ],
            vec![
                make_link("a", "b"),
                make_link("a", "c"),
                make_link("b", "d"),
                make_link("c", "d"),
                make_link("d", "e"),
            ],
            vec![],
        );
        let max = g.assign_distances();
        assert_eq!(max, 3);
        assert_eq!(g.node(&NodeId::new("a")).unwrap().distance, Some(0));
        assert_eq!(g.node(&NodeId::new("b")).unwrap().distance, Some(1));
        assert_eq!(g.node(&NodeId::new("c")).unwrap().distance, Some(1));
        assert_eq!(g.node(&NodeId::new("d")).unwrap().distance, Some(2));
        assert_eq!(g.node(&NodeId::new("e")).unwrap().distance, Some(3));
    }

    #[test]
    fn unreachable_nodes_keep_no_distance() {
        let mut g = SummaryGraph::new(
            NodeId::new("a"),
            vec![make_node("a"), make_node("b"), make_node("x"), make_node("y")],
            vec![make_link("a", "b"), make_link("x", "y")],
            vec![],
        );
        g.assign_distances();
        assert_eq!(g.node(&NodeId::new("x")).unwrap().distance, None);
        assert_eq!(g.node(&NodeId::new("y")).unwrap().distance, None);
    }

    #[test]
    fn hide_set_moves_nodes_and_incident_links() {
        let mut g = chain_graph();
        let host = NodeId::new("b");
        g.hide_set(&host, &[NodeId::new("c"), NodeId::new("d")]);

        assert_eq!(g.visible_count(), 2);
        assert_eq!(g.hidden_count(), 2);
        assert_eq!(g.total_count(), 4);
        assert!(g.node(&host).unwrap().is_collapsed);

        let sub = g.hidden_subgraph(&host).unwrap();
        assert_eq!(sub.nodes, vec![NodeId::new("c"), NodeId::new("d")]);
        // links b-c and c-d both touch the hidden set
        assert_eq!(sub.links.len(), 2);
        assert_eq!(g.visible_links().count(), 1);
    }

    #[test]
    fn restore_direct_is_the_inverse_of_hide_set() {
        let mut g = chain_graph();
        let host = NodeId::new("b");
        g.hide_set(&host, &[NodeId::new("c"), NodeId::new("d")]);
        assert!(g.restore_direct(&host));

        assert_eq!(g.visible_count(), 4);
        assert_eq!(g.hidden_count(), 0);
        assert_eq!(g.visible_links().count(), 3);
        assert!(!g.node(&host).unwrap().is_collapsed);
        assert!(g.contains(&NodeId::new("c")));
        assert!(g.contains(&NodeId::new("d")));
    }

    #[test]
    fn restore_of_host_without_hidden_content_reports_false() {
        let mut g = chain_graph();
        assert!(!g.restore_direct(&NodeId::new("b")));
    }

    #[test]
    fn hidden_under_walks_nested_folds() {
        let mut g = chain_graph();
        // d folds into c, then c (still hiding d) folds into b
        g.hide_set(&NodeId::new("c"), &[NodeId::new("d")]);
        g.hide_set(&NodeId::new("b"), &[NodeId::new("c")]);

        let under_b: Vec<&str> = g
            .hidden_under(&NodeId::new("b"))
            .iter()
            .map(|n| n.id.as_str())
            .collect();
        assert_eq!(under_b, vec!["c", "d"]);
        assert_eq!(g.hidden_under(&NodeId::new("c")).len(), 1);
    }

    #[test]
    fn restoring_nested_folds_brings_children_back_collapsed() {
        let mut g = chain_graph();
        g.hide_set(&NodeId::new("c"), &[NodeId::new("d")]);
        g.hide_set(&NodeId::new("b"), &[NodeId::new("c")]);

        g.restore_direct(&NodeId::new("b"));
        let c = g.node(&NodeId::new("c")).unwrap();
        assert!(c.is_collapsed);
        assert!(!g.contains(&NodeId::new("d")));
        assert_eq!(g.total_count(), 4);
    }

    #[test]
    fn link_to_a_node_hidden_elsewhere_is_parked_not_lost() {
        // a - b - c and c - d, d - a: hide c (with link c-d) under b,
        // then hide d under a, then expand b. The c-d link's endpoint d
        // is hidden, so the link must move to d's host instead of
        // disappearing.
        let mut g = SummaryGraph::new(
            NodeId::new("a"),
            vec![make_node("a"), make_node("b"), make_node("c"), make_node("d")],
            vec![
                make_link("a", "b"),
                make_link("b", "c"),
                make_link("c", "d"),
                make_link("d", "a"),
            ],
            vec![],
        );
        g.hide_set(&NodeId::new("b"), &[NodeId::new("c")]);
        g.hide_set(&NodeId::new("a"), &[NodeId::new("d")]);
        g.restore_direct(&NodeId::new("b"));

        // c is visible again; the c-d link waits in a's hidden subgraph
        assert!(g.contains(&NodeId::new("c")));
        let parked = g.hidden_subgraph(&NodeId::new("a")).unwrap();
        assert!(parked.links.iter().any(|l| l.touches(&NodeId::new("c"))));

        // and expanding a brings the full link set back
        g.restore_direct(&NodeId::new("a"));
        assert_eq!(g.visible_links().count(), 4);
        assert_eq!(g.total_count(), 4);
    }

    #[test]
    fn leaf_links_are_sole_connections() {
        let mut links = vec![
            make_link("a", "b"),
            make_link("b", "c"),
            make_link("c", "b"),
        ];
        links[0].predicate = "http://example.com/q".to_string();
        let g = SummaryGraph::new(
            NodeId::new("a"),
            vec![make_node("a"), make_node("b"), make_node("c")],
            links,
            vec![],
        );
        let leafs = g.leaf_links();
        // a-b is the only connection between a and b; the two b-c links
        // shadow each other
        assert_eq!(leafs.len(), 1);
        assert!(leafs[0].touches(&NodeId::new("a")));
    }

    #[test]
    fn components_excluding_center_splits_graph() {
        let g = chain_graph();
        let b = g.index[&NodeId::new("b")];
        let components = g.components_excluding(b);
        assert_eq!(components.len(), 2);
        assert_eq!(components[0].len(), 1); // a
        assert_eq!(components[1].len(), 2); // c, d
    }

    #[test]
    fn refresh_link_counts_tracks_current_degree() {
        let mut g = chain_graph();
        assert_eq!(g.node(&NodeId::new("b")).unwrap().link_count, 2);
        g.hide_set(&NodeId::new("b"), &[NodeId::new("c"), NodeId::new("d")]);
        g.refresh_link_counts();
        assert_eq!(g.node(&NodeId::new("b")).unwrap().link_count, 1);
    }
}
