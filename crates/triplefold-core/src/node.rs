//! Graph nodes and links produced from triple sets.
//!
//! Links at this stage are *unbound*: their endpoints are plain node ids.
//! Binding endpoints to node positions happens once, when a renderer view
//! is produced, so nothing in the pipeline ever mutates link endpoints.

use crate::term::{Term, TermType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Predicate whose objects become node labels.
pub const LABEL_PREDICATE: &str = "http://www.w3.org/2000/01/rdf-schema#label";

/// Predicate whose objects become node depiction URLs.
pub const DEPICTION_PREDICATE: &str = "http://xmlns.com/foaf/spec/#depiction";

/// Separator between a literal's value and its per-run sequence number.
/// U+001F cannot appear in an IRI, so literal ids never collide with
/// resource ids.
const LITERAL_ID_SEPARATOR: char = '\u{1f}';

/// Unique identifier of a node within one conversion run.
///
/// Resources and blank nodes are identified by their term value. Literals
/// get a fresh id per occurrence, see [`NodeId::literal`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Id for the `seq`-th literal occurrence in a run. Two occurrences of
    /// the same literal value stay distinct nodes.
    pub fn literal(value: &str, seq: u64) -> Self {
        Self(format!("{value}{LITERAL_ID_SEPARATOR}{seq}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A node of the summarized graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: NodeId,
    /// Raw term value.
    pub value: String,
    /// Prefix-shortened term value, used for display and root lookup.
    pub display_value: String,
    pub term_type: TermType,
    /// Object of an `rdfs:label` statement about this node, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Object of a FOAF depiction statement about this node, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depiction: Option<String>,
    /// Degree in the current link set.
    #[serde(default)]
    pub link_count: usize,
    /// Hops from the root along the layering spanning forest. `None` until
    /// layering runs, and for nodes unreachable from the root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<u32>,
    /// Whether this node currently hides a collapsed subgraph.
    #[serde(default)]
    pub is_collapsed: bool,
}

impl GraphNode {
    pub fn new(
        id: NodeId,
        value: impl Into<String>,
        display_value: impl Into<String>,
        term_type: TermType,
    ) -> Self {
        Self {
            id,
            value: value.into(),
            display_value: display_value.into(),
            term_type,
            label: None,
            depiction: None,
            link_count: 0,
            distance: None,
            is_collapsed: false,
        }
    }

    /// Merge a later sighting of the same node into this one. Known
    /// `label`/`depiction` values survive unless the newer sighting also
    /// carries one.
    pub fn merge_from(&mut self, other: GraphNode) {
        debug_assert_eq!(self.id, other.id);
        self.value = other.value;
        self.display_value = other.display_value;
        self.term_type = other.term_type;
        if other.label.is_some() {
            self.label = other.label;
        }
        if other.depiction.is_some() {
            self.depiction = other.depiction;
        }
    }
}

/// A link between two nodes, endpoints held as plain ids.
///
/// Carries the predicate that produced it; the predicate's value doubles
/// as the link's display label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnboundLink {
    pub source: NodeId,
    pub target: NodeId,
    /// Raw predicate value.
    pub predicate: String,
    /// Prefix-shortened predicate value.
    pub display_value: String,
    pub term_type: TermType,
}

impl UnboundLink {
    pub fn new(
        source: NodeId,
        target: NodeId,
        predicate: &Term,
        display_value: impl Into<String>,
    ) -> Self {
        Self {
            source,
            target,
            predicate: predicate.value.clone(),
            display_value: display_value.into(),
            term_type: predicate.term_type,
        }
    }

    /// Whether the link has `id` as one of its endpoints.
    pub fn touches(&self, id: &NodeId) -> bool {
        self.source == *id || self.target == *id
    }

    /// The endpoint opposite to `id`, or `None` if `id` is not an endpoint.
    pub fn other_end(&self, id: &NodeId) -> Option<&NodeId> {
        if self.source == *id {
            Some(&self.target)
        } else if self.target == *id {
            Some(&self.source)
        } else {
            None
        }
    }
}

/// The deduplicated node set and raw link list produced by conversion,
/// before any layering or collapsing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnstructuredGraph {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<UnboundLink>,
}

impl UnstructuredGraph {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
