//! # Triplefold
//!
//! Capacity-bounded summarization of RDF triple sets into node-link graphs.
//!
//! Triplefold turns a flat list of triples into a graph a person can
//! actually look at: nodes are deduplicated, links are deduplicated, a
//! root is chosen, and the layers farthest from the root are folded into
//! their closer neighbours until at most a configured number of nodes
//! remains visible. Nothing is thrown away, so any folded node can later
//! be expanded again.
//!
//! ## Quick Start
//!
//! ```rust
//! use triplefold::prelude::*;
//!
//! let triples = vec![
//!     Triple::new(
//!         Term::uri("http://example.com/alice"),
//!         Term::uri("http://xmlns.com/foaf/0.1/knows"),
//!         Term::uri("http://example.com/bob"),
//!     ),
//!     Triple::new(
//!         Term::uri("http://example.com/bob"),
//!         Term::uri("http://xmlns.com/foaf/0.1/knows"),
//!         Term::uri("http://example.com/carol"),
//!     ),
//! ];
//!
//! // Shorten namespaces for display, admit every triple
//! let prefixes = PrefixTable::parse("PREFIX foaf: <http://xmlns.com/foaf/0.1/>");
//! let graph = build_graph(&triples, &prefixes, &TripleFilter::default());
//!
//! // Reduce to at most ten visible nodes and bind for rendering
//! let summary = layer_and_collapse(graph, 10, None, CollapsePolicy::Dependency).unwrap();
//! let view = bind_view(&summary, &ViewOptions::default());
//!
//! assert_eq!(view.nodes.len(), 3);
//! assert_eq!(view.links[0].display_value, "foaf:knows");
//! ```
//!
//! ## Folding and expanding
//!
//! Reduction keeps every folded node reachable through its host:
//!
//! ```rust
//! use triplefold::prelude::*;
//!
//! let p = Term::uri("http://example.com/p");
//! let triples = vec![
//!     Triple::new(Term::uri("ex:a"), p.clone(), Term::uri("ex:b")),
//!     Triple::new(Term::uri("ex:b"), p.clone(), Term::uri("ex:c")),
//!     Triple::new(Term::uri("ex:c"), p.clone(), Term::uri("ex:d")),
//! ];
//! let graph = build_graph(&triples, &PrefixTable::new(vec![]), &TripleFilter::default());
//!
//! let mut summary =
//!     layer_and_collapse(graph, 2, Some("ex:a"), CollapsePolicy::Dependency).unwrap();
//! assert_eq!(summary.visible_count(), 2);
//!
//! // b absorbed the rest of the chain and can give it back
//! let b = NodeId::new("ex:b");
//! assert!(summary.node(&b).unwrap().is_collapsed);
//! assert_eq!(summary.hidden_under(&b).len(), 2);
//!
//! summary.toggle_node(&b, CollapsePolicy::Dependency);
//! assert_eq!(summary.visible_count(), 3);
//! ```
//!
//! ## Architecture
//!
//! Triplefold is organized into several crates:
//!
//! - [`triplefold_core`] - Terms, nodes, links, prefix tables, SPO filters
//! - [`triplefold_engine`] - Conversion, layering, collapsing, view binding
//!
//! ## Pipeline
//!
//! | Step | Operation | What It Does |
//! |------|-----------|--------------|
//! | 1 | `build_graph` | Filter triples, merge nodes, collect raw links |
//! | 2 | `select_root` | Preferred display value, else best-connected node |
//! | 3 | `layer_and_collapse` | Distance layers folded inward to the capacity |
//! | 4 | `toggle_node` | Interactive collapse and expand on the result |
//! | 5 | `bind_view` | Positions and radii for a force-directed renderer |

// Re-export all subcrates
pub use triplefold_core as core;
pub use triplefold_engine as engine;

/// Prelude module for convenient imports.
///
/// ```rust
/// use triplefold::prelude::*;
/// ```
pub mod prelude {
    // Terms and triples
    pub use triplefold_core::term::{Term, TermType, Triple};

    // Graph building blocks
    pub use triplefold_core::node::{
        GraphNode, NodeId, UnboundLink, UnstructuredGraph, DEPICTION_PREDICATE, LABEL_PREDICATE,
    };

    // Prefixes and filters
    pub use triplefold_core::filter::{SpoFilterList, SpoText, TripleFilter};
    pub use triplefold_core::prefix::{Prefix, PrefixTable};

    // Error types
    pub use triplefold_core::error::{ReduceError, ReduceResult};

    // Engine
    pub use triplefold_engine::builder::build_graph;
    pub use triplefold_engine::collapse::{layer_and_collapse, CollapsePolicy};
    pub use triplefold_engine::controller::{NodeDetails, NodeState};
    pub use triplefold_engine::layering::{dedup_links, select_root, split_isolated};
    pub use triplefold_engine::store::{HiddenSubgraph, SummaryGraph};
    pub use triplefold_engine::view::{bind_view, BoundLink, GraphView, ViewNode, ViewOptions};
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
