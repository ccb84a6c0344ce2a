//! Conversion of triples into the node and link lists the reduction
//! works on.
//!
//! Subjects and URI or blank-node objects convert to one node per
//! distinct value, merged across sightings in first-seen order. Literal
//! objects convert to a fresh node every time, so repeated literal
//! values stay apart in the graph. Label and depiction statements
//! additionally annotate their subject node.
//!
//! Link counts here are raw: every admitted triple contributes to its
//! endpoints' counts, duplicates included, a self reference once. Root
//! selection reads these counts before links are deduplicated.

use std::collections::HashMap;
use tracing::debug;
use triplefold_core::filter::{SpoText, TripleFilter};
use triplefold_core::node::{
    GraphNode, NodeId, UnboundLink, UnstructuredGraph, DEPICTION_PREDICATE, LABEL_PREDICATE,
};
use triplefold_core::prefix::PrefixTable;
use triplefold_core::term::Triple;

/// Convert the triples that pass `filter` into an unstructured graph.
///
/// The filter sees each triple twice, raw and with `prefixes` applied,
/// and display values on the resulting nodes and links are the
/// prefix-shortened forms.
pub fn build_graph(
    triples: &[Triple],
    prefixes: &PrefixTable,
    filter: &TripleFilter,
) -> UnstructuredGraph {
    let mut nodes: Vec<GraphNode> = Vec::new();
    let mut positions: HashMap<NodeId, usize> = HashMap::new();
    let mut links: Vec<UnboundLink> = Vec::new();
    let mut literal_seq: u64 = 0;
    let mut admitted = 0usize;

    for triple in triples {
        let subject_display = prefixes.apply(&triple.subject.value);
        let predicate_display = prefixes.apply(&triple.predicate.value);
        let object_display = prefixes.apply(&triple.object.value);
        let displayed = SpoText {
            subject: &subject_display,
            predicate: &predicate_display,
            object: &object_display,
        };
        if !filter.admits(SpoText::from(triple), displayed) {
            continue;
        }
        admitted += 1;

        let subject_id = NodeId::new(triple.subject.value.clone());
        let subject_at = upsert(
            &mut nodes,
            &mut positions,
            GraphNode::new(
                subject_id.clone(),
                triple.subject.value.clone(),
                subject_display,
                triple.subject.term_type,
            ),
        );
        if triple.predicate.value == LABEL_PREDICATE {
            nodes[subject_at].label = Some(triple.object.value.clone());
        } else if triple.predicate.value == DEPICTION_PREDICATE {
            nodes[subject_at].depiction = Some(triple.object.value.clone());
        }

        let object_id = if triple.object.is_literal() {
            literal_seq += 1;
            NodeId::literal(&triple.object.value, literal_seq)
        } else {
            NodeId::new(triple.object.value.clone())
        };
        upsert(
            &mut nodes,
            &mut positions,
            GraphNode::new(
                object_id.clone(),
                triple.object.value.clone(),
                object_display,
                triple.object.term_type,
            ),
        );

        links.push(UnboundLink::new(
            subject_id,
            object_id,
            &triple.predicate,
            predicate_display,
        ));
    }

    for link in &links {
        if let Some(&at) = positions.get(&link.source) {
            nodes[at].link_count += 1;
        }
        if link.target != link.source {
            if let Some(&at) = positions.get(&link.target) {
                nodes[at].link_count += 1;
            }
        }
    }

    debug!(
        triples = triples.len(),
        admitted,
        nodes = nodes.len(),
        links = links.len(),
        "triples converted"
    );
    UnstructuredGraph { nodes, links }
}

fn upsert(
    nodes: &mut Vec<GraphNode>,
    positions: &mut HashMap<NodeId, usize>,
    node: GraphNode,
) -> usize {
    match positions.get(&node.id) {
        Some(&at) => {
            nodes[at].merge_from(node);
            at
        }
        None => {
            let at = nodes.len();
            positions.insert(node.id.clone(), at);
            nodes.push(node);
            at
        }
    }
}
