//! Error values for graph reduction.
//!
//! Reduction failures are ordinary values a caller can branch on, never
//! panics: a caller asking for a reduction of an empty graph, or naming a
//! root that does not exist, gets told so.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for reduction operations.
pub type ReduceResult<T> = std::result::Result<T, ReduceError>;

/// Ways a reduction can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReduceError {
    /// No nodes survived filtering and conversion.
    #[error("Graph is empty")]
    EmptyGraph,
    /// The requested root matches no node's display value.
    #[error("Preferred source node not found: {0}")]
    PreferredSourceNodeNotFound(String),
}

impl ReduceError {
    pub fn preferred_source_node_not_found(value: impl Into<String>) -> Self {
        ReduceError::PreferredSourceNodeNotFound(value.into())
    }
}
