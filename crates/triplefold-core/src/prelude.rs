//! Triplefold Core Prelude for convenient imports.
//!
//! ```rust
//! use triplefold_core::prelude::*;
//! ```

// Re-export commonly used types
pub use crate::term::{Term, TermType, Triple};

pub use crate::node::{
    GraphNode, NodeId, UnboundLink, UnstructuredGraph, DEPICTION_PREDICATE, LABEL_PREDICATE,
};

pub use crate::prefix::{Prefix, PrefixTable};

pub use crate::filter::{SpoFilterList, SpoText, TripleFilter};

// Re-export error types
pub use crate::error::{ReduceError, ReduceResult};
