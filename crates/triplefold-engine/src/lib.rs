//! # Triplefold Engine
//!
//! The reduction pipeline that turns a flat triple sequence into a
//! capacity-bounded, interactively explorable graph:
//!
//! 1. [`builder`] - filtered triples to a deduplicated node/link graph
//! 2. [`layering`] - root selection and link normalization
//! 3. [`collapse`] - capacity-driven folding under two policies
//! 4. [`controller`] - per-node expand/collapse toggles and inspection
//! 5. [`view`] - the bound view model handed to a renderer
//!
//! The [`store`] module holds the graph itself: visible nodes and links in
//! a petgraph store, hidden subgraphs in an arena keyed by node id.

pub mod builder;
pub mod collapse;
pub mod controller;
pub mod layering;
pub mod store;
pub mod view;
