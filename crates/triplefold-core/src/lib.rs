//! # Triplefold Core
//!
//! Shared types for the Triplefold graph summarization engine:
//!
//! - [`term`] - RDF terms and triples in SPARQL-JSON shape
//! - [`node`] - graph nodes, unbound links, and the unstructured graph
//! - [`prefix`] - namespace prefix tables (TTL 1.0 / SPARQL 1.1 declarations)
//! - [`filter`] - subject/predicate/object pattern lists and triple admission
//! - [`error`] - reduction error values
//!
//! This crate holds no algorithms; the reduction pipeline lives in
//! `triplefold-engine`.

pub mod error;
pub mod filter;
pub mod node;
pub mod prefix;
pub mod term;

pub mod prelude;
