//! RDF terms and triples as delivered by SPARQL JSON result sets.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of an RDF term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TermType {
    /// A named resource.
    Uri,
    /// A literal value (string, number, date, ...).
    Literal,
    /// A blank node.
    Bnode,
}

impl fmt::Display for TermType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TermType::Uri => write!(f, "uri"),
            TermType::Literal => write!(f, "literal"),
            TermType::Bnode => write!(f, "bnode"),
        }
    }
}

/// A single RDF term: a value plus its kind.
///
/// Deserializes from both RDF/JS-style `termType` and SPARQL-JSON-style
/// `type` keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Term {
    pub value: String,
    #[serde(rename = "termType", alias = "type")]
    pub term_type: TermType,
}

impl Term {
    pub fn uri(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            term_type: TermType::Uri,
        }
    }

    pub fn literal(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            term_type: TermType::Literal,
        }
    }

    pub fn bnode(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            term_type: TermType::Bnode,
        }
    }

    /// Whether this term is a literal value.
    pub fn is_literal(&self) -> bool {
        self.term_type == TermType::Literal
    }
}

/// A subject-predicate-object statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Triple {
    pub subject: Term,
    pub predicate: Term,
    pub object: Term,
}

impl Triple {
    pub fn new(subject: Term, predicate: Term, object: Term) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }
}
