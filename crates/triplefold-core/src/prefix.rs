//! Namespace prefix tables.
//!
//! A prefix table shortens raw IRIs for display (`apply`) and expands
//! prefixed names back (`resolve`). Declarations are accepted in both
//! Turtle 1.0 (`@prefix ex: <http://example.com/> .`) and SPARQL 1.1
//! (`PREFIX ex: <http://example.com/>`) form.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::LazyLock;
use thiserror::Error;

static DECLARATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:PREFIX\s+(\w*:)\s*<([^>]*)>|@prefix\s+(\w*:)\s*<([^>]*)>\s*\.)$").unwrap()
});

/// A declaration line that is neither empty nor a valid prefix form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid prefix declaration on line {line}: {text}")]
pub struct InvalidPrefix {
    /// 1-based line number within the declaration block.
    pub line: usize,
    pub text: String,
}

/// One namespace binding. The `prefix` field keeps its trailing colon,
/// so applying it is a plain text substitution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prefix {
    pub prefix: String,
    pub uri: String,
}

impl Prefix {
    pub fn new(prefix: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            uri: uri.into(),
        }
    }
}

/// An ordered list of namespace bindings. Order matters: when bindings
/// conflict, the earlier one wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefixTable {
    prefixes: Vec<Prefix>,
}

impl PrefixTable {
    pub fn new(prefixes: Vec<Prefix>) -> Self {
        Self { prefixes }
    }

    /// Parse a declaration block, one declaration per line. Empty and
    /// unparsable lines are dropped; use [`PrefixTable::validate`] first
    /// to reject malformed input instead.
    pub fn parse(block: &str) -> Self {
        Self {
            prefixes: block.lines().filter_map(parse_declaration).collect(),
        }
    }

    /// Check every line of a declaration block, reporting the first
    /// malformed one. Empty lines and an empty block are fine.
    pub fn validate(block: &str) -> Result<(), InvalidPrefix> {
        for (i, line) in block.lines().enumerate() {
            if !is_valid_declaration(line) {
                return Err(InvalidPrefix {
                    line: i + 1,
                    text: line.to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Prefix> {
        self.prefixes.iter()
    }

    /// Shorten every namespace occurrence in `statement`.
    ///
    /// Each prefix name and each namespace URI is applied at most once, so
    /// of two bindings for the same namespace only the first takes effect.
    /// A statement that *is* a bound namespace URI is left whole rather
    /// than shortened to a bare prefix.
    pub fn apply(&self, statement: &str) -> String {
        let mut shortened = statement.to_string();
        let mut used: HashSet<&str> = HashSet::new();
        for p in &self.prefixes {
            if shortened == p.uri || used.contains(p.prefix.as_str()) || used.contains(p.uri.as_str())
            {
                continue;
            }
            shortened = shortened.replace(&p.uri, &p.prefix);
            used.insert(&p.prefix);
            used.insert(&p.uri);
        }
        shortened
    }

    /// Expand every prefixed name in `statement` back to its namespace URI.
    pub fn resolve(&self, statement: &str) -> String {
        let mut resolved = statement.to_string();
        for p in &self.prefixes {
            resolved = resolved.replace(&p.prefix, &p.uri);
        }
        resolved
    }

    /// Print the table as a block of SPARQL 1.1 declarations.
    pub fn to_declaration_block(&self) -> String {
        let mut block = String::new();
        for p in &self.prefixes {
            block.push_str(&format!("PREFIX {} <{}>\n", p.prefix, p.uri));
        }
        block
    }
}

impl From<Vec<Prefix>> for PrefixTable {
    fn from(prefixes: Vec<Prefix>) -> Self {
        Self::new(prefixes)
    }
}

/// Whether a single line is an acceptable declaration. Empty lines are.
pub fn is_valid_declaration(line: &str) -> bool {
    let line = line.trim();
    line.is_empty() || DECLARATION_RE.is_match(line)
}

/// Parse a single declaration line. Empty and malformed lines yield `None`.
pub fn parse_declaration(line: &str) -> Option<Prefix> {
    let caps = DECLARATION_RE.captures(line.trim())?;
    let (prefix, uri) = match (caps.get(1), caps.get(3)) {
        (Some(p), _) => (p, caps.get(2)?),
        (_, Some(p)) => (p, caps.get(4)?),
        _ => return None,
    };
    Some(Prefix::new(prefix.as_str(), uri.as_str()))
}
