//! Loading triples, prefix declarations and filter lists from disk.

use anyhow::{Context, Result};
use triplefold::prelude::*;

/// Read a JSON array of triples. Terms accept both `termType` and the
/// shorter `type` key.
pub fn load_triples(path: &str) -> Result<Vec<Triple>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read triples: {path}"))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse triples: {path}"))
}

/// Read and validate a prefix declaration file. No file means an empty
/// table, leaving every value unshortened.
pub fn load_prefixes(path: Option<&str>) -> Result<PrefixTable> {
    let Some(path) = path else {
        return Ok(PrefixTable::new(vec![]));
    };
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read prefixes: {path}"))?;
    PrefixTable::validate(&content)
        .with_context(|| format!("Invalid prefix declaration in {path}"))?;
    Ok(PrefixTable::parse(&content))
}

/// Build the admission filter from optional whitelist and blacklist files.
pub fn load_filter(whitelist: Option<&str>, blacklist: Option<&str>) -> Result<TripleFilter> {
    Ok(TripleFilter::from_texts(
        &read_filter_text(whitelist)?,
        &read_filter_text(blacklist)?,
    ))
}

fn read_filter_text(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read filter list: {path}")),
        None => Ok(String::new()),
    }
}
