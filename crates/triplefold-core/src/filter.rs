//! Pattern lists over the three triple positions, and the admission rule
//! combining a whitelist with a blacklist.
//!
//! Filter lists are plain text, one pattern per line. A line may start
//! with position markers `+s`, `+p`, `+o` (any order) restricting it to
//! the subject, predicate or object position; a line without markers
//! applies to all three. A leading `\+` is not a marker, so patterns that
//! really start with a plus sign can be written as `\+...`. Patterns are
//! case-insensitive, multi-line regexes matched anywhere in the value.

use crate::term::Triple;
use regex::{Regex, RegexBuilder};

/// The three textual values of a triple in one borrowed shape. The same
/// triple is usually tested twice, once with raw values and once with
/// prefix-shortened ones.
#[derive(Debug, Clone, Copy)]
pub struct SpoText<'a> {
    pub subject: &'a str,
    pub predicate: &'a str,
    pub object: &'a str,
}

impl<'a> From<&'a Triple> for SpoText<'a> {
    fn from(t: &'a Triple) -> Self {
        Self {
            subject: &t.subject.value,
            predicate: &t.predicate.value,
            object: &t.object.value,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct PositionMarkers {
    subject: bool,
    predicate: bool,
    object: bool,
}

impl PositionMarkers {
    fn any(&self) -> bool {
        self.subject || self.predicate || self.object
    }
}

/// Per-position pattern lists parsed from filter text.
///
/// Unparsable lines (bad regex syntax) and blank patterns are dropped.
#[derive(Debug, Clone, Default)]
pub struct SpoFilterList {
    pub subject: Vec<Regex>,
    pub predicate: Vec<Regex>,
    pub object: Vec<Regex>,
}

impl SpoFilterList {
    pub fn from_text(text: &str) -> Self {
        let mut list = Self::default();
        for line in text.lines() {
            if line.trim().is_empty() {
                continue;
            }
            let (markers, pattern) = split_position_markers(line);
            if pattern.trim().is_empty() {
                continue;
            }
            let Ok(re) = compile_pattern(pattern) else {
                continue;
            };
            if !markers.any() {
                list.subject.push(re.clone());
                list.predicate.push(re.clone());
                list.object.push(re);
                continue;
            }
            if markers.subject {
                list.subject.push(re.clone());
            }
            if markers.predicate {
                list.predicate.push(re.clone());
            }
            if markers.object {
                list.object.push(re);
            }
        }
        list
    }

    pub fn is_empty(&self) -> bool {
        self.subject.is_empty() && self.predicate.is_empty() && self.object.is_empty()
    }

    /// Whether any pattern matches its position's value, raw or displayed.
    pub fn matches(&self, raw: SpoText<'_>, displayed: SpoText<'_>) -> bool {
        position_matches(&self.subject, raw.subject, displayed.subject)
            || position_matches(&self.predicate, raw.predicate, displayed.predicate)
            || position_matches(&self.object, raw.object, displayed.object)
    }
}

/// Whitelist and blacklist combined into one admission decision.
#[derive(Debug, Clone, Default)]
pub struct TripleFilter {
    pub whitelist: SpoFilterList,
    pub blacklist: SpoFilterList,
}

impl TripleFilter {
    pub fn new(whitelist: SpoFilterList, blacklist: SpoFilterList) -> Self {
        Self {
            whitelist,
            blacklist,
        }
    }

    pub fn from_texts(whitelist: &str, blacklist: &str) -> Self {
        Self::new(
            SpoFilterList::from_text(whitelist),
            SpoFilterList::from_text(blacklist),
        )
    }

    /// The admission rule:
    ///
    /// | whitelist | blacklist | admitted               |
    /// |-----------|-----------|------------------------|
    /// | empty     | empty     | always                 |
    /// | present   | empty     | iff whitelisted        |
    /// | empty     | present   | iff not blacklisted    |
    /// | present   | present   | iff whitelisted and not blacklisted |
    pub fn admits(&self, raw: SpoText<'_>, displayed: SpoText<'_>) -> bool {
        match (self.whitelist.is_empty(), self.blacklist.is_empty()) {
            (true, true) => true,
            (false, true) => self.whitelist.matches(raw, displayed),
            (true, false) => !self.blacklist.matches(raw, displayed),
            (false, false) => {
                self.whitelist.matches(raw, displayed) && !self.blacklist.matches(raw, displayed)
            }
        }
    }
}

fn compile_pattern(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .multi_line(true)
        .build()
}

fn position_matches(patterns: &[Regex], raw: &str, displayed: &str) -> bool {
    patterns
        .iter()
        .any(|re| re.is_match(raw) || re.is_match(displayed))
}

/// Consume up to three leading `+s`/`+p`/`+o` markers; anything else,
/// including an escaping backslash, ends the marker run.
fn split_position_markers(line: &str) -> (PositionMarkers, &str) {
    let mut markers = PositionMarkers::default();
    let mut rest = line;
    for _ in 0..3 {
        let mut chars = rest.chars();
        if chars.next() != Some('+') {
            break;
        }
        match chars.next() {
            Some('s') => markers.subject = true,
            Some('p') => markers.predicate = true,
            Some('o') => markers.object = true,
            _ => break,
        }
        rest = &rest[2..];
    }
    (markers, rest)
}
