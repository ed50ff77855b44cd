//! Ordered match table
//!
//! The direct output of the ordering builder. Entries are sorted by descending byte length with
//! declaration order kept between equal lengths, so the first entry that prefixes the input is
//! the longest match.

use crate::alias::{ByteSequence, Token};
use crate::error::NoMatch;
use crate::recognizer::Classify;

/// One normalized alias and the token it denotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchEntry<T> {
    bytes: ByteSequence,
    token: T,
    alias: String,
}

impl<T> MatchEntry<T> {
    pub(crate) fn new(bytes: ByteSequence, token: T, alias: impl Into<String>) -> Self {
        Self {
            bytes,
            token,
            alias: alias.into(),
        }
    }

    pub fn bytes(&self) -> &ByteSequence {
        &self.bytes
    }

    pub fn token(&self) -> &T {
        &self.token
    }

    /// The alias as written in the table.
    pub fn alias(&self) -> &str {
        &self.alias
    }
}

/// Match entries in lookup order.
#[derive(Debug, Clone)]
pub struct MatchTable<T> {
    name: String,
    entries: Vec<MatchEntry<T>>,
}

impl<T> MatchTable<T> {
    /// Callers must pass entries already in lookup order (see `compile::build_match_table`).
    pub(crate) fn new(name: impl Into<String>, entries: Vec<MatchEntry<T>>) -> Self {
        debug_assert!(entries
            .windows(2)
            .all(|pair| pair[0].bytes.len() >= pair[1].bytes.len()));
        Self {
            name: name.into(),
            entries,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entries(&self) -> &[MatchEntry<T>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Token> Classify<T> for MatchTable<T> {
    fn classify(&self, input: &[u8]) -> Result<(T, usize), NoMatch> {
        self.entries
            .iter()
            .find(|entry| entry.bytes.is_prefix_of(input))
            .map(|entry| (entry.token.clone(), entry.bytes.len()))
            .ok_or(NoMatch)
    }

    fn max_alias_len(&self) -> usize {
        // Sorted longest first.
        self.entries.first().map_or(0, |entry| entry.bytes.len())
    }
}
