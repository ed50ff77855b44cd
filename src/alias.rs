//! Alias tables
//!
//!     An alias table is the declarative input of the compiler: an ordered list of records, each
//!     pairing one semantic token with the alias strings that denote it. Several aliases may
//!     name the same token (synonyms such as "m", "min" and "minutes"). Declaration order is
//!     preserved everywhere because it breaks ties between aliases of equal byte length.
//!
//!     Tables are built in code through [`AliasTable::with`], or deserialized with serde from
//!     the `[[tables]]` section of a configuration file:
//!
//!         [[tables]]
//!         name = "weekdays"
//!         tokens = [
//!             { token = "Monday", aliases = ["monday", "mon"] },
//!         ]
//!
//!     Normalization of alias strings into raw bytes lives in the `normalize` submodule.

pub mod normalize;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use normalize::{normalize, ByteSequence};

/// Anything usable as the semantic result of a recognizer.
pub trait Token: Clone + PartialEq + fmt::Debug {}

impl<T: Clone + PartialEq + fmt::Debug> Token for T {}

/// One token and its aliases, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasRecord<T> {
    token: T,
    aliases: Vec<String>,
}

impl<T> AliasRecord<T> {
    pub fn new<I, S>(token: T, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            token,
            aliases: aliases.into_iter().map(Into::into).collect(),
        }
    }

    pub fn token(&self) -> &T {
        &self.token
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }
}

/// A named, ordered list of alias records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasTable<T> {
    name: String,
    #[serde(default)]
    tokens: Vec<AliasRecord<T>>,
}

impl<T> AliasTable<T> {
    /// Start an empty table. The name only shows up in diagnostics.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tokens: Vec::new(),
        }
    }

    /// Append a record for `token`.
    pub fn with<I, S>(mut self, token: T, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tokens.push(AliasRecord::new(token, aliases));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn records(&self) -> &[AliasRecord<T>] {
        &self.tokens
    }

    /// Every alias of the table, flattened in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = AliasEntry<'_, T>> {
        self.tokens.iter().enumerate().flat_map(|(record, r)| {
            r.aliases
                .iter()
                .enumerate()
                .map(move |(index, alias)| AliasEntry {
                    token: &r.token,
                    alias,
                    record,
                    index,
                })
        })
    }

    /// Number of aliases across all records.
    pub fn len(&self) -> usize {
        self.tokens.iter().map(|r| r.aliases.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A single (token, alias) pair borrowed from a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AliasEntry<'a, T> {
    pub token: &'a T,
    pub alias: &'a str,
    /// Position of the owning record in the table
    pub record: usize,
    /// Position of the alias within its record
    pub index: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AliasTable<&'static str> {
        AliasTable::new("sample")
            .with("Seconds", ["s", "sec"])
            .with("Minutes", ["m"])
    }

    #[test]
    fn test_entries_follow_declaration_order() {
        let table = sample();
        let entries: Vec<_> = table
            .entries()
            .map(|e| (*e.token, e.alias, e.record, e.index))
            .collect();

        assert_eq!(
            entries,
            vec![
                ("Seconds", "s", 0, 0),
                ("Seconds", "sec", 0, 1),
                ("Minutes", "m", 1, 0),
            ]
        );
    }

    #[test]
    fn test_len_counts_aliases() {
        let table = sample();
        assert_eq!(table.len(), 3);
        assert_eq!(table.records().len(), 2);
        assert!(!table.is_empty());
        assert!(AliasTable::<u8>::new("empty").is_empty());
    }

    #[test]
    fn test_deserializes_from_json() {
        let table: AliasTable<String> = serde_json::from_str(
            r#"{"name": "days", "tokens": [{"token": "Monday", "aliases": ["monday", "mon"]}]}"#,
        )
        .unwrap();

        assert_eq!(table.name(), "days");
        assert_eq!(table.records()[0].token(), "Monday");
        assert_eq!(table.records()[0].aliases(), ["monday", "mon"]);
    }
}
