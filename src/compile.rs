//! Alias table compiler
//!
//!     Turns an [`AliasTable`] into a recognizer in two steps:
//!
//!     1. [`build_match_table`] normalizes every alias to bytes, rejects empty aliases and
//!        ambiguous duplicates, and stable-sorts the entries by descending byte length.
//!     2. [`compile`] / [`compile_with`] wrap the match table in the requested representation
//!        (a byte trie by default).
//!
//!     Compilation runs once per table, has no side effects besides `tracing` events, and the
//!     result never changes afterwards.
//!
//! Duplicates
//!
//!     Two aliases that normalize to the same bytes for different tokens make the table
//!     ambiguous and fail with [`CompileError::DuplicateAlias`]; declaration order never decides
//!     between them. The same alias repeated for the same token is redundant but harmless, and
//!     only the first occurrence is kept.

use crate::alias::{normalize, AliasTable, ByteSequence, Token};
use crate::error::CompileError;
use crate::recognizer::{MatchEntry, MatchTable, Recognizer, Representation};
use std::collections::HashMap;

/// Compile `table` into the default (trie) representation.
pub fn compile<T: Token>(table: &AliasTable<T>) -> Result<Recognizer<T>, CompileError> {
    compile_with(table, Representation::default())
}

/// Compile `table` into the given representation.
pub fn compile_with<T: Token>(
    table: &AliasTable<T>,
    representation: Representation,
) -> Result<Recognizer<T>, CompileError> {
    let matches = build_match_table(table)?;
    let recognizer = Recognizer::from_table(matches, representation);

    if let Recognizer::Trie(trie) = &recognizer {
        tracing::debug!(
            table = table.name(),
            nodes = trie.node_count(),
            "compiled alias trie"
        );
    }

    Ok(recognizer)
}

/// Normalize, validate and order the aliases of `table`.
pub fn build_match_table<T: Token>(table: &AliasTable<T>) -> Result<MatchTable<T>, CompileError> {
    let mut entries: Vec<MatchEntry<T>> = Vec::with_capacity(table.len());
    let mut seen: HashMap<ByteSequence, usize> = HashMap::with_capacity(table.len());

    for entry in table.entries() {
        let bytes = normalize(table.name(), &entry)?;

        if let Some(&existing) = seen.get(&bytes) {
            let first = &entries[existing];
            if first.token() != entry.token {
                return Err(CompileError::DuplicateAlias {
                    table: table.name().to_string(),
                    alias: entry.alias.to_string(),
                    first: format!("{:?}", first.token()),
                    second: format!("{:?}", entry.token),
                });
            }
            tracing::debug!(
                table = table.name(),
                alias = entry.alias,
                "dropping repeated alias"
            );
            continue;
        }

        seen.insert(bytes.clone(), entries.len());
        entries.push(MatchEntry::new(bytes, entry.token.clone(), entry.alias));
    }

    // Stable: equal lengths keep declaration order.
    entries.sort_by(|a, b| b.bytes().len().cmp(&a.bytes().len()));

    tracing::debug!(
        table = table.name(),
        aliases = entries.len(),
        longest = entries.first().map_or(0, |e| e.bytes().len()),
        "built match table"
    );

    Ok(MatchTable::new(table.name(), entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NoMatch;
    use crate::recognizer::Classify;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Tag {
        Seconds,
        Minutes,
    }

    #[test]
    fn test_orders_by_length_then_declaration() {
        let table = AliasTable::new("order")
            .with(Tag::Seconds, ["s", "sec", "secs"])
            .with(Tag::Minutes, ["m", "min", "mins"]);
        let matches = build_match_table(&table).unwrap();

        let order: Vec<_> = matches.entries().iter().map(|e| e.alias()).collect();
        assert_eq!(order, ["secs", "mins", "sec", "min", "s", "m"]);
    }

    #[test]
    fn test_duplicate_alias_for_different_tokens_fails() {
        let table = AliasTable::new("units")
            .with(Tag::Seconds, ["s"])
            .with(Tag::Minutes, ["s"]);

        let err = compile(&table).unwrap_err();
        assert_eq!(
            err,
            CompileError::DuplicateAlias {
                table: "units".to_string(),
                alias: "s".to_string(),
                first: "Seconds".to_string(),
                second: "Minutes".to_string(),
            }
        );
    }

    #[test]
    fn test_duplicate_alias_for_same_token_is_dropped() {
        let table = AliasTable::new("units")
            .with(Tag::Seconds, ["s", "sec"])
            .with(Tag::Seconds, ["s"]);

        let matches = build_match_table(&table).unwrap();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches.classify(b"s"), Ok((Tag::Seconds, 1)));
    }

    #[test]
    fn test_empty_alias_fails() {
        let table = AliasTable::new("units").with(Tag::Minutes, ["m", ""]);

        let err = compile(&table).unwrap_err();
        assert_eq!(
            err,
            CompileError::EmptyAlias {
                table: "units".to_string(),
                token: "Minutes".to_string(),
                index: 1,
            }
        );
    }

    #[test]
    fn test_compile_with_table_representation() {
        let table = AliasTable::new("units").with(Tag::Minutes, ["m", "min"]);

        let recognizer = compile_with(&table, Representation::Table).unwrap();
        assert_eq!(recognizer.representation(), Representation::Table);
        assert_eq!(recognizer.classify(b"mins"), Ok((Tag::Minutes, 3)));
        assert_eq!(recognizer.classify(b"h"), Err(NoMatch));
    }
}
