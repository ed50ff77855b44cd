//! Recognizers
//!
//!     A recognizer is the compiled, immutable form of an alias table. It answers one question:
//!     which alias is the longest byte prefix of this input, and how many bytes does it cover?
//!
//! Representations
//!
//!     Two representations implement the same [`Classify`] contract:
//!
//!     Table:
//!         The ordered match table produced by the builder ([table]). Entries are sorted by
//!         descending byte length, so a linear scan that stops at the first hit returns the
//!         longest match. Cost grows with the number of aliases.
//!
//!     Trie:
//!         A byte trie with tokens on accepting nodes ([trie]). Lookup walks one byte at a time
//!         and remembers the deepest accepting node. Cost grows with the longest alias only, and
//!         correctness no longer depends on entry order. This is the default.
//!
//!     Both are read-only after construction and can be shared freely across threads.
//!
//! Contract
//!
//!     - The result is the token of the longest alias that prefixes the input, paired with that
//!       alias's byte length. Bytes past the match are left for the caller.
//!     - No alias prefixes the input: [`NoMatch`].
//!     - No more than [`Classify::max_alias_len`] bytes of input are examined.

pub mod table;
pub mod trie;

use crate::alias::Token;
use crate::error::NoMatch;
use serde::{Deserialize, Serialize};

pub use table::{MatchEntry, MatchTable};
pub use trie::Trie;

/// The runtime classification operation shared by every representation.
pub trait Classify<T> {
    /// Classify the longest known alias at the start of `input`.
    fn classify(&self, input: &[u8]) -> Result<(T, usize), NoMatch>;

    /// Byte length of the longest alias, the lookahead bound of [`Classify::classify`].
    fn max_alias_len(&self) -> usize;
}

/// Which compiled representation a recognizer uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Representation {
    Table,
    #[default]
    Trie,
}

/// A compiled recognizer in either representation.
#[derive(Debug, Clone)]
pub enum Recognizer<T> {
    Table(MatchTable<T>),
    Trie(Trie<T>),
}

impl<T: Token> Recognizer<T> {
    /// Wrap a match table in the requested representation.
    pub fn from_table(table: MatchTable<T>, representation: Representation) -> Self {
        match representation {
            Representation::Table => Recognizer::Table(table),
            Representation::Trie => Recognizer::Trie(Trie::from_table(&table)),
        }
    }

    /// Name of the alias table this recognizer was compiled from.
    pub fn name(&self) -> &str {
        match self {
            Recognizer::Table(table) => table.name(),
            Recognizer::Trie(trie) => trie.name(),
        }
    }

    pub fn representation(&self) -> Representation {
        match self {
            Recognizer::Table(_) => Representation::Table,
            Recognizer::Trie(_) => Representation::Trie,
        }
    }
}

impl<T: Token> Classify<T> for Recognizer<T> {
    #[inline]
    fn classify(&self, input: &[u8]) -> Result<(T, usize), NoMatch> {
        match self {
            Recognizer::Table(table) => table.classify(input),
            Recognizer::Trie(trie) => trie.classify(input),
        }
    }

    fn max_alias_len(&self) -> usize {
        match self {
            Recognizer::Table(table) => table.max_alias_len(),
            Recognizer::Trie(trie) => trie.max_alias_len(),
        }
    }
}
