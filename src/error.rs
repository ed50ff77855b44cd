//! Error types for alias table compilation and classification
//!
//!     Compile errors are authoring mistakes in an alias table. They abort the compilation of
//!     that table and carry enough context (table name, alias, tokens) to find the offending
//!     record. [`NoMatch`] is an ordinary runtime result: the caller decides whether to fail the
//!     enclosing parse or try another token class.

use thiserror::Error;

/// Errors that can occur while compiling an alias table into a recognizer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// An alias with zero characters. `index` is the alias position within its record.
    #[error("table `{table}`: alias #{index} of token {token} is empty")]
    EmptyAlias {
        table: String,
        token: String,
        index: usize,
    },
    /// Two aliases normalize to the same bytes but name different tokens.
    #[error("table `{table}`: alias \"{alias}\" is declared for both {first} and {second}")]
    DuplicateAlias {
        table: String,
        alias: String,
        first: String,
        second: String,
    },
}

/// The input does not start with any alias known to the recognizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("input does not start with a known alias")]
pub struct NoMatch;
