//! # durlex
//!
//! Longest-match recognizers for the words of human duration expressions ("10ms",
//! "5 minutes ago", "3d later").
//!
//! Pipeline
//!
//!     An alias table ([alias]) pairs semantic tokens with the strings that denote them. The
//!     compiler ([compile]) normalizes every alias to bytes, rejects empty and ambiguous
//!     aliases, orders the result so the longest alias wins, and produces an immutable
//!     recognizer ([recognizer]): a byte trie by default, or the ordered match table itself.
//!
//!         AliasTable -> normalize -> build_match_table -> Recognizer::classify
//!
//!     Recognizers answer `classify(bytes) -> (token, bytes consumed)` or [`NoMatch`], never
//!     consuming past the matched alias and never looking further ahead than the longest alias.
//!
//! Built-in recognizers
//!
//!     - [units]: nanoseconds through days, with abbreviations.
//!     - [direction]: "ago" / "later", and leading "+" / "-".
//!
//!     They are compiled once, on first use, and shared process-wide.
//!
//! Expressions
//!
//!     [parser] strings numbers, units and directions together into [`std::time::Duration`] and
//!     [`std::time::Instant`] values. [config] loads CLI settings and user-defined alias tables.

pub mod alias;
pub mod compile;
pub mod config;
pub mod direction;
pub mod error;
pub mod parser;
pub mod recognizer;
pub mod units;

pub use alias::{AliasTable, Token};
pub use compile::{build_match_table, compile, compile_with};
pub use direction::{classify_relative_direction, classify_sign, Direction};
pub use error::{CompileError, NoMatch};
pub use parser::{
    parse_duration, parse_instant, parse_relative, parse_with_instant, ParseError, Relative,
};
pub use recognizer::{Classify, Recognizer, Representation};
pub use units::{classify_unit, Unit};
