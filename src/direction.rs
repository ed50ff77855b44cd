//! Relative direction recognizers
//!
//! A relative expression says which way to move from a reference point, either with a trailing
//! keyword ("5 minutes ago", "3d later") or with a leading sign ("-5m", "+1h"). Both forms are
//! small alias tables compiled by the same machinery as units.

use crate::alias::AliasTable;
use crate::compile::compile;
use crate::error::NoMatch;
use crate::recognizer::{Classify, Recognizer};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::fmt;

/// Which way a relative duration points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Direction {
    /// Into the past
    Subtract,
    /// Into the future
    Add,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

pub fn direction_table() -> AliasTable<Direction> {
    AliasTable::new("directions")
        .with(Direction::Subtract, ["ago"])
        .with(Direction::Add, ["later"])
}

pub fn sign_table() -> AliasTable<Direction> {
    AliasTable::new("signs")
        .with(Direction::Add, ["+"])
        .with(Direction::Subtract, ["-"])
}

/// Trailing direction keywords.
pub static DIRECTIONS: Lazy<Recognizer<Direction>> = Lazy::new(|| {
    compile(&direction_table())
        .unwrap_or_else(|err| panic!("built-in direction table is invalid: {err}"))
});

/// Leading signs.
pub static SIGNS: Lazy<Recognizer<Direction>> = Lazy::new(|| {
    compile(&sign_table()).unwrap_or_else(|err| panic!("built-in sign table is invalid: {err}"))
});

/// Classify a direction keyword at the start of `input`.
#[inline]
pub fn classify_relative_direction(input: &[u8]) -> Result<(Direction, usize), NoMatch> {
    DIRECTIONS.classify(input)
}

/// Classify a leading `+` or `-`.
#[inline]
pub fn classify_sign(input: &[u8]) -> Result<(Direction, usize), NoMatch> {
    SIGNS.classify(input)
}
