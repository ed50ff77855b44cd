//! Time unit recognizer
//!
//!     Recognizes the unit suffix of a duration component ("10ms", "5 minutes", "3d"). Each unit
//!     accepts its lower-cased full name, the singular, and the usual abbreviations. Several
//!     aliases share prefixes ("m", "ms", "min", "minutes"), so the recognizer always takes the
//!     longest one: "ms" is milliseconds, never minutes followed by a stray "s".
//!
//!     Microseconds lists both "μs" (GREEK SMALL LETTER MU) and "µs" (MICRO SIGN). They render
//!     the same but encode to different bytes.

use crate::alias::AliasTable;
use crate::compile::compile;
use crate::error::NoMatch;
use crate::recognizer::{Classify, Recognizer};
use once_cell::sync::Lazy;
use std::fmt;
use std::time::Duration;

/// A unit of time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Nanoseconds,
    Microseconds,
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl Unit {
    /// `value` of this unit as a [`Duration`], or `None` if it doesn't fit.
    pub fn checked_duration(self, value: u64) -> Option<Duration> {
        match self {
            Unit::Nanoseconds => Some(Duration::from_nanos(value)),
            Unit::Microseconds => Some(Duration::from_micros(value)),
            Unit::Milliseconds => Some(Duration::from_millis(value)),
            Unit::Seconds => Some(Duration::from_secs(value)),
            Unit::Minutes => value.checked_mul(60).map(Duration::from_secs),
            Unit::Hours => value.checked_mul(60 * 60).map(Duration::from_secs),
            Unit::Days => value.checked_mul(24 * 60 * 60).map(Duration::from_secs),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// The built-in unit aliases, in declaration order.
pub fn unit_table() -> AliasTable<Unit> {
    AliasTable::new("units")
        .with(
            Unit::Nanoseconds,
            ["nanoseconds", "nanosecond", "ns", "nanos", "nsecs", "nsec"],
        )
        .with(
            Unit::Microseconds,
            [
                "microseconds",
                "microsecond",
                "us",
                "\u{3bc}s",
                "\u{b5}s",
                "usecs",
                "usec",
            ],
        )
        .with(
            Unit::Milliseconds,
            ["milliseconds", "millisecond", "ms", "msecs", "msec"],
        )
        .with(Unit::Seconds, ["seconds", "second", "s", "secs", "sec"])
        .with(Unit::Minutes, ["minutes", "minute", "m", "mins", "min"])
        .with(Unit::Hours, ["hours", "hour", "h", "hrs", "hr"])
        .with(Unit::Days, ["days", "day", "d"])
}

/// The unit recognizer, compiled on first use.
pub static UNITS: Lazy<Recognizer<Unit>> = Lazy::new(|| {
    compile(&unit_table()).unwrap_or_else(|err| panic!("built-in unit table is invalid: {err}"))
});

/// Classify the unit at the start of `input`.
#[inline]
pub fn classify_unit(input: &[u8]) -> Result<(Unit, usize), NoMatch> {
    UNITS.classify(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("ms", Unit::Milliseconds, 2)]
    #[case("m", Unit::Minutes, 1)]
    #[case("min", Unit::Minutes, 3)]
    #[case("mins", Unit::Minutes, 4)]
    #[case("minutes", Unit::Minutes, 7)]
    #[case("msec", Unit::Milliseconds, 4)]
    #[case("milliseconds", Unit::Milliseconds, 12)]
    #[case("nanoseconds", Unit::Nanoseconds, 11)]
    #[case("ns", Unit::Nanoseconds, 2)]
    #[case("us", Unit::Microseconds, 2)]
    #[case("\u{3bc}s", Unit::Microseconds, 3)]
    #[case("\u{b5}s", Unit::Microseconds, 3)]
    #[case("s", Unit::Seconds, 1)]
    #[case("h", Unit::Hours, 1)]
    #[case("hrs", Unit::Hours, 3)]
    #[case("d", Unit::Days, 1)]
    #[case("days", Unit::Days, 4)]
    fn test_classify_unit(#[case] input: &str, #[case] unit: Unit, #[case] consumed: usize) {
        assert_eq!(classify_unit(input.as_bytes()), Ok((unit, consumed)));
    }

    #[rstest]
    #[case("5")]
    #[case("x")]
    #[case("")]
    #[case(" ms")]
    #[case("MS")]
    #[case("\u{3bc}")]
    fn test_classify_unit_no_match(#[case] input: &str) {
        assert_eq!(classify_unit(input.as_bytes()), Err(NoMatch));
    }

    #[test]
    fn test_trailing_input_is_not_consumed() {
        assert_eq!(classify_unit(b"ms30s"), Ok((Unit::Milliseconds, 2)));
        assert_eq!(classify_unit(b"m ago"), Ok((Unit::Minutes, 1)));
        assert_eq!(classify_unit(b"dlater"), Ok((Unit::Days, 1)));
    }

    #[test]
    fn test_unit_table_shape() {
        let table = unit_table();
        assert_eq!(table.records().len(), 7);
        assert_eq!(table.len(), 36);
        assert_eq!(UNITS.max_alias_len(), 12);
    }

    #[test]
    fn test_checked_duration() {
        assert_eq!(
            Unit::Days.checked_duration(2),
            Some(Duration::from_secs(2 * 86_400))
        );
        assert_eq!(
            Unit::Microseconds.checked_duration(50),
            Some(Duration::from_micros(50))
        );
        assert_eq!(Unit::Minutes.checked_duration(u64::MAX), None);
        assert_eq!(
            Unit::Seconds.checked_duration(u64::MAX),
            Some(Duration::from_secs(u64::MAX))
        );
    }
}
