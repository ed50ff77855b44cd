//! Duration expression parser
//!
//!     Combines numbers with the unit and direction recognizers into whole expressions.
//!
//! Grammar
//!
//!     duration  = component { spaces? component }
//!     component = number spaces? unit
//!     relative  = sign spaces? duration
//!               | duration spaces? direction
//!
//!     Numbers are runs of ASCII digits. Units and directions are whatever their recognizers
//!     accept, always longest match first, so "1h30m" splits as 1 hour and 30 minutes and
//!     "500ms" stays milliseconds. Leading and trailing whitespace is ignored.
//!
//! Overflow
//!
//!     A number that doesn't fit in `u64`, a unit conversion that doesn't fit in a [`Duration`],
//!     or a sum that overflows all fail with [`ParseError::Overflow`] instead of wrapping.

use crate::direction::{classify_relative_direction, classify_sign, Direction};
use crate::units::classify_unit;
use serde::Serialize;
use std::time::{Duration, Instant};
use thiserror::Error;

/// An error while parsing a duration expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Nothing but whitespace.
    #[error("empty input")]
    EmptyInput,
    /// Expected a number.
    #[error("invalid number")]
    InvalidNumber,
    /// A number is not followed by a known unit.
    #[error("invalid unit")]
    InvalidUnit,
    /// The text after the last component is not a direction keyword.
    #[error("invalid direction")]
    InvalidDirection,
    /// A relative expression has neither a sign nor a direction keyword.
    #[error("missing direction")]
    MissingDirection,
    /// A relative expression has both a sign and a direction keyword.
    #[error("multiple directions")]
    MultipleDirections,
    /// Something follows the direction keyword.
    #[error("unexpected input after direction")]
    TrailingInput,
    #[error("duration overflow")]
    Overflow,
}

/// A duration together with the direction it points in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Relative {
    pub duration: Duration,
    pub direction: Direction,
}

impl Relative {
    /// Move `instant` by this duration, or `None` if the result is out of range.
    pub fn apply(&self, instant: Instant) -> Option<Instant> {
        match self.direction {
            Direction::Add => instant.checked_add(self.duration),
            Direction::Subtract => instant.checked_sub(self.duration),
        }
    }
}

/// Parse an unsigned duration expression such as "1h 30m".
pub fn parse_duration(input: &str) -> Result<Duration, ParseError> {
    let input = input.as_bytes();
    let mut current = eat_spaces(input);
    if current == input.len() {
        return Err(ParseError::EmptyInput);
    }

    let mut duration = Duration::ZERO;
    while current < input.len() {
        let (value, consumed) = parse_component(&input[current..])?;
        duration = duration.checked_add(value).ok_or(ParseError::Overflow)?;
        current += consumed;
        current += eat_spaces(&input[current..]);
    }

    Ok(duration)
}

/// Parse a relative expression such as "5 minutes ago", "3d later" or "-1h".
pub fn parse_relative(input: &str) -> Result<Relative, ParseError> {
    let input = input.as_bytes();
    let mut current = eat_spaces(input);
    if current == input.len() {
        return Err(ParseError::EmptyInput);
    }

    let sign = match classify_sign(&input[current..]) {
        Ok((direction, consumed)) => {
            current += consumed;
            Some(direction)
        }
        Err(_) => None,
    };

    let mut duration = Duration::ZERO;
    let mut components = 0;
    loop {
        current += eat_spaces(&input[current..]);
        if current == input.len() {
            break;
        }

        let rest = &input[current..];
        if components > 0 && !rest[0].is_ascii_digit() {
            let (direction, consumed) =
                classify_relative_direction(rest).map_err(|_| ParseError::InvalidDirection)?;
            if sign.is_some() {
                return Err(ParseError::MultipleDirections);
            }

            current += consumed;
            current += eat_spaces(&input[current..]);
            if current != input.len() {
                return Err(ParseError::TrailingInput);
            }
            return Ok(Relative {
                duration,
                direction,
            });
        }

        let (value, consumed) = parse_component(rest)?;
        duration = duration.checked_add(value).ok_or(ParseError::Overflow)?;
        current += consumed;
        components += 1;
    }

    if components == 0 {
        // A lone sign.
        return Err(ParseError::InvalidNumber);
    }

    sign.map(|direction| Relative {
        duration,
        direction,
    })
    .ok_or(ParseError::MissingDirection)
}

/// Resolve a relative expression against the current instant.
pub fn parse_instant(input: &str) -> Result<Instant, ParseError> {
    parse_with_instant(input, Instant::now())
}

/// Resolve a relative expression against `now`.
pub fn parse_with_instant(input: &str, now: Instant) -> Result<Instant, ParseError> {
    parse_relative(input)?
        .apply(now)
        .ok_or(ParseError::Overflow)
}

/// One `number spaces? unit` component. Returns its duration and byte length.
fn parse_component(input: &[u8]) -> Result<(Duration, usize), ParseError> {
    let (value, mut current) = parse_number(input)?;
    current += eat_spaces(&input[current..]);

    let (unit, consumed) = classify_unit(&input[current..]).map_err(|_| ParseError::InvalidUnit)?;
    current += consumed;

    tracing::trace!(value, %unit, "parsed duration component");
    let duration = unit.checked_duration(value).ok_or(ParseError::Overflow)?;
    Ok((duration, current))
}

#[inline]
fn eat_spaces(input: &[u8]) -> usize {
    input
        .iter()
        .take_while(|byte| byte.is_ascii_whitespace())
        .count()
}

#[inline]
fn parse_number(input: &[u8]) -> Result<(u64, usize), ParseError> {
    let mut number: u64 = 0;
    let mut length = 0;

    while length < input.len() && input[length].is_ascii_digit() {
        number = number
            .checked_mul(10)
            .and_then(|n| n.checked_add(u64::from(input[length] - b'0')))
            .ok_or(ParseError::Overflow)?;
        length += 1;
    }

    if length == 0 {
        Err(ParseError::InvalidNumber)
    } else {
        Ok((number, length))
    }
}
