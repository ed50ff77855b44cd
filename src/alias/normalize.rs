//! Byte normalization of alias strings
//!
//! Recognizers match raw input bytes, so every alias is lowered to the exact byte sequence a
//! user would type: ASCII characters become one byte, anything else expands to its full UTF-8
//! encoding. "µs" (MICRO SIGN) and "μs" (GREEK SMALL LETTER MU) look alike but normalize to
//! different bytes, which is why both are listed as separate aliases.

use crate::alias::{AliasEntry, Token};
use crate::error::CompileError;
use std::fmt;

/// The non-empty byte encoding of one alias.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ByteSequence(Box<[u8]>);

impl ByteSequence {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false: construction rejects empty aliases.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_prefix_of(&self, input: &[u8]) -> bool {
        input.starts_with(&self.0)
    }
}

impl fmt::Display for ByteSequence {
    /// Printable ASCII as-is, everything else as `\xNN`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0.iter() {
            write!(f, "{}", std::ascii::escape_default(*byte))?;
        }
        Ok(())
    }
}

/// Lower one table entry to its byte sequence.
pub fn normalize<T: Token>(
    table: &str,
    entry: &AliasEntry<'_, T>,
) -> Result<ByteSequence, CompileError> {
    if entry.alias.is_empty() {
        return Err(CompileError::EmptyAlias {
            table: table.to_string(),
            token: format!("{:?}", entry.token),
            index: entry.index,
        });
    }

    let mut bytes = Vec::with_capacity(entry.alias.len());
    let mut scratch = [0u8; 4];
    for ch in entry.alias.chars() {
        bytes.extend_from_slice(ch.encode_utf8(&mut scratch).as_bytes());
    }

    Ok(ByteSequence(bytes.into_boxed_slice()))
}
