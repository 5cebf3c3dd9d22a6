//! Base-36 identifier codec.
//!
//! Maps a record key to the short token used in public URLs and back.
//! Identifiers are the lowercase base-36 representation of the key, so key
//! `1` is `"1"`, key `36` is `"10"` and key `1295` is `"zz"`.
//!
//! Decoding is 1-indexed relative to storage: the parsed value `n` yields the
//! lookup offset `n - 1`, and offset `o` addresses the record with key `o + 1`.
//! Identifier `"0"` therefore decodes to offset `-1`, which never matches a
//! record. Changing this offset changes every published link.

use std::fmt;

/// Radix of the public identifier alphabet (`0-9a-z`).
pub const RADIX: u32 = 36;

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Longest identifier that can be produced from a non-negative `i64`.
const MAX_LEN: usize = 13;

/// Errors produced when an identifier cannot be decoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidIdentifier {
    #[error("identifier is empty")]
    Empty,

    #[error("identifier contains invalid character {0:?} (allowed: 0-9, a-z)")]
    InvalidCharacter(char),

    #[error("identifier is out of range")]
    Overflow,
}

/// A parsed public identifier.
///
/// Holds the 1-indexed base-36 value, which is never negative. Use
/// [`Identifier::offset`] to obtain the storage lookup offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identifier(i64);

impl Identifier {
    /// Builds the identifier for a record key.
    ///
    /// Returns `None` for keys below 1, which have no public identifier.
    pub fn from_key(key: i64) -> Option<Self> {
        (key >= 1).then_some(Self(key))
    }

    /// Parses a strict lowercase base-36 string.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidIdentifier`] if the string is empty, contains any
    /// character outside `[0-9a-z]`, or does not fit in an `i64`.
    pub fn parse(input: &str) -> Result<Self, InvalidIdentifier> {
        if input.is_empty() {
            return Err(InvalidIdentifier::Empty);
        }

        let mut value: i64 = 0;
        for c in input.chars() {
            let digit = match c {
                '0'..='9' | 'a'..='z' => c.to_digit(RADIX),
                _ => None,
            }
            .ok_or(InvalidIdentifier::InvalidCharacter(c))?;

            value = value
                .checked_mul(RADIX as i64)
                .and_then(|v| v.checked_add(i64::from(digit)))
                .ok_or(InvalidIdentifier::Overflow)?;
        }

        Ok(Self(value))
    }

    /// The 1-indexed value carried by the identifier.
    pub fn value(self) -> i64 {
        self.0
    }

    /// The zero-based storage lookup offset (`value - 1`).
    pub fn offset(self) -> i64 {
        self.0 - 1
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_base36(self.0.unsigned_abs()))
    }
}

/// Encodes a record key as its public identifier.
///
/// Keys are positive for every stored record. Keys below 1 have no
/// identifier of their own and encode as `"0"`, which never resolves.
///
/// # Examples
///
/// ```
/// use short::utils::identifier::encode;
///
/// assert_eq!(encode(1), "1");
/// assert_eq!(encode(35), "z");
/// assert_eq!(encode(36), "10");
/// ```
pub fn encode(key: i64) -> String {
    to_base36(u64::try_from(key).unwrap_or(0))
}

/// Decodes a public identifier into its storage lookup offset.
///
/// # Errors
///
/// See [`Identifier::parse`].
///
/// # Examples
///
/// ```
/// use short::utils::identifier::decode;
///
/// assert_eq!(decode("1"), Ok(0));
/// assert_eq!(decode("0"), Ok(-1));
/// assert!(decode("A").is_err());
/// ```
pub fn decode(identifier: &str) -> Result<i64, InvalidIdentifier> {
    Identifier::parse(identifier).map(Identifier::offset)
}

fn to_base36(mut n: u64) -> String {
    let mut digits = Vec::with_capacity(MAX_LEN);

    loop {
        digits.push(char::from(ALPHABET[(n % u64::from(RADIX)) as usize]));
        n /= u64::from(RADIX);
        if n == 0 {
            break;
        }
    }

    digits.iter().rev().collect()
}
