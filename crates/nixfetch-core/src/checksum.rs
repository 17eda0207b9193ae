//! SHA-256 checksum model and the shape checks every external result must pass.
//!
//! Nix accepts a sha256 digest either as 64 lowercase hex characters or as the
//! 52-character base32 form emitted by `nix-hash --to-base32`. Everything this
//! crate hands back to a caller is base32.

use std::fmt;

use crate::error::PrefetchError;

/// Length of a sha256 digest rendered as base16.
pub const BASE16_LEN: usize = 64;
/// Length of a sha256 digest rendered in Nix base32.
pub const BASE32_LEN: usize = 52;

/// Character class a checksum string must be drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    /// `[a-f0-9]`
    LowerHex,
    /// `[a-z0-9]`
    LowerAlnum,
}

impl CharClass {
    fn admits(self, c: char) -> bool {
        match self {
            CharClass::LowerHex => matches!(c, 'a'..='f' | '0'..='9'),
            CharClass::LowerAlnum => c.is_ascii_lowercase() || c.is_ascii_digit(),
        }
    }
}

/// Encoding of a sha256 checksum string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    Base16,
    Base32,
}

impl Encoding {
    pub fn expected_len(self) -> usize {
        match self {
            Encoding::Base16 => BASE16_LEN,
            Encoding::Base32 => BASE32_LEN,
        }
    }

    pub fn char_class(self) -> CharClass {
        match self {
            Encoding::Base16 => CharClass::LowerHex,
            Encoding::Base32 => CharClass::LowerAlnum,
        }
    }
}

/// Fails with [`PrefetchError::ChecksumFormat`] unless `s` is exactly `expected` bytes long.
pub fn assert_length(s: &str, expected: usize) -> Result<(), PrefetchError> {
    if s.len() == expected {
        Ok(())
    } else {
        Err(PrefetchError::ChecksumFormat {
            value: s.to_string(),
            expected_len: Some(expected),
        })
    }
}

/// Fails with [`PrefetchError::ChecksumFormat`] unless `s` is non-empty and every char is in `class`.
pub fn assert_format(s: &str, class: CharClass) -> Result<(), PrefetchError> {
    if !s.is_empty() && s.chars().all(|c| class.admits(c)) {
        Ok(())
    } else {
        Err(PrefetchError::ChecksumFormat {
            value: s.to_string(),
            expected_len: None,
        })
    }
}

/// A sha256 checksum string that passed both shape checks for its encoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Checksum {
    value: String,
    encoding: Encoding,
}

impl Checksum {
    /// Validate `s` as a checksum in `encoding`. Length is checked before format.
    pub fn parse(s: &str, encoding: Encoding) -> Result<Self, PrefetchError> {
        assert_length(s, encoding.expected_len())?;
        assert_format(s, encoding.char_class())?;
        Ok(Self {
            value: s.to_string(),
            encoding,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    pub fn into_string(self) -> String {
        self.value
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl AsRef<str> for Checksum {
    fn as_ref(&self) -> &str {
        &self.value
    }
}
