//! Validated identifier alphabet.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{DEFAULT_ALPHABET, MIN_ALPHABET_LEN};
use crate::error::{Result, UuidError};

/// An ordered set of pairwise-distinct characters.
///
/// The position of a character is its digit value when an index is decoded
/// into an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Alphabet {
    text: String,
    chars: Vec<char>,
}

impl Alphabet {
    /// Validates `text` and builds an alphabet from it.
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::InvalidConfiguration`] when `text` is empty,
    /// shorter than [`MIN_ALPHABET_LEN`] characters, or repeats a character.
    pub fn new(text: &str) -> Result<Self> {
        let chars: Vec<char> = text.chars().collect();
        if chars.is_empty() {
            return Err(UuidError::InvalidConfiguration(
                "alphabet must be a non-empty string".into(),
            ));
        }
        if chars.len() < MIN_ALPHABET_LEN {
            return Err(UuidError::InvalidConfiguration(format!(
                "alphabet must have at least {MIN_ALPHABET_LEN} characters, got {}",
                chars.len()
            )));
        }

        let mut seen = HashSet::with_capacity(chars.len());
        if let Some(repeated) = chars.iter().find(|c| !seen.insert(**c)) {
            return Err(UuidError::InvalidConfiguration(format!(
                "alphabet must consist of distinct characters, {repeated:?} appears twice"
            )));
        }

        Ok(Self { text: text.to_string(), chars })
    }

    /// The alphabet as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Number of characters, which is the radix used for decoding.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Always `false`; an alphabet holds at least [`MIN_ALPHABET_LEN`] characters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Character whose digit value is `digit`.
    ///
    /// # Panics
    ///
    /// Panics if `digit >= self.len()`.
    #[must_use]
    pub fn char_at(&self, digit: usize) -> char {
        self.chars[digit]
    }

    /// Whether `c` belongs to the alphabet.
    #[must_use]
    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&c)
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self { text: DEFAULT_ALPHABET.to_string(), chars: DEFAULT_ALPHABET.chars().collect() }
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromStr for Alphabet {
    type Err = UuidError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<&str> for Alphabet {
    type Error = UuidError;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<String> for Alphabet {
    type Error = UuidError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(&value)
    }
}

impl From<Alphabet> for String {
    fn from(alphabet: Alphabet) -> Self {
        alphabet.text
    }
}
