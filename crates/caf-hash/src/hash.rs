use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::hex::{first_invalid, hex_to_string};
use crate::{HashAlgorithm, HashError};

/// The content-derived identity of a stored object, in text form.
///
/// Digests travel between collaborators as text and are spliced into
/// canonical encodings verbatim, so the value is kept exactly as supplied.
/// [`ObjectHash::new`] trusts its input; [`ObjectHash::parse`] checks that
/// the text is the hex digest of a supported algorithm.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectHash(String);

impl ObjectHash {
    /// Wrap an already-computed digest without validation.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Parse a hex digest, normalizing it to lowercase.
    ///
    /// The length must match one of the supported algorithms:
    /// - 40 hex chars → SHA-1
    /// - 64 hex chars → SHA-256
    pub fn parse(text: &str) -> Result<Self, HashError> {
        if HashAlgorithm::from_hex_len(text.len()).is_none() {
            return Err(HashError::InvalidHexLength {
                expected: HashAlgorithm::default().hex_len(),
                actual: text.len(),
            });
        }
        if let Some((position, character)) = first_invalid(text) {
            return Err(HashError::InvalidHex {
                position,
                character,
            });
        }
        Ok(Self(text.to_ascii_lowercase()))
    }

    /// Render raw digest bytes as lowercase hex.
    pub fn from_digest_bytes(bytes: &[u8]) -> Self {
        Self(hex_to_string(bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The algorithm this digest was produced by, if it is hex-shaped.
    pub fn algorithm(&self) -> Option<HashAlgorithm> {
        if first_invalid(&self.0).is_some() {
            return None;
        }
        HashAlgorithm::from_hex_len(self.0.len())
    }

    /// Whether [`ObjectHash::parse`] would accept this text unchanged.
    pub fn is_well_formed(&self) -> bool {
        self.algorithm().is_some() && !self.0.bytes().any(|b| b.is_ascii_uppercase())
    }

    /// Abbreviated form for display: the first eight characters.
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(8) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl fmt::Display for ObjectHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for ObjectHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectHash({})", self.short())
    }
}

impl FromStr for ObjectHash {
    type Err = HashError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<[u8]> for ObjectHash {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<&str> for ObjectHash {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for ObjectHash {
    fn from(text: String) -> Self {
        Self(text)
    }
}
