use std::io::Read;

use caf_hash::hasher::Hasher;
use caf_hash::{HashAlgorithm, HashError, ObjectHash};

/// Opaque file content, known only by its digest.
///
/// The hash is declared by whoever builds the blob and is never
/// recomputed or checked here.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Blob {
    hash: ObjectHash,
}

impl Blob {
    pub fn new(hash: ObjectHash) -> Self {
        Self { hash }
    }

    /// Build a blob by hashing raw content read from `reader`.
    pub fn from_reader<R: Read>(algo: HashAlgorithm, reader: R) -> Result<Self, HashError> {
        Ok(Self::new(Hasher::hash_reader(algo, reader)?))
    }

    /// Build a blob by hashing in-memory content.
    pub fn from_content(algo: HashAlgorithm, content: &[u8]) -> Result<Self, HashError> {
        Ok(Self::new(Hasher::digest(algo, content)?))
    }

    pub fn hash(&self) -> &ObjectHash {
        &self.hash
    }
}
