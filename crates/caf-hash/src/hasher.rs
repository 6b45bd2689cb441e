use std::io::Read;

use crate::{HashAlgorithm, HashError, ObjectHash};

enum HasherInner {
    Sha1(Box<sha1_checked::Sha1>),
    Sha256(sha2::Sha256),
}

/// Streaming hash computation.
///
/// Wraps SHA-1 (with collision detection) and SHA-256 behind a single
/// interface. Data can be fed incrementally with [`update`](Hasher::update)
/// or through the [`std::io::Write`] implementation, then finalised into an
/// [`ObjectHash`].
pub struct Hasher {
    inner: HasherInner,
}

impl Hasher {
    /// Create a new hasher for the given algorithm.
    pub fn new(algo: HashAlgorithm) -> Self {
        use digest::Digest;
        let inner = match algo {
            HashAlgorithm::Sha1 => HasherInner::Sha1(Box::new(sha1_checked::Sha1::new())),
            HashAlgorithm::Sha256 => HasherInner::Sha256(sha2::Sha256::new()),
        };
        Self { inner }
    }

    /// Feed data into the hasher.
    pub fn update(&mut self, data: &[u8]) {
        use digest::Digest;
        match &mut self.inner {
            HasherInner::Sha1(h) => h.update(data),
            HasherInner::Sha256(h) => h.update(data),
        }
    }

    /// Finalize and return the hex digest.
    ///
    /// Returns an error if SHA-1 collision detection fires.
    pub fn finalize(self) -> Result<ObjectHash, HashError> {
        match self.inner {
            HasherInner::Sha1(h) => {
                let result = h.try_finalize();
                if result.has_collision() {
                    tracing::warn!("sha1 collision attack detected while hashing");
                    return Err(HashError::Sha1Collision);
                }
                Ok(ObjectHash::from_digest_bytes(result.hash().as_slice()))
            }
            HasherInner::Sha256(h) => {
                use digest::Digest;
                Ok(ObjectHash::from_digest_bytes(h.finalize().as_slice()))
            }
        }
    }

    /// Convenience: hash data in one call.
    pub fn digest(algo: HashAlgorithm, data: &[u8]) -> Result<ObjectHash, HashError> {
        let mut h = Self::new(algo);
        h.update(data);
        h.finalize()
    }

    /// Hash everything `reader` yields.
    pub fn hash_reader<R: Read>(algo: HashAlgorithm, mut reader: R) -> Result<ObjectHash, HashError> {
        let mut h = Self::new(algo);
        let copied = std::io::copy(&mut reader, &mut h)?;
        tracing::trace!(bytes = copied, algorithm = %algo, "hashed content stream");
        h.finalize()
    }
}

impl std::io::Write for Hasher {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
