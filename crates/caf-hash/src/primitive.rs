use crate::hasher::Hasher;
use crate::{HashAlgorithm, HashError, ObjectHash};

/// A deterministic function from bytes to a digest.
///
/// The object model only ever talks to hashing through this trait.
/// Implementations must be pure: the same bytes always give the same
/// digest. Failures are returned to the caller untouched.
pub trait HashPrimitive {
    fn digest(&self, data: &[u8]) -> Result<ObjectHash, HashError>;
}

impl HashPrimitive for HashAlgorithm {
    fn digest(&self, data: &[u8]) -> Result<ObjectHash, HashError> {
        Hasher::digest(*self, data)
    }
}

impl<F> HashPrimitive for F
where
    F: Fn(&[u8]) -> Result<ObjectHash, HashError>,
{
    fn digest(&self, data: &[u8]) -> Result<ObjectHash, HashError> {
        self(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hash_with<P: HashPrimitive + ?Sized>(p: &P, data: &[u8]) -> ObjectHash {
        p.digest(data).unwrap()
    }

    #[test]
    fn algorithm_is_a_primitive() {
        assert_eq!(
            hash_with(&HashAlgorithm::Sha1, b"").as_str(),
            "da39a3ee5e6b4b0d3255bfef95601890afd80709"
        );
    }

    #[test]
    fn closures_are_primitives() {
        let identity = |data: &[u8]| {
            Ok::<_, HashError>(ObjectHash::new(String::from_utf8_lossy(data)))
        };
        assert_eq!(hash_with(&identity, b"t1alice").as_str(), "t1alice");
    }

    #[test]
    fn failures_pass_through() {
        let failing = |_: &[u8]| Err::<ObjectHash, _>(HashError::Sha1Collision);
        assert!(matches!(
            failing.digest(b"x"),
            Err(HashError::Sha1Collision)
        ));
    }

    #[test]
    fn usable_as_trait_object() {
        let primitive: &dyn HashPrimitive = &HashAlgorithm::Sha256;
        assert_eq!(primitive.digest(b"abc").unwrap().len(), 64);
    }
}
