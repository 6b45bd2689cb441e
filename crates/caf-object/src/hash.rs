use caf_hash::{HashError, HashPrimitive, ObjectHash};

use crate::encode::{encode_commit, encode_tree, Encoding};
use crate::{Blob, Commit, Object, Tree};

/// What an object presents to the hasher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanonicalForm<'a> {
    /// The object already carries its identity.
    Declared(&'a ObjectHash),
    /// Bytes to run through the hash primitive.
    Encoded(Vec<u8>),
}

/// Objects with a content-derived identity.
pub trait Hashable {
    fn canonical_form(&self, encoding: Encoding) -> CanonicalForm<'_>;
}

impl Hashable for Blob {
    fn canonical_form(&self, _: Encoding) -> CanonicalForm<'_> {
        CanonicalForm::Declared(self.hash())
    }
}

impl Hashable for Tree {
    fn canonical_form(&self, encoding: Encoding) -> CanonicalForm<'_> {
        CanonicalForm::Encoded(encode_tree(self, encoding))
    }
}

impl Hashable for Commit {
    fn canonical_form(&self, encoding: Encoding) -> CanonicalForm<'_> {
        CanonicalForm::Encoded(encode_commit(self, encoding))
    }
}

impl Hashable for Object {
    fn canonical_form(&self, encoding: Encoding) -> CanonicalForm<'_> {
        match self {
            Self::Blob(b) => b.canonical_form(encoding),
            Self::Tree(t) => t.canonical_form(encoding),
            Self::Commit(c) => c.canonical_form(encoding),
        }
    }
}

/// Compute an object's identity.
///
/// Blobs return their declared hash unchanged. Trees and commits are
/// encoded and passed through `primitive`, whose errors are returned as-is.
pub fn hash_object<T, P>(object: &T, encoding: Encoding, primitive: &P) -> Result<ObjectHash, HashError>
where
    T: Hashable + ?Sized,
    P: HashPrimitive + ?Sized,
{
    match object.canonical_form(encoding) {
        CanonicalForm::Declared(hash) => Ok(hash.clone()),
        CanonicalForm::Encoded(bytes) => primitive.digest(&bytes),
    }
}
