//! Immutable object model for the caf store.
//!
//! Every stored unit is identified by a digest of its canonical encoding.
//! This crate provides the three object kinds (`Blob`, `Tree`, `Commit`),
//! the canonical encoder, the object hasher, the `ObjectFormat`
//! configuration, and an in-memory `ObjectArena` that keeps a hash-keyed
//! DAG of objects and answers history and tree-diff queries over it.

pub mod arena;
mod blob;
mod commit;
pub mod diff;
pub mod encode;
mod format;
mod hash;
mod tree;

pub use arena::ObjectArena;
pub use blob::Blob;
pub use commit::Commit;
pub use diff::{DiffKind, TreeDiff};
pub use encode::Encoding;
pub use format::ObjectFormat;
pub use hash::{hash_object, CanonicalForm, Hashable};
pub use tree::{RecordType, Records, Tree, TreeRecord};

pub use caf_hash::{HashAlgorithm, HashError, HashPrimitive, ObjectHash};

use bstr::BString;

/// Errors produced by object operations.
#[derive(Debug, thiserror::Error)]
pub enum ObjectError {
    #[error("object not found: {0}")]
    NotFound(ObjectHash),

    #[error("object {hash} is a {actual}, expected a {expected}")]
    TypeMismatch {
        hash: ObjectHash,
        expected: ObjectType,
        actual: ObjectType,
    },

    #[error("invalid tree record name: {0:?}")]
    InvalidRecordName(BString),

    #[error("path not found: {0}")]
    PathNotFound(BString),

    #[error("not a tree: {0}")]
    NotATree(BString),

    #[error("invalid object type: {0}")]
    InvalidType(String),

    #[error(transparent)]
    Hash(#[from] HashError),
}

/// The three kinds of stored objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Blob,
    Tree,
    Commit,
}

impl ObjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blob => "blob",
            Self::Tree => "tree",
            Self::Commit => "commit",
        }
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ObjectType {
    type Err = ObjectError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blob" => Ok(Self::Blob),
            "tree" => Ok(Self::Tree),
            "commit" => Ok(Self::Commit),
            _ => Err(ObjectError::InvalidType(s.to_owned())),
        }
    }
}

/// Any stored object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Object {
    Blob(Blob),
    Tree(Tree),
    Commit(Commit),
}

impl Object {
    pub fn object_type(&self) -> ObjectType {
        match self {
            Self::Blob(_) => ObjectType::Blob,
            Self::Tree(_) => ObjectType::Tree,
            Self::Commit(_) => ObjectType::Commit,
        }
    }

    pub fn as_blob(&self) -> Option<&Blob> {
        match self {
            Self::Blob(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_tree(&self) -> Option<&Tree> {
        match self {
            Self::Tree(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_commit(&self) -> Option<&Commit> {
        match self {
            Self::Commit(c) => Some(c),
            _ => None,
        }
    }
}

impl From<Blob> for Object {
    fn from(blob: Blob) -> Self {
        Self::Blob(blob)
    }
}

impl From<Tree> for Object {
    fn from(tree: Tree) -> Self {
        Self::Tree(tree)
    }
}

impl From<Commit> for Object {
    fn from(commit: Commit) -> Self {
        Self::Commit(commit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_type_display() {
        assert_eq!(ObjectType::Blob.to_string(), "blob");
        assert_eq!(ObjectType::Commit.to_string(), "commit");
    }

    #[test]
    fn object_type_from_str() {
        assert_eq!("tree".parse::<ObjectType>().unwrap(), ObjectType::Tree);
        assert!(matches!(
            "tag".parse::<ObjectType>(),
            Err(ObjectError::InvalidType(_))
        ));
    }

    #[test]
    fn object_accessors() {
        let obj = Object::from(Blob::new(ObjectHash::new("h")));
        assert_eq!(obj.object_type(), ObjectType::Blob);
        assert!(obj.as_blob().is_some());
        assert!(obj.as_tree().is_none());
        assert!(obj.as_commit().is_none());
    }
}
