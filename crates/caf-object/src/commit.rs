use bstr::{BStr, BString, ByteSlice};
use caf_hash::ObjectHash;

/// A snapshot of a root tree with authorship and history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Hash of the root tree.
    pub tree_hash: ObjectHash,
    pub author: BString,
    pub message: BString,
    /// Seconds since the Unix epoch.
    pub timestamp: i64,
    /// Parent commit hashes in order (empty for a root commit).
    pub parents: Vec<ObjectHash>,
}

impl Commit {
    pub fn new(
        tree_hash: ObjectHash,
        author: impl Into<BString>,
        message: impl Into<BString>,
        timestamp: i64,
        parents: Vec<ObjectHash>,
    ) -> Self {
        Self {
            tree_hash,
            author: author.into(),
            message: message.into(),
            timestamp,
            parents,
        }
    }

    /// Get the first parent (or None for root commits).
    pub fn first_parent(&self) -> Option<&ObjectHash> {
        self.parents.first()
    }

    /// Is this a merge commit? (more than one parent)
    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    /// Is this a root commit? (no parents)
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    /// First line of the message.
    pub fn summary(&self) -> &BStr {
        let msg: &[u8] = self.message.as_ref();
        match msg.find_byte(b'\n') {
            Some(pos) => BStr::new(&msg[..pos]),
            None => BStr::new(msg),
        }
    }
}
