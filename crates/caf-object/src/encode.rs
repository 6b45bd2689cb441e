//! Canonical byte layouts for trees and commits.
//!
//! [`Encoding::Concatenated`] is the interoperable layout: fields are
//! appended back to back with no separators.
//!
//! - tree: for each record in name order, `name`, the record type as a
//!   decimal integer, then `hash`
//! - commit: `tree_hash`, `author`, `message`, the timestamp in decimal,
//!   then each parent hash in order
//!
//! Because nothing marks field boundaries, distinct objects can share an
//! encoding: records `("a1", 0, h)` and `("a", 10, h)` both become `a10h`.
//! [`Encoding::LengthPrefixed`] writes the same fields in the same order as
//! `<byte length>:<bytes>`, so every encoding has exactly one decoding. It is
//! not hash-compatible with the concatenated layout.

use serde::{Deserialize, Serialize};

use crate::{Commit, Tree};

/// Field framing used when encoding an object for hashing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Encoding {
    /// Fields appended with no delimiters.
    #[default]
    Concatenated,
    /// Each field written as `<decimal length>:<bytes>`.
    LengthPrefixed,
}

impl Encoding {
    fn field(&self, out: &mut Vec<u8>, bytes: &[u8]) {
        if let Self::LengthPrefixed = self {
            out.extend_from_slice(bytes.len().to_string().as_bytes());
            out.push(b':');
        }
        out.extend_from_slice(bytes);
    }
}

/// Encode a tree's records in name order.
pub fn encode_tree(tree: &Tree, encoding: Encoding) -> Vec<u8> {
    let mut out = Vec::new();
    for record in tree {
        encoding.field(&mut out, &record.name);
        encoding.field(&mut out, record.record_type.raw().to_string().as_bytes());
        encoding.field(&mut out, record.hash.as_bytes());
    }
    tracing::trace!(records = tree.len(), bytes = out.len(), ?encoding, "encoded tree");
    out
}

/// Encode a commit's fields, parents in their stored order.
pub fn encode_commit(commit: &Commit, encoding: Encoding) -> Vec<u8> {
    let mut out = Vec::new();
    encoding.field(&mut out, commit.tree_hash.as_bytes());
    encoding.field(&mut out, &commit.author);
    encoding.field(&mut out, &commit.message);
    encoding.field(&mut out, commit.timestamp.to_string().as_bytes());
    for parent in &commit.parents {
        encoding.field(&mut out, parent.as_bytes());
    }
    tracing::trace!(parents = commit.parents.len(), bytes = out.len(), ?encoding, "encoded commit");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RecordType, TreeRecord};
    use caf_hash::ObjectHash;

    fn h(s: &str) -> ObjectHash {
        ObjectHash::new(s)
    }

    #[test]
    fn single_record_tree() {
        let tree = Tree::from_records([TreeRecord::blob("file.txt", h("deadbeef"))]);
        assert_eq!(
            encode_tree(&tree, Encoding::Concatenated),
            b"file.txt0deadbeef"
        );
    }

    #[test]
    fn tree_records_follow_name_order() {
        let tree = Tree::from_records([
            TreeRecord::tree("src", h("s1")),
            TreeRecord::blob("README", h("r1")),
        ]);
        assert_eq!(
            encode_tree(&tree, Encoding::Concatenated),
            b"README0r1src1s1"
        );
    }

    #[test]
    fn mismatched_mapping_keys_order_by_record_name() {
        let tree = Tree::new([
            ("a", TreeRecord::blob("z", h("1"))),
            ("b", TreeRecord::blob("y", h("2"))),
        ]);
        assert_eq!(encode_tree(&tree, Encoding::Concatenated), b"y02z01");
    }

    #[test]
    fn other_record_types_use_raw_value() {
        let tree = Tree::from_records([TreeRecord::new("link", RecordType::Other(12), h("x"))]);
        assert_eq!(encode_tree(&tree, Encoding::Concatenated), b"link12x");
    }

    #[test]
    fn empty_tree_encodes_to_nothing() {
        assert!(encode_tree(&Tree::empty(), Encoding::Concatenated).is_empty());
        assert!(encode_tree(&Tree::empty(), Encoding::LengthPrefixed).is_empty());
    }

    #[test]
    fn root_commit() {
        let commit = Commit::new(h("t1"), "alice", "init", 100, vec![]);
        assert_eq!(
            encode_commit(&commit, Encoding::Concatenated),
            b"t1aliceinit100"
        );
    }

    #[test]
    fn merge_commit_keeps_parent_order() {
        let commit = Commit::new(h("t1"), "alice", "merge", 5, vec![h("p2"), h("p1")]);
        assert_eq!(
            encode_commit(&commit, Encoding::Concatenated),
            b"t1alicemerge5p2p1"
        );
    }

    #[test]
    fn negative_timestamp() {
        let commit = Commit::new(h("t"), "a", "m", -1, vec![]);
        assert_eq!(encode_commit(&commit, Encoding::Concatenated), b"tam-1");
    }

    #[test]
    fn length_prefixed_tree() {
        let tree = Tree::from_records([TreeRecord::blob("file.txt", h("deadbeef"))]);
        assert_eq!(
            encode_tree(&tree, Encoding::LengthPrefixed),
            b"8:file.txt1:08:deadbeef"
        );
    }

    #[test]
    fn length_prefixed_commit() {
        let commit = Commit::new(h("t1"), "alice", "init", 100, vec![h("p")]);
        assert_eq!(
            encode_commit(&commit, Encoding::LengthPrefixed),
            b"2:t15:alice4:init3:1001:p"
        );
    }

    #[test]
    fn concatenation_is_ambiguous_where_length_prefix_is_not() {
        // name "a1" + type 0 vs name "a" + type 10: both start "a10"
        let left = Tree::from_records([TreeRecord::new("a1", RecordType::Blob, h("x"))]);
        let right = Tree::from_records([TreeRecord::new("a", RecordType::Other(10), h("x"))]);
        assert_eq!(
            encode_tree(&left, Encoding::Concatenated),
            encode_tree(&right, Encoding::Concatenated)
        );
        assert_ne!(
            encode_tree(&left, Encoding::LengthPrefixed),
            encode_tree(&right, Encoding::LengthPrefixed)
        );
    }
}
