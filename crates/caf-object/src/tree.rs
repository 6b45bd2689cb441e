use std::collections::btree_map::{self, BTreeMap};

use bstr::{BStr, BString, ByteSlice};
use caf_hash::ObjectHash;

/// Kind of object a tree record points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    /// File content (0)
    Blob,
    /// Subdirectory (1)
    Tree,
    /// Any other discriminator, preserved for encoding
    Other(u32),
}

impl RecordType {
    /// Create from the underlying integer.
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            0 => Self::Blob,
            1 => Self::Tree,
            other => Self::Other(other),
        }
    }

    /// The underlying integer written into canonical encodings.
    pub fn raw(&self) -> u32 {
        match self {
            Self::Blob => 0,
            Self::Tree => 1,
            Self::Other(v) => *v,
        }
    }

    pub fn is_blob(&self) -> bool {
        matches!(self, Self::Blob)
    }

    pub fn is_tree(&self) -> bool {
        matches!(self, Self::Tree)
    }
}

/// One named member of a directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TreeRecord {
    pub name: BString,
    pub record_type: RecordType,
    pub hash: ObjectHash,
}

impl TreeRecord {
    pub fn new(name: impl Into<BString>, record_type: RecordType, hash: ObjectHash) -> Self {
        Self {
            name: name.into(),
            record_type,
            hash,
        }
    }

    /// A record pointing at file content.
    pub fn blob(name: impl Into<BString>, hash: ObjectHash) -> Self {
        Self::new(name, RecordType::Blob, hash)
    }

    /// A record pointing at a subdirectory.
    pub fn tree(name: impl Into<BString>, hash: ObjectHash) -> Self {
        Self::new(name, RecordType::Tree, hash)
    }
}

/// A directory listing: records keyed and ordered by name.
///
/// Iteration is always in byte-wise lexicographic order of record names,
/// whatever order the records were supplied in. The canonical encoding
/// depends on this order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    records: BTreeMap<BString, TreeRecord>,
}

impl Tree {
    /// Build a tree from any name → record mapping (e.g. a `HashMap`).
    ///
    /// Records are keyed by their own `name`. When two records share a
    /// name the later one wins.
    ///
    /// A store that orders by the mapping key instead of the record name
    /// encodes a mismatched mapping differently: `{"a": name "z", "b": name
    /// "y"}` encodes as `z01y02` there and `y02z01` here. Mappings whose keys
    /// equal their record names encode identically in both.
    pub fn new<I, K>(mapping: I) -> Self
    where
        I: IntoIterator<Item = (K, TreeRecord)>,
        K: AsRef<[u8]>,
    {
        let mut records = BTreeMap::new();
        for (key, record) in mapping {
            if key.as_ref() != record.name.as_slice() {
                tracing::warn!(
                    key = %key.as_ref().as_bstr(),
                    name = %record.name,
                    "tree mapping key differs from record name; keying by name"
                );
            }
            records.insert(record.name.clone(), record);
        }
        Self { records }
    }

    /// Build a tree from bare records, keyed by name.
    pub fn from_records(records: impl IntoIterator<Item = TreeRecord>) -> Self {
        records.into_iter().collect()
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Look up a record by name.
    pub fn record<N: AsRef<[u8]> + ?Sized>(&self, name: &N) -> Option<&TreeRecord> {
        self.records.get(BStr::new(name.as_ref()))
    }

    pub fn contains<N: AsRef<[u8]> + ?Sized>(&self, name: &N) -> bool {
        self.record(name).is_some()
    }

    /// Iterate records in name order.
    pub fn iter(&self) -> Records<'_> {
        Records {
            inner: self.records.values(),
        }
    }

    /// Record names in order.
    pub fn names(&self) -> impl Iterator<Item = &BStr> {
        self.records.keys().map(|k| k.as_bstr())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<TreeRecord> for Tree {
    fn from_iter<T: IntoIterator<Item = TreeRecord>>(iter: T) -> Self {
        let records = iter
            .into_iter()
            .map(|record| (record.name.clone(), record))
            .collect();
        Self { records }
    }
}

/// Iterator over a tree's records in name order.
pub struct Records<'a> {
    inner: btree_map::Values<'a, BString, TreeRecord>,
}

impl<'a> Iterator for Records<'a> {
    type Item = &'a TreeRecord;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Records<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl ExactSizeIterator for Records<'_> {}

impl<'a> IntoIterator for &'a Tree {
    type Item = &'a TreeRecord;
    type IntoIter = Records<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
