//! In-memory graph of objects keyed by their hash.
//!
//! An object can only be inserted once everything it references is already
//! present, so the reference graph is acyclic by construction and no cycle
//! detection is needed anywhere.

use std::collections::{HashMap, HashSet, VecDeque};

use bstr::{BStr, BString, ByteSlice};
use caf_hash::ObjectHash;

use crate::diff::{self, TreeDiff};
use crate::{Blob, Commit, Object, ObjectError, ObjectFormat, ObjectType, RecordType, Tree, TreeRecord};

/// Hash-keyed store of immutable objects for a single [`ObjectFormat`].
#[derive(Debug, Clone, Default)]
pub struct ObjectArena {
    format: ObjectFormat,
    objects: HashMap<ObjectHash, Object>,
}

impl ObjectArena {
    pub fn new(format: ObjectFormat) -> Self {
        Self {
            format,
            objects: HashMap::new(),
        }
    }

    pub fn format(&self) -> ObjectFormat {
        self.format
    }

    /// Validate and store an object, returning its hash.
    ///
    /// Tree records of kind blob or tree must name a stored object of that
    /// kind, and record names must be non-empty with no `/`. A commit's tree
    /// must be a stored tree and its parents stored commits. Records of
    /// other kinds are not checked. Inserting an object that is already
    /// present is a no-op.
    pub fn insert(&mut self, object: impl Into<Object>) -> Result<ObjectHash, ObjectError> {
        let object = object.into();
        match &object {
            Object::Blob(_) => {}
            Object::Tree(tree) => self.check_tree(tree)?,
            Object::Commit(commit) => self.check_commit(commit)?,
        }

        let hash = self.format.hash(&object)?;
        let kind = object.object_type();
        match self.objects.get(&hash).map(Object::object_type) {
            Some(actual) if actual != kind => {
                return Err(ObjectError::TypeMismatch {
                    hash,
                    expected: kind,
                    actual,
                });
            }
            Some(_) => {
                tracing::trace!(%hash, %kind, "object already stored");
            }
            None => {
                tracing::debug!(%hash, %kind, "stored object");
                self.objects.insert(hash.clone(), object);
            }
        }
        Ok(hash)
    }

    fn check_tree(&self, tree: &Tree) -> Result<(), ObjectError> {
        for record in tree {
            if record.name.is_empty() || record.name.contains(&b'/') {
                return Err(ObjectError::InvalidRecordName(record.name.clone()));
            }
            let expected = match record.record_type {
                RecordType::Blob => ObjectType::Blob,
                RecordType::Tree => ObjectType::Tree,
                RecordType::Other(_) => continue,
            };
            self.stored_as(&record.hash, expected)?;
        }
        Ok(())
    }

    fn check_commit(&self, commit: &Commit) -> Result<(), ObjectError> {
        self.stored_as(&commit.tree_hash, ObjectType::Tree)?;
        for parent in &commit.parents {
            self.stored_as(parent, ObjectType::Commit)?;
        }
        Ok(())
    }

    fn stored_as(&self, hash: &ObjectHash, expected: ObjectType) -> Result<&Object, ObjectError> {
        let object = self
            .objects
            .get(hash)
            .ok_or_else(|| ObjectError::NotFound(hash.clone()))?;
        if object.object_type() != expected {
            return Err(ObjectError::TypeMismatch {
                hash: hash.clone(),
                expected,
                actual: object.object_type(),
            });
        }
        Ok(object)
    }

    pub(crate) fn stored_tree(&self, hash: &ObjectHash) -> Result<&Tree, ObjectError> {
        match self.objects.get(hash) {
            Some(Object::Tree(tree)) => Ok(tree),
            Some(other) => Err(ObjectError::TypeMismatch {
                hash: hash.clone(),
                expected: ObjectType::Tree,
                actual: other.object_type(),
            }),
            None => Err(ObjectError::NotFound(hash.clone())),
        }
    }

    pub fn get(&self, hash: &ObjectHash) -> Option<&Object> {
        self.objects.get(hash)
    }

    pub fn blob(&self, hash: &ObjectHash) -> Option<&Blob> {
        self.get(hash).and_then(Object::as_blob)
    }

    pub fn tree(&self, hash: &ObjectHash) -> Option<&Tree> {
        self.get(hash).and_then(Object::as_tree)
    }

    pub fn commit(&self, hash: &ObjectHash) -> Option<&Commit> {
        self.get(hash).and_then(Object::as_commit)
    }

    pub fn contains(&self, hash: &ObjectHash) -> bool {
        self.objects.contains_key(hash)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// All stored hashes, sorted.
    pub fn hashes(&self) -> Vec<&ObjectHash> {
        let mut hashes: Vec<_> = self.objects.keys().collect();
        hashes.sort();
        hashes
    }

    /// Follow a `/`-separated path from a root tree to a record.
    ///
    /// Empty components are skipped, so `"a//b/"` resolves like `"a/b"`.
    pub fn resolve_path<P: AsRef<[u8]> + ?Sized>(
        &self,
        root: &ObjectHash,
        path: &P,
    ) -> Result<&TreeRecord, ObjectError> {
        let path = BStr::new(path.as_ref());
        let mut tree = Some(self.stored_tree(root)?);
        let mut walked = BString::default();
        let mut found: Option<&TreeRecord> = None;

        for component in path.split_str("/").filter(|c| !c.is_empty()) {
            if !walked.is_empty() {
                walked.push(b'/');
            }
            walked.extend_from_slice(component);

            let current = tree.ok_or_else(|| ObjectError::NotATree(parent_of(&walked)))?;
            let record = current
                .record(component)
                .ok_or_else(|| ObjectError::PathNotFound(walked.clone()))?;
            tree = match record.record_type {
                RecordType::Tree => Some(
                    self.tree(&record.hash)
                        .ok_or_else(|| ObjectError::NotFound(record.hash.clone()))?,
                ),
                _ => None,
            };
            found = Some(record);
        }

        found.ok_or_else(|| ObjectError::PathNotFound(BString::from(path.as_bytes())))
    }

    /// Walk a commit and all of its ancestors breadth-first.
    ///
    /// Each commit is yielded once; parents are queued in stored order.
    /// Hashes that are not stored commits end the branch silently.
    pub fn ancestors<'a>(&'a self, start: &ObjectHash) -> Ancestors<'a> {
        let mut queue = VecDeque::new();
        let mut visited = HashSet::new();
        if let Some((hash, _)) = self.objects.get_key_value(start) {
            visited.insert(hash);
            queue.push_back(hash);
        }
        Ancestors {
            arena: self,
            queue,
            visited,
        }
    }

    /// Whether `ancestor` is reachable from `descendant` (or equal to it).
    pub fn is_ancestor(&self, ancestor: &ObjectHash, descendant: &ObjectHash) -> bool {
        self.ancestors(descendant).any(|(hash, _)| hash == ancestor)
    }

    /// First commit shared by the first-parent chains of `a` and `b`.
    ///
    /// Both chains advance one commit per round, `a` first, recording every
    /// hash in one visited set; the first hash seen twice is the result.
    /// A hash that is not a stored commit ends its chain.
    pub fn merge_base<'a>(&'a self, a: &'a ObjectHash, b: &'a ObjectHash) -> Option<&'a ObjectHash> {
        let mut visited = HashSet::new();
        let mut cursors = [Some(a), Some(b)];
        while cursors.iter().any(Option::is_some) {
            for cursor in &mut cursors {
                let Some(hash) = *cursor else {
                    continue;
                };
                if !visited.insert(hash) {
                    tracing::trace!(%hash, "found merge base");
                    return Some(hash);
                }
                *cursor = self.commit(hash).and_then(Commit::first_parent);
            }
        }
        None
    }

    /// Compare two stored trees; `None` stands for an empty tree.
    ///
    /// See [`TreeDiff`] for the shape of the result.
    pub fn diff_trees(
        &self,
        old: Option<&ObjectHash>,
        new: Option<&ObjectHash>,
    ) -> Result<Vec<TreeDiff>, ObjectError> {
        diff::diff_trees(self, old, new)
    }
}

fn parent_of(path: &[u8]) -> BString {
    match path.rfind_byte(b'/') {
        Some(pos) => BString::from(&path[..pos]),
        None => BString::default(),
    }
}

/// Breadth-first iterator over commit history.
pub struct Ancestors<'a> {
    arena: &'a ObjectArena,
    queue: VecDeque<&'a ObjectHash>,
    visited: HashSet<&'a ObjectHash>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = (&'a ObjectHash, &'a Commit);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(hash) = self.queue.pop_front() {
            let Some(commit) = self.arena.commit(hash) else {
                continue;
            };
            for parent in &commit.parents {
                if let Some((stored, _)) = self.arena.objects.get_key_value(parent) {
                    if self.visited.insert(stored) {
                        self.queue.push_back(stored);
                    }
                }
            }
            return Some((hash, commit));
        }
        None
    }
}
