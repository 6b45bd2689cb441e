//! Tree-to-tree diff.
//!
//! Walks two stored trees in parallel by record name and reports the
//! changes as a nested list mirroring the directory layout. Added and
//! removed subtrees are expanded so every record beneath them is listed.
//! A removed record and an added record with the same hash are reported as
//! a move when both sit directly under the root or under a modified tree.

use std::cmp::Ordering;

use bstr::{BStr, BString};
use caf_hash::ObjectHash;

use crate::{ObjectArena, ObjectError, Tree, TreeRecord};

/// How a record changed between the old and new tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffKind {
    /// Only in the new tree.
    Added,
    /// Only in the old tree.
    Removed,
    /// In both trees under the same name with a different hash.
    Modified { new: TreeRecord },
    /// Removed here, and added with the same hash at `to`.
    MovedTo { to: BString },
    /// Added here, and removed with the same hash at `from`.
    MovedFrom { from: BString },
}

/// One changed record, with the changes beneath it when it is a tree.
///
/// `record` is the old-side record for `Removed`, `Modified` and `MovedTo`,
/// and the new-side record for `Added` and `MovedFrom`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeDiff {
    pub path: BString,
    pub record: TreeRecord,
    pub kind: DiffKind,
    pub children: Vec<TreeDiff>,
}

impl TreeDiff {
    pub fn name(&self) -> &BStr {
        self.record.name.as_ref()
    }

    pub fn is_move(&self) -> bool {
        matches!(self.kind, DiffKind::MovedTo { .. } | DiffKind::MovedFrom { .. })
    }

    /// Find a change by its full path.
    pub fn find<'a>(diffs: &'a [TreeDiff], path: &str) -> Option<&'a TreeDiff> {
        diffs.iter().find_map(|diff| {
            if diff.path == path {
                Some(diff)
            } else {
                Self::find(&diff.children, path)
            }
        })
    }
}

pub(crate) fn diff_trees(
    arena: &ObjectArena,
    old: Option<&ObjectHash>,
    new: Option<&ObjectHash>,
) -> Result<Vec<TreeDiff>, ObjectError> {
    let empty = Tree::empty();
    let old_tree = match old {
        Some(hash) => arena.stored_tree(hash)?,
        None => &empty,
    };
    let new_tree = match new {
        Some(hash) => arena.stored_tree(hash)?,
        None => &empty,
    };
    if old == new {
        return Ok(Vec::new());
    }

    let mut diffs = Vec::new();
    diff_records(arena, old_tree, new_tree, &BString::default(), &mut diffs)?;
    detect_moves(&mut diffs);
    tracing::debug!(changes = diffs.len(), "diffed trees");
    Ok(diffs)
}

/// Recursively diff two trees, appending changes under `prefix` to `out`.
fn diff_records(
    arena: &ObjectArena,
    old: &Tree,
    new: &Tree,
    prefix: &BString,
    out: &mut Vec<TreeDiff>,
) -> Result<(), ObjectError> {
    let old_records: Vec<&TreeRecord> = old.iter().collect();
    let new_records: Vec<&TreeRecord> = new.iter().collect();
    let mut oi = 0;
    let mut ni = 0;

    loop {
        let order = match (old_records.get(oi), new_records.get(ni)) {
            (Some(o), Some(n)) => o.name.cmp(&n.name),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => break,
        };
        match order {
            Ordering::Less => {
                out.push(one_sided(arena, old_records[oi], prefix, DiffKind::Removed)?);
                oi += 1;
            }
            Ordering::Greater => {
                out.push(one_sided(arena, new_records[ni], prefix, DiffKind::Added)?);
                ni += 1;
            }
            Ordering::Equal => {
                let (o, n) = (old_records[oi], new_records[ni]);
                if o.hash != n.hash {
                    out.push(modified(arena, o, n, prefix)?);
                }
                oi += 1;
                ni += 1;
            }
        }
    }
    Ok(())
}

fn modified(
    arena: &ObjectArena,
    old: &TreeRecord,
    new: &TreeRecord,
    prefix: &BString,
) -> Result<TreeDiff, ObjectError> {
    let mut diff = TreeDiff {
        path: full_path(prefix, &old.name),
        record: old.clone(),
        kind: DiffKind::Modified { new: new.clone() },
        children: Vec::new(),
    };
    if old.record_type.is_tree() && new.record_type.is_tree() {
        let old_tree = arena.stored_tree(&old.hash)?;
        let new_tree = arena.stored_tree(&new.hash)?;
        diff_records(arena, old_tree, new_tree, &diff.path, &mut diff.children)?;
    }
    Ok(diff)
}

/// An added or removed record, with everything beneath it when it is a tree.
fn one_sided(
    arena: &ObjectArena,
    record: &TreeRecord,
    prefix: &BString,
    kind: DiffKind,
) -> Result<TreeDiff, ObjectError> {
    let path = full_path(prefix, &record.name);
    let mut children = Vec::new();
    if record.record_type.is_tree() {
        for child in arena.stored_tree(&record.hash)? {
            children.push(one_sided(arena, child, &path, kind.clone())?);
        }
    }
    Ok(TreeDiff {
        path,
        record: record.clone(),
        kind,
        children,
    })
}

fn full_path(prefix: &BString, name: &BString) -> BString {
    if prefix.is_empty() {
        name.clone()
    } else {
        let mut path = prefix.clone();
        path.push(b'/');
        path.extend_from_slice(name);
        path
    }
}

/// Pair removed and added records with equal hashes into moves.
///
/// Only changes whose parent exists on both sides take part; records inside
/// an added or removed subtree stay as they are. Pairing is one-to-one, in
/// path order.
fn detect_moves(diffs: &mut [TreeDiff]) {
    let mut removed = Vec::new();
    let mut added = Vec::new();
    collect_candidates(diffs, &mut Vec::new(), &mut removed, &mut added);
    if removed.is_empty() || added.is_empty() {
        return;
    }

    let mut matched_added = vec![false; added.len()];
    let mut moves = Vec::new();
    for from in &removed {
        let Some(old) = node(diffs, from) else {
            continue;
        };
        for (ai, to) in added.iter().enumerate() {
            if matched_added[ai] {
                continue;
            }
            let Some(new) = node(diffs, to) else {
                continue;
            };
            if old.record.hash == new.record.hash
                && old.record.record_type == new.record.record_type
            {
                matched_added[ai] = true;
                moves.push((from, to, old.path.clone(), new.path.clone()));
                break;
            }
        }
    }

    for (from, to, from_path, to_path) in moves {
        tracing::trace!(from = %from_path, to = %to_path, "detected move");
        if let Some(diff) = node_mut(diffs, from) {
            diff.kind = DiffKind::MovedTo { to: to_path };
            diff.children.clear();
        }
        if let Some(diff) = node_mut(diffs, to) {
            diff.kind = DiffKind::MovedFrom { from: from_path };
            diff.children.clear();
        }
    }
}

/// Index paths of the `Removed` and `Added` changes reachable through
/// `Modified` nodes only.
fn collect_candidates(
    diffs: &[TreeDiff],
    at: &mut Vec<usize>,
    removed: &mut Vec<Vec<usize>>,
    added: &mut Vec<Vec<usize>>,
) {
    for (i, diff) in diffs.iter().enumerate() {
        at.push(i);
        match diff.kind {
            DiffKind::Removed => removed.push(at.clone()),
            DiffKind::Added => added.push(at.clone()),
            DiffKind::Modified { .. } => collect_candidates(&diff.children, at, removed, added),
            DiffKind::MovedTo { .. } | DiffKind::MovedFrom { .. } => {}
        }
        at.pop();
    }
}

fn node<'a>(diffs: &'a [TreeDiff], at: &[usize]) -> Option<&'a TreeDiff> {
    let (first, rest) = at.split_first()?;
    let diff = diffs.get(*first)?;
    if rest.is_empty() {
        Some(diff)
    } else {
        node(&diff.children, rest)
    }
}

fn node_mut<'a>(diffs: &'a mut [TreeDiff], at: &[usize]) -> Option<&'a mut TreeDiff> {
    let (first, rest) = at.split_first()?;
    let diff = diffs.get_mut(*first)?;
    if rest.is_empty() {
        Some(diff)
    } else {
        node_mut(&mut diff.children, rest)
    }
}
