//! Snapshot comparison.

use super::ChecksumSnapshot;
use std::fmt;

/// How a path differs between two snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ChangeKind {
    Added,
    Removed,
    Modified,
}

impl ChangeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeKind::Added => "added",
            ChangeKind::Removed => "removed",
            ChangeKind::Modified => "modified",
        }
    }

    /// The change observed when the two snapshots are swapped.
    pub fn inverse(self) -> Self {
        match self {
            ChangeKind::Added => ChangeKind::Removed,
            ChangeKind::Removed => ChangeKind::Added,
            ChangeKind::Modified => ChangeKind::Modified,
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecksumChange {
    pub path: String,
    pub kind: ChangeKind,
}

/// Path-sorted set of changes between a "before" and an "after" snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChecksumDiff {
    changes: Vec<ChecksumChange>,
}

impl ChecksumDiff {
    /// Compare `before` against `after`.
    pub fn between(before: &ChecksumSnapshot, after: &ChecksumSnapshot) -> Self {
        let mut changes = Vec::new();

        for (path, digest) in before.entries() {
            match after.get(path) {
                None => changes.push(ChecksumChange {
                    path: path.clone(),
                    kind: ChangeKind::Removed,
                }),
                Some(other) if other.hash != digest.hash => changes.push(ChecksumChange {
                    path: path.clone(),
                    kind: ChangeKind::Modified,
                }),
                Some(_) => {}
            }
        }
        for path in after.entries().keys() {
            if before.get(path).is_none() {
                changes.push(ChecksumChange {
                    path: path.clone(),
                    kind: ChangeKind::Added,
                });
            }
        }

        changes.sort_by(|a, b| a.path.cmp(&b.path));
        ChecksumDiff { changes }
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn changes(&self) -> &[ChecksumChange] {
        &self.changes
    }

    /// The diff that would be reported with "before" and "after" swapped.
    pub fn inverted(&self) -> Self {
        ChecksumDiff {
            changes: self
                .changes
                .iter()
                .map(|c| ChecksumChange {
                    path: c.path.clone(),
                    kind: c.kind.inverse(),
                })
                .collect(),
        }
    }
}

/// One `<path>: <kind>` line per change.
impl fmt::Display for ChecksumDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, change) in self.changes.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{}: {}", change.path, change.kind)?;
        }
        Ok(())
    }
}
