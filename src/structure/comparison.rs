// Tue Jan 15 2026 - Alex

use crate::structure::{GroupKind, GroupLayout, LayoutMember};
use ahash::RandomState;
use std::hash::{BuildHasher, Hash, Hasher};
use std::fmt;

/// First point at which two layouts stop being binary-identical.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeDifference {
    /// One side is a struct, the other a union
    KindChanged { path: String },
    /// Different number of members at the same level
    MemberCountChanged { path: String, left: usize, right: usize },
    /// Members at the same position have different shapes
    MemberChanged { path: String, offset: u64, left: String, right: String },
}

impl fmt::Display for ShapeDifference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeDifference::KindChanged { path } => write!(f, "{}: struct/union mismatch", path),
            ShapeDifference::MemberCountChanged { path, left, right } => {
                write!(f, "{}: {} members vs {}", path, left, right)
            }
            ShapeDifference::MemberChanged { path, offset, left, right } => {
                write!(f, "{} @ 0x{:X}: {} vs {}", path, offset, left, right)
            }
        }
    }
}

/// Compares layouts by shape alone; type, group and member names never matter.
pub struct StructureComparator {
    hasher: RandomState,
}

impl StructureComparator {
    pub fn new() -> Self {
        Self {
            hasher: RandomState::with_seeds(0x6c61796f, 0x75742d6d, 0x61707065, 0x72000001),
        }
    }

    pub fn shape_eq(&self, left: &GroupLayout, right: &GroupLayout) -> bool {
        self.first_difference(left, right).is_none()
    }

    /// Name-blind hash. Equal shapes always produce equal fingerprints.
    pub fn fingerprint(&self, layout: &GroupLayout) -> u64 {
        let mut state = self.hasher.build_hasher();
        hash_group(layout, &mut state);
        state.finish()
    }

    pub fn first_difference(&self, left: &GroupLayout, right: &GroupLayout) -> Option<ShapeDifference> {
        diff_group("$", left, right)
    }
}

impl Default for StructureComparator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StructureComparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StructureComparator")
    }
}

fn diff_group(path: &str, left: &GroupLayout, right: &GroupLayout) -> Option<ShapeDifference> {
    if left.kind != right.kind {
        return Some(ShapeDifference::KindChanged { path: path.to_string() });
    }
    if left.members.len() != right.members.len() {
        return Some(ShapeDifference::MemberCountChanged {
            path: path.to_string(),
            left: left.members.len(),
            right: right.members.len(),
        });
    }

    let pairs = left.members_with_offsets().into_iter().zip(right.members_with_offsets());
    for (index, ((offset, l), (_, r))) in pairs.enumerate() {
        let member_path = format!("{}.{}", path, index);
        if let Some(diff) = diff_member(&member_path, offset, l, r) {
            return Some(diff);
        }
    }
    None
}

fn diff_member(path: &str, offset: u64, left: &LayoutMember, right: &LayoutMember) -> Option<ShapeDifference> {
    let changed = || ShapeDifference::MemberChanged {
        path: path.to_string(),
        offset,
        left: left.to_string(),
        right: right.to_string(),
    };

    match (left, right) {
        (LayoutMember::Value { carrier: a, .. }, LayoutMember::Value { carrier: b, .. }) => {
            (a != b).then(changed)
        }
        (LayoutMember::Padding { size: a }, LayoutMember::Padding { size: b }) => (a != b).then(changed),
        (LayoutMember::Group(a), LayoutMember::Group(b)) => diff_group(path, a, b),
        (
            LayoutMember::Sequence { count: ca, element: ea, .. },
            LayoutMember::Sequence { count: cb, element: eb, .. },
        ) => {
            if ca != cb {
                return Some(changed());
            }
            diff_member(&format!("{}[]", path), offset, ea, eb)
        }
        _ => Some(changed()),
    }
}

fn hash_group<H: Hasher>(group: &GroupLayout, state: &mut H) {
    match group.kind {
        GroupKind::Struct => 0u8.hash(state),
        GroupKind::Union => 1u8.hash(state),
    }
    group.members.len().hash(state);
    for member in &group.members {
        hash_member(member, state);
    }
}

fn hash_member<H: Hasher>(member: &LayoutMember, state: &mut H) {
    match member {
        LayoutMember::Value { carrier, .. } => {
            2u8.hash(state);
            carrier.hash(state);
        }
        LayoutMember::Padding { size } => {
            3u8.hash(state);
            size.hash(state);
        }
        LayoutMember::Group(group) => {
            4u8.hash(state);
            hash_group(group, state);
        }
        LayoutMember::Sequence { count, element, .. } => {
            5u8.hash(state);
            count.hash(state);
            hash_member(element, state);
        }
    }
}
