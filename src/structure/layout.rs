// Tue Jan 13 2026 - Alex

use crate::structure::{Field, LayoutError, PrimitiveType};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupKind {
    Struct,
    Union,
}

/// Binary shape of a native struct or union.
///
/// Members of a struct are laid out back to back (the binding generator emits
/// explicit padding), members of a union all start at offset zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupLayout {
    pub kind: GroupKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Size recorded by the binding generator, checked against the computed one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default)]
    pub members: Vec<LayoutMember>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutMember {
    Value {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        carrier: PrimitiveType,
    },
    Padding {
        size: u64,
    },
    Group(GroupLayout),
    Sequence {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        count: u64,
        element: Box<LayoutMember>,
    },
}

impl GroupLayout {
    pub fn new_struct(name: Option<&str>) -> Self {
        Self {
            kind: GroupKind::Struct,
            name: name.map(str::to_string),
            size: None,
            members: Vec::new(),
        }
    }

    pub fn new_union(name: Option<&str>) -> Self {
        Self {
            kind: GroupKind::Union,
            name: name.map(str::to_string),
            size: None,
            members: Vec::new(),
        }
    }

    pub fn with_value(mut self, name: &str, carrier: PrimitiveType) -> Self {
        self.members.push(LayoutMember::Value {
            name: Some(name.to_string()),
            carrier,
        });
        self
    }

    pub fn with_padding(mut self, size: u64) -> Self {
        self.members.push(LayoutMember::Padding { size });
        self
    }

    pub fn with_group(mut self, group: GroupLayout) -> Self {
        self.members.push(LayoutMember::Group(group));
        self
    }

    pub fn with_sequence(mut self, name: &str, count: u64, element: LayoutMember) -> Self {
        self.members.push(LayoutMember::Sequence {
            name: Some(name.to_string()),
            count,
            element: Box::new(element),
        });
        self
    }

    pub fn with_declared_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn display_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| "<anonymous>".to_string())
    }

    pub fn is_anonymous(&self) -> bool {
        self.name.is_none()
    }

    /// Total size in bytes, saturating on layouts that fail `validate`.
    pub fn byte_size(&self) -> u64 {
        let sizes = self.members.iter().map(LayoutMember::byte_size);
        match self.kind {
            GroupKind::Struct => sizes.fold(0, u64::saturating_add),
            GroupKind::Union => sizes.max().unwrap_or(0),
        }
    }

    /// Total size in bytes, or `None` if it does not fit in 64 bits.
    pub fn checked_size(&self) -> Option<u64> {
        match self.kind {
            GroupKind::Struct => self
                .members
                .iter()
                .try_fold(0u64, |total, member| total.checked_add(member.checked_size()?)),
            GroupKind::Union => self
                .members
                .iter()
                .map(LayoutMember::checked_size)
                .try_fold(0u64, |largest, size| Some(largest.max(size?))),
        }
    }

    /// Direct members paired with their offset relative to the group start.
    pub fn members_with_offsets(&self) -> Vec<(u64, &LayoutMember)> {
        let mut current = 0u64;
        self.members
            .iter()
            .map(|member| {
                let offset = match self.kind {
                    GroupKind::Struct => current,
                    GroupKind::Union => 0,
                };
                current = current.saturating_add(member.byte_size());
                (offset, member)
            })
            .collect()
    }

    /// Members reachable by name from the group itself: its direct members, plus
    /// the contents of anonymous nested groups at their absolute offset.
    pub fn accessible_fields(&self) -> Vec<Field<'_>> {
        let mut fields = Vec::new();
        self.collect_fields(0, &mut fields);
        fields
    }

    fn collect_fields<'a>(&'a self, base: u64, out: &mut Vec<Field<'a>>) {
        for (offset, member) in self.members_with_offsets() {
            match member {
                LayoutMember::Group(group) if group.is_anonymous() => {
                    group.collect_fields(base + offset, out);
                }
                LayoutMember::Padding { .. } => {}
                _ => out.push(Field::new(base + offset, member)),
            }
        }
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.members.is_empty() {
            return Err(LayoutError::EmptyGroup(self.display_name()));
        }
        for member in &self.members {
            member.validate()?;
        }
        let computed = self
            .checked_size()
            .ok_or_else(|| LayoutError::SizeOverflow(self.display_name()))?;
        match self.size {
            Some(declared) if declared != computed => Err(LayoutError::SizeMismatch {
                group: self.display_name(),
                declared,
                computed,
            }),
            _ => Ok(()),
        }
    }
}

impl LayoutMember {
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Value { name, .. } | Self::Sequence { name, .. } => name.as_deref(),
            Self::Group(group) => group.name(),
            Self::Padding { .. } => None,
        }
    }

    pub fn byte_size(&self) -> u64 {
        match self {
            Self::Value { carrier, .. } => carrier.size(),
            Self::Padding { size } => *size,
            Self::Group(group) => group.byte_size(),
            Self::Sequence { count, element, .. } => count.saturating_mul(element.byte_size()),
        }
    }

    pub fn checked_size(&self) -> Option<u64> {
        match self {
            Self::Group(group) => group.checked_size(),
            Self::Sequence { count, element, .. } => count.checked_mul(element.checked_size()?),
            _ => Some(self.byte_size()),
        }
    }

    fn validate(&self) -> Result<(), LayoutError> {
        match self {
            Self::Group(group) => group.validate(),
            Self::Sequence { count: 0, name, .. } => Err(LayoutError::EmptySequence(
                name.clone().unwrap_or_else(|| "<anonymous>".to_string()),
            )),
            Self::Sequence { element, .. } => element.validate(),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for GroupLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = match self.kind {
            GroupKind::Struct => "struct",
            GroupKind::Union => "union",
        };
        write!(f, "{}", keyword)?;
        if let Some(name) = &self.name {
            write!(f, " {}", name)?;
        }
        write!(f, " {{ ")?;
        for (i, (offset, member)) in self.members_with_offsets().into_iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "@{}: {}", offset, member)?;
        }
        write!(f, " }}")
    }
}

impl fmt::Display for LayoutMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value { name, carrier } => write!(f, "{} {}", carrier, name.as_deref().unwrap_or("_")),
            Self::Padding { size } => write!(f, "pad[{}]", size),
            Self::Group(group) => write!(f, "{}", group),
            Self::Sequence { name, count, element } => {
                write!(f, "[{}; {}] {}", element, count, name.as_deref().unwrap_or("_"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_struct_offsets_follow_member_order() {
        let layout = GroupLayout::new_struct(Some("tagRECT"))
            .with_value("left", PrimitiveType::Int)
            .with_padding(4)
            .with_value("top", PrimitiveType::Long);

        let offsets: Vec<u64> = layout.members_with_offsets().iter().map(|(o, _)| *o).collect();
        assert_eq!(offsets, vec![0, 4, 8]);
        assert_eq!(layout.byte_size(), 16);
    }

    #[test]
    fn test_union_size_is_largest_member() {
        let layout = GroupLayout::new_union(Some("u"))
            .with_value("a", PrimitiveType::Short)
            .with_value("b", PrimitiveType::Double);

        assert_eq!(layout.byte_size(), 8);
        assert!(layout.members_with_offsets().iter().all(|(o, _)| *o == 0));
    }

    #[test]
    fn test_anonymous_groups_are_flattened() {
        let inner = GroupLayout::new_union(None)
            .with_value("lo", PrimitiveType::Int)
            .with_value("whole", PrimitiveType::Long);
        let named = GroupLayout::new_struct(Some("pt"))
            .with_value("x", PrimitiveType::Int);
        let layout = GroupLayout::new_struct(Some("outer"))
            .with_value("tag", PrimitiveType::Long)
            .with_group(inner)
            .with_group(named);

        let fields = layout.accessible_fields();
        let names: Vec<_> = fields.iter().map(|f| f.name().unwrap_or("")).collect();
        assert_eq!(names, vec!["tag", "lo", "whole", "pt"]);
        assert_eq!(fields[1].offset(), 8);
        assert_eq!(fields[2].offset(), 8);
        assert_eq!(fields[3].offset(), 16);
    }

    #[test]
    fn test_declared_size_mismatch_is_rejected() {
        let layout = GroupLayout::new_struct(Some("bad"))
            .with_value("x", PrimitiveType::Int)
            .with_declared_size(8);

        assert!(matches!(layout.validate(), Err(LayoutError::SizeMismatch { declared: 8, computed: 4, .. })));
    }

    #[test]
    fn test_empty_shapes_are_rejected() {
        assert_eq!(
            GroupLayout::new_struct(Some("e")).validate(),
            Err(LayoutError::EmptyGroup("e".to_string()))
        );
        let element = LayoutMember::Value { name: None, carrier: PrimitiveType::Byte };
        let layout = GroupLayout::new_struct(None).with_sequence("data", 0, element);
        assert_eq!(layout.validate(), Err(LayoutError::EmptySequence("data".to_string())));
    }

    #[test]
    fn test_oversized_sequence_is_rejected() {
        let element = LayoutMember::Value { name: None, carrier: PrimitiveType::Int };
        let layout = GroupLayout::new_struct(Some("huge")).with_sequence("data", u64::MAX / 2, element);
        assert_eq!(layout.checked_size(), None);
        assert_eq!(layout.validate(), Err(LayoutError::SizeOverflow("huge".to_string())));

        let layout = GroupLayout::new_struct(Some("wide"))
            .with_padding(u64::MAX)
            .with_value("tail", PrimitiveType::Byte);
        assert_eq!(layout.validate(), Err(LayoutError::SizeOverflow("wide".to_string())));
    }

    #[test]
    fn test_layout_deserialize() {
        let json = r#"{
            "kind": "struct",
            "name": "tagPOINT",
            "size": 8,
            "members": [
                {"value": {"name": "x", "carrier": "int"}},
                {"value": {"name": "y", "carrier": "int"}}
            ]
        }"#;
        let layout: GroupLayout = serde_json::from_str(json).unwrap();
        assert_eq!(layout.members.len(), 2);
        assert!(layout.validate().is_ok());
    }
}
