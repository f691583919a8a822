// Tue Jan 13 2026 - Alex

use crate::structure::LayoutMember;
use std::fmt;

/// A layout member seen from the enclosing type, at its absolute offset.
#[derive(Debug, Clone, Copy)]
pub struct Field<'a> {
    offset: u64,
    member: &'a LayoutMember,
}

impl<'a> Field<'a> {
    pub fn new(offset: u64, member: &'a LayoutMember) -> Self {
        Self { offset, member }
    }

    pub fn name(&self) -> Option<&'a str> {
        self.member.name()
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn member(&self) -> &'a LayoutMember {
        self.member
    }
}

impl fmt::Display for Field<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ 0x{:x}", self.member, self.offset)
    }
}
