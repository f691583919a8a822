// Tue Jan 22 2026 - Alex

use crate::model::WrapperType;
use crate::structure::GroupLayout;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct BaseId(pub usize);

impl fmt::Display for BaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How a native struct type is represented in the generated hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum StructEntry {
    /// Owns the wrapper generated for a distinct layout.
    Base(BaseId),
    /// Maps onto an existing base. `via` names the native type whose wrapper
    /// the alias derives from: the base itself for binary-identical types, the
    /// nearest resolved ancestor for inherited ones.
    Alias { target: BaseId, via: String },
}

impl StructEntry {
    pub fn base_id(&self) -> BaseId {
        match self {
            StructEntry::Base(id) => *id,
            StructEntry::Alias { target, .. } => *target,
        }
    }
}

/// The single wrapper chosen to represent every native type sharing a layout.
#[derive(Debug, Clone)]
pub struct BaseImplementation {
    pub id: BaseId,
    pub native: String,
    pub layout: GroupLayout,
    pub fingerprint: u64,
    pub model: WrapperType,
}

impl BaseImplementation {
    pub fn size(&self) -> u64 {
        self.layout.byte_size()
    }
}
