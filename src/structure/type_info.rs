// Tue Jan 13 2026 - Alex

use serde::{Deserialize, Serialize};
use std::fmt;

/// Carrier of a leaf value inside a native layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    Byte,
    Short,
    Char,
    Int,
    Long,
    Float,
    Double,
    Bool,
    Address,
}

impl PrimitiveType {
    pub fn size(self) -> u64 {
        match self {
            Self::Byte | Self::Bool => 1,
            Self::Short | Self::Char => 2,
            Self::Int | Self::Float => 4,
            Self::Long | Self::Double | Self::Address => 8,
        }
    }

    /// Name of the value-layout constant used to read or write this carrier.
    pub fn value_layout(self) -> &'static str {
        match self {
            Self::Byte => "JAVA_BYTE",
            Self::Short => "JAVA_SHORT",
            Self::Char => "JAVA_CHAR",
            Self::Int => "JAVA_INT",
            Self::Long => "JAVA_LONG",
            Self::Float => "JAVA_FLOAT",
            Self::Double => "JAVA_DOUBLE",
            Self::Bool => "JAVA_BOOLEAN",
            Self::Address => "ADDRESS",
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Char => "char",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Bool => "boolean",
            Self::Address => "MemoryAddress",
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}
