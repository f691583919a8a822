// Tue Jan 20 2026 - Alex

use crate::structure::PrimitiveType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const FOREIGN_PACKAGE: &str = "jdk.incubator.foreign";

/// Reference to a type as it appears in generated declarations.
///
/// Serialized as its textual form (`int`, `void`, `segment`, `win32.pure.RECT`),
/// which is also what binding manifests use for signature types.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeRef {
    Void,
    Primitive(PrimitiveType),
    Segment,
    Scope,
    Named { package: Option<String>, name: String },
}

impl TypeRef {
    pub fn named(package: &str, name: &str) -> Self {
        Self::Named {
            package: (!package.is_empty()).then(|| package.to_string()),
            name: name.to_string(),
        }
    }

    /// A type nested inside another named type, e.g. a table entry's callable.
    pub fn nested(outer: &TypeRef, inner: &str) -> Self {
        match outer {
            Self::Named { package, name } => Self::Named {
                package: package.clone(),
                name: format!("{}.{}", name, inner),
            },
            other => Self::Named {
                package: None,
                name: format!("{}.{}", other.simple_name(), inner),
            },
        }
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Self::Void)
    }

    /// Name used inside the generated source once imports are in place.
    pub fn simple_name(&self) -> String {
        match self {
            Self::Void => "void".to_string(),
            Self::Primitive(ty) => ty.keyword().to_string(),
            Self::Segment => "MemorySegment".to_string(),
            Self::Scope => "ResourceScope".to_string(),
            Self::Named { name, .. } => name.clone(),
        }
    }

    /// Fully-qualified name to import, if this type needs one.
    pub fn import(&self) -> Option<String> {
        match self {
            Self::Primitive(PrimitiveType::Address) => Some(format!("{}.MemoryAddress", FOREIGN_PACKAGE)),
            Self::Segment => Some(format!("{}.MemorySegment", FOREIGN_PACKAGE)),
            Self::Scope => Some(format!("{}.ResourceScope", FOREIGN_PACKAGE)),
            Self::Named { package: Some(package), name } => {
                let outer = name.split('.').next().unwrap_or(name);
                Some(format!("{}.{}", package, outer))
            }
            _ => None,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Void => write!(f, "void"),
            Self::Primitive(PrimitiveType::Address) => write!(f, "address"),
            Self::Primitive(ty) => write!(f, "{}", ty.keyword()),
            Self::Segment => write!(f, "segment"),
            Self::Scope => write!(f, "scope"),
            Self::Named { package: Some(package), name } => write!(f, "{}.{}", package, name),
            Self::Named { package: None, name } => write!(f, "{}", name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid type reference: {0:?}")]
pub struct TypeRefError(pub String);

impl FromStr for TypeRef {
    type Err = TypeRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let primitive = match s {
            "" => return Err(TypeRefError(s.to_string())),
            "void" => return Ok(Self::Void),
            "segment" => return Ok(Self::Segment),
            "scope" => return Ok(Self::Scope),
            "byte" => PrimitiveType::Byte,
            "short" => PrimitiveType::Short,
            "char" => PrimitiveType::Char,
            "int" => PrimitiveType::Int,
            "long" => PrimitiveType::Long,
            "float" => PrimitiveType::Float,
            "double" => PrimitiveType::Double,
            "boolean" | "bool" => PrimitiveType::Bool,
            "address" => PrimitiveType::Address,
            _ => return parse_named(s),
        };
        Ok(Self::Primitive(primitive))
    }
}

// Package segments are lower-case by convention; the first capitalised segment
// starts the (possibly nested) type name.
fn parse_named(s: &str) -> Result<TypeRef, TypeRefError> {
    let segments: Vec<&str> = s.split('.').collect();
    if segments.iter().any(|seg| seg.is_empty()) {
        return Err(TypeRefError(s.to_string()));
    }
    let split = segments
        .iter()
        .position(|seg| seg.starts_with(|c: char| c.is_ascii_uppercase() || c == '_'))
        .unwrap_or(segments.len() - 1);
    let package = segments[..split].join(".");
    let name = segments[split..].join(".");
    Ok(TypeRef::named(&package, &name))
}

impl TryFrom<String> for TypeRef {
    type Error = TypeRefError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TypeRef> for String {
    fn from(value: TypeRef) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_primitives() {
        assert_eq!("int".parse::<TypeRef>().unwrap(), TypeRef::Primitive(PrimitiveType::Int));
        assert_eq!("void".parse::<TypeRef>().unwrap(), TypeRef::Void);
        assert_eq!("address".parse::<TypeRef>().unwrap(), TypeRef::Primitive(PrimitiveType::Address));
        assert!("".parse::<TypeRef>().is_err());
    }

    #[test]
    fn test_parse_named_with_nested_type() {
        let ty: TypeRef = "win32.pure.IUnknownVtbl.Release".parse().unwrap();
        assert_eq!(
            ty,
            TypeRef::Named {
                package: Some("win32.pure".to_string()),
                name: "IUnknownVtbl.Release".to_string()
            }
        );
        assert_eq!(ty.import().as_deref(), Some("win32.pure.IUnknownVtbl"));
        assert_eq!(ty.simple_name(), "IUnknownVtbl.Release");
    }

    #[test]
    fn test_foreign_types_import() {
        assert_eq!(TypeRef::Segment.import().as_deref(), Some("jdk.incubator.foreign.MemorySegment"));
        assert_eq!(TypeRef::Primitive(PrimitiveType::Int).import(), None);
    }

    #[test]
    fn test_round_trip_through_json() {
        let ty = TypeRef::named("win32.mapped.struct", "RECT");
        let json = serde_json::to_string(&ty).unwrap();
        assert_eq!(json, "\"win32.mapped.struct.RECT\"");
        let back: TypeRef = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ty);
    }
}
