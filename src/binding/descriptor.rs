// Tue Jan 20 2026 - Alex

use crate::model::{Parameter, TypeRef};
use crate::structure::{GroupLayout, PrimitiveType};
use serde::{Deserialize, Serialize};

/// One entry of the binding set: a native struct, union, interface object or
/// interface table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NativeType {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<GroupLayout>,
    /// Set when the binding generator could not initialize this type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub broken: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entries: Vec<TableEntry>,
}

#[derive(Debug, Clone, Copy)]
pub enum LayoutSource<'a> {
    Absent,
    Declared(&'a GroupLayout),
    Broken(&'a str),
}

impl NativeType {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            parent: None,
            layout: None,
            broken: None,
            entries: Vec::new(),
        }
    }

    pub fn with_parent(mut self, parent: &str) -> Self {
        self.parent = Some(parent.to_string());
        self
    }

    pub fn with_layout(mut self, layout: GroupLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    pub fn with_broken(mut self, reason: &str) -> Self {
        self.broken = Some(reason.to_string());
        self
    }

    pub fn layout_source(&self) -> LayoutSource<'_> {
        if let Some(reason) = &self.broken {
            return LayoutSource::Broken(reason);
        }
        match &self.layout {
            Some(layout) => LayoutSource::Declared(layout),
            None => LayoutSource::Absent,
        }
    }
}

/// A slot of an interface table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableEntry {
    pub name: String,
    pub carrier: EntryCarrier,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryCarrier {
    /// A functional type; callable only when it declares exactly one method.
    Functional { name: String, methods: Vec<Signature> },
    /// Anything else the generator emitted for the slot.
    Value(TypeRef),
}

impl TableEntry {
    pub fn functional(name: &str, signature: Signature) -> Self {
        Self {
            name: name.to_string(),
            carrier: EntryCarrier::Functional {
                name: name.to_string(),
                methods: vec![signature],
            },
        }
    }

    pub fn value(name: &str, ty: TypeRef) -> Self {
        Self {
            name: name.to_string(),
            carrier: EntryCarrier::Value(ty),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub name: String,
    pub returns: TypeRef,
    #[serde(default)]
    pub params: Vec<Parameter>,
}

impl Signature {
    pub fn apply(returns: TypeRef) -> Self {
        Self {
            name: "apply".to_string(),
            returns,
            params: Vec::new(),
        }
    }

    pub fn with_param(mut self, name: &str, ty: TypeRef) -> Self {
        self.params.push(Parameter::new(name, ty));
        self
    }
}

/// A named constant from the flat constant namespace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NativeConstant {
    pub name: String,
    pub carrier: PrimitiveType,
    pub value: i64,
}

impl NativeConstant {
    pub fn new(name: &str, carrier: PrimitiveType, value: i64) -> Self {
        Self {
            name: name.to_string(),
            carrier,
            value,
        }
    }
}
