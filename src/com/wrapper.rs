// Tue Jan 24 2026 - Alex

use crate::model::{Parameter, TypeRef, WrapperType};
use serde::Serialize;
use std::fmt;

/// One forwarding method, with the receiver already dropped from `params`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComMethod {
    pub name: String,
    pub returns: TypeRef,
    pub params: Vec<Parameter>,
}

impl fmt::Display for ComMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params: Vec<String> = self.params.iter().map(ToString::to_string).collect();
        write!(f, "{} {}({})", self.returns.simple_name(), self.name, params.join(", "))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ComWrapper {
    pub object: String,
    pub table: String,
    pub methods: Vec<ComMethod>,
    pub model: WrapperType,
}

impl ComWrapper {
    pub fn method_count(&self) -> usize {
        self.methods.len()
    }

    pub fn has_identity_accessor(&self) -> bool {
        self.model.method("REFIID").is_some()
    }
}
