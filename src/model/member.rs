// Tue Jan 20 2026 - Alex

use crate::model::{Expr, Modifiers, Statement, TypeRef};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
}

impl Parameter {
    pub fn new(name: &str, ty: TypeRef) -> Self {
        Self { name: name.to_string(), ty }
    }

    pub fn as_arg(&self) -> Expr {
        Expr::ident(&self.name)
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.ty.simple_name(), self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrapperField {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    pub modifiers: Modifiers,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initializer: Option<Expr>,
}

impl WrapperField {
    pub fn new(name: &str, ty: TypeRef, modifiers: Modifiers) -> Self {
        Self {
            name: name.to_string(),
            ty,
            modifiers,
            initializer: None,
        }
    }

    pub fn with_initializer(mut self, initializer: Expr) -> Self {
        self.initializer = Some(initializer);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrapperMethod {
    pub name: String,
    pub modifiers: Modifiers,
    pub returns: TypeRef,
    pub params: Vec<Parameter>,
    pub body: Vec<Statement>,
}

impl WrapperMethod {
    pub fn new(name: &str, modifiers: Modifiers, returns: TypeRef) -> Self {
        Self {
            name: name.to_string(),
            modifiers,
            returns,
            params: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn with_param(mut self, param: Parameter) -> Self {
        self.params.push(param);
        self
    }

    pub fn with_statement(mut self, statement: Statement) -> Self {
        self.body.push(statement);
        self
    }

    /// Parameter types only, which is what overload resolution cares about.
    pub fn signature(&self) -> (String, Vec<TypeRef>) {
        (self.name.clone(), self.params.iter().map(|p| p.ty.clone()).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Constructor {
    pub modifiers: Modifiers,
    pub params: Vec<Parameter>,
    pub body: Vec<Statement>,
}

impl Constructor {
    pub fn new(modifiers: Modifiers) -> Self {
        Self {
            modifiers,
            params: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn with_param(mut self, param: Parameter) -> Self {
        self.params.push(param);
        self
    }

    pub fn with_statement(mut self, statement: Statement) -> Self {
        self.body.push(statement);
        self
    }
}
