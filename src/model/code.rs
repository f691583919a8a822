// Tue Jan 20 2026 - Alex

use crate::model::TypeRef;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Mul,
}

impl BinaryOp {
    fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Mul => "*",
        }
    }
}

/// Expression forms generated method bodies are made of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    Ident(String),
    Literal(String),
    /// `target.name`
    Field { target: Box<Expr>, name: String },
    /// `target.name(args)`, or a bare call when there is no target
    Call { target: Option<Box<Expr>>, name: String, args: Vec<Expr> },
    Binary { op: BinaryOp, lhs: Box<Expr>, rhs: Box<Expr> },
    Cast { ty: TypeRef, expr: Box<Expr> },
    New { ty: TypeRef, args: Vec<Expr> },
}

impl Expr {
    pub fn ident(name: &str) -> Self {
        Expr::Ident(name.to_string())
    }

    pub fn literal(value: impl fmt::Display) -> Self {
        Expr::Literal(value.to_string())
    }

    pub fn this_field(name: &str) -> Self {
        Expr::Field {
            target: Box::new(Expr::ident("this")),
            name: name.to_string(),
        }
    }

    pub fn call(target: Expr, name: &str, args: Vec<Expr>) -> Self {
        Expr::Call {
            target: Some(Box::new(target)),
            name: name.to_string(),
            args,
        }
    }

    pub fn bare_call(name: &str, args: Vec<Expr>) -> Self {
        Expr::Call {
            target: None,
            name: name.to_string(),
            args,
        }
    }

    /// `Type.name(args)` through the type's simple name.
    pub fn static_call(ty: &TypeRef, name: &str, args: Vec<Expr>) -> Self {
        Self::call(Expr::Ident(ty.simple_name()), name, args)
    }

    pub fn add(lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary {
            op: BinaryOp::Add,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn mul(lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary {
            op: BinaryOp::Mul,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn cast(ty: TypeRef, expr: Expr) -> Self {
        Expr::Cast { ty, expr: Box::new(expr) }
    }

    pub fn new_object(ty: TypeRef, args: Vec<Expr>) -> Self {
        Expr::New { ty, args }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Ident(name) | Expr::Literal(name) => write!(f, "{}", name),
            Expr::Field { target, name } => write!(f, "{}.{}", target, name),
            Expr::Call { target, name, args } => {
                if let Some(target) = target {
                    write!(f, "{}.", target)?;
                }
                write!(f, "{}({})", name, join_args(args))
            }
            Expr::Binary { op, lhs, rhs } => write!(f, "({} {} {})", lhs, op.symbol(), rhs),
            Expr::Cast { ty, expr } => write!(f, "({}){}", ty.simple_name(), expr),
            Expr::New { ty, args } => write!(f, "new {}({})", ty.simple_name(), join_args(args)),
        }
    }
}

fn join_args(args: &[Expr]) -> String {
    args.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Statement {
    /// `var name = value;`
    Local { name: String, value: Expr },
    Assign { target: Expr, value: Expr },
    Expr(Expr),
    Return(Expr),
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Local { name, value } => write!(f, "var {} = {};", name, value),
            Statement::Assign { target, value } => write!(f, "{} = {};", target, value),
            Statement::Expr(expr) => write!(f, "{};", expr),
            Statement::Return(expr) => write!(f, "return {};", expr),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indexed_offset_expression() {
        let offset = Expr::add(Expr::literal(8), Expr::mul(Expr::ident("index"), Expr::literal(4)));
        let get = Expr::call(Expr::ident("segment"), "get", vec![Expr::ident("JAVA_INT"), offset]);
        assert_eq!(
            Statement::Return(get).to_string(),
            "return segment.get(JAVA_INT, (8 + (index * 4)));"
        );
    }

    #[test]
    fn test_local_and_cast() {
        let stmt = Statement::Local {
            name: "segment".to_string(),
            value: Expr::cast(TypeRef::Segment, Expr::ident("raw")),
        };
        assert_eq!(stmt.to_string(), "var segment = (MemorySegment)raw;");
    }
}
