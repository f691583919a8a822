// Tue Jan 20 2026 - Alex

pub mod class;
pub mod code;
pub mod member;
pub mod modifiers;
pub mod type_ref;

pub use class::WrapperType;
pub use code::{BinaryOp, Expr, Statement};
pub use member::{Constructor, Parameter, WrapperField, WrapperMethod};
pub use modifiers::{ModifierFlags, Modifiers, Visibility};
pub use type_ref::{TypeRef, TypeRefError};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("{owner} already declares a field named {name}")]
    DuplicateField { owner: String, name: String },
    #[error("{owner} already declares {name} with the same parameter types")]
    DuplicateMethod { owner: String, name: String },
    #[error("{0} already has a constructor")]
    DuplicateConstructor(String),
}
