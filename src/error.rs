// Tue Jan 25 2026 - Alex

use crate::binding::BindingError;
use crate::config::ConfigError;
use crate::denylist::DenylistError;
use crate::output::EmitError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MapperError {
    #[error(transparent)]
    Binding(#[from] BindingError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Denylist(#[from] DenylistError),
    #[error(transparent)]
    Emit(#[from] EmitError),
    #[error("table {table} has no object type {object} in the binding set")]
    MissingObject { table: String, object: String },
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, MapperError>;
