// Tue Jan 20 2026 - Alex

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BindingError {
    #[error("failed to read binding manifest {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse binding manifest: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("native type {0} is declared more than once")]
    DuplicateType(String),
    #[error("native type {0} is referenced but missing from the binding set")]
    MissingType(String),
}
