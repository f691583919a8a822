// Tue Jan 25 2026 - Alex

pub mod json;
pub mod memory;
pub mod source;

pub use json::JsonEmitter;
pub use memory::MemoryEmitter;
pub use source::{SourceEmitter, SourceRenderer};

use crate::model::WrapperType;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EmitError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize {name}: {source}")]
    Serialize {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Backend that renders finished wrapper models. Models are immutable by the
/// time they get here, so implementations are called from many threads.
pub trait Emitter: Send + Sync {
    fn name(&self) -> &'static str;

    /// Emits one model, returning the written path for file backends.
    fn emit(&self, model: &WrapperType) -> Result<Option<PathBuf>, EmitError>;
}

/// `root/win32/mapped/struct/RECT.<extension>`
pub fn package_path(root: &Path, model: &WrapperType, extension: &str) -> PathBuf {
    let mut path = root.to_path_buf();
    for segment in model.package.split('.').filter(|s| !s.is_empty()) {
        path.push(segment);
    }
    path.push(format!("{}.{}", model.name, extension));
    path
}

pub(crate) fn write_file(path: &Path, contents: &str) -> Result<(), EmitError> {
    let io = |source| EmitError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io)?;
    }
    std::fs::write(path, contents).map_err(io)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Modifiers;

    #[test]
    fn test_package_path() {
        let model = WrapperType::new("win32.mapped.struct", "RECT", Modifiers::public());
        assert_eq!(
            package_path(Path::new("out"), &model, "java"),
            Path::new("out").join("win32").join("mapped").join("struct").join("RECT.java")
        );
    }
}
