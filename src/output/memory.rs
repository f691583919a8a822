// Tue Jan 25 2026 - Alex

use crate::model::WrapperType;
use crate::output::{EmitError, Emitter};
use parking_lot::Mutex;
use std::path::PathBuf;

/// Keeps emitted models in memory, for dry runs and tests.
#[derive(Debug, Default)]
pub struct MemoryEmitter {
    models: Mutex<Vec<WrapperType>>,
}

impl MemoryEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.models.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.lock().is_empty()
    }

    pub fn get(&self, qualified_name: &str) -> Option<WrapperType> {
        self.models
            .lock()
            .iter()
            .find(|m| m.qualified_name() == qualified_name)
            .cloned()
    }
}

impl Emitter for MemoryEmitter {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn emit(&self, model: &WrapperType) -> Result<Option<PathBuf>, EmitError> {
        self.models.lock().push(model.clone());
        Ok(None)
    }
}
