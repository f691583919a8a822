// Tue Jan 25 2026 - Alex

use crate::model::WrapperType;
use crate::output::{package_path, write_file, EmitError, Emitter};
use std::path::{Path, PathBuf};

/// Writes each model as a JSON document next to where its source would go.
pub struct JsonEmitter {
    root: PathBuf,
    pretty_print: bool,
}

impl JsonEmitter {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            pretty_print: true,
        }
    }

    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    pub fn serialize(&self, model: &WrapperType) -> Result<String, EmitError> {
        let result = if self.pretty_print {
            serde_json::to_string_pretty(model)
        } else {
            serde_json::to_string(model)
        };
        result.map_err(|source| EmitError::Serialize {
            name: model.qualified_name(),
            source,
        })
    }
}

impl Emitter for JsonEmitter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn emit(&self, model: &WrapperType) -> Result<Option<PathBuf>, EmitError> {
        let path = package_path(&self.root, model, "json");
        write_file(&path, &self.serialize(model)?)?;
        Ok(Some(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Modifiers, TypeRef, WrapperField};

    #[test]
    fn test_model_json_shape() {
        let mut model = WrapperType::new("win32.mapped.struct", "RECT", Modifiers::public());
        model
            .add_field(WrapperField::new("segment", TypeRef::Segment, Modifiers::public().with_final()))
            .unwrap();

        let json = JsonEmitter::new("out").with_pretty_print(false).serialize(&model).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["name"], "RECT");
        assert_eq!(value["fields"][0]["type"], "segment");
        assert_eq!(value["imports"][0], "jdk.incubator.foreign.MemorySegment");
    }
}
