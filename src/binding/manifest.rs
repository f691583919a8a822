// Tue Jan 20 2026 - Alex

use crate::binding::{BindingError, NativeConstant, NativeType};
use crate::model::TypeRef;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// On-disk description of a pre-generated binding set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    /// Package the raw bindings live in.
    pub package: String,
    /// Type holding the global functions and interface identifiers.
    #[serde(default = "default_holder")]
    pub holder: String,
    #[serde(default)]
    pub types: Vec<NativeType>,
    #[serde(default)]
    pub constants: Vec<NativeConstant>,
}

fn default_holder() -> String {
    "Win32".to_string()
}

impl Manifest {
    pub fn new(package: &str) -> Self {
        Self {
            package: package.to_string(),
            holder: default_holder(),
            types: Vec::new(),
            constants: Vec::new(),
        }
    }
}

/// The binding set with a name index. Declaration order is preserved.
#[derive(Debug, Clone)]
pub struct BindingSet {
    manifest: Manifest,
    index: AHashMap<String, usize>,
}

impl BindingSet {
    pub fn from_manifest(manifest: Manifest) -> Result<Self, BindingError> {
        let mut index = AHashMap::with_capacity(manifest.types.len());
        for (position, native) in manifest.types.iter().enumerate() {
            if index.insert(native.name.clone(), position).is_some() {
                return Err(BindingError::DuplicateType(native.name.clone()));
            }
        }
        Ok(Self { manifest, index })
    }

    pub fn from_json(json: &str) -> Result<Self, BindingError> {
        let manifest: Manifest = serde_json::from_str(json)?;
        Self::from_manifest(manifest)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, BindingError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| BindingError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let set = Self::from_json(&contents)?;
        log::debug!(
            "Loaded {} native types and {} constants from {}",
            set.len(),
            set.constants().len(),
            path.display()
        );
        Ok(set)
    }

    pub fn package(&self) -> &str {
        &self.manifest.package
    }

    pub fn holder(&self) -> TypeRef {
        TypeRef::named(&self.manifest.package, &self.manifest.holder)
    }

    pub fn types(&self) -> &[NativeType] {
        &self.manifest.types
    }

    pub fn constants(&self) -> &[NativeConstant] {
        &self.manifest.constants
    }

    pub fn len(&self) -> usize {
        self.manifest.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.manifest.types.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&NativeType> {
        self.index.get(name).map(|&i| &self.manifest.types[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Looks up a type the caller knows must exist; a miss means the binding
    /// set is inconsistent.
    pub fn require(&self, name: &str) -> Result<&NativeType, BindingError> {
        self.get(name).ok_or_else(|| BindingError::MissingType(name.to_string()))
    }

    pub fn type_ref(&self, name: &str) -> TypeRef {
        TypeRef::named(&self.manifest.package, name)
    }
}
