// Tue Jan 20 2026 - Alex

use crate::model::{Constructor, ModelError, Modifiers, TypeRef, WrapperField, WrapperMethod};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// A type to be generated, built up by the resolvers and handed to an emitter
/// unchanged once complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrapperType {
    pub name: String,
    pub package: String,
    pub modifiers: Modifiers,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supertype: Option<TypeRef>,
    pub fields: Vec<WrapperField>,
    pub methods: Vec<WrapperMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constructor: Option<Constructor>,
    pub imports: IndexSet<String>,
}

impl WrapperType {
    pub fn new(package: &str, name: &str, modifiers: Modifiers) -> Self {
        Self {
            name: name.to_string(),
            package: package.to_string(),
            modifiers,
            supertype: None,
            fields: Vec::new(),
            methods: Vec::new(),
            constructor: None,
            imports: IndexSet::new(),
        }
    }

    pub fn qualified_name(&self) -> String {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.package, self.name)
        }
    }

    pub fn type_ref(&self) -> TypeRef {
        TypeRef::named(&self.package, &self.name)
    }

    pub fn set_supertype(&mut self, supertype: TypeRef) {
        self.import(&supertype);
        self.supertype = Some(supertype);
    }

    /// Records the import a type needs. Types from this type's own package and
    /// built-ins are ignored.
    pub fn import(&mut self, ty: &TypeRef) {
        if let Some(import) = ty.import() {
            let own_package = matches!(ty, TypeRef::Named { package: Some(p), .. } if *p == self.package);
            if !own_package {
                self.imports.insert(import);
            }
        }
    }

    pub fn import_qualified(&mut self, qualified: &str) {
        self.imports.insert(qualified.to_string());
    }

    /// Fails if `field` would clash with a field already declared.
    pub fn check_field(&self, field: &WrapperField) -> Result<(), ModelError> {
        if self.field(&field.name).is_some() {
            return Err(ModelError::DuplicateField {
                owner: self.name.clone(),
                name: field.name.clone(),
            });
        }
        Ok(())
    }

    /// Fails if a method with the same name and parameter types exists.
    pub fn check_method(&self, method: &WrapperMethod) -> Result<(), ModelError> {
        let signature = method.signature();
        if self.methods_named(&method.name).any(|m| m.signature() == signature) {
            return Err(ModelError::DuplicateMethod {
                owner: self.name.clone(),
                name: method.name.clone(),
            });
        }
        Ok(())
    }

    pub fn add_field(&mut self, field: WrapperField) -> Result<(), ModelError> {
        self.check_field(&field)?;
        self.import(&field.ty);
        self.fields.push(field);
        Ok(())
    }

    pub fn add_method(&mut self, method: WrapperMethod) -> Result<(), ModelError> {
        self.check_method(&method)?;
        self.import(&method.returns);
        for param in &method.params {
            self.import(&param.ty);
        }
        self.methods.push(method);
        Ok(())
    }

    pub fn set_constructor(&mut self, constructor: Constructor) -> Result<(), ModelError> {
        if self.constructor.is_some() {
            return Err(ModelError::DuplicateConstructor(self.name.clone()));
        }
        for param in &constructor.params {
            self.import(&param.ty);
        }
        self.constructor = Some(constructor);
        Ok(())
    }

    pub fn field(&self, name: &str) -> Option<&WrapperField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn method(&self, name: &str) -> Option<&WrapperMethod> {
        self.methods.iter().find(|m| m.name == name)
    }

    pub fn methods_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a WrapperMethod> + 'a {
        self.methods.iter().filter(move |m| m.name == name)
    }
}
