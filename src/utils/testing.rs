// Tue Jan 23 2026 - Alex

//! Fixture helpers shared by the unit tests.

use crate::binding::{BindingSet, Manifest, NativeConstant, NativeType, Signature, TableEntry};
use crate::model::TypeRef;
use crate::structure::{GroupLayout, PrimitiveType};

pub struct ManifestBuilder {
    manifest: Manifest,
}

impl ManifestBuilder {
    pub fn new(package: &str) -> Self {
        Self {
            manifest: Manifest::new(package),
        }
    }

    pub fn with_type(mut self, native: NativeType) -> Self {
        self.manifest.types.push(native);
        self
    }

    pub fn with_struct(self, name: &str, layout: GroupLayout) -> Self {
        self.with_type(NativeType::new(name).with_layout(layout))
    }

    pub fn with_derived(self, name: &str, parent: &str) -> Self {
        self.with_type(NativeType::new(name).with_parent(parent))
    }

    pub fn with_broken(self, name: &str, reason: &str) -> Self {
        self.with_type(NativeType::new(name).with_broken(reason))
    }

    /// Adds an interface object `name` and its table `name` + "Vtbl".
    pub fn with_interface(self, name: &str, entries: Vec<TableEntry>) -> Self {
        let object = NativeType::new(name)
            .with_layout(GroupLayout::new_struct(Some(name)).with_value("lpVtbl", PrimitiveType::Address));
        let mut table = NativeType::new(&format!("{}Vtbl", name));
        table.entries = entries;
        self.with_type(object).with_type(table)
    }

    pub fn with_constant(mut self, name: &str, carrier: PrimitiveType, value: i64) -> Self {
        self.manifest.constants.push(NativeConstant::new(name, carrier, value));
        self
    }

    pub fn manifest(self) -> Manifest {
        self.manifest
    }

    pub fn build(self) -> BindingSet {
        BindingSet::from_manifest(self.manifest).expect("fixture manifest is consistent")
    }
}

pub fn int_pair(name: &str, first: &str, second: &str) -> GroupLayout {
    GroupLayout::new_struct(Some(name))
        .with_value(first, PrimitiveType::Int)
        .with_value(second, PrimitiveType::Int)
}

/// A table slot whose functional type takes the receiver plus `params`.
pub fn method_entry(name: &str, returns: TypeRef, params: &[(&str, TypeRef)]) -> TableEntry {
    let signature = params.iter().fold(
        Signature::apply(returns).with_param("x0", TypeRef::Primitive(PrimitiveType::Address)),
        |sig, (param, ty)| sig.with_param(param, ty.clone()),
    );
    TableEntry::functional(name, signature)
}
