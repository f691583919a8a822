// Tue Jan 25 2026 - Alex

use crate::binding::{BindingSet, NativeType};
use crate::config::Config;
use crate::denylist::Denylist;
use crate::error::{MapperError, Result};
use ahash::AHashSet;

/// An interface object type and its function table.
#[derive(Debug, Clone, Copy)]
pub struct InterfacePair<'a> {
    pub object: &'a NativeType,
    pub table: &'a NativeType,
}

/// Candidate split of a binding set, in declaration order.
#[derive(Debug, Default)]
pub struct Discovery<'a> {
    pub structs: Vec<&'a NativeType>,
    pub interfaces: Vec<InterfacePair<'a>>,
    pub denied: usize,
    pub holders: usize,
}

pub struct DiscoveryManager<'a> {
    bindings: &'a BindingSet,
    denylist: &'a Denylist,
    table_suffix: String,
    holder_prefix: String,
}

impl<'a> DiscoveryManager<'a> {
    pub fn new(bindings: &'a BindingSet, denylist: &'a Denylist, config: &Config) -> Self {
        Self {
            bindings,
            denylist,
            table_suffix: config.table_suffix.clone(),
            holder_prefix: config.constant_holder_prefix.clone(),
        }
    }

    fn object_name<'n>(&self, name: &'n str) -> Option<&'n str> {
        name.strip_suffix(self.table_suffix.as_str()).filter(|object| !object.is_empty())
    }

    /// Filters out denylisted and constant-holder types, pairs every table with
    /// its object type, and leaves the rest as struct candidates.
    pub fn discover(&self) -> Result<Discovery<'a>> {
        let mut discovery = Discovery::default();
        let mut kept = Vec::with_capacity(self.bindings.len());

        for native in self.bindings.types() {
            if native.name.starts_with(&self.holder_prefix) {
                log::debug!("Skipping constant holder {}", native.name);
                discovery.holders += 1;
            } else if self.denylist.contains(&native.name) {
                log::debug!("Skipping denylisted {}", native.name);
                discovery.denied += 1;
            } else {
                kept.push(native);
            }
        }

        let mut paired_objects: AHashSet<&str> = AHashSet::new();
        for &table in &kept {
            let Some(object) = self.object_name(&table.name) else {
                continue;
            };
            let object = self.bindings.get(object).ok_or_else(|| MapperError::MissingObject {
                table: table.name.clone(),
                object: object.to_string(),
            })?;
            paired_objects.insert(object.name.as_str());
            discovery.interfaces.push(InterfacePair { object, table });
        }

        discovery.structs = kept
            .into_iter()
            .filter(|native| self.object_name(&native.name).is_none())
            .filter(|native| !paired_objects.contains(native.name.as_str()))
            .collect();

        log::debug!(
            "Discovered {} struct candidates and {} interfaces ({} denylisted, {} constant holders)",
            discovery.structs.len(),
            discovery.interfaces.len(),
            discovery.denied,
            discovery.holders
        );
        Ok(discovery)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::testing::{int_pair, ManifestBuilder};

    fn names(types: &[&NativeType]) -> Vec<String> {
        types.iter().map(|n| n.name.clone()).collect()
    }

    #[test]
    fn test_discovery_split() {
        let bindings = ManifestBuilder::new("win32.pure")
            .with_struct("POINT", int_pair("tagPOINT", "x", "y"))
            .with_struct("constants$12", int_pair("c", "a", "b"))
            .with_struct("_MMIOINFO", int_pair("m", "a", "b"))
            .with_interface("IUnknown", Vec::new())
            .with_derived("LPPOINT", "POINT")
            .build();
        let denylist = Denylist::from_names("test", ["_MMIOINFO"]);
        let discovery = DiscoveryManager::new(&bindings, &denylist, &Config::default())
            .discover()
            .unwrap();

        assert_eq!(names(&discovery.structs), vec!["POINT", "LPPOINT"]);
        assert_eq!(discovery.interfaces.len(), 1);
        assert_eq!(discovery.interfaces[0].object.name, "IUnknown");
        assert_eq!(discovery.interfaces[0].table.name, "IUnknownVtbl");
        assert_eq!(discovery.denied, 1);
        assert_eq!(discovery.holders, 1);
    }

    #[test]
    fn test_orphan_table_is_fatal() {
        let bindings = ManifestBuilder::new("win32.pure")
            .with_type(NativeType::new("IGoneVtbl"))
            .build();
        let err = DiscoveryManager::new(&bindings, &Denylist::default(), &Config::default())
            .discover()
            .unwrap_err();
        assert!(matches!(err, MapperError::MissingObject { object, .. } if object == "IGone"));
    }
}
