// Tue Jan 22 2026 - Alex

use crate::model::WrapperType;
use crate::resolver::{BaseId, BaseImplementation, StructEntry};
use crate::structure::{GroupLayout, StructureComparator};
use ahash::{AHashMap, AHashSet};
use indexmap::IndexMap;

/// Registry of resolved struct types, threaded through the resolution passes.
///
/// Mutated by one thread only while passes 1 and 2 run; read concurrently
/// afterwards.
#[derive(Debug, Default)]
pub struct ResolverContext {
    entries: IndexMap<String, StructEntry>,
    bases: Vec<BaseImplementation>,
    buckets: AHashMap<u64, Vec<BaseId>>,
    excluded: AHashSet<String>,
    comparator: StructureComparator,
}

impl ResolverContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn comparator(&self) -> &StructureComparator {
        &self.comparator
    }

    /// Earliest-created base whose layout is structurally equal to `layout`.
    pub fn find_equal(&self, layout: &GroupLayout) -> Option<BaseId> {
        let fingerprint = self.comparator.fingerprint(layout);
        let candidates = self.buckets.get(&fingerprint)?;
        candidates.iter().copied().find(|id| {
            let base = &self.bases[id.0];
            let equal = self.comparator.shape_eq(&base.layout, layout);
            if !equal {
                log::trace!("Fingerprint collision with {}", base.native);
            }
            equal
        })
    }

    pub fn register_base(&mut self, native: &str, layout: &GroupLayout, model: WrapperType) -> BaseId {
        let id = BaseId(self.bases.len());
        let fingerprint = self.comparator.fingerprint(layout);
        self.bases.push(BaseImplementation {
            id,
            native: native.to_string(),
            layout: layout.clone(),
            fingerprint,
            model,
        });
        self.buckets.entry(fingerprint).or_default().push(id);
        self.entries.insert(native.to_string(), StructEntry::Base(id));
        id
    }

    pub fn register_alias(&mut self, native: &str, target: BaseId, via: &str) {
        self.entries.insert(
            native.to_string(),
            StructEntry::Alias {
                target,
                via: via.to_string(),
            },
        );
    }

    pub fn exclude(&mut self, native: &str) {
        self.excluded.insert(native.to_string());
    }

    pub fn is_excluded(&self, native: &str) -> bool {
        self.excluded.contains(native)
    }

    pub fn is_resolved(&self, native: &str) -> bool {
        self.entries.contains_key(native)
    }

    pub fn entry(&self, native: &str) -> Option<&StructEntry> {
        self.entries.get(native)
    }

    pub fn base_of(&self, native: &str) -> Option<BaseId> {
        self.entries.get(native).map(StructEntry::base_id)
    }

    pub fn base(&self, id: BaseId) -> &BaseImplementation {
        &self.bases[id.0]
    }

    pub fn bases(&self) -> &[BaseImplementation] {
        &self.bases
    }

    pub fn bases_mut(&mut self) -> &mut [BaseImplementation] {
        &mut self.bases
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &StructEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn struct_count(&self) -> usize {
        self.entries.len()
    }

    pub fn base_count(&self) -> usize {
        self.bases.len()
    }

    pub fn alias_count(&self) -> usize {
        self.entries.len() - self.bases.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Modifiers;
    use crate::structure::PrimitiveType;

    fn single_int(name: &str) -> GroupLayout {
        GroupLayout::new_struct(Some(name)).with_value("v", PrimitiveType::Int)
    }

    #[test]
    fn test_first_registered_base_wins() {
        let mut ctx = ResolverContext::new();
        let a = ctx.register_base("A", &single_int("A"), WrapperType::new("p", "A", Modifiers::public()));
        assert_eq!(ctx.find_equal(&single_int("B")), Some(a));

        ctx.register_alias("B", a, "A");
        assert_eq!(ctx.base_of("B"), Some(a));
        assert_eq!(ctx.struct_count(), 2);
        assert_eq!(ctx.base_count(), 1);
        assert_eq!(ctx.alias_count(), 1);
    }

    #[test]
    fn test_different_shape_not_found() {
        let mut ctx = ResolverContext::new();
        ctx.register_base("A", &single_int("A"), WrapperType::new("p", "A", Modifiers::public()));
        let other = GroupLayout::new_struct(None).with_value("v", PrimitiveType::Long);
        assert_eq!(ctx.find_equal(&other), None);
    }
}
