// Tue Jan 24 2026 - Alex

use crate::binding::NativeConstant;
use crate::config::{Config, ConfigError};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::model::{Constructor, Expr, Modifiers, TypeRef, WrapperField, WrapperType};
use crate::structure::PrimitiveType;
use indexmap::map::Entry;
use indexmap::IndexMap;
use itertools::Itertools;
use regex::Regex;

/// Collects matching integer constants into a single lookup type.
pub struct ConstantAggregator {
    pattern: Regex,
    package: String,
    type_name: String,
}

impl ConstantAggregator {
    pub fn new(pattern: &str, package: &str, type_name: &str) -> Result<Self, ConfigError> {
        let pattern = Regex::new(pattern)
            .map_err(|e| ConfigError::Invalid(format!("constant_pattern {:?}: {}", pattern, e)))?;
        Ok(Self {
            pattern,
            package: package.to_string(),
            type_name: type_name.to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Self::new(&config.constant_pattern, &config.constants_package, &config.constants_type)
    }

    pub fn matches(&self, constant: &NativeConstant) -> bool {
        constant.carrier == PrimitiveType::Int && self.pattern.is_match(&constant.name)
    }

    /// Builds the lookup type. Fields are sorted by name; a repeated name keeps
    /// its first value.
    pub fn aggregate(&self, constants: &[NativeConstant], diagnostics: &Diagnostics) -> WrapperType {
        let mut values: IndexMap<&str, i32> = IndexMap::new();
        for constant in constants.iter().filter(|c| self.matches(c)) {
            let Ok(value) = i32::try_from(constant.value) else {
                diagnostics.report(
                    DiagnosticKind::ConstantOutOfRange,
                    &constant.name,
                    format!("value {} does not fit in int", constant.value),
                );
                continue;
            };
            match values.entry(constant.name.as_str()) {
                Entry::Vacant(slot) => {
                    slot.insert(value);
                }
                Entry::Occupied(slot) if *slot.get() != value => {
                    diagnostics.report(
                        DiagnosticKind::ConflictingConstant,
                        &constant.name,
                        format!("value {} ignored, keeping {}", constant.value, slot.get()),
                    );
                }
                Entry::Occupied(_) => {}
            }
        }

        let mut model = WrapperType::new(&self.package, &self.type_name, Modifiers::public().with_final());
        let int = TypeRef::Primitive(PrimitiveType::Int);
        for (name, value) in values.into_iter().sorted_by(|a, b| a.0.cmp(b.0)) {
            let field = WrapperField::new(name, int.clone(), Modifiers::public().with_static().with_final())
                .with_initializer(Expr::cast(int.clone(), Expr::literal(value)));
            if let Err(e) = model.add_field(field) {
                diagnostics.report(DiagnosticKind::MemberConflict, &self.type_name, e.to_string());
            }
        }
        // Lookup type only; never instantiated.
        let _ = model.set_constructor(Constructor::new(Modifiers::private()));

        log::debug!("{} collects {} constants", self.type_name, model.fields.len());
        model
    }
}
