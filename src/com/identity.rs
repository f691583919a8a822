// Tue Jan 24 2026 - Alex

use crate::config::Config;
use indexmap::{IndexMap, IndexSet};

/// Decides whether an interface gets a static identifier accessor and which
/// holder symbol that accessor reads.
///
/// The binding generator publishes identifiers as `IID_<name>`, with a few
/// irregular inputs under a different prefix. Those are listed here rather
/// than corrected.
#[derive(Debug, Clone, Default)]
pub struct IidPolicy {
    excluded: IndexSet<String>,
    prefixes: IndexMap<String, String>,
}

impl IidPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &Config) -> Self {
        let policy = config
            .iid_excluded
            .iter()
            .fold(Self::new(), |policy, object| policy.with_excluded(object));
        config
            .iid_prefixes
            .iter()
            .fold(policy, |policy, (object, prefix)| policy.with_prefix(object, prefix))
    }

    pub fn with_excluded(mut self, object: &str) -> Self {
        self.excluded.insert(object.to_string());
        self
    }

    pub fn with_prefix(mut self, object: &str, prefix: &str) -> Self {
        self.prefixes.insert(object.to_string(), prefix.to_string());
        self
    }

    pub fn is_excluded(&self, object: &str) -> bool {
        self.excluded.contains(object)
    }

    /// Holder accessor for `object`'s identifier, or `None` when the type has
    /// no registered identifier.
    pub fn accessor(&self, object: &str) -> Option<String> {
        if self.is_excluded(object) {
            return None;
        }
        let prefix = self.prefixes.get(object).map(String::as_str).unwrap_or("");
        Some(format!("{}IID_{}$SEGMENT", prefix, object))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_exceptions() {
        let policy = IidPolicy::from_config(&Config::default());
        assert_eq!(policy.accessor("IUnknown").as_deref(), Some("IID_IUnknown$SEGMENT"));
        assert_eq!(
            policy.accessor("XMLDOMDocumentEvents").as_deref(),
            Some("DIID_XMLDOMDocumentEvents$SEGMENT")
        );
        assert_eq!(policy.accessor("ID3DInclude"), None);
    }

    #[test]
    fn test_builder_exceptions() {
        let policy = IidPolicy::new().with_excluded("IFoo").with_prefix("IBar", "CL");
        assert!(policy.is_excluded("IFoo"));
        assert_eq!(policy.accessor("IBar").as_deref(), Some("CLIID_IBar$SEGMENT"));
    }
}
