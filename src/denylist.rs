// Tue Jan 21 2026 - Alex

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Native types the binding generator is known to get wrong. Membership tracks
/// upstream generator releases, hence the version tag.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Denylist {
    pub version: String,
    pub types: IndexSet<String>,
}

#[derive(Error, Debug)]
pub enum DenylistError {
    #[error("failed to read denylist {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse denylist: {0}")]
    Parse(#[from] serde_json::Error),
}

impl Denylist {
    pub fn from_names<I, S>(version: &str, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            version: version.to_string(),
            types: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DenylistError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| DenylistError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let denylist: Denylist = serde_json::from_str(&contents)?;
        log::debug!("Denylist {} excludes {} types", denylist.version, denylist.types.len());
        Ok(denylist)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_denylist() {
        let denylist: Denylist =
            serde_json::from_str(r#"{"version": "2021.10", "types": ["_MMIOINFO", "midihdr_tag"]}"#).unwrap();
        assert_eq!(denylist.len(), 2);
        assert!(denylist.contains("midihdr_tag"));
        assert!(!denylist.contains("tagPOINT"));
    }

    #[test]
    fn test_shipped_denylist_parses() {
        let contents = include_str!("../data/denylist.json");
        let denylist: Denylist = serde_json::from_str(contents).unwrap();
        assert!(denylist.contains("tagBITMAPFILEHEADER"));
        assert!(!denylist.version.is_empty());
    }
}
