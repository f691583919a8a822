// Tue Jan 13 2026 - Alex

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Source,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub manifest: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub denylist: PathBuf,
    pub output_format: OutputFormat,
    pub struct_package: String,
    pub com_package: String,
    pub constants_package: String,
    pub constants_type: String,
    /// Constants whose name matches this pattern are aggregated.
    pub constant_pattern: String,
    /// Suffix that marks an interface table type.
    pub table_suffix: String,
    /// Prefix of generator-internal constant holder types.
    pub constant_holder_prefix: String,
    pub com_wrapper_suffix: String,
    /// Member of an interface object that holds the table pointer.
    pub table_pointer_member: String,
    /// Interface types that get no identifier accessor.
    pub iid_excluded: Vec<String>,
    /// Identifier prefixes for types whose identifier is exported under a
    /// different name than `IID_<type>`.
    pub iid_prefixes: IndexMap<String, String>,
    pub max_threads: usize,
    pub pretty_json: bool,
    pub enable_progress_bars: bool,
    pub enable_verbose_output: bool,
    pub dry_run: bool,
}

impl Default for Config {
    fn default() -> Self {
        let mut iid_prefixes = IndexMap::new();
        iid_prefixes.insert("XMLDOMDocumentEvents".to_string(), "D".to_string());

        Self {
            manifest: None,
            output_dir: PathBuf::from("generated"),
            denylist: PathBuf::from("data/denylist.json"),
            output_format: OutputFormat::Source,
            struct_package: "win32.mapped.struct".to_string(),
            com_package: "win32.mapped.com".to_string(),
            constants_package: "win32.mapped".to_string(),
            constants_type: "WindowMessages".to_string(),
            constant_pattern: "^WM_".to_string(),
            table_suffix: "Vtbl".to_string(),
            constant_holder_prefix: "constants$".to_string(),
            com_wrapper_suffix: "_J".to_string(),
            table_pointer_member: "lpVtbl".to_string(),
            iid_excluded: vec!["ID3DInclude".to_string()],
            iid_prefixes,
            max_threads: num_cpus::get(),
            pretty_json: true,
            enable_progress_bars: true,
            enable_verbose_output: false,
            dry_run: false,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_manifest(mut self, manifest: PathBuf) -> Self {
        self.manifest = Some(manifest);
        self
    }

    pub fn with_output_dir(mut self, output_dir: PathBuf) -> Self {
        self.output_dir = output_dir;
        self
    }

    pub fn with_denylist(mut self, denylist: PathBuf) -> Self {
        self.denylist = denylist;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.max_threads = threads;
        self
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if !ext.eq_ignore_ascii_case("json") {
            return Err(ConfigError::UnsupportedFormat(ext.to_string()));
        }

        let contents = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&contents)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_threads == 0 {
            return Err(ConfigError::Invalid("max_threads must be greater than 0".to_string()));
        }
        if self.table_suffix.is_empty() {
            return Err(ConfigError::Invalid("table_suffix must not be empty".to_string()));
        }
        if self.struct_package == self.com_package {
            return Err(ConfigError::Invalid(
                "struct_package and com_package must differ".to_string(),
            ));
        }
        if regex::Regex::new(&self.constant_pattern).is_err() {
            return Err(ConfigError::Invalid(format!(
                "constant_pattern {:?} is not a valid regular expression",
                self.constant_pattern
            )));
        }
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file not found: {0:?}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unsupported config format: {0:?}")]
    UnsupportedFormat(String),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
