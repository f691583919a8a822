// Tue Jan 13 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("layout of {name} failed to initialize: {reason}")]
    Broken { name: String, reason: String },
    #[error("group {group} declares {declared} bytes but its members span {computed}")]
    SizeMismatch { group: String, declared: u64, computed: u64 },
    #[error("group {0} has no members")]
    EmptyGroup(String),
    #[error("sequence {0} has no elements")]
    EmptySequence(String),
    #[error("group {0} is too large to address")]
    SizeOverflow(String),
}
