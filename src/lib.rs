// Tue Jan 15 2026 - Alex

pub mod binding;
pub mod com;
pub mod config;
pub mod constants;
pub mod denylist;
pub mod diagnostics;
pub mod error;
pub mod model;
pub mod orchestration;
pub mod output;
pub mod resolver;
pub mod structure;
pub mod utils;

pub use binding::BindingSet;
pub use config::Config;
pub use denylist::Denylist;
pub use error::MapperError;
pub use orchestration::{Pipeline, PipelineReport};
pub use output::Emitter;
