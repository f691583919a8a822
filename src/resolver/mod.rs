// Tue Jan 22 2026 - Alex

pub mod context;
pub mod entry;
pub mod passes;
pub mod synthesizer;

pub use context::ResolverContext;
pub use entry::{BaseId, BaseImplementation, StructEntry};
pub use passes::{PassSummary, StructResolver};
pub use synthesizer::StructSynthesizer;
