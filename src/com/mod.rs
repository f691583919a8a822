// Tue Jan 24 2026 - Alex

pub mod identity;
pub mod synthesizer;
pub mod wrapper;

pub use identity::IidPolicy;
pub use synthesizer::ComSynthesizer;
pub use wrapper::{ComMethod, ComWrapper};
