// Tue Jan 20 2026 - Alex

pub mod descriptor;
pub mod error;
pub mod manifest;

pub use descriptor::{EntryCarrier, LayoutSource, NativeConstant, NativeType, Signature, TableEntry};
pub use error::BindingError;
pub use manifest::{BindingSet, Manifest};
