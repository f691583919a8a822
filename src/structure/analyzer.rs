// Tue Jan 13 2026 - Alex

use crate::binding::{LayoutSource, NativeType};
use crate::structure::{GroupLayout, LayoutError};

/// Queries the memory layout of a native type.
///
/// `Ok(None)` means the type has no direct representation (marker and base
/// types); an error means the type exists but its layout cannot be used.
pub fn layout_of(native: &NativeType) -> Result<Option<&GroupLayout>, LayoutError> {
    match native.layout_source() {
        LayoutSource::Absent => Ok(None),
        LayoutSource::Broken(reason) => Err(LayoutError::Broken {
            name: native.name.clone(),
            reason: reason.to_string(),
        }),
        LayoutSource::Declared(layout) => {
            layout.validate()?;
            Ok(Some(layout))
        }
    }
}
