// Tue Jan 15 2026 - Alex

pub mod analyzer;
pub mod comparison;
pub mod error;
pub mod field;
pub mod layout;
pub mod type_info;

pub use analyzer::layout_of;
pub use comparison::{ShapeDifference, StructureComparator};
pub use error::LayoutError;
pub use field::Field;
pub use layout::{GroupKind, GroupLayout, LayoutMember};
pub use type_info::PrimitiveType;
