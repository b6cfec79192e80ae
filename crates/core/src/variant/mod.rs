//! Product variant rows and multi-variant group synchronization.

pub mod group;
pub mod types;

pub use group::{GroupFieldEdit, GroupFields, GroupSyncError, VariantGroup};
pub use types::ProductVariantRow;
