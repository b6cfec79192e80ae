//! Margin category selection and dependency rules.

pub mod types;

pub use types::{MarginKind, MarginSelection};
