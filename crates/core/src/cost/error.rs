//! Cost module error types.

use thiserror::Error;

use crate::cost::types::{CostField, CostUnit};

/// Errors raised when constructing a cost module.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CostModuleError {
    /// The cost unit does not belong to the cost field.
    #[error("Cost unit {unit} is not valid for cost field {field}")]
    UnitMismatch {
        /// The cost field.
        field: CostField,
        /// The offending unit.
        unit: CostUnit,
    },

    /// The cost value must be zero or positive.
    #[error("Cost value cannot be negative")]
    NegativeValue,

    /// The clamp bounds are inverted.
    #[error("Minimum value cannot exceed maximum value")]
    InvalidBounds,
}
