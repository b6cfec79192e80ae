//! Cost modules, applicability filtering, and selection state.

pub mod applicability;
pub mod error;
pub mod selection;
pub mod types;

#[cfg(test)]
mod props;

pub use applicability::{is_applicable, offered_costs, same_location_applies};
pub use error::CostModuleError;
pub use selection::{CostSelectionState, SelectionStateError};
pub use types::{CostField, CostModule, CostModuleInput, CostType, CostUnit};
