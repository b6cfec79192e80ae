//! Structural validation of the selection state.
//!
//! Runs immediately before a calculation request; nothing goes over the
//! wire unless this passes.

use std::collections::BTreeSet;

use crate::calculation::error::SelectionError;
use crate::cost::selection::CostSelectionState;
use crate::margin::MarginSelection;

/// Validates the margin and cost selection, short-circuiting on the first
/// failure.
///
/// Checks, in order:
/// 1. A margin selection must be present.
/// 2. Dependent margins (brand, product category, condition category)
///    require the seller-category margin.
/// 3. No cost id may appear in more than one country's selection.
///
/// Within-country duplicates and malformed selection shapes cannot occur:
/// the state is a typed per-country id set.
pub fn validate_selection(
    margins: Option<&MarginSelection>,
    costs: &CostSelectionState,
) -> Result<(), SelectionError> {
    let margins = margins.ok_or(SelectionError::MissingMarginSelection)?;

    if margins.has_orphaned_dependents() {
        return Err(SelectionError::DependentMarginsWithoutSeller);
    }

    let mut seen = BTreeSet::new();
    for (_, selected) in costs.iter() {
        for id in selected {
            if !seen.insert(*id) {
                return Err(SelectionError::DuplicateCostIds(*id));
            }
        }
    }

    Ok(())
}
