//! Reconciliation of calculation results against the admin's selection.
//!
//! The calculation service may attach margins or costs the admin never
//! selected (it has business rules of its own). Reconciliation keeps
//! exactly the selected lines, records a warning for everything else, and
//! never touches the numeric fields of a kept line.

use tracing::warn;

use listra_shared::types::Country;

use crate::calculation::error::CalculationError;
use crate::calculation::types::{
    CalculationResponse, CostLine, CountryDeliverable, MarginLine, RawDeliverable,
};
use crate::cost::selection::CostSelectionState;
use crate::margin::{MarginKind, MarginSelection};

/// A line the service returned that the admin did not select.
///
/// Non-blocking: the calculation proceeds with the filtered result.
#[derive(Debug, Clone, PartialEq)]
pub enum UnselectedLine {
    /// An unselected margin line.
    Margin(MarginKind),
    /// An unselected (or unidentifiable) cost line.
    Cost(CostLine),
}

/// Warning recorded for every dropped line.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconciliationWarning {
    /// Index of the product row the line arrived on.
    pub row_index: usize,
    /// Country of the deliverable carrying the line.
    pub country: Country,
    /// The dropped line.
    pub line: UnselectedLine,
}

/// Reconciles a full calculation response.
///
/// Returns one `CountryDeliverable` list per product row, order-aligned
/// with the request, plus the warnings for every dropped line. The result
/// replaces any previously stored deliverables for the rows.
///
/// # Errors
///
/// Returns `CalculationError::MalformedResponse` if a deliverable names an
/// unknown country.
pub fn reconcile_response(
    response: CalculationResponse,
    margins: &MarginSelection,
    costs: &CostSelectionState,
) -> Result<(Vec<Vec<CountryDeliverable>>, Vec<ReconciliationWarning>), CalculationError> {
    let mut deliverables = Vec::with_capacity(response.0.len());
    let mut warnings = Vec::new();

    for (row_index, result) in response.0.into_iter().enumerate() {
        let mut row_deliverables = Vec::with_capacity(result.country_deliverables.len());
        for raw in result.country_deliverables {
            row_deliverables.push(reconcile_deliverable(
                row_index,
                raw,
                margins,
                costs,
                &mut warnings,
            )?);
        }
        deliverables.push(row_deliverables);
    }

    Ok((deliverables, warnings))
}

fn reconcile_deliverable(
    row_index: usize,
    raw: RawDeliverable,
    margins: &MarginSelection,
    costs: &CostSelectionState,
    warnings: &mut Vec<ReconciliationWarning>,
) -> Result<CountryDeliverable, CalculationError> {
    let country: Country = raw
        .country
        .parse()
        .map_err(|err| CalculationError::MalformedResponse(format!("{err}")))?;

    let mut kept_margins = Vec::new();
    for line in raw.margins {
        if margins.is_selected(line.margin_type) {
            kept_margins.push(line);
        } else {
            warn_dropped_margin(row_index, country, &line);
            warnings.push(ReconciliationWarning {
                row_index,
                country,
                line: UnselectedLine::Margin(line.margin_type),
            });
        }
    }

    // The service spells cost lines as `costs`, `charges`, or both.
    let mut kept_costs = Vec::new();
    for line in raw.costs.into_iter().chain(raw.charges) {
        let selected = line
            .effective_id()
            .is_some_and(|id| costs.is_selected(country, id));
        if selected {
            kept_costs.push(line);
        } else {
            warn_dropped_cost(row_index, country, &line);
            warnings.push(ReconciliationWarning {
                row_index,
                country,
                line: UnselectedLine::Cost(line),
            });
        }
    }

    Ok(CountryDeliverable {
        country,
        currency: raw.currency,
        base_price: raw.base_price,
        calculated_price: raw.calculated_price,
        exchange_rate: raw.exchange_rate,
        margins: kept_margins,
        costs: kept_costs,
    })
}

fn warn_dropped_margin(row_index: usize, country: Country, line: &MarginLine) {
    warn!(
        row_index,
        country = %country,
        margin = ?line.margin_type,
        "calculation returned an unselected margin line; dropping it"
    );
}

fn warn_dropped_cost(row_index: usize, country: Country, line: &CostLine) {
    warn!(
        row_index,
        country = %country,
        cost_id = ?line.effective_id(),
        cost_name = line.name.as_deref().unwrap_or(""),
        "calculation returned an unselected cost line; dropping it"
    );
}
