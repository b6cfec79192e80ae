//! Per-country cost applicability and suppression.
//!
//! Two passes run before a cost module is offered to the admin:
//!
//! 1. A suppression pass: when any variant row is a same-location match for
//!    the country, cross-location charges are categorically irrelevant.
//!    Whole groups containing a same-location-charge or express-delivery
//!    member are removed, along with ungrouped express-delivery costs.
//! 2. A per-cost applicability check over the survivors.

use listra_shared::types::Country;

use crate::cost::types::CostModule;
use crate::variant::types::ProductVariantRow;

/// True if any variant row is a same-location match for the country:
/// its current location equals the country's code and the row delivers
/// to that country.
#[must_use]
pub fn same_location_applies(country: Country, rows: &[ProductVariantRow]) -> bool {
    rows.iter().any(|row| row.is_same_location_match(country))
}

/// Per-cost applicability for a country.
///
/// - Express-delivery costs apply iff at least one row ships between
///   different locations (a row with no current location never counts).
/// - Same-location charges apply iff at least one row is a same-location
///   match for the country.
/// - Every other cost always applies.
#[must_use]
pub fn is_applicable(cost: &CostModule, country: Country, rows: &[ProductVariantRow]) -> bool {
    if cost.is_express_delivery {
        return rows.iter().any(|row| row.ships_cross_location(country));
    }
    if cost.is_same_location_charge {
        return same_location_applies(country, rows);
    }
    true
}

/// Returns the cost modules offered to the admin for a country.
///
/// Runs the suppression pass first, then filters the survivors through
/// [`is_applicable`]. Suppression removes whole groups: sharing a group
/// with a same-location-charge or express-delivery cost is enough to be
/// withdrawn, regardless of the member's own applicability.
#[must_use]
pub fn offered_costs<'a>(
    costs: &'a [CostModule],
    country: Country,
    rows: &[ProductVariantRow],
) -> Vec<&'a CostModule> {
    let suppress_cross_location = same_location_applies(country, rows);

    let suppressed_groups: Vec<_> = if suppress_cross_location {
        costs
            .iter()
            .filter(|cost| cost.is_same_location_charge || cost.is_express_delivery)
            .filter_map(|cost| cost.group_id.clone())
            .collect()
    } else {
        Vec::new()
    };

    costs
        .iter()
        .filter(|cost| {
            if !suppress_cross_location {
                return true;
            }
            if let Some(group_id) = &cost.group_id {
                !suppressed_groups.contains(group_id)
            } else {
                !cost.is_express_delivery
            }
        })
        .filter(|cost| is_applicable(cost, country, rows))
        .collect()
}
