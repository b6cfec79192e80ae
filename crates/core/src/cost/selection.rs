//! Per-country cost selection state.
//!
//! The selection wizard keeps one set of selected cost-module ids per
//! country. Set semantics are structural: an id can never appear twice for
//! one country, and cross-country duplication is rejected when re-seeding
//! from a persisted selection.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use listra_shared::types::{CostGroupId, CostModuleId, Country};

use crate::cost::types::CostModule;

/// Error raised when merging persisted selections into the state.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionStateError {
    /// The same cost id was selected for more than one country.
    #[error("Cost module {0} is selected for more than one country")]
    CrossCountryDuplicate(CostModuleId),
}

/// Mapping from country to the set of selected cost-module ids.
///
/// Local to one wizard session; discarded without side effects when the
/// wizard closes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostSelectionState {
    selected: BTreeMap<Country, BTreeSet<CostModuleId>>,
}

impl CostSelectionState {
    /// Creates an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-seeds the state from a persisted selection (editing an existing
    /// listing).
    ///
    /// # Errors
    ///
    /// Returns an error if any cost id appears under more than one country.
    pub fn from_saved(
        saved: BTreeMap<Country, Vec<CostModuleId>>,
    ) -> Result<Self, SelectionStateError> {
        let mut seen = BTreeSet::new();
        let mut selected: BTreeMap<Country, BTreeSet<CostModuleId>> = BTreeMap::new();

        for (country, ids) in saved {
            let set = selected.entry(country).or_default();
            for id in ids {
                if !seen.insert(id) && !set.contains(&id) {
                    return Err(SelectionStateError::CrossCountryDuplicate(id));
                }
                set.insert(id);
            }
        }

        Ok(Self { selected })
    }

    /// True if the cost is selected for the country.
    #[must_use]
    pub fn is_selected(&self, country: Country, id: CostModuleId) -> bool {
        self.selected
            .get(&country)
            .is_some_and(|set| set.contains(&id))
    }

    /// The selected ids for a country, in id order.
    pub fn selected_for(&self, country: Country) -> impl Iterator<Item = CostModuleId> + '_ {
        self.selected
            .get(&country)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// Number of selected costs for a country.
    #[must_use]
    pub fn count_for(&self, country: Country) -> usize {
        self.selected.get(&country).map_or(0, BTreeSet::len)
    }

    /// Iterates over all `(country, selected set)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Country, &BTreeSet<CostModuleId>)> {
        self.selected.iter().map(|(country, set)| (*country, set))
    }

    /// The selection as plain id lists keyed by country name, for the
    /// calculation request payload.
    #[must_use]
    pub fn to_request_map(&self) -> BTreeMap<String, Vec<CostModuleId>> {
        self.selected
            .iter()
            .map(|(country, set)| (country.name().to_string(), set.iter().copied().collect()))
            .collect()
    }

    /// Toggles a cost for a country.
    ///
    /// Rules are evaluated against the country's *full* cost-module list,
    /// not the filtered/offered one:
    ///
    /// - Grouped cost: if every group member is selected, the whole group
    ///   is deselected; otherwise the whole group is selected. Adding a
    ///   group containing an express-delivery member evicts every other
    ///   express-delivery cost for the country (a grouped one takes its
    ///   whole group with it, keeping groups atomic).
    /// - Ungrouped cost: plain membership toggle, with the same
    ///   single-express eviction when adding an express-delivery cost.
    ///
    /// At most one express-delivery cost is ever selected per country.
    pub fn toggle(&mut self, country: Country, cost: &CostModule, country_costs: &[CostModule]) {
        let set = self.selected.entry(country).or_default();

        if let Some(group_id) = &cost.group_id {
            let members: Vec<CostModuleId> = country_costs
                .iter()
                .filter(|c| c.in_group(group_id))
                .map(|c| c.id)
                .collect();
            let all_selected = members.iter().all(|id| set.contains(id));

            if all_selected {
                for id in &members {
                    set.remove(id);
                }
            } else {
                let group_has_express = country_costs
                    .iter()
                    .any(|c| c.in_group(group_id) && c.is_express_delivery);
                if group_has_express {
                    evict_other_express(set, country_costs, Some(group_id), None);
                }
                set.extend(members);
            }
        } else if !set.remove(&cost.id) {
            if cost.is_express_delivery {
                evict_other_express(set, country_costs, None, Some(cost.id));
            }
            set.insert(cost.id);
        }
    }
}

/// Removes every selected express-delivery cost except the one being added
/// (identified by its group or its id). Evicting a grouped express cost
/// removes its whole group so that no group member is ever left selected
/// alone.
fn evict_other_express(
    set: &mut BTreeSet<CostModuleId>,
    country_costs: &[CostModule],
    keep_group: Option<&CostGroupId>,
    keep_id: Option<CostModuleId>,
) {
    for cost in country_costs {
        if !cost.is_express_delivery {
            continue;
        }
        if keep_group.is_some() && cost.group_id.as_ref() == keep_group {
            continue;
        }
        if keep_id == Some(cost.id) {
            continue;
        }

        if let Some(group_id) = &cost.group_id {
            for member in country_costs.iter().filter(|c| c.in_group(group_id)) {
                set.remove(&member.id);
            }
        } else {
            set.remove(&cost.id);
        }
    }
}
