//! Property-based tests for cost selection semantics.

use std::collections::BTreeSet;

use proptest::prelude::*;
use rust_decimal::Decimal;

use listra_shared::types::{CostGroupId, CostModuleId, Country};

use super::selection::CostSelectionState;
use super::types::{CostField, CostModule, CostType, CostUnit};

/// A fixed universe exercising every selection rule: two groups (one with
/// an express member), a standalone express cost, and a plain cost.
fn universe() -> Vec<CostModule> {
    let cost = |name: &str, group: Option<&str>, express: bool| CostModule {
        id: CostModuleId::new(),
        name: name.into(),
        cost_type: CostType::Fixed,
        cost_field: CostField::Delivery,
        cost_unit: CostUnit::OrderAmount,
        value: Decimal::TEN,
        min_value: None,
        max_value: None,
        group_id: group.map(CostGroupId::new),
        is_express_delivery: express,
        is_same_location_charge: false,
    };

    vec![
        cost("Express bundle", Some("fast"), true),
        cost("Priority handling", Some("fast"), false),
        cost("Packing", Some("bundle"), false),
        cost("Insurance", Some("bundle"), false),
        cost("Standalone express", None, true),
        cost("Handling", None, false),
    ]
}

fn selected_set(state: &CostSelectionState, costs: &[CostModule]) -> BTreeSet<CostModuleId> {
    costs
        .iter()
        .filter(|c| state.is_selected(Country::Hongkong, c.id))
        .map(|c| c.id)
        .collect()
}

/// Strategy: a sequence of toggle targets (indices into the universe).
fn toggle_sequence() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0usize..6, 0..24)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Group members are always selected all-or-none, whatever the toggle
    /// history.
    #[test]
    fn prop_group_members_are_all_or_none(sequence in toggle_sequence()) {
        let costs = universe();
        let mut state = CostSelectionState::new();

        for index in sequence {
            state.toggle(Country::Hongkong, &costs[index], &costs);

            for group in ["fast", "bundle"] {
                let group_id = CostGroupId::new(group);
                let members: Vec<_> = costs.iter().filter(|c| c.in_group(&group_id)).collect();
                let selected = members
                    .iter()
                    .filter(|c| state.is_selected(Country::Hongkong, c.id))
                    .count();
                prop_assert!(
                    selected == 0 || selected == members.len(),
                    "group {} is partially selected ({}/{})",
                    group, selected, members.len()
                );
            }
        }
    }

    /// Never more than one express-delivery cost selected per country.
    #[test]
    fn prop_at_most_one_express_selected(sequence in toggle_sequence()) {
        let costs = universe();
        let mut state = CostSelectionState::new();

        for index in sequence {
            state.toggle(Country::Hongkong, &costs[index], &costs);

            let express_selected = costs
                .iter()
                .filter(|c| c.is_express_delivery && state.is_selected(Country::Hongkong, c.id))
                .count();
            prop_assert!(express_selected <= 1);
        }
    }

    /// Toggling the same cost twice in a row restores the previous set.
    #[test]
    fn prop_double_toggle_is_identity(
        sequence in toggle_sequence(),
        target in 0usize..6,
    ) {
        let costs = universe();
        let mut state = CostSelectionState::new();
        for index in sequence {
            state.toggle(Country::Hongkong, &costs[index], &costs);
        }

        let before = selected_set(&state, &costs);
        state.toggle(Country::Hongkong, &costs[target], &costs);
        state.toggle(Country::Hongkong, &costs[target], &costs);
        let after = selected_set(&state, &costs);

        // Toggling a non-express cost twice always restores the set. An
        // express target may have evicted another express cost on the way
        // in, which legitimately does not come back.
        if !costs[target].is_express_delivery
            && !costs
                .iter()
                .any(|c| c.is_express_delivery && before.contains(&c.id))
        {
            prop_assert_eq!(before, after);
        }
    }
}
