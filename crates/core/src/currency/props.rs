//! Property-based tests for the price-triplet solver.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::triangle::{solve, PriceField, PriceTriplet};

/// Strategy to generate positive price amounts (0.01 to 1,000,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate positive exchange rates (0.0001 to 10000.0000).
fn positive_rate() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

/// Strategy to pick one of the three price fields.
fn any_field() -> impl Strategy<Value = PriceField> {
    prop_oneof![
        Just(PriceField::Amount),
        Just(PriceField::Rate),
        Just(PriceField::Local),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// After editing the amount with a rate present, the derived local
    /// satisfies `amount * rate ≈ local` within 0.01 absolute tolerance.
    #[test]
    fn prop_forward_derivation_is_consistent(
        amount in positive_amount(),
        rate in positive_rate(),
    ) {
        let result = solve(
            PriceTriplet { amount: Some(amount), rate: Some(rate), local: None },
            PriceField::Amount,
        );
        let local = result.local.expect("local should be derived");
        let diff = (amount * rate - local).abs();
        prop_assert!(
            diff <= Decimal::new(1, 2),
            "amount {} * rate {} = {} but local is {}",
            amount, rate, amount * rate, local
        );
    }

    /// After editing local with a rate present, the derived amount
    /// satisfies `amount * rate ≈ local` within 0.01 tolerance scaled by
    /// the rate (the rounding error on the amount is at most half a cent).
    #[test]
    fn prop_backward_derivation_is_consistent(
        local in positive_amount(),
        rate in positive_rate(),
    ) {
        let result = solve(
            PriceTriplet { amount: None, rate: Some(rate), local: Some(local) },
            PriceField::Local,
        );
        let amount = result.amount.expect("amount should be derived");
        let diff = (local / rate - amount).abs();
        prop_assert!(diff <= Decimal::new(1, 2));
    }

    /// The edited slot is never overwritten, whatever the triplet state.
    #[test]
    fn prop_edited_slot_is_preserved(
        amount in proptest::option::of(positive_amount()),
        rate in proptest::option::of(positive_rate()),
        local in proptest::option::of(positive_amount()),
        edited in any_field(),
    ) {
        let input = PriceTriplet { amount, rate, local };
        let result = solve(input, edited);
        prop_assert_eq!(result.get(edited), input.get(edited));
    }

    /// Solving is deterministic.
    #[test]
    fn prop_solve_is_deterministic(
        amount in positive_amount(),
        rate in positive_rate(),
        edited in any_field(),
    ) {
        let input = PriceTriplet { amount: Some(amount), rate: Some(rate), local: None };
        prop_assert_eq!(solve(input, edited), solve(input, edited));
    }

    /// With fewer than two populated slots the solver is a no-op.
    #[test]
    fn prop_underpopulated_triplet_is_untouched(
        value in positive_amount(),
        edited in any_field(),
        slot in any_field(),
    ) {
        let mut input = PriceTriplet::empty();
        input.set(slot, Some(value));
        prop_assert_eq!(solve(input, edited), input);
    }
}
