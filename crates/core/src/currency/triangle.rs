//! Bidirectional derivation among the three linked currency fields.
//!
//! Each country on a listing carries three slots: the base-currency amount,
//! the exchange rate, and the local-currency amount. Editing any one slot
//! re-derives the others so that `amount * rate == local` always holds once
//! two of the three are known.
//!
//! CRITICAL: Rounding strategy for derived values:
//! - Prices round to 2 decimal places
//! - Exchange rates round to 4 decimal places
//! - Use banker's rounding (round half to even)

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Decimal places for derived price values.
pub const PRICE_DECIMALS: u32 = 2;

/// Decimal places for derived exchange rates.
pub const RATE_DECIMALS: u32 = 4;

/// The three linked price slots of one country.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceField {
    /// Base-currency amount (e.g., USD).
    Amount,
    /// Exchange rate from base to local currency.
    Rate,
    /// Local-currency amount (e.g., HKD or AED).
    Local,
}

/// Per-country price data: the three linked slots.
///
/// A slot counts as *populated* only when it holds a value greater than
/// zero; empty and zero slots never participate in a derivation, which is
/// what guards every division below.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceTriplet {
    /// Base-currency amount.
    pub amount: Option<Decimal>,
    /// Exchange rate.
    pub rate: Option<Decimal>,
    /// Local-currency amount.
    pub local: Option<Decimal>,
}

impl PriceTriplet {
    /// Creates an empty triplet.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            amount: None,
            rate: None,
            local: None,
        }
    }

    /// Returns the value of the given slot.
    #[must_use]
    pub const fn get(&self, field: PriceField) -> Option<Decimal> {
        match field {
            PriceField::Amount => self.amount,
            PriceField::Rate => self.rate,
            PriceField::Local => self.local,
        }
    }

    /// Sets the value of the given slot.
    pub const fn set(&mut self, field: PriceField, value: Option<Decimal>) {
        match field {
            PriceField::Amount => self.amount = value,
            PriceField::Rate => self.rate = value,
            PriceField::Local => self.local = value,
        }
    }

    /// Returns true if no slot holds a populated value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.populated_count() == 0
    }

    /// Number of slots holding a value greater than zero.
    #[must_use]
    pub fn populated_count(&self) -> usize {
        [self.amount, self.rate, self.local]
            .iter()
            .filter(|slot| is_populated(**slot))
            .count()
    }
}

fn is_populated(slot: Option<Decimal>) -> bool {
    slot.is_some_and(|value| value > Decimal::ZERO)
}

fn round_price(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(PRICE_DECIMALS, RoundingStrategy::MidpointNearestEven)
}

fn round_rate(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(RATE_DECIMALS, RoundingStrategy::MidpointNearestEven)
}

/// Re-derives the triplet after an edit to one slot.
///
/// Exactly one derivation fires, chosen by the edited field, and the edited
/// slot is never overwritten:
///
/// - edited amount: `local = amount * rate`, falling back to
///   `rate = local / amount`
/// - edited rate: `local = amount * rate`, falling back to
///   `amount = local / rate`
/// - edited local: `amount = local / rate`, falling back to
///   `rate = local / amount`
///
/// With fewer than two populated slots (or the edited slot cleared or set to
/// zero, leaving no usable derivation) the triplet is returned unchanged.
/// This silent no-op is expected steady state while the admin is still
/// typing, not an error.
#[must_use]
pub fn solve(triplet: PriceTriplet, edited: PriceField) -> PriceTriplet {
    if triplet.populated_count() < 2 {
        return triplet;
    }

    let mut result = triplet;
    let amount = triplet.amount.filter(|v| *v > Decimal::ZERO);
    let rate = triplet.rate.filter(|v| *v > Decimal::ZERO);
    let local = triplet.local.filter(|v| *v > Decimal::ZERO);

    match edited {
        PriceField::Amount => {
            if let (Some(amount), Some(rate)) = (amount, rate) {
                result.local = Some(round_price(amount * rate));
            } else if let (Some(amount), Some(local)) = (amount, local) {
                result.rate = Some(round_rate(local / amount));
            }
        }
        PriceField::Rate => {
            if let (Some(amount), Some(rate)) = (amount, rate) {
                result.local = Some(round_price(amount * rate));
            } else if let (Some(rate), Some(local)) = (rate, local) {
                result.amount = Some(round_price(local / rate));
            }
        }
        PriceField::Local => {
            if let (Some(local), Some(rate)) = (local, rate) {
                result.amount = Some(round_price(local / rate));
            } else if let (Some(local), Some(amount)) = (local, amount) {
                result.rate = Some(round_rate(local / amount));
            }
        }
    }

    result
}
