//! Product variant row types.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use listra_shared::types::{Country, LocationCode, SkuFamilyId, VariantRowId};

use crate::currency::{solve, PriceField, PriceTriplet};
use crate::variant::group::GroupFields;

/// One sellable SKU configuration inside a listing.
///
/// A row is exclusively owned by the form session until submitted; the
/// priced per-country deliverables are attached only after a successful
/// calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductVariantRow {
    /// Row ID.
    pub id: VariantRowId,
    /// SKU family this variant belongs to.
    pub sku_family_id: SkuFamilyId,
    /// Storage capacity (e.g., "256GB").
    pub storage: Option<String>,
    /// Colour name.
    pub colour: Option<String>,
    /// Condition grade (e.g., "A", "B+").
    pub grade: Option<String>,
    /// Per-country price data.
    pub prices: BTreeMap<Country, PriceTriplet>,
    /// Fields synchronized across the variant group.
    pub group_fields: GroupFields,
}

impl ProductVariantRow {
    /// Creates a row for the given SKU family with empty pricing.
    #[must_use]
    pub fn new(sku_family_id: SkuFamilyId) -> Self {
        Self {
            id: VariantRowId::new(),
            sku_family_id,
            storage: None,
            colour: None,
            grade: None,
            prices: BTreeMap::new(),
            group_fields: GroupFields::default(),
        }
    }

    /// Returns the row's current warehouse location, if set.
    #[must_use]
    pub fn current_location(&self) -> Option<LocationCode> {
        self.group_fields.current_location
    }

    /// Delivery locations derived from the price data.
    ///
    /// A country's location code is present iff that country's price
    /// triplet is non-empty. This set is computed, never edited directly.
    #[must_use]
    pub fn delivery_locations(&self) -> BTreeSet<LocationCode> {
        self.prices
            .iter()
            .filter(|(_, triplet)| !triplet.is_empty())
            .map(|(country, _)| country.location_code())
            .collect()
    }

    /// True if this row's current location coincides with the country's
    /// location and the row delivers to that country.
    #[must_use]
    pub fn is_same_location_match(&self, country: Country) -> bool {
        let code = country.location_code();
        self.current_location() == Some(code) && self.delivery_locations().contains(&code)
    }

    /// True if this row has a current location and ships between different
    /// locations with respect to the given country.
    #[must_use]
    pub fn ships_cross_location(&self, country: Country) -> bool {
        self.current_location().is_some() && !self.is_same_location_match(country)
    }

    /// Edits one price slot for a country and re-derives the linked slots.
    ///
    /// The edited slot itself is never overwritten by the derivation.
    pub fn edit_price(&mut self, country: Country, field: PriceField, value: Option<Decimal>) {
        let triplet = self.prices.entry(country).or_default();
        triplet.set(field, value);
        *triplet = solve(*triplet, field);
    }
}
