//! Calculation request/response contract and deliverable types.
//!
//! The request mirrors what the external price-calculation service
//! expects; the response types tolerate the service's loose field naming
//! (`exchangeRate` vs `xe`, `id` vs `costId`, `costs` alongside
//! `charges`). Kept lines are carried into [`CountryDeliverable`] records
//! byte-for-byte: reconciliation changes set membership, never values.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use listra_shared::types::{
    CostGroupId, CostModuleId, Country, LocationCode, SellerId, SkuFamilyId, VariantRowId,
};

use crate::margin::{MarginKind, MarginSelection};

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// Input to the external calculation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRequest {
    /// Product rows with resolved code fields.
    pub products: Vec<ProductPayload>,
    /// The admin's margin selection.
    pub selected_margins: MarginSelection,
    /// Selected cost ids keyed by country name.
    pub selected_costs: BTreeMap<String, Vec<CostModuleId>>,
}

/// One product row in the calculation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    /// Originating variant row.
    pub row_id: VariantRowId,
    /// Brand code resolved from SKU-family metadata.
    pub brand_code: String,
    /// Product-category code resolved from SKU-family metadata.
    pub product_category_code: String,
    /// Condition code (the row's grade).
    pub condition_code: Option<String>,
    /// Seller code resolved from seller metadata.
    pub seller_code: String,
    /// Customer-category code resolved from seller metadata.
    pub customer_category_code: Option<String>,
    /// Current warehouse location.
    pub current_location: Option<LocationCode>,
    /// Per-country price data, one entry per priced country.
    pub country_pricing: Vec<CountryPricePayload>,
}

/// Per-country price data in the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryPricePayload {
    /// Country name as the backend spells it.
    pub country: String,
    /// Local currency code.
    pub currency: String,
    /// Base-currency amount.
    pub base_currency_amount: Option<Decimal>,
    /// Exchange rate.
    pub exchange_rate: Option<Decimal>,
    /// Local-currency amount.
    pub local_currency_amount: Option<Decimal>,
}

// ---------------------------------------------------------------------------
// Metadata lookups
// ---------------------------------------------------------------------------

/// SKU-family metadata needed to resolve request code fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkuFamilyMeta {
    /// SKU family id.
    pub id: SkuFamilyId,
    /// Brand code.
    pub brand_code: String,
    /// Product-category code.
    pub product_category_code: String,
}

/// Seller metadata needed to resolve request code fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerMeta {
    /// Seller id.
    pub id: SellerId,
    /// Seller code.
    pub seller_code: String,
    /// Customer-category code, when the seller has one.
    pub customer_category_code: Option<String>,
}

// ---------------------------------------------------------------------------
// Response (raw, as the service sends it)
// ---------------------------------------------------------------------------

/// Output of the external calculation service: one entry per submitted
/// product row, order-aligned with the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalculationResponse(pub Vec<RawProductResult>);

/// Per-row calculation result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProductResult {
    /// Country-level results for this row.
    #[serde(default)]
    pub country_deliverables: Vec<RawDeliverable>,
}

/// One country's raw result, before reconciliation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDeliverable {
    /// Country name.
    pub country: String,
    /// Local currency code.
    pub currency: String,
    /// Base price the service calculated from.
    pub base_price: Decimal,
    /// Final calculated price.
    pub calculated_price: Decimal,
    /// Exchange rate; the service spells this `exchangeRate` or `xe`.
    #[serde(alias = "xe")]
    pub exchange_rate: Decimal,
    /// Margin lines the service applied.
    #[serde(default)]
    pub margins: Vec<MarginLine>,
    /// Cost lines the service applied.
    #[serde(default)]
    pub costs: Vec<CostLine>,
    /// Alternate spelling for cost lines; some responses use both.
    #[serde(default)]
    pub charges: Vec<CostLine>,
}

/// A margin line in a calculation result. All numeric fields are carried
/// through reconciliation untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginLine {
    /// Originating margin category.
    #[serde(rename = "type")]
    pub margin_type: MarginKind,
    /// The configured margin value.
    pub margin_value: Option<Decimal>,
    /// The amount the service computed for this line.
    pub calculated_amount: Decimal,
}

/// A cost line in a calculation result. The service identifies the cost by
/// either of two interchangeable id fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostLine {
    /// Cost module id (first spelling).
    #[serde(default)]
    pub id: Option<CostModuleId>,
    /// Cost module id (second spelling).
    #[serde(default)]
    pub cost_id: Option<CostModuleId>,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// The configured cost value.
    #[serde(default)]
    pub value: Option<Decimal>,
    /// Lower clamp bound.
    #[serde(default)]
    pub min_value: Option<Decimal>,
    /// Upper clamp bound.
    #[serde(default)]
    pub max_value: Option<Decimal>,
    /// Group the cost belongs to.
    #[serde(default)]
    pub group_id: Option<CostGroupId>,
    /// Express-delivery flag.
    #[serde(default)]
    pub is_express_delivery: bool,
    /// Same-location-charge flag.
    #[serde(default)]
    pub is_same_location_charge: bool,
    /// The amount the service computed for this line.
    pub calculated_amount: Decimal,
}

impl CostLine {
    /// Returns whichever id field the service populated.
    #[must_use]
    pub fn effective_id(&self) -> Option<CostModuleId> {
        self.id.or(self.cost_id)
    }
}

// ---------------------------------------------------------------------------
// Reconciled result
// ---------------------------------------------------------------------------

/// The priced, per-country result attached to a product row after
/// reconciliation. Immutable once attached; a recalculation replaces the
/// whole list, it never merges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryDeliverable {
    /// The country this result prices.
    pub country: Country,
    /// Local currency code.
    pub currency: String,
    /// Base price.
    pub base_price: Decimal,
    /// Final calculated price.
    pub calculated_price: Decimal,
    /// Exchange rate used.
    pub exchange_rate: Decimal,
    /// Margin lines the admin selected.
    pub margins: Vec<MarginLine>,
    /// Cost lines the admin selected.
    pub costs: Vec<CostLine>,
}
