//! Cost module types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use listra_shared::types::{CostGroupId, CostModuleId};

use crate::cost::error::CostModuleError;

/// How the cost value is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostType {
    /// Value is a percentage of the priced base.
    Percentage,
    /// Value is a fixed amount.
    Fixed,
}

/// What the cost is charged against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostField {
    /// Charged per product.
    Product,
    /// Charged on the delivery.
    Delivery,
}

impl std::fmt::Display for CostField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Product => write!(f, "product"),
            Self::Delivery => write!(f, "delivery"),
        }
    }
}

/// Unit the cost value is measured in. Allowed units depend on the cost
/// field: product costs use pc/kg/moq, delivery costs use order amount or
/// cart quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CostUnit {
    /// Per piece (product).
    #[serde(rename = "pc")]
    PerPiece,
    /// Per kilogram (product).
    #[serde(rename = "kg")]
    PerKg,
    /// Per minimum order quantity (product).
    #[serde(rename = "moq")]
    PerMoq,
    /// On the order amount (delivery).
    #[serde(rename = "order amount")]
    OrderAmount,
    /// On the cart quantity (delivery).
    #[serde(rename = "cart quantity")]
    CartQuantity,
}

impl CostUnit {
    /// Returns true if this unit is valid for the given cost field.
    #[must_use]
    pub const fn valid_for(self, field: CostField) -> bool {
        match field {
            CostField::Product => {
                matches!(self, Self::PerPiece | Self::PerKg | Self::PerMoq)
            }
            CostField::Delivery => matches!(self, Self::OrderAmount | Self::CartQuantity),
        }
    }
}

impl std::fmt::Display for CostUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::PerPiece => "pc",
            Self::PerKg => "kg",
            Self::PerMoq => "moq",
            Self::OrderAmount => "order amount",
            Self::CartQuantity => "cart quantity",
        };
        write!(f, "{name}")
    }
}

/// A configurable shipping/handling charge definition, scoped to a country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostModule {
    /// Cost module ID.
    pub id: CostModuleId,
    /// Display name.
    pub name: String,
    /// Percentage or fixed.
    pub cost_type: CostType,
    /// Product or delivery charge.
    pub cost_field: CostField,
    /// Unit the value is measured in.
    pub cost_unit: CostUnit,
    /// The cost value (>= 0).
    pub value: Decimal,
    /// Optional lower clamp bound.
    pub min_value: Option<Decimal>,
    /// Optional upper clamp bound.
    pub max_value: Option<Decimal>,
    /// Costs sharing a group are selected/deselected as one unit.
    pub group_id: Option<CostGroupId>,
    /// Applicable only when current and delivery locations differ.
    pub is_express_delivery: bool,
    /// Applicable only when current and delivery locations coincide.
    pub is_same_location_charge: bool,
}

/// Input for building a validated cost module.
#[derive(Debug, Clone)]
pub struct CostModuleInput {
    /// Cost module ID.
    pub id: CostModuleId,
    /// Display name.
    pub name: String,
    /// Percentage or fixed.
    pub cost_type: CostType,
    /// Product or delivery charge.
    pub cost_field: CostField,
    /// Unit the value is measured in.
    pub cost_unit: CostUnit,
    /// The cost value.
    pub value: Decimal,
    /// Optional lower clamp bound.
    pub min_value: Option<Decimal>,
    /// Optional upper clamp bound.
    pub max_value: Option<Decimal>,
    /// Group the cost belongs to.
    pub group_id: Option<CostGroupId>,
    /// Express-delivery charge flag.
    pub is_express_delivery: bool,
    /// Same-location charge flag.
    pub is_same_location_charge: bool,
}

impl CostModule {
    /// Builds a cost module, enforcing the field/unit pairing, the
    /// non-negative value rule, and bound ordering.
    pub fn new(input: CostModuleInput) -> Result<Self, CostModuleError> {
        if !input.cost_unit.valid_for(input.cost_field) {
            return Err(CostModuleError::UnitMismatch {
                field: input.cost_field,
                unit: input.cost_unit,
            });
        }
        if input.value < Decimal::ZERO {
            return Err(CostModuleError::NegativeValue);
        }
        if let (Some(min), Some(max)) = (input.min_value, input.max_value)
            && min > max
        {
            return Err(CostModuleError::InvalidBounds);
        }

        Ok(Self {
            id: input.id,
            name: input.name,
            cost_type: input.cost_type,
            cost_field: input.cost_field,
            cost_unit: input.cost_unit,
            value: input.value,
            min_value: input.min_value,
            max_value: input.max_value,
            group_id: input.group_id,
            is_express_delivery: input.is_express_delivery,
            is_same_location_charge: input.is_same_location_charge,
        })
    }

    /// True if this cost shares the given group.
    #[must_use]
    pub fn in_group(&self, group_id: &CostGroupId) -> bool {
        self.group_id.as_ref() == Some(group_id)
    }
}
