//! Margin selection types.

use serde::{Deserialize, Serialize};

/// Margin categories the admin can select for a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MarginKind {
    /// Seller-category margin. Root of the dependency chain.
    SellerCategory,
    /// Brand margin. Requires the seller-category margin.
    Brand,
    /// Product-category margin. Requires the seller-category margin.
    ProductCategory,
    /// Condition-category margin. Requires the seller-category margin.
    ConditionCategory,
    /// Customer-category margin. Independent of the others.
    CustomerCategory,
}

/// The admin's margin selection: five independent flags.
///
/// Invariant (enforced by the selection validator, not by construction):
/// `brand || product_category || condition_category` implies
/// `seller_category`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginSelection {
    /// Seller-category margin selected.
    pub seller_category: bool,
    /// Brand margin selected.
    pub brand: bool,
    /// Product-category margin selected.
    pub product_category: bool,
    /// Condition-category margin selected.
    pub condition_category: bool,
    /// Customer-category margin selected.
    pub customer_category: bool,
}

impl MarginSelection {
    /// Returns true if the given margin kind is selected.
    #[must_use]
    pub const fn is_selected(&self, kind: MarginKind) -> bool {
        match kind {
            MarginKind::SellerCategory => self.seller_category,
            MarginKind::Brand => self.brand,
            MarginKind::ProductCategory => self.product_category,
            MarginKind::ConditionCategory => self.condition_category,
            MarginKind::CustomerCategory => self.customer_category,
        }
    }

    /// Returns true if any dependent margin is selected while the
    /// seller-category margin is not.
    #[must_use]
    pub const fn has_orphaned_dependents(&self) -> bool {
        !self.seller_category && (self.brand || self.product_category || self.condition_category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dependents_require_seller_category() {
        let selection = MarginSelection {
            brand: true,
            ..MarginSelection::default()
        };
        assert!(selection.has_orphaned_dependents());

        let selection = MarginSelection {
            seller_category: true,
            brand: true,
            ..MarginSelection::default()
        };
        assert!(!selection.has_orphaned_dependents());
    }

    #[test]
    fn test_customer_category_has_no_dependency() {
        let selection = MarginSelection {
            customer_category: true,
            ..MarginSelection::default()
        };
        assert!(!selection.has_orphaned_dependents());
    }

    #[test]
    fn test_serde_uses_camel_case() {
        let json = serde_json::to_string(&MarginSelection::default()).unwrap();
        assert!(json.contains("sellerCategory"));
        assert!(json.contains("conditionCategory"));
    }
}
