//! Pricing calculation orchestration.
//!
//! One wizard session owns one `PricingService` use at a time: validate
//! the selection, resolve the code fields the calculator needs, call the
//! external service, and reconcile its response. Any failure aborts the
//! whole attempt with no partial state.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::info;

use listra_shared::error::AppError;
use listra_shared::types::{SellerId, SkuFamilyId};

use crate::calculation::error::{CalculationError, SelectionError};
use crate::calculation::reconcile::{reconcile_response, ReconciliationWarning};
use crate::calculation::types::{
    CalculationRequest, CalculationResponse, CountryDeliverable, CountryPricePayload,
    ProductPayload, SellerMeta, SkuFamilyMeta,
};
use crate::calculation::validation::validate_selection;
use crate::cost::selection::CostSelectionState;
use crate::margin::MarginSelection;
use crate::variant::group::VariantGroup;
use crate::variant::types::ProductVariantRow;

/// External price-calculation service.
///
/// Implemented by the client crate; the core only decides what to send and
/// how to interpret what comes back. Transport policy (timeout, retry)
/// lives with the implementation.
pub trait CalculationClient: Send + Sync {
    /// Requests a price calculation.
    fn calculate(
        &self,
        request: &CalculationRequest,
    ) -> impl std::future::Future<Output = Result<CalculationResponse, AppError>> + Send;
}

/// Read-only lookup for SKU-family and seller metadata, keyed by id.
pub trait MetadataLookup: Send + Sync {
    /// Fetches SKU-family metadata.
    fn sku_family(
        &self,
        id: SkuFamilyId,
    ) -> impl std::future::Future<Output = Result<SkuFamilyMeta, AppError>> + Send;

    /// Fetches seller metadata.
    fn seller(
        &self,
        id: SellerId,
    ) -> impl std::future::Future<Output = Result<SellerMeta, AppError>> + Send;
}

/// Result of a successful calculation: one deliverable list per variant
/// row (order-aligned with the group), plus any reconciliation warnings.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationOutcome {
    /// Reconciled deliverables, one list per row.
    pub deliverables: Vec<Vec<CountryDeliverable>>,
    /// Non-blocking warnings recorded during reconciliation.
    pub warnings: Vec<ReconciliationWarning>,
}

/// Orchestrates validation, metadata resolution, the calculation call, and
/// reconciliation.
pub struct PricingService<C, M> {
    client: Arc<C>,
    metadata: Arc<M>,
}

impl<C: CalculationClient, M: MetadataLookup> PricingService<C, M> {
    /// Creates a new pricing service.
    #[must_use]
    pub fn new(client: Arc<C>, metadata: Arc<M>) -> Self {
        Self { client, metadata }
    }

    /// Runs one full calculation for a variant group.
    ///
    /// The group is normalized (non-master rows re-derived from the
    /// master) before anything is sent, so a drifted group can never reach
    /// the calculator.
    ///
    /// # Errors
    ///
    /// - `CalculationError::Selection` if the selection state fails
    ///   structural validation (nothing is sent).
    /// - `CalculationError::Metadata` / `CalculationError::Service` if an
    ///   external call fails (the attempt is aborted whole).
    /// - `CalculationError::MalformedResponse` if the response does not
    ///   line up with the request.
    pub async fn calculate(
        &self,
        group: &mut VariantGroup,
        margins: Option<&MarginSelection>,
        costs: &CostSelectionState,
    ) -> Result<CalculationOutcome, CalculationError> {
        let margins = margins.ok_or(SelectionError::MissingMarginSelection)?;
        validate_selection(Some(margins), costs)?;

        group.normalize();

        let seller_id = group
            .master()
            .group_fields
            .seller_id
            .ok_or(CalculationError::MissingSeller)?;
        let seller = self
            .metadata
            .seller(seller_id)
            .await
            .map_err(|source| CalculationError::Metadata { source })?;

        let mut families: BTreeMap<SkuFamilyId, SkuFamilyMeta> = BTreeMap::new();
        for row in group.rows() {
            if !families.contains_key(&row.sku_family_id) {
                let meta = self
                    .metadata
                    .sku_family(row.sku_family_id)
                    .await
                    .map_err(|source| CalculationError::Metadata { source })?;
                families.insert(row.sku_family_id, meta);
            }
        }

        let products = group
            .rows()
            .iter()
            .map(|row| build_product(row, &seller, &families[&row.sku_family_id]))
            .collect();

        let request = CalculationRequest {
            products,
            selected_margins: *margins,
            selected_costs: costs.to_request_map(),
        };

        let response = self
            .client
            .calculate(&request)
            .await
            .map_err(|source| CalculationError::Service { source })?;

        let row_count = group.rows().len();
        if response.0.len() != row_count {
            return Err(CalculationError::MalformedResponse(format!(
                "expected {row_count} row results, got {}",
                response.0.len()
            )));
        }

        let (deliverables, warnings) = reconcile_response(response, margins, costs)?;
        info!(
            rows = row_count,
            warnings = warnings.len(),
            group_code = %group.code(),
            "calculation reconciled"
        );

        Ok(CalculationOutcome {
            deliverables,
            warnings,
        })
    }
}

fn build_product(
    row: &ProductVariantRow,
    seller: &SellerMeta,
    family: &SkuFamilyMeta,
) -> ProductPayload {
    let country_pricing = row
        .prices
        .iter()
        .filter(|(_, triplet)| !triplet.is_empty())
        .map(|(country, triplet)| CountryPricePayload {
            country: country.name().to_string(),
            currency: country.currency().to_string(),
            base_currency_amount: triplet.amount,
            exchange_rate: triplet.rate,
            local_currency_amount: triplet.local,
        })
        .collect();

    ProductPayload {
        row_id: row.id,
        brand_code: family.brand_code.clone(),
        product_category_code: family.product_category_code.clone(),
        condition_code: row.grade.clone(),
        seller_code: seller.seller_code.clone(),
        customer_category_code: seller.customer_category_code.clone(),
        current_location: row.current_location(),
        country_pricing,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use rust_decimal_macros::dec;

    use listra_shared::types::{Country, GroupCode, LocationCode};

    use super::*;
    use crate::calculation::types::{RawDeliverable, RawProductResult};
    use crate::currency::PriceField;
    use crate::variant::group::GroupFieldEdit;

    struct MockClient {
        response: Result<CalculationResponse, AppError>,
        seen_request: Mutex<Option<CalculationRequest>>,
    }

    impl MockClient {
        fn returning(response: CalculationResponse) -> Self {
            Self {
                response: Ok(response),
                seen_request: Mutex::new(None),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                response: Err(AppError::ExternalService(message.into())),
                seen_request: Mutex::new(None),
            }
        }
    }

    impl CalculationClient for MockClient {
        async fn calculate(
            &self,
            request: &CalculationRequest,
        ) -> Result<CalculationResponse, AppError> {
            *self.seen_request.lock().unwrap() = Some(request.clone());
            match &self.response {
                Ok(response) => Ok(response.clone()),
                Err(err) => Err(AppError::ExternalService(err.to_string())),
            }
        }
    }

    struct MockMetadata;

    impl MetadataLookup for MockMetadata {
        async fn sku_family(&self, id: SkuFamilyId) -> Result<SkuFamilyMeta, AppError> {
            Ok(SkuFamilyMeta {
                id,
                brand_code: "APPLE".into(),
                product_category_code: "PHONE".into(),
            })
        }

        async fn seller(&self, id: SellerId) -> Result<SellerMeta, AppError> {
            Ok(SellerMeta {
                id,
                seller_code: "SELLER-7".into(),
                customer_category_code: Some("B2B".into()),
            })
        }
    }

    fn priced_group() -> VariantGroup {
        let family = SkuFamilyId::new();
        let mut group = VariantGroup::new(GroupCode::new("G-100"), ProductVariantRow::new(family));
        group
            .apply_group_edit(0, &GroupFieldEdit::Seller(Some(SellerId::new())))
            .unwrap();
        group
            .apply_group_edit(0, &GroupFieldEdit::CurrentLocation(Some(LocationCode::D)))
            .unwrap();
        group
            .edit_price(0, Country::Hongkong, PriceField::Amount, Some(dec!(100)))
            .unwrap();
        group
            .edit_price(0, Country::Hongkong, PriceField::Rate, Some(dec!(7.8)))
            .unwrap();
        group
    }

    fn one_row_response() -> CalculationResponse {
        CalculationResponse(vec![RawProductResult {
            country_deliverables: vec![RawDeliverable {
                country: "Hongkong".into(),
                currency: "HKD".into(),
                base_price: dec!(100),
                calculated_price: dec!(118.00),
                exchange_rate: dec!(7.8),
                margins: vec![],
                costs: vec![],
                charges: vec![],
            }],
        }])
    }

    fn selected_margins() -> MarginSelection {
        MarginSelection {
            seller_category: true,
            ..MarginSelection::default()
        }
    }

    #[tokio::test]
    async fn test_happy_path_builds_resolved_request() {
        let client = Arc::new(MockClient::returning(one_row_response()));
        let service = PricingService::new(Arc::clone(&client), Arc::new(MockMetadata));
        let mut group = priced_group();

        let outcome = service
            .calculate(&mut group, Some(&selected_margins()), &CostSelectionState::new())
            .await
            .unwrap();

        assert_eq!(outcome.deliverables.len(), 1);
        assert_eq!(outcome.deliverables[0][0].country, Country::Hongkong);
        assert!(outcome.warnings.is_empty());

        let request = client.seen_request.lock().unwrap().clone().unwrap();
        let product = &request.products[0];
        assert_eq!(product.brand_code, "APPLE");
        assert_eq!(product.seller_code, "SELLER-7");
        assert_eq!(product.country_pricing.len(), 1);
        assert_eq!(product.country_pricing[0].country, "Hongkong");
        assert_eq!(
            product.country_pricing[0].local_currency_amount,
            Some(dec!(780.00))
        );
    }

    #[tokio::test]
    async fn test_invalid_selection_never_reaches_the_client() {
        let client = Arc::new(MockClient::returning(one_row_response()));
        let service = PricingService::new(Arc::clone(&client), Arc::new(MockMetadata));
        let mut group = priced_group();
        let margins = MarginSelection {
            brand: true,
            ..MarginSelection::default()
        };

        let err = service
            .calculate(&mut group, Some(&margins), &CostSelectionState::new())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CalculationError::Selection(SelectionError::DependentMarginsWithoutSeller)
        ));
        assert!(client.seen_request.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_service_failure_aborts_whole_attempt() {
        let client = Arc::new(MockClient::failing("boom"));
        let service = PricingService::new(client, Arc::new(MockMetadata));
        let mut group = priced_group();

        let err = service
            .calculate(&mut group, Some(&selected_margins()), &CostSelectionState::new())
            .await
            .unwrap_err();

        assert!(matches!(err, CalculationError::Service { .. }));
    }

    #[tokio::test]
    async fn test_row_count_mismatch_is_malformed() {
        let client = Arc::new(MockClient::returning(CalculationResponse(vec![])));
        let service = PricingService::new(client, Arc::new(MockMetadata));
        let mut group = priced_group();

        let err = service
            .calculate(&mut group, Some(&selected_margins()), &CostSelectionState::new())
            .await
            .unwrap_err();

        assert!(matches!(err, CalculationError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_missing_seller_is_rejected() {
        let client = Arc::new(MockClient::returning(one_row_response()));
        let service = PricingService::new(client, Arc::new(MockMetadata));
        let family = SkuFamilyId::new();
        let mut group =
            VariantGroup::new(GroupCode::new("G-101"), ProductVariantRow::new(family));

        let err = service
            .calculate(&mut group, Some(&selected_margins()), &CostSelectionState::new())
            .await
            .unwrap_err();

        assert!(matches!(err, CalculationError::MissingSeller));
    }

    #[tokio::test]
    async fn test_group_is_normalized_before_sending() {
        let client = Arc::new(MockClient::returning(CalculationResponse(vec![
            RawProductResult {
                country_deliverables: vec![],
            },
            RawProductResult {
                country_deliverables: vec![],
            },
        ])));
        let service = PricingService::new(Arc::clone(&client), Arc::new(MockMetadata));

        // Build a two-row group where the second row drifted.
        let family = SkuFamilyId::new();
        let mut master = ProductVariantRow::new(family);
        master.group_fields.seller_id = Some(SellerId::new());
        master.group_fields.current_location = Some(LocationCode::Hk);
        let mut drifted = ProductVariantRow::new(family);
        drifted.group_fields.seller_id = master.group_fields.seller_id;
        drifted.group_fields.current_location = Some(LocationCode::D);
        let mut group =
            VariantGroup::from_rows(GroupCode::new("G-102"), vec![master, drifted]).unwrap();

        service
            .calculate(&mut group, Some(&selected_margins()), &CostSelectionState::new())
            .await
            .unwrap();

        let request = client.seen_request.lock().unwrap().clone().unwrap();
        assert_eq!(
            request.products[1].current_location,
            Some(LocationCode::Hk)
        );
    }
}
