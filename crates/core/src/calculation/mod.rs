//! Selection validation, the calculation service contract, and result
//! reconciliation.

pub mod error;
pub mod reconcile;
pub mod service;
pub mod types;
pub mod validation;

pub use error::{CalculationError, SelectionError};
pub use reconcile::{reconcile_response, ReconciliationWarning, UnselectedLine};
pub use service::{CalculationClient, CalculationOutcome, MetadataLookup, PricingService};
pub use types::{
    CalculationRequest, CalculationResponse, CostLine, CountryDeliverable, CountryPricePayload,
    MarginLine, ProductPayload, RawDeliverable, RawProductResult, SellerMeta, SkuFamilyMeta,
};
pub use validation::validate_selection;
