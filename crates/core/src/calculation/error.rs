//! Calculation error types.

use thiserror::Error;

use listra_shared::error::AppError;
use listra_shared::types::CostModuleId;

/// Structural validation failures caught before any network call.
///
/// These block the calculation request and are surfaced to the admin on
/// the selection step.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    /// No margin selection was made.
    #[error("Margin selection is required")]
    MissingMarginSelection,

    /// A dependent margin is selected without the seller-category margin.
    #[error("Dependent margins selected without seller category")]
    DependentMarginsWithoutSeller,

    /// A cost id appears in more than one country's selection.
    #[error("Duplicate cost IDs detected")]
    DuplicateCostIds(CostModuleId),
}

/// Errors aborting a calculation attempt.
///
/// Any of these returns the admin to the selection step with no partial
/// state committed.
#[derive(Debug, Error)]
pub enum CalculationError {
    /// The selection failed structural validation.
    #[error(transparent)]
    Selection(#[from] SelectionError),

    /// The calculation service call failed.
    #[error("Calculation service call failed: {source}")]
    Service {
        /// Underlying service error.
        source: AppError,
    },

    /// A metadata lookup (SKU family or seller) failed.
    #[error("Metadata lookup failed: {source}")]
    Metadata {
        /// Underlying service error.
        source: AppError,
    },

    /// The service response did not match the request shape.
    #[error("Malformed calculation response: {0}")]
    MalformedResponse(String),

    /// The listing has no seller, so seller codes cannot be resolved.
    #[error("Listing is missing a seller")]
    MissingSeller,
}
