//! HTTP adapters for Listra's external collaborators.
//!
//! The core crate defines the [`listra_core::calculation::CalculationClient`]
//! and [`listra_core::calculation::MetadataLookup`] traits; this crate
//! implements them over HTTP with reqwest. Transport policy (timeouts,
//! TLS) lives here, configured through `listra_shared::AppConfig`.

pub mod calculation;
pub mod metadata;

pub use calculation::HttpCalculationClient;
pub use metadata::HttpMetadataClient;

use std::time::Duration;

use listra_shared::error::{AppError, AppResult};

/// Builds a reqwest client with the given timeout.
fn build_http_client(timeout_secs: u64) -> AppResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|err| AppError::Internal(format!("failed to build HTTP client: {err}")))
}
